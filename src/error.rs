//! Error types.
//!
//! | Class | Type | Effect |
//! |-------|------|--------|
//! | Protocol error | [`CommandError::Unknown`] | `YAG_ERROR: wrong command`, no state change |
//! | Configuration error | [`CommandError::ArgumentCount`], [`CommandError::InvalidNumber`], [`CommandError::NonFinite`] | reported, no state change |
//! | Hardware | [`Error::Hardware`] | driver error from a relay or trigger pin |
//!
//! An edge seen in Normal mode is not an error value: it is counted by the
//! [`TriggerMonitor`](crate::monitor::TriggerMonitor) and reported as
//! [`Activity::ContractViolation`](crate::Activity::ContractViolation).

use crate::config::ShortString;

/// A command line that was not accepted.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Not a known command.
    #[error("wrong command")]
    Unknown,

    /// A mode command with the wrong number of parameters.
    #[error("{command} expects {expected} parameters, got {found}")]
    ArgumentCount {
        /// Command keyword.
        command: &'static str,
        /// Parameters required.
        expected: usize,
        /// Parameters supplied.
        found: usize,
    },

    /// A parameter that is not a decimal number.
    #[error("invalid number '{0}'")]
    InvalidNumber(ShortString),

    /// A parameter that parsed to NaN or infinity.
    #[error("parameter '{0}' is not finite")]
    NonFinite(ShortString),
}

/// Controller error, generic over the hardware error type.
#[derive(Debug, thiserror::Error)]
pub enum Error<E: core::fmt::Debug> {
    /// Command rejected before any state changed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Relay or trigger pin operation failed.
    #[error("hardware error: {0:?}")]
    Hardware(E),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::short_string;

    #[test]
    fn unknown_message() {
        assert_eq!(format!("{}", CommandError::Unknown), "wrong command");
    }

    #[test]
    fn argument_count_message() {
        let err = CommandError::ArgumentCount {
            command: "spot",
            expected: 2,
            found: 1,
        };
        assert_eq!(format!("{}", err), "spot expects 2 parameters, got 1");
    }

    #[test]
    fn invalid_number_message() {
        let err = CommandError::InvalidNumber(short_string("abc"));
        assert_eq!(format!("{}", err), "invalid number 'abc'");
    }

    #[test]
    fn command_error_converts_into_error() {
        let err: Error<()> = CommandError::Unknown.into();
        assert!(matches!(err, Error::Command(CommandError::Unknown)));
        assert_eq!(format!("{}", err), "wrong command");
    }

    #[test]
    fn hardware_error_message() {
        let err: Error<&str> = Error::Hardware("pin");
        assert_eq!(format!("{}", err), "hardware error: \"pin\"");
    }
}
