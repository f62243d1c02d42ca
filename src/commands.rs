//! Operator command set and reply formatting.
//!
//! Commands arrive as ASCII lines (CR LF terminated on the wire, stripped
//! before parsing). Tokens are separated by whitespace; parameters are
//! decimal seconds.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `normal` | passthrough mode |
//! | `spot <delay> <on>` | spot mode with the given program |
//! | `stitch <delay> <on> <off>` | stitch mode with the given program |
//! | `mode?` | current mode name |
//! | `program?` | both stored programs |
//! | `temp?` | board temperature |
//! | `counters?` | weld counters |
//! | `help` | usage |
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::{Command, CommandError, SpotParams};
//!
//! assert_eq!(
//!     Command::parse("spot 0.2 1.0"),
//!     Ok(Command::Spot(SpotParams::new(0.2, 1.0)))
//! );
//! assert_eq!(Command::parse("mode?"), Ok(Command::QueryMode));
//! assert_eq!(Command::parse("weld"), Err(CommandError::Unknown));
//! assert!(matches!(
//!     Command::parse("spot 0.2"),
//!     Err(CommandError::ArgumentCount { expected: 2, found: 1, .. })
//! ));
//! ```

use core::fmt::Write;
use core::str::SplitWhitespace;

use heapless::String as HString;

use crate::config::short_string;
use crate::error::CommandError;
use crate::mode::{Counters, SpotParams, StitchParams};

/// Maximum length of one reply (all lines, CR LF included).
pub const REPLY_CAPACITY: usize = 256;

/// A reply ready to be written to the transport.
pub type Reply = HString<REPLY_CAPACITY>;

/// Prefix of every error reply.
pub const ERROR_PREFIX: &str = "YAG_ERROR: ";

/// Line terminator of the protocol.
pub const LINE_END: &str = "\r\n";

/// Usage lines returned by `help`.
pub const HELP_LINES: [&str; 8] = [
    "normal",
    "spot <delay> <ON time>",
    "stitch <delay> <ON time> <OFF time>",
    "mode?",
    "program?",
    "temp?",
    "counters?",
    "help",
];

/// A parsed operator command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Switch to passthrough.
    Normal,
    /// Switch to spot mode with this program.
    Spot(SpotParams),
    /// Switch to stitch mode with this program.
    Stitch(StitchParams),
    /// Report the mode name.
    QueryMode,
    /// Report both programs.
    QueryProgram,
    /// Report the board temperature.
    QueryTemperature,
    /// Report the weld counters.
    QueryCounters,
    /// Report usage.
    Help,
}

impl Command {
    /// Parse one line (terminator already removed or not; surrounding
    /// whitespace is ignored).
    ///
    /// Keywords are matched exactly. A wrong parameter count is reported
    /// before any parameter is converted.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().ok_or(CommandError::Unknown)?;

        let command = match keyword {
            "normal" => Command::Normal,
            "spot" => {
                let [delay, on_time] = parameters("spot", tokens)?;
                return Ok(Command::Spot(SpotParams::new(delay, on_time)));
            }
            "stitch" => {
                let [delay, on_time, off_time] = parameters("stitch", tokens)?;
                return Ok(Command::Stitch(StitchParams::new(delay, on_time, off_time)));
            }
            "mode?" => Command::QueryMode,
            "program?" => Command::QueryProgram,
            "temp?" => Command::QueryTemperature,
            "counters?" => Command::QueryCounters,
            "help" => Command::Help,
            _ => return Err(CommandError::Unknown),
        };

        // Everything else takes no parameters
        parameters::<0>(keyword_name(&command), tokens)?;
        Ok(command)
    }

    /// True for commands that change the operating mode.
    #[inline]
    pub const fn changes_mode(&self) -> bool {
        matches!(
            self,
            Command::Normal | Command::Spot(_) | Command::Stitch(_)
        )
    }
}

fn keyword_name(command: &Command) -> &'static str {
    match command {
        Command::Normal => "normal",
        Command::Spot(_) => "spot",
        Command::Stitch(_) => "stitch",
        Command::QueryMode => "mode?",
        Command::QueryProgram => "program?",
        Command::QueryTemperature => "temp?",
        Command::QueryCounters => "counters?",
        Command::Help => "help",
    }
}

/// Take exactly `N` decimal parameters from `tokens`.
fn parameters<const N: usize>(
    command: &'static str,
    tokens: SplitWhitespace<'_>,
) -> Result<[f64; N], CommandError> {
    let found = tokens.clone().count();
    if found != N {
        return Err(CommandError::ArgumentCount {
            command,
            expected: N,
            found,
        });
    }

    let mut values = [0.0; N];
    for (slot, token) in values.iter_mut().zip(tokens) {
        *slot = parse_seconds(token)?;
    }
    Ok(values)
}

/// Parse a decimal seconds value. Any finite value is accepted.
fn parse_seconds(token: &str) -> Result<f64, CommandError> {
    let value: f64 = token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(short_string(token)))?;
    if !value.is_finite() {
        return Err(CommandError::NonFinite(short_string(token)));
    }
    Ok(value)
}

// ============================================================================
// Reply formatting
// ============================================================================

/// Write a seconds value the way the operator typed it: `0.2`, `1.0`, `-3.0`.
pub fn write_seconds<W: Write>(out: &mut W, seconds: f64) -> core::fmt::Result {
    if seconds.is_finite() && seconds == (seconds as i64) as f64 {
        write!(out, "{:.1}", seconds)
    } else {
        write!(out, "{}", seconds)
    }
}

/// Append one line plus terminator. Silently truncates at capacity.
pub fn push_line(reply: &mut Reply, args: core::fmt::Arguments<'_>) {
    let _ = reply.write_fmt(args);
    let _ = reply.push_str(LINE_END);
}

/// `YAG_ERROR: <message>` reply.
pub fn error_reply(message: &dyn core::fmt::Display) -> Reply {
    let mut reply = Reply::new();
    push_line(&mut reply, format_args!("{}{}", ERROR_PREFIX, message));
    reply
}

/// Both program lines for `program?`.
pub fn program_reply(spot: &SpotParams, stitch: &StitchParams) -> Reply {
    let mut reply = Reply::new();
    let _ = reply.push_str("spot delay: ");
    let _ = write_seconds(&mut reply, spot.delay);
    let _ = reply.push_str(", ON: ");
    let _ = write_seconds(&mut reply, spot.on_time);
    let _ = reply.push_str(LINE_END);

    let _ = reply.push_str("stitch delay: ");
    let _ = write_seconds(&mut reply, stitch.delay);
    let _ = reply.push_str(", ON: ");
    let _ = write_seconds(&mut reply, stitch.on_time);
    let _ = reply.push_str(", OFF: ");
    let _ = write_seconds(&mut reply, stitch.off_time);
    let _ = reply.push_str(LINE_END);
    reply
}

/// Counter line for `counters?`.
pub fn counters_reply(counters: &Counters) -> Reply {
    let mut reply = Reply::new();
    push_line(
        &mut reply,
        format_args!(
            "spot counter: {}, stitch counter: {}",
            counters.spot_count, counters.stitch_count
        ),
    );
    reply
}

/// Usage text for `help`.
pub fn help_reply() -> Reply {
    let mut reply = Reply::new();
    for line in HELP_LINES {
        push_line(&mut reply, format_args!("{}", line));
    }
    reply
}
