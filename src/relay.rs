//! Relay bank with active-low coil drive.
//!
//! The relay board energizes a coil when its input is pulled to 0 V, so
//! [`RelayBank::set`] writes the inverted level. With the controller
//! unpowered every coil is released, which is the passthrough topology.
//!
//! Control is open loop: there is no contact feedback, so a write that the
//! driver accepts is assumed to have moved the relay. Settle time is the
//! caller's job (see [`crate::timing`]).

use log::debug;

use crate::traits::{RelayDriver, RelayId};

/// Four relays and their commanded state.
///
/// # Example
///
/// ```rust
/// use yag_trigger::relay::RelayBank;
/// use yag_trigger::traits::RelayId;
/// use yag_trigger::hal::MockBench;
///
/// let bench = MockBench::new();
/// let mut bank = RelayBank::new(bench.relays());
///
/// bank.set(RelayId::Relay3, true).unwrap();
/// assert!(bank.is_energized(RelayId::Relay3));
/// assert!(!bench.relay_level(RelayId::Relay3)); // driven low
/// ```
pub struct RelayBank<D: RelayDriver> {
    driver: D,
    energized: [bool; 4],
}

impl<D: RelayDriver> RelayBank<D> {
    /// Wrap a driver. All relays are recorded as de-energized; call
    /// [`release_all`](Self::release_all) to make the pins agree.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            energized: [false; 4],
        }
    }

    /// Energize or release one relay immediately.
    pub fn set(&mut self, relay: RelayId, energized: bool) -> Result<(), D::Error> {
        self.driver.write(relay, !energized)?;
        self.energized[relay.index()] = energized;
        debug!(
            "{} {}",
            relay.as_str(),
            if energized { "energized" } else { "released" }
        );
        Ok(())
    }

    /// Release every relay in bank order.
    pub fn release_all(&mut self) -> Result<(), D::Error> {
        for relay in RelayId::ALL {
            self.set(relay, false)?;
        }
        Ok(())
    }

    /// Commanded state of one relay.
    #[inline]
    pub fn is_energized(&self, relay: RelayId) -> bool {
        self.energized[relay.index()]
    }

    /// Commanded state of the whole bank, relay1 first.
    #[inline]
    pub fn snapshot(&self) -> [bool; 4] {
        self.energized
    }

    /// True when relay4 is released, i.e. the sense input is isolated from
    /// the welder-side voltage.
    #[inline]
    pub fn sense_isolated(&self) -> bool {
        !self.is_energized(RelayId::Relay4)
    }

    /// Access the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDriver {
        writes: Vec<(RelayId, bool)>,
        fail: bool,
    }

    impl RelayDriver for RecordingDriver {
        type Error = ();

        fn write(&mut self, relay: RelayId, high: bool) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((relay, high));
            Ok(())
        }
    }

    #[test]
    fn energize_drives_low() {
        let mut bank = RelayBank::new(RecordingDriver::default());
        bank.set(RelayId::Relay2, true).unwrap();
        assert_eq!(bank.driver().writes, vec![(RelayId::Relay2, false)]);
        assert!(bank.is_energized(RelayId::Relay2));
    }

    #[test]
    fn release_drives_high() {
        let mut bank = RelayBank::new(RecordingDriver::default());
        bank.set(RelayId::Relay1, true).unwrap();
        bank.set(RelayId::Relay1, false).unwrap();
        assert_eq!(bank.driver().writes.last(), Some(&(RelayId::Relay1, true)));
        assert!(!bank.is_energized(RelayId::Relay1));
    }

    #[test]
    fn release_all_writes_every_relay_high() {
        let mut bank = RelayBank::new(RecordingDriver::default());
        bank.release_all().unwrap();
        assert_eq!(
            bank.driver().writes,
            vec![
                (RelayId::Relay1, true),
                (RelayId::Relay2, true),
                (RelayId::Relay3, true),
                (RelayId::Relay4, true),
            ]
        );
        assert_eq!(bank.snapshot(), [false; 4]);
    }

    #[test]
    fn sense_isolation_tracks_relay4() {
        let mut bank = RelayBank::new(RecordingDriver::default());
        assert!(bank.sense_isolated());
        bank.set(RelayId::Relay4, true).unwrap();
        assert!(!bank.sense_isolated());
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let mut bank = RelayBank::new(RecordingDriver {
            fail: true,
            ..Default::default()
        });
        assert!(bank.set(RelayId::Relay3, true).is_err());
        assert!(!bank.is_energized(RelayId::Relay3));
    }
}
