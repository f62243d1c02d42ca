//! The hardware the controller drives, bundled.

use crate::relay::RelayBank;
use crate::traits::{Delay, RelayDriver, TriggerInput};

/// Relay bank, trigger input, and delay owned together by the main context.
///
/// Relay driver and trigger input share one error type so that a
/// reconfiguration step can fail with a single error.
pub struct Rig<R, T, D>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    /// Relay outputs.
    pub relays: RelayBank<R>,
    /// Trigger-sense input.
    pub trigger: T,
    /// Blocking delay.
    pub delay: D,
}

impl<R, T, D> Rig<R, T, D>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    /// Bundle the three peripherals.
    pub fn new(relays: R, trigger: T, delay: D) -> Self {
        Self {
            relays: RelayBank::new(relays),
            trigger,
            delay,
        }
    }

    /// Blocking wait, then give the trigger input a chance to re-arm.
    pub fn hold(&mut self, ms: u32) -> Result<(), R::Error> {
        if ms > 0 {
            self.delay.delay_ms(ms);
        }
        self.trigger.rearm()
    }
}
