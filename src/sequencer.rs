//! Spot and stitch weld procedures.
//!
//! A procedure starts once the trigger flag is latched in an armed mode and
//! drives relay3 (the simulated trigger toward the welder) through timed
//! phases. Procedures block the main context until they finish; nothing
//! cancels them short of power loss.
//!
//! # Spot
//!
//! ```text
//! delay | count | relay3 on, 100ms | on_time | relay3 off, 100ms
//!       | wait for release | 100ms bounce guard | clear flag
//! ```
//!
//! Exactly one weld per press-release cycle, however long the press is held.
//!
//! # Stitch
//!
//! ```text
//! delay | cycle 1: count, relay3 on, 100ms, on_time, CLEAR FLAG, relay3 off, 100ms, off_time
//!       | line asserted?  yes -> cycle while the line is asserted at each OFF->ON boundary
//!                         no  -> cycle until a new edge latches the flag
//!       | clear flag
//! ```
//!
//! The flag is cleared in the middle of the first cycle, after the ON phase.
//! Edges during the grace delay and the first ON phase (the press bounce
//! train) are therefore absorbed, and any later edge can stop a tapped
//! sequence. Spot, by contrast, only clears after the release guard.
//!
//! # Driver errors
//!
//! A procedure that fails part-way releases relay3 and drops the flag before
//! returning the error, so the welder is never left firing.

use log::{error, info, warn};

use crate::mode::{Counters, SpotParams, StitchParams};
use crate::monitor::TriggerLatch;
use crate::rig::Rig;
use crate::timing::{BOUNCE_GUARD_MS, RELEASE_POLL_MS, SETTLE_MS};
use crate::traits::{Delay, RelayDriver, RelayId, TriggerInput};

/// How a stitch procedure ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StitchTermination {
    /// Hold-to-stitch: the trigger was no longer asserted at an OFF->ON
    /// boundary.
    Released,
    /// Tap-to-start, tap-to-stop: a fresh press latched the flag.
    Repressed,
}

/// Result of one stitch procedure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StitchReport {
    /// ON/OFF cycles executed by this procedure.
    pub cycles: u32,
    /// What ended the procedure.
    pub termination: StitchTermination,
}

/// Borrowed view of everything a procedure touches.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use yag_trigger::hal::MockBench;
/// use yag_trigger::monitor::TriggerLatch;
/// use yag_trigger::rig::Rig;
/// use yag_trigger::sequencer::Sequencer;
/// use yag_trigger::{Counters, SpotParams};
///
/// let bench = MockBench::new();
/// let mut rig = Rig::new(bench.relays(), bench.trigger(), bench.delay());
/// let latch = Arc::new(TriggerLatch::new());
/// let mut counters = Counters::default();
///
/// // Trigger already released: one weld, then return
/// Sequencer::new(&mut rig, &latch, &mut counters)
///     .run_spot(&SpotParams::new(0.2, 1.0))
///     .unwrap();
/// assert_eq!(counters.spot_count, 1);
/// ```
pub struct Sequencer<'a, R, T, D>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    rig: &'a mut Rig<R, T, D>,
    latch: &'a TriggerLatch,
    counters: &'a mut Counters,
}

impl<'a, R, T, D> Sequencer<'a, R, T, D>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    /// Borrow the rig, latch, and counters for one procedure.
    pub fn new(
        rig: &'a mut Rig<R, T, D>,
        latch: &'a TriggerLatch,
        counters: &'a mut Counters,
    ) -> Self {
        Self {
            rig,
            latch,
            counters,
        }
    }

    /// Run the one-shot spot procedure. Returns the new spot count.
    pub fn run_spot(&mut self, params: &SpotParams) -> Result<u32, R::Error> {
        let result = self.spot_phases(params);
        if result.is_err() {
            self.abort("spot");
        }
        result
    }

    /// Run the repeating stitch procedure.
    pub fn run_stitch(&mut self, params: &StitchParams) -> Result<StitchReport, R::Error> {
        let result = self.stitch_phases(params);
        if result.is_err() {
            self.abort("stitch");
        }
        result
    }

    fn spot_phases(&mut self, params: &SpotParams) -> Result<u32, R::Error> {
        // Grace period; the press bounce train dies out here
        self.rig.hold(params.delay_ms())?;
        self.counters.spot_count += 1;

        self.rig.relays.set(RelayId::Relay3, true)?;
        self.rig.hold(SETTLE_MS)?;
        self.rig.hold(params.on_ms())?;
        self.rig.relays.set(RelayId::Relay3, false)?;
        self.rig.hold(SETTLE_MS)?;

        self.wait_for_release()?;
        self.rig.hold(BOUNCE_GUARD_MS)?;
        self.latch.clear();

        info!("spot weld #{} done", self.counters.spot_count);
        Ok(self.counters.spot_count)
    }

    fn stitch_phases(&mut self, params: &StitchParams) -> Result<StitchReport, R::Error> {
        self.rig.hold(params.delay_ms())?;

        // First cycle by hand: the flag is cleared after its ON phase
        self.counters.stitch_count += 1;
        self.rig.relays.set(RelayId::Relay3, true)?;
        self.rig.hold(SETTLE_MS)?;
        self.rig.hold(params.on_ms())?;
        self.latch.clear();
        self.rig.relays.set(RelayId::Relay3, false)?;
        self.rig.hold(SETTLE_MS)?;
        self.rig.hold(params.off_ms())?;
        let mut cycles = 1;

        let termination = if self.rig.trigger.is_asserted() {
            while self.rig.trigger.is_asserted() {
                self.stitch_cycle(params)?;
                cycles += 1;
            }
            StitchTermination::Released
        } else {
            while !self.latch.is_latched() {
                self.stitch_cycle(params)?;
                cycles += 1;
            }
            StitchTermination::Repressed
        };
        self.latch.clear();

        info!(
            "stitch done: {} cycles ({:?}), total {}",
            cycles, termination, self.counters.stitch_count
        );
        Ok(StitchReport {
            cycles,
            termination,
        })
    }

    /// One counted ON/OFF pair, ending at an OFF->ON boundary.
    fn stitch_cycle(&mut self, params: &StitchParams) -> Result<(), R::Error> {
        self.counters.stitch_count += 1;
        self.rig.relays.set(RelayId::Relay3, true)?;
        self.rig.hold(SETTLE_MS)?;
        self.rig.hold(params.on_ms())?;
        self.rig.relays.set(RelayId::Relay3, false)?;
        self.rig.hold(SETTLE_MS)?;
        self.rig.hold(params.off_ms())
    }

    /// Open the weld relay and drop the flag after a driver error.
    fn abort(&mut self, procedure: &str) {
        if self.rig.relays.set(RelayId::Relay3, false).is_err() {
            error!("{} aborted: relay3 release failed", procedure);
        } else {
            warn!("{} aborted by a driver error, relay3 released", procedure);
        }
        self.latch.clear();
    }

    /// Block until the trigger line is released.
    ///
    /// This is deliberate: a held trigger must not start another spot weld,
    /// and the main context has nothing else to do meanwhile. There is no
    /// timeout.
    fn wait_for_release(&mut self) -> Result<(), R::Error> {
        while self.rig.trigger.is_asserted() {
            self.rig.hold(RELEASE_POLL_MS)?;
        }
        Ok(())
    }
}
