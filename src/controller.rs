//! Main weld controller that ties everything together.
//!
//! [`WeldController`] owns the relay bank, the trigger input, the delay, the
//! active mode with its programs, and the counters. The edge interrupt only
//! ever sees a [`TriggerMonitor`](crate::monitor::TriggerMonitor).
//!
//! # Overview
//!
//! The controller:
//! - Reconfigures the relays when the operator changes mode
//! - Runs a spot or stitch procedure when a trigger edge has been latched
//! - Reports edges seen in Normal mode as contract violations
//! - Provides state snapshots for queries
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::{OperatingMode, SpotParams, WeldController, Activity};
//! use yag_trigger::hal::MockBench;
//!
//! let bench = MockBench::new();
//! let mut controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay());
//! controller.boot().unwrap();
//!
//! controller
//!     .set_mode(OperatingMode::Spot(SpotParams::new(0.2, 1.0)))
//!     .unwrap();
//!
//! // Operator taps the trigger
//! bench.press();
//! bench.release_at(bench.now_ms() + 50);
//!
//! let activity = controller.poll().unwrap();
//! assert_eq!(activity, Some(Activity::Spot { spot_count: 1 }));
//! ```

use alloc::sync::Arc;
use core::fmt::Debug;

use log::{info, warn};

use crate::config::ProgramConfig;
use crate::error::Error;
use crate::mode::{Counters, ModeKind, OperatingMode, SpotParams, StitchParams};
use crate::monitor::TriggerLatch;
use crate::rig::Rig;
use crate::sequencer::{Sequencer, StitchReport};
use crate::traits::{Delay, RelayDriver, TriggerInput};
use crate::transition;

/// What a call to [`WeldController::poll`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Activity {
    /// A spot weld ran.
    Spot {
        /// Spot counter after the weld.
        spot_count: u32,
    },
    /// A stitch procedure ran to completion.
    Stitch {
        /// Cycles and termination of this procedure.
        report: StitchReport,
        /// Stitch counter after the procedure.
        stitch_count: u32,
    },
    /// Rising edges arrived while in Normal mode, where the sense line
    /// should be isolated. The flag was cleared; nothing ran.
    ContractViolation {
        /// Number of such edges since the last poll.
        edges: u32,
    },
}

/// Weld controller.
///
/// # Type Parameters
///
/// - `R`: Relay output driver ([`RelayDriver`])
/// - `T`: Trigger-sense input ([`TriggerInput`]), same error type as `R`
/// - `D`: Blocking delay ([`Delay`])
///
/// # Concurrency
///
/// Single main context. Everything here runs on it, including the blocking
/// procedures; the edge interrupt reaches the controller only through the
/// shared [`TriggerLatch`].
pub struct WeldController<R, T, D>
where
    R: RelayDriver,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    rig: Rig<R, T, D>,
    latch: Arc<TriggerLatch>,
    mode: OperatingMode,
    spot_program: SpotParams,
    stitch_program: StitchParams,
    counters: Counters,
}

impl<R, T, D> WeldController<R, T, D>
where
    R: RelayDriver,
    R::Error: Debug,
    T: TriggerInput<Error = R::Error>,
    D: Delay,
{
    /// Create a controller. No hardware is touched until [`boot`](Self::boot).
    pub fn new(relays: R, trigger: T, delay: D) -> Self {
        Self {
            rig: Rig::new(relays, trigger, delay),
            latch: Arc::new(TriggerLatch::new()),
            mode: OperatingMode::Normal,
            spot_program: SpotParams::default(),
            stitch_program: StitchParams::default(),
            counters: Counters::default(),
        }
    }

    /// Replace the stored programs reported by `program?`.
    pub fn with_program(mut self, program: ProgramConfig) -> Self {
        self.spot_program = program.spot;
        self.stitch_program = program.stitch;
        self
    }

    /// Drive the power-on defaults: passthrough, interrupt off.
    pub fn boot(&mut self) -> Result<(), Error<R::Error>> {
        self.mode = OperatingMode::Normal;
        if let Err(err) = transition::boot_defaults(&mut self.rig, &self.latch) {
            transition::fail_safe(&mut self.rig, &self.latch);
            return Err(Error::Hardware(err));
        }
        info!("controller booted in normal mode");
        Ok(())
    }

    /// Switch to `mode`, reconfiguring relays and the edge interrupt.
    ///
    /// The full transition runs even when the mode kind does not change, so
    /// a repeated `spot` command re-settles the hardware and installs the new
    /// program.
    ///
    /// On a hardware error the controller falls back to Normal (see
    /// [`transition::fail_safe`]) and the stored programs are left alone.
    pub fn set_mode(&mut self, mode: OperatingMode) -> Result<(), Error<R::Error>> {
        let result = match mode {
            OperatingMode::Normal => transition::enter_normal(&mut self.rig, &self.latch),
            OperatingMode::Spot(_) => {
                transition::enter_armed(&mut self.rig, &self.latch, ModeKind::Spot)
            }
            OperatingMode::Stitch(_) => {
                transition::enter_armed(&mut self.rig, &self.latch, ModeKind::Stitch)
            }
        };

        if let Err(err) = result {
            warn!("switch to {} failed: {:?}", mode.kind().as_str(), err);
            transition::fail_safe(&mut self.rig, &self.latch);
            self.mode = OperatingMode::Normal;
            return Err(Error::Hardware(err));
        }

        match mode {
            OperatingMode::Normal => {}
            OperatingMode::Spot(params) => self.spot_program = params,
            OperatingMode::Stitch(params) => self.stitch_program = params,
        }
        self.mode = mode;
        Ok(())
    }

    /// Service the trigger: run the active procedure if an edge is latched.
    ///
    /// Call this from the main loop whenever it is idle. Blocks for the whole
    /// procedure. Returns `None` when nothing happened.
    pub fn poll(&mut self) -> Result<Option<Activity>, Error<R::Error>> {
        self.rig.trigger.rearm().map_err(Error::Hardware)?;

        let edges = self.latch.take_violations();
        if edges > 0 {
            warn!(
                "{} trigger edge(s) in normal mode: sense line should be isolated",
                edges
            );
            return Ok(Some(Activity::ContractViolation { edges }));
        }

        if !self.latch.is_latched() {
            return Ok(None);
        }

        let mut sequencer = Sequencer::new(&mut self.rig, &self.latch, &mut self.counters);
        let activity = match self.mode {
            OperatingMode::Normal => {
                // Unreachable with the interrupt uninstalled; drop the flag
                self.latch.clear();
                None
            }
            OperatingMode::Spot(params) => {
                let spot_count = sequencer.run_spot(&params).map_err(Error::Hardware)?;
                Some(Activity::Spot { spot_count })
            }
            OperatingMode::Stitch(params) => {
                let report = sequencer.run_stitch(&params).map_err(Error::Hardware)?;
                Some(Activity::Stitch {
                    report,
                    stitch_count: self.counters.stitch_count,
                })
            }
        };
        Ok(activity)
    }

    /// Active mode.
    #[inline]
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Stored spot program (whether or not spot mode is active).
    #[inline]
    pub fn spot_program(&self) -> SpotParams {
        self.spot_program
    }

    /// Stored stitch program (whether or not stitch mode is active).
    #[inline]
    pub fn stitch_program(&self) -> StitchParams {
        self.stitch_program
    }

    /// Weld counters.
    #[inline]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Commanded relay states, relay1 first.
    #[inline]
    pub fn relays(&self) -> [bool; 4] {
        self.rig.relays.snapshot()
    }

    /// Whether a trigger edge is latched and not yet consumed.
    #[inline]
    pub fn trigger_latched(&self) -> bool {
        self.latch.is_latched()
    }

    /// Snapshot for queries and logging.
    pub fn state(&self) -> ControllerState {
        ControllerState {
            mode: self.mode,
            spot_program: self.spot_program,
            stitch_program: self.stitch_program,
            counters: self.counters,
            relays: self.relays(),
            trigger_latched: self.trigger_latched(),
        }
    }
}

/// Full state snapshot.
///
/// # Example
///
/// ```rust
/// use yag_trigger::{WeldController, OperatingMode};
/// use yag_trigger::hal::MockBench;
///
/// let bench = MockBench::new();
/// let controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay());
///
/// let state = controller.state();
/// assert_eq!(state.mode, OperatingMode::Normal);
/// assert_eq!(state.relays, [false; 4]);
/// assert_eq!(state.counters.spot_count, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerState {
    /// Active mode with its parameters.
    pub mode: OperatingMode,
    /// Stored spot program.
    pub spot_program: SpotParams,
    /// Stored stitch program.
    pub stitch_program: StitchParams,
    /// Weld counters.
    pub counters: Counters,
    /// Commanded relay states, relay1 first.
    pub relays: [bool; 4],
    /// Whether a trigger edge is waiting.
    pub trigger_latched: bool,
}
