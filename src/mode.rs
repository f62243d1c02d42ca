//! Operating modes, weld programs, and counters.
//!
//! Exactly one [`OperatingMode`] is active at a time. The Spot and Stitch
//! variants carry their own parameters, so a mode without its program (or a
//! program without its mode) cannot be represented.
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::{ModeKind, OperatingMode, SpotParams};
//!
//! let mode = OperatingMode::Spot(SpotParams::new(0.2, 1.0));
//! assert_eq!(mode.kind(), ModeKind::Spot);
//! assert_eq!(mode.kind().as_str(), "spot");
//! assert!(mode.is_armed());
//! ```

use crate::timing::seconds_to_ms;

/// Spot program: one weld burst per press.
///
/// All values are seconds as typed by the operator. They are stored verbatim
/// (zero and negative included) and converted with
/// [`seconds_to_ms`] when the procedure runs.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotParams {
    /// Grace period after the press before welding starts.
    pub delay: f64,
    /// Weld duration.
    pub on_time: f64,
}

impl SpotParams {
    /// Creates a spot program.
    pub const fn new(delay: f64, on_time: f64) -> Self {
        Self { delay, on_time }
    }

    /// Grace period in milliseconds.
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        seconds_to_ms(self.delay)
    }

    /// Weld duration in milliseconds.
    #[inline]
    pub fn on_ms(&self) -> u32 {
        seconds_to_ms(self.on_time)
    }
}

/// Stitch program: repeated ON/OFF weld cycles.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StitchParams {
    /// Grace period after the press before the first cycle.
    pub delay: f64,
    /// Weld time of each cycle.
    pub on_time: f64,
    /// Pause between cycles.
    pub off_time: f64,
}

impl StitchParams {
    /// Creates a stitch program.
    pub const fn new(delay: f64, on_time: f64, off_time: f64) -> Self {
        Self {
            delay,
            on_time,
            off_time,
        }
    }

    /// Grace period in milliseconds.
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        seconds_to_ms(self.delay)
    }

    /// ON phase in milliseconds.
    #[inline]
    pub fn on_ms(&self) -> u32 {
        seconds_to_ms(self.on_time)
    }

    /// OFF phase in milliseconds.
    #[inline]
    pub fn off_ms(&self) -> u32 {
        seconds_to_ms(self.off_time)
    }
}

/// The active operating mode.
///
/// # Default
///
/// Defaults to [`Normal`](Self::Normal): the controller is bypassed and the
/// trigger reaches the welder directly.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OperatingMode {
    /// Hardware passthrough, no software involvement.
    #[default]
    Normal,
    /// One timed weld per press-release cycle.
    Spot(SpotParams),
    /// Repeated ON/OFF cycles, ended by release or by a second press.
    Stitch(StitchParams),
}

impl OperatingMode {
    /// Tag of this mode without its parameters.
    #[inline]
    pub const fn kind(&self) -> ModeKind {
        match self {
            OperatingMode::Normal => ModeKind::Normal,
            OperatingMode::Spot(_) => ModeKind::Spot,
            OperatingMode::Stitch(_) => ModeKind::Stitch,
        }
    }

    /// True when the sense line is connected and trigger edges are expected.
    #[inline]
    pub const fn is_armed(&self) -> bool {
        !matches!(self, OperatingMode::Normal)
    }
}

/// Parameterless mode tag.
///
/// This is the only piece of mode state the edge interrupt is allowed to
/// read; it is stored as a `u8` inside [`TriggerLatch`](crate::monitor::TriggerLatch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum ModeKind {
    /// Passthrough.
    #[default]
    Normal = 0,
    /// Spot timer.
    Spot = 1,
    /// Stitch timer.
    Stitch = 2,
}

impl ModeKind {
    /// Returns the mode name as reported by `mode?`.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Normal => "normal",
            ModeKind::Spot => "spot",
            ModeKind::Stitch => "stitch",
        }
    }

    /// Convert from the raw tag value. Unknown values map to `Normal`.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => ModeKind::Spot,
            2 => ModeKind::Stitch,
            _ => ModeKind::Normal,
        }
    }
}

/// Weld counters for the lifetime of the process.
///
/// Incremented once per executed spot weld or stitch cycle, never reset
/// except by a restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// Spot welds executed.
    pub spot_count: u32,
    /// Stitch cycles executed.
    pub stitch_count: u32,
}
