//! Configuration for the firmware and the desktop bench.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! The guard intervals in [`crate::timing`] are not part of the
//! configuration, and neither are GPIO assignments: those are fixed by the
//! board wiring and live in `hal::esp32::pins`.
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::config::{Config, ProgramConfig, SerialConfig};
//! use yag_trigger::SpotParams;
//!
//! // Use defaults
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_serial(SerialConfig::default().with_baud_rate(115_200))
//!     .with_program(ProgramConfig::default().with_spot(SpotParams::new(0.2, 1.0)));
//! ```

use heapless::String as HString;

use crate::mode::{SpotParams, StitchParams};
use crate::temperature::SensorProfile;

/// Maximum length for short config strings (names, ids, echoed tokens)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating at a character boundary if
/// too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Device identification
    pub device: DeviceConfig,
    /// Command channel settings
    pub serial: SerialConfig,
    /// Weld programs installed at boot
    pub program: ProgramConfig,
    /// Temperature sensor calibration
    pub sensor: SensorProfile,
}

impl Config {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set serial configuration
    pub fn with_serial(mut self, serial: SerialConfig) -> Self {
        self.serial = serial;
        self
    }

    /// Set boot programs
    pub fn with_program(mut self, program: ProgramConfig) -> Self {
        self.program = program;
        self
    }

    /// Set temperature sensor calibration
    pub fn with_sensor(mut self, sensor: SensorProfile) -> Self {
        self.sensor = sensor;
        self
    }
}

// ============================================================================
// Serial Config
// ============================================================================

/// Settings of the byte channel carrying the line protocol.
///
/// The reference build talks to a Bluetooth serial bridge, so the defaults
/// match the common HC-05/HM-10 modules.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// UART baud rate
    pub baud_rate: u32,
    /// Longest accepted command line (bytes, terminator excluded)
    pub line_capacity: usize,
    /// Main loop idle period in milliseconds
    pub poll_interval_ms: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            line_capacity: 64,
            poll_interval_ms: 10,
        }
    }
}

impl SerialConfig {
    /// Set the baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the longest accepted line, capped at the assembler buffer size
    pub fn with_line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity.min(crate::console::MAX_LINE);
        self
    }

    /// Set the main loop idle period
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }
}

// ============================================================================
// Program Config
// ============================================================================

/// Weld programs in effect after a restart.
///
/// Nothing is persisted: the controller always boots into Normal mode with
/// these programs stored (all zero by default).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramConfig {
    /// Spot program reported by `program?` until the first `spot` command
    pub spot: SpotParams,
    /// Stitch program reported by `program?` until the first `stitch` command
    pub stitch: StitchParams,
}

impl ProgramConfig {
    /// Set the boot spot program
    pub fn with_spot(mut self, spot: SpotParams) -> Self {
        self.spot = spot;
        self
    }

    /// Set the boot stitch program
    pub fn with_stitch(mut self, stitch: StitchParams) -> Self {
        self.stitch = stitch;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// Device id (for shops with more than one welder)
    pub id: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("yag-trigger"),
            id: short_string("welder1"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the device ID
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = short_string(id);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
