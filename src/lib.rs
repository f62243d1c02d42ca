//! # yag-trigger
//!
//! A trigger interposer for a welding torch: sits between the torch trigger
//! switch and the welder and turns a press into a timed spot weld or a
//! repeating stitch sequence.
//!
//! ## Features
//!
//! - **Three modes**: Normal (passthrough), Spot (one weld per press),
//!   Stitch (hold-to-stitch or tap-to-start/tap-to-stop)
//! - **Relay sequencing**: four active-low relays switched in a fixed order
//!   with settle intervals that mask contact transients
//! - **Interrupt latch**: rising edges on the sense line set an atomic flag;
//!   edges while in Normal mode are reported as a wiring fault
//! - **Line protocol**: CR LF terminated ASCII commands over a serial link
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Relay, trigger, delay, temperature, and transport abstractions
//! - `monitor` - Flag and mode tag shared with the edge interrupt
//! - `transition` - Relay order when entering Normal or an armed mode
//! - `sequencer` - Spot and stitch procedures
//! - `controller` - Owns everything and ties it together
//! - `commands` / `console` - Command parsing, replies, and line assembly
//! - `hal` - Concrete implementations (mock bench for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use yag_trigger::{Command, OperatingMode, WeldController, Activity};
//! use yag_trigger::hal::MockBench;
//!
//! let bench = MockBench::new();
//! let mut controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay());
//! controller.boot().unwrap();
//!
//! // Operator selects stitch mode
//! if let Ok(Command::Stitch(params)) = Command::parse("stitch 0 0.5 0.5") {
//!     controller.set_mode(OperatingMode::Stitch(params)).unwrap();
//! }
//!
//! // Hold the trigger for a little over two cycles
//! bench.press();
//! bench.release_at(bench.now_ms() + 1500);
//!
//! // Main loop
//! match controller.poll().unwrap() {
//!     Some(Activity::Stitch { report, .. }) => assert_eq!(report.cycles, 2),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Operator command set and reply formatting.
pub mod commands;
/// Byte stream to command lines, and command execution.
pub mod console;
/// Main weld controller that owns the hardware and runs procedures.
pub mod controller;
/// Error types for commands and hardware.
pub mod error;
/// Hardware abstraction layer with a mock bench for testing.
pub mod hal;
/// Operating modes, weld programs, and counters.
pub mod mode;
/// Trigger flag shared with the edge interrupt.
pub mod monitor;
/// Active-low relay bank with energized bookkeeping.
pub mod relay;
/// Relay bank, trigger input, and delay bundled for the main context.
pub mod rig;
/// Spot and stitch weld procedures.
pub mod sequencer;
/// Sensor voltage to temperature conversion.
pub mod temperature;
/// Guard intervals and duration conversion.
pub mod timing;
/// Core traits for hardware abstraction.
pub mod traits;
/// Relay topology changes between modes.
pub mod transition;

/// Shared configuration system for desktop and ESP32.
pub mod config;

// Re-exports for convenience
pub use commands::{Command, Reply};
pub use config::{Config, DeviceConfig, ProgramConfig, SerialConfig};
pub use console::{Console, LineAssembler, LineEvent};
pub use controller::{Activity, ControllerState, WeldController};
pub use error::{CommandError, Error};
pub use mode::{Counters, ModeKind, OperatingMode, SpotParams, StitchParams};
pub use monitor::{EdgeOutcome, TriggerLatch, TriggerMonitor};
pub use sequencer::{StitchReport, StitchTermination};
pub use traits::{Delay, LineTransport, RelayDriver, RelayId, TemperatureSensor, TriggerInput};
