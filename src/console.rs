//! Glue between the byte transport and the controller.
//!
//! [`LineAssembler`] turns the incoming byte stream into command lines and
//! [`Console`] executes one line against a [`WeldController`], producing the
//! reply to send back.
//!
//! # Example
//!
//! ```rust
//! use yag_trigger::console::{Console, LineAssembler, LineEvent};
//! use yag_trigger::hal::{MockBench, MockThermometer};
//! use yag_trigger::WeldController;
//!
//! let bench = MockBench::new();
//! let mut controller = WeldController::new(bench.relays(), bench.trigger(), bench.delay());
//! let mut console = Console::new(MockThermometer::new(24.5));
//! let mut lines = LineAssembler::new(64);
//!
//! let mut reply = None;
//! for byte in b"mode?\r\n" {
//!     if let Some(event) = lines.push(*byte) {
//!         reply = Some(console.handle(&event, &mut controller));
//!     }
//! }
//! assert_eq!(reply.unwrap().as_str(), "normal\r\n");
//! ```

use core::fmt::Debug;

use heapless::Vec;
use log::{debug, warn};

use crate::commands::{self, Command, Reply};
use crate::controller::WeldController;
use crate::error::{CommandError, Error};
use crate::mode::OperatingMode;
use crate::traits::{Delay, RelayDriver, TemperatureSensor, TriggerInput};

/// Size of the line buffer; longer lines are discarded.
pub const MAX_LINE: usize = 128;

/// A complete unit of input from the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineEvent {
    /// One command line, terminator removed.
    Line(heapless::String<MAX_LINE>),
    /// A line that overflowed the buffer or was not valid UTF-8.
    Rejected,
}

/// Accumulates bytes into LF or CR LF terminated lines.
///
/// Blank lines are skipped. A bare CR is dropped wherever it appears.
#[derive(Debug)]
pub struct LineAssembler {
    buf: Vec<u8, MAX_LINE>,
    capacity: usize,
    overflowed: bool,
}

impl LineAssembler {
    /// Create an assembler accepting lines up to `capacity` bytes
    /// (capped at [`MAX_LINE`]).
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity: capacity.min(MAX_LINE),
            overflowed: false,
        }
    }

    /// Feed one byte. Returns an event when a line terminator completes one.
    pub fn push(&mut self, byte: u8) -> Option<LineEvent> {
        match byte {
            b'\r' => None,
            b'\n' => self.finish(),
            _ if self.overflowed => None,
            _ => {
                if self.buf.len() >= self.capacity || self.buf.push(byte).is_err() {
                    self.overflowed = true;
                    self.buf.clear();
                }
                None
            }
        }
    }

    /// Bytes buffered for the current line.
    #[inline]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    fn finish(&mut self) -> Option<LineEvent> {
        if core::mem::take(&mut self.overflowed) {
            return Some(LineEvent::Rejected);
        }
        let bytes = core::mem::take(&mut self.buf);
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match heapless::String::from_utf8(bytes) {
            Ok(line) => Some(LineEvent::Line(line)),
            Err(_) => Some(LineEvent::Rejected),
        }
    }
}

/// Executes command lines and formats replies.
pub struct Console<S: TemperatureSensor> {
    sensor: S,
}

impl<S> Console<S>
where
    S: TemperatureSensor,
    S::Error: Debug,
{
    /// Create a console reading board temperature from `sensor`.
    pub fn new(sensor: S) -> Self {
        Self { sensor }
    }

    /// Handle one assembled event.
    pub fn handle<R, T, D>(
        &mut self,
        event: &LineEvent,
        controller: &mut WeldController<R, T, D>,
    ) -> Reply
    where
        R: RelayDriver,
        R::Error: Debug,
        T: TriggerInput<Error = R::Error>,
        D: Delay,
    {
        match event {
            LineEvent::Line(line) => self.handle_line(line, controller),
            LineEvent::Rejected => {
                warn!("discarded unreadable command line");
                commands::error_reply(&CommandError::Unknown)
            }
        }
    }

    /// Parse and execute one line, returning the reply.
    ///
    /// Mode commands block until the relay transition has settled.
    pub fn handle_line<R, T, D>(
        &mut self,
        line: &str,
        controller: &mut WeldController<R, T, D>,
    ) -> Reply
    where
        R: RelayDriver,
        R::Error: Debug,
        T: TriggerInput<Error = R::Error>,
        D: Delay,
    {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                warn!("rejected command {:?}: {}", line.trim(), err);
                return commands::error_reply(&err);
            }
        };
        debug!("command: {:?}", command);

        match command {
            Command::Normal => Self::switch(controller, OperatingMode::Normal),
            Command::Spot(params) => Self::switch(controller, OperatingMode::Spot(params)),
            Command::Stitch(params) => Self::switch(controller, OperatingMode::Stitch(params)),
            Command::QueryMode => {
                let mut reply = Reply::new();
                commands::push_line(
                    &mut reply,
                    format_args!("{}", controller.mode().kind().as_str()),
                );
                reply
            }
            Command::QueryProgram => {
                commands::program_reply(&controller.spot_program(), &controller.stitch_program())
            }
            Command::QueryTemperature => match self.sensor.read_celsius() {
                Ok(celsius) => {
                    let mut reply = Reply::new();
                    commands::push_line(&mut reply, format_args!("{:.1}", celsius));
                    reply
                }
                Err(err) => {
                    warn!("temperature read failed: {:?}", err);
                    commands::error_reply(&"temperature unavailable")
                }
            },
            Command::QueryCounters => commands::counters_reply(&controller.counters()),
            Command::Help => commands::help_reply(),
        }
    }

    /// Borrow the temperature sensor.
    pub fn sensor(&mut self) -> &mut S {
        &mut self.sensor
    }

    fn switch<R, T, D>(controller: &mut WeldController<R, T, D>, mode: OperatingMode) -> Reply
    where
        R: RelayDriver,
        R::Error: Debug,
        T: TriggerInput<Error = R::Error>,
        D: Delay,
    {
        match controller.set_mode(mode) {
            Ok(()) => {
                let mut reply = Reply::new();
                commands::push_line(&mut reply, format_args!("OK {}", mode.kind().as_str()));
                reply
            }
            Err(err @ Error::Hardware(_)) => {
                warn!("mode change failed: {}", err);
                commands::error_reply(&err)
            }
            Err(err) => commands::error_reply(&err),
        }
    }
}
