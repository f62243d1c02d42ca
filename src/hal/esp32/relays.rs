//! Relay coil outputs on four GPIOs.
//!
//! The relay module inputs are active low: driving a pin low energizes the
//! coil. Pins are driven high as soon as they are claimed so nothing clicks
//! during start-up.
//!
//! # Wiring
//!
//! - IN1 (white wire break) → GPIO2
//! - IN2 (black wire break) → GPIO3
//! - IN3 (weld) → GPIO4
//! - IN4 (sense connect) → GPIO5

use crate::traits::{RelayDriver, RelayId};
use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};
use esp_idf_hal::sys::EspError;

/// Four relay coil inputs.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::OutputPin;
/// use yag_trigger::hal::esp32::Esp32Relays;
///
/// let peripherals = Peripherals::take()?;
/// let relays = Esp32Relays::new([
///     peripherals.pins.gpio2.downgrade_output(),
///     peripherals.pins.gpio3.downgrade_output(),
///     peripherals.pins.gpio4.downgrade_output(),
///     peripherals.pins.gpio5.downgrade_output(),
/// ])?;
/// ```
pub struct Esp32Relays {
    pins: [PinDriver<'static, AnyOutputPin, Output>; 4],
}

impl Esp32Relays {
    /// Claim the coil pins (relay1 first) and drive them all high.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pins: [AnyOutputPin; 4]) -> Result<Self, EspError> {
        let [p1, p2, p3, p4] = pins;
        let mut pins = [
            PinDriver::output(p1)?,
            PinDriver::output(p2)?,
            PinDriver::output(p3)?,
            PinDriver::output(p4)?,
        ];
        for pin in pins.iter_mut() {
            pin.set_high()?;
        }
        Ok(Self { pins })
    }
}

impl RelayDriver for Esp32Relays {
    type Error = EspError;

    fn write(&mut self, relay: RelayId, high: bool) -> Result<(), EspError> {
        let level = if high { Level::High } else { Level::Low };
        self.pins[relay.index()].set_level(level)
    }
}
