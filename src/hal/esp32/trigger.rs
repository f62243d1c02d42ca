//! Trigger-sense input with a rising-edge GPIO interrupt.
//!
//! The sense line has an external pull-down and reads high while the torch
//! trigger is pressed (and relay4 connects it).
//!
//! ESP-IDF disables a GPIO interrupt each time it fires. Detection is turned
//! back on from the main context in [`TriggerInput::rearm`], which the
//! controller calls after every timed wait. Edges arriving between the first
//! one and the re-arm are lost, which is harmless: the flag is already set.

use crate::monitor::TriggerMonitor;
use crate::traits::TriggerInput;
use esp_idf_hal::gpio::{AnyIOPin, Input, InterruptType, PinDriver, Pull};
use esp_idf_hal::sys::EspError;
use log::debug;

/// Trigger-sense input.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::IOPin;
/// use yag_trigger::hal::esp32::Esp32Trigger;
///
/// let peripherals = Peripherals::take()?;
/// let trigger = Esp32Trigger::new(peripherals.pins.gpio6.downgrade())?;
/// ```
pub struct Esp32Trigger {
    pin: PinDriver<'static, AnyIOPin, Input>,
    /// A monitor is subscribed and detection should stay on.
    armed: bool,
}

impl Esp32Trigger {
    /// Configure the pin as a pulled-down input with rising-edge detection,
    /// initially disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: AnyIOPin) -> Result<Self, EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Down)?;
        pin.set_interrupt_type(InterruptType::PosEdge)?;
        pin.disable_interrupt()?;
        Ok(Self { pin, armed: false })
    }
}

impl TriggerInput for Esp32Trigger {
    type Error = EspError;

    fn is_asserted(&mut self) -> bool {
        self.pin.is_high()
    }

    fn enable_rising_edge(&mut self, monitor: TriggerMonitor) -> Result<(), EspError> {
        self.pin.disable_interrupt()?;
        // SAFETY: the callback runs in ISR context. It only touches the
        // monitor's atomics and never allocates or blocks.
        unsafe {
            self.pin.subscribe(move || {
                monitor.on_rising_edge();
            })?;
        }
        self.pin.enable_interrupt()?;
        self.armed = true;
        debug!("sense interrupt subscribed");
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), EspError> {
        self.armed = false;
        self.pin.disable_interrupt()?;
        self.pin.unsubscribe()
    }

    fn rearm(&mut self) -> Result<(), EspError> {
        if self.armed {
            self.pin.enable_interrupt()?;
        }
        Ok(())
    }
}
