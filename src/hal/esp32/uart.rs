//! Command channel over a UART.
//!
//! The operator talks to the controller through a Bluetooth serial bridge
//! (HC-05/HM-10 class module) wired to UART1. From the firmware's point of
//! view it is a plain byte stream.
//!
//! # Wiring
//!
//! - GPIO21 (TX) → bridge RXD
//! - GPIO20 (RX) ← bridge TXD

use crate::traits::LineTransport;
use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, InputPin, OutputPin};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;
use esp_idf_hal::uart::{config::Config as UartConfig, Uart, UartDriver};

/// UART byte transport.
///
/// # Example
///
/// ```ignore
/// use yag_trigger::hal::esp32::Esp32Uart;
///
/// let peripherals = Peripherals::take()?;
/// let uart = Esp32Uart::new(
///     peripherals.uart1,
///     peripherals.pins.gpio21,
///     peripherals.pins.gpio20,
///     9600,
/// )?;
/// ```
pub struct Esp32Uart<'d> {
    driver: UartDriver<'d>,
}

impl<'d> Esp32Uart<'d> {
    /// Opens the UART at `baud_rate`, 8N1, no flow control.
    ///
    /// # Errors
    ///
    /// Returns an error if the UART driver cannot be installed.
    pub fn new<U: Uart>(
        uart: impl Peripheral<P = U> + 'd,
        tx: impl Peripheral<P = impl OutputPin> + 'd,
        rx: impl Peripheral<P = impl InputPin> + 'd,
        baud_rate: u32,
    ) -> Result<Self, EspError> {
        let config = UartConfig::default().baudrate(Hertz(baud_rate));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )?;
        Ok(Self { driver })
    }
}

impl LineTransport for Esp32Uart<'_> {
    type Error = EspError;

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.driver.read(buf, NON_BLOCK)
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), EspError> {
        while !bytes.is_empty() {
            let written = self.driver.write(bytes)?;
            bytes = &bytes[written..];
        }
        Ok(())
    }
}
