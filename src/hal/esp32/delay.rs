//! Blocking delay on the main task.

use crate::traits::Delay;
use esp_idf_hal::delay::FreeRtos;

/// FreeRTOS task delay.
///
/// Blocks the calling task and lets the idle task (and its watchdog) run.
/// Resolution is one scheduler tick, rounded up.
#[derive(Debug, Default, Clone, Copy)]
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new delay.
    pub fn new() -> Self {
        Self
    }
}

impl Delay for Esp32Delay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos::delay_ms(ms);
    }
}
