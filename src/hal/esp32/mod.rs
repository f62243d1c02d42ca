//! ESP32-C3 SuperMini hardware abstraction layer for the trigger interposer.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Relays**: 4-channel active-low relay module
//! - **Trigger sense**: torch switch through relay4, external pull-down
//! - **Link**: HC-05/HM-10 Bluetooth serial bridge on UART1
//! - **Temperature**: analog sensor on ADC1
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod delay;
mod relays;
mod thermometer;
mod trigger;
mod uart;

pub use delay::Esp32Delay;
pub use relays::Esp32Relays;
pub use thermometer::Esp32Thermometer;
pub use trigger::Esp32Trigger;
pub use uart::Esp32Uart;

/// Pin assignments for SuperMini ESP32-C3.
///
/// The firmware claims exactly these GPIOs from `Peripherals`; the numbers
/// here are what it reports at start-up.
pub mod pins {
    // =========================================================================
    // Relay module (active low)
    // =========================================================================

    /// Relay1: torch white wire passthrough break
    pub const RELAY1: i32 = 2;

    /// Relay2: torch black wire passthrough break
    pub const RELAY2: i32 = 3;

    /// Relay3: simulated trigger toward the welder
    pub const RELAY3: i32 = 4;

    /// Relay4: connects the sense input to the torch switch
    pub const RELAY4: i32 = 5;

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Trigger-sense input (external pull-down)
    pub const TRIGGER_SENSE: i32 = 6;

    /// Temperature sensor (ADC1 channel 1)
    pub const TEMPERATURE_ADC: i32 = 1;

    // =========================================================================
    // Bluetooth serial bridge (UART1)
    // =========================================================================

    /// UART TX toward the bridge RXD
    pub const UART_TX: i32 = 21;

    /// UART RX from the bridge TXD
    pub const UART_RX: i32 = 20;
}
