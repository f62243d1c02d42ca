//! ESP32-C3 SuperMini welding trigger interposer.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs a single loop that:
//! - Reads command bytes from the Bluetooth serial bridge
//! - Executes complete command lines and sends the replies
//! - Runs a spot or stitch procedure when the trigger interrupt has latched
//!
//! Procedures block the loop; commands received meanwhile wait in the UART
//! buffer and are handled once the procedure is over.
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use esp_idf_hal::adc::oneshot::AdcDriver;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{IOPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::log::EspLogger;
use yag_trigger::commands::error_reply;
use yag_trigger::hal::esp32::{
    pins, Esp32Delay, Esp32Relays, Esp32Thermometer, Esp32Trigger, Esp32Uart,
};
use yag_trigger::traits::LineTransport;
use yag_trigger::{Activity, Config, Console, LineAssembler, WeldController};

/// Bytes pulled from the UART per loop iteration
const READ_CHUNK: usize = 32;

/// Sent when an edge arrives in Normal mode
const NORMAL_MODE_EDGE: &str = "No Trigger in NORMAL mode";

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  yag-trigger SuperMini");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default();
    log::info!(
        "{} ({}) starting, link {} baud",
        config.device.name,
        config.device.id,
        config.serial.baud_rate
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Relays (GPIO2-5, active low)
    // =========================================================================
    let relays = Esp32Relays::new([
        peripherals.pins.gpio2.downgrade_output(),
        peripherals.pins.gpio3.downgrade_output(),
        peripherals.pins.gpio4.downgrade_output(),
        peripherals.pins.gpio5.downgrade_output(),
    ])?;
    println!(
        "[OK] Relays initialized (GPIO{}/{}/{}/{})",
        pins::RELAY1,
        pins::RELAY2,
        pins::RELAY3,
        pins::RELAY4
    );

    // =========================================================================
    // Initialize Trigger Sense (GPIO6, rising edge)
    // =========================================================================
    let trigger = Esp32Trigger::new(peripherals.pins.gpio6.downgrade())?;
    println!("[OK] Trigger sense initialized (GPIO{})", pins::TRIGGER_SENSE);

    // =========================================================================
    // Initialize Temperature Sensor (ADC on GPIO1)
    // =========================================================================
    let adc1 = AdcDriver::new(peripherals.adc1)?;
    let thermometer = Esp32Thermometer::new(&adc1, peripherals.pins.gpio1, config.sensor)?;
    println!(
        "[OK] Temperature sensor initialized (GPIO{} ADC)",
        pins::TEMPERATURE_ADC
    );

    // =========================================================================
    // Initialize Serial Link (UART1 to Bluetooth bridge)
    // =========================================================================
    let mut link = Esp32Uart::new(
        peripherals.uart1,
        peripherals.pins.gpio21,
        peripherals.pins.gpio20,
        config.serial.baud_rate,
    )?;
    println!(
        "[OK] Serial link initialized (TX GPIO{}, RX GPIO{}, {} baud)",
        pins::UART_TX,
        pins::UART_RX,
        config.serial.baud_rate
    );

    // =========================================================================
    // Create Controller
    // =========================================================================
    let mut controller =
        WeldController::new(relays, trigger, Esp32Delay::new()).with_program(config.program);
    controller
        .boot()
        .map_err(|e| anyhow::anyhow!("boot failed: {}", e))?;
    println!("[OK] Controller ready in normal mode");

    let mut console = Console::new(thermometer);
    let mut lines = LineAssembler::new(config.serial.line_capacity);
    let mut chunk = [0u8; READ_CHUNK];

    println!();
    println!("Waiting for commands ({}ms loop)...", config.serial.poll_interval_ms);
    println!();

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        // ---------------------------------------------------------------------
        // Commands
        // ---------------------------------------------------------------------
        let count = match link.try_read(&mut chunk) {
            Ok(count) => count,
            Err(e) => {
                log::warn!("serial read failed: {}", e);
                0
            }
        };
        for &byte in &chunk[..count] {
            if let Some(event) = lines.push(byte) {
                let reply = console.handle(&event, &mut controller);
                if let Err(e) = link.write_all(reply.as_bytes()) {
                    log::warn!("serial write failed: {}", e);
                }
            }
        }

        // ---------------------------------------------------------------------
        // Trigger
        // ---------------------------------------------------------------------
        match controller.poll() {
            Ok(Some(Activity::ContractViolation { .. })) => {
                let reply = error_reply(&NORMAL_MODE_EDGE);
                if let Err(e) = link.write_all(reply.as_bytes()) {
                    log::warn!("serial write failed: {}", e);
                }
            }
            Ok(Some(activity)) => log::debug!("{:?}", activity),
            Ok(None) => {}
            Err(e) => log::error!("trigger service failed: {}", e),
        }

        FreeRtos::delay_ms(config.serial.poll_interval_ms);
    }
}
