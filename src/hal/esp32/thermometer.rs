//! Board temperature via the ESP32 ADC.
//!
//! An analog temperature sensor (or divider) on GPIO1 is sampled on demand
//! and converted with a [`SensorProfile`].
//!
//! # Wiring
//!
//! - Sensor output → GPIO1 (ADC1 channel 1)
//!
//! # Calibration
//!
//! At 11 dB attenuation the ADC full scale is not exactly 3.3 V. Adjust
//! `adc_vref_mv` in the profile against a known temperature.

use crate::temperature::SensorProfile;
use crate::traits::TemperatureSensor;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::adc::ADC1;
use esp_idf_hal::gpio::Gpio1;
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::sys::EspError;

/// Temperature sensor on ADC1.
///
/// # Example
///
/// ```ignore
/// use yag_trigger::hal::esp32::Esp32Thermometer;
/// use yag_trigger::temperature::SensorProfile;
///
/// let peripherals = Peripherals::take()?;
/// let adc1 = AdcDriver::new(peripherals.adc1)?;
/// let mut sensor = Esp32Thermometer::new(&adc1, peripherals.pins.gpio1, SensorProfile::default())?;
/// println!("{:.1} °C", sensor.read_celsius()?);
/// ```
pub struct Esp32Thermometer<'d> {
    channel: AdcChannelDriver<'d, Gpio1, &'d AdcDriver<'d, ADC1>>,
    profile: SensorProfile,
}

impl<'d> Esp32Thermometer<'d> {
    /// Creates a new sensor reader.
    ///
    /// # Arguments
    ///
    /// * `adc` - Reference to ADC1 driver (must outlive this struct)
    /// * `pin` - GPIO1 analog input
    /// * `profile` - Sensor calibration
    ///
    /// # Errors
    ///
    /// Returns an error if ADC channel initialization fails.
    pub fn new(
        adc: &'d AdcDriver<'d, ADC1>,
        pin: impl Peripheral<P = Gpio1> + 'd,
        profile: SensorProfile,
    ) -> Result<Self, EspError> {
        let config = AdcChannelConfig {
            attenuation: DB_11,
            ..Default::default()
        };
        let channel = AdcChannelDriver::new(adc, pin, &config)?;
        Ok(Self { channel, profile })
    }

    /// Raw ADC sample.
    pub fn read_raw(&mut self) -> Result<u16, EspError> {
        self.channel.read()
    }
}

impl TemperatureSensor for Esp32Thermometer<'_> {
    type Error = EspError;

    fn read_celsius(&mut self) -> Result<f32, EspError> {
        let raw = self.read_raw()?;
        Ok(self.profile.celsius_from_raw(raw))
    }
}
