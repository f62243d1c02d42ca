//! Linear temperature sensor conversion.
//!
//! The board temperature is read from a diode-style sensor whose output
//! falls linearly with temperature:
//!
//! ```text
//! T = reference_c - (V - reference_mv) / slope_mv_per_c
//! ```
//!
//! The default profile is the common on-die sensor calibration
//! (0.706 V at 27 °C, -1.721 mV/°C).

/// Calibration of a linear temperature sensor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorProfile {
    /// Temperature at the reference voltage (°C)
    pub reference_c: f32,
    /// Sensor output at the reference temperature (mV)
    pub reference_mv: f32,
    /// Output drop per degree (mV/°C, positive)
    pub slope_mv_per_c: f32,
    /// ADC reference voltage (mV)
    pub adc_vref_mv: f32,
    /// ADC full-scale count
    pub adc_full_scale: u16,
}

impl Default for SensorProfile {
    fn default() -> Self {
        Self {
            reference_c: 27.0,
            reference_mv: 706.0,
            slope_mv_per_c: 1.721,
            adc_vref_mv: 3300.0,
            adc_full_scale: 4095,
        }
    }
}

impl SensorProfile {
    /// Convert a raw ADC count to millivolts.
    pub fn millivolts_from_raw(&self, raw: u16) -> f32 {
        self.adc_vref_mv * f32::from(raw) / f32::from(self.adc_full_scale.max(1))
    }

    /// Convert a sensor voltage to °C, rounded to one decimal.
    ///
    /// # Examples
    ///
    /// ```
    /// use yag_trigger::temperature::SensorProfile;
    ///
    /// let profile = SensorProfile::default();
    /// assert_eq!(profile.celsius_from_millivolts(706.0), 27.0);
    /// ```
    pub fn celsius_from_millivolts(&self, millivolts: f32) -> f32 {
        round_tenths(self.reference_c - (millivolts - self.reference_mv) / self.slope_mv_per_c)
    }

    /// Convert a raw ADC count to °C, rounded to one decimal.
    pub fn celsius_from_raw(&self, raw: u16) -> f32 {
        self.celsius_from_millivolts(self.millivolts_from_raw(raw))
    }
}

/// Round half away from zero to one decimal place.
fn round_tenths(value: f32) -> f32 {
    let scaled = value * 10.0;
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5) as i32
    } else {
        (scaled - 0.5) as i32
    };
    rounded as f32 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_point() {
        let profile = SensorProfile::default();
        assert_eq!(profile.celsius_from_millivolts(706.0), 27.0);
    }

    #[test]
    fn lower_voltage_is_warmer() {
        let profile = SensorProfile::default();
        // 17.21 mV below the reference is 10 °C warmer
        assert_eq!(profile.celsius_from_millivolts(706.0 - 17.21), 37.0);
        assert_eq!(profile.celsius_from_millivolts(706.0 + 17.21), 17.0);
    }

    #[test]
    fn raw_full_scale_is_vref() {
        let profile = SensorProfile::default();
        assert_eq!(profile.millivolts_from_raw(4095), 3300.0);
        assert_eq!(profile.millivolts_from_raw(0), 0.0);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_tenths(21.44), 21.4);
        assert_eq!(round_tenths(21.46), 21.5);
        assert_eq!(round_tenths(-3.26), -3.3);
    }
}
