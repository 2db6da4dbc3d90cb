//! Environmental Compensation
//!
//! MQ element resistance drifts with ambient temperature and humidity. The
//! datasheet curves are taken at 20 °C / 60 %RH; away from that point the
//! concentration is corrected with two first-order factors:
//!
//! ```text
//! temp_factor     = 1 + temp_coeff     × (T - 20 °C)
//! humidity_factor = 1 + humidity_coeff × (H - 60 %RH)
//!
//! ppm_corrected = ppm × temp_factor (if enabled) × humidity_factor (if enabled)
//! ```
//!
//! Both corrections are off by default and toggle independently. Without
//! ambient data no correction is applied.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::physics::{REFERENCE_HUMIDITY_PCT, REFERENCE_TEMPERATURE_C};
use crate::errors::{SensorError, SensorResult};
use crate::profile::SensorProfile;
use crate::regression::finalize;

/// Ambient conditions at the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ambient {
    /// Air temperature (°C)
    pub temperature_c: f32,
    /// Relative humidity (%RH)
    pub humidity_pct: f32,
}

impl Ambient {
    /// Conditions the datasheet curves were measured at
    pub const REFERENCE: Self = Self {
        temperature_c: REFERENCE_TEMPERATURE_C,
        humidity_pct: REFERENCE_HUMIDITY_PCT,
    };
}

/// Sensors whose reading can be corrected for ambient conditions
pub trait EnvironmentalCompensation {
    /// Correct a concentration for the given conditions
    fn compensate(&self, raw_ppm: f32, ambient: &Ambient) -> f32;
}

/// First-order temperature and humidity correction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompensationEngine {
    temp_coeff: f32,
    humidity_coeff: f32,
    temperature_enabled: bool,
    humidity_enabled: bool,
    ambient: Option<Ambient>,
}

impl CompensationEngine {
    /// Engine with the given coefficients, both corrections disabled
    pub fn new(temp_coeff: f32, humidity_coeff: f32) -> Self {
        Self {
            temp_coeff,
            humidity_coeff,
            temperature_enabled: false,
            humidity_enabled: false,
            ambient: None,
        }
    }

    /// Engine seeded from a profile's coefficients
    pub fn from_profile(profile: &SensorProfile) -> Self {
        Self::new(profile.temp_coeff, profile.humidity_coeff)
    }

    /// Toggle the temperature correction
    pub fn set_temperature_enabled(&mut self, enabled: bool) {
        self.temperature_enabled = enabled;
    }

    /// Toggle the humidity correction
    pub fn set_humidity_enabled(&mut self, enabled: bool) {
        self.humidity_enabled = enabled;
    }

    /// Whether the temperature correction is on
    pub fn temperature_enabled(&self) -> bool {
        self.temperature_enabled
    }

    /// Whether the humidity correction is on
    pub fn humidity_enabled(&self) -> bool {
        self.humidity_enabled
    }

    /// Whether any correction would currently change a reading
    pub fn is_active(&self) -> bool {
        self.ambient.is_some() && (self.temperature_enabled || self.humidity_enabled)
    }

    /// Record the latest ambient conditions
    ///
    /// Non-finite values are rejected and the previous conditions are kept.
    pub fn set_ambient(&mut self, ambient: Ambient) -> SensorResult<()> {
        if !ambient.temperature_c.is_finite() {
            log_warn!("Ambient temperature {} rejected", ambient.temperature_c);
            return Err(SensorError::InvalidConfig { reason: "ambient temperature must be finite" });
        }
        if !ambient.humidity_pct.is_finite() {
            log_warn!("Ambient humidity {} rejected", ambient.humidity_pct);
            return Err(SensorError::InvalidConfig { reason: "ambient humidity must be finite" });
        }
        self.ambient = Some(ambient);
        Ok(())
    }

    /// Forget the ambient conditions, disabling correction until set again
    pub fn clear_ambient(&mut self) {
        self.ambient = None;
    }

    /// Last recorded ambient conditions
    pub fn ambient(&self) -> Option<Ambient> {
        self.ambient
    }

    /// Multiplier for the temperature correction
    pub fn temperature_factor(&self, temperature_c: f32) -> f32 {
        1.0 + self.temp_coeff * (temperature_c - REFERENCE_TEMPERATURE_C)
    }

    /// Multiplier for the humidity correction
    pub fn humidity_factor(&self, humidity_pct: f32) -> f32 {
        1.0 + self.humidity_coeff * (humidity_pct - REFERENCE_HUMIDITY_PCT)
    }

    /// Correct `raw_ppm` with the stored ambient conditions, if any
    pub fn apply(&self, raw_ppm: f32) -> f32 {
        match self.ambient {
            Some(ambient) => self.compensate(raw_ppm, &ambient),
            None => raw_ppm,
        }
    }
}

impl EnvironmentalCompensation for CompensationEngine {
    fn compensate(&self, raw_ppm: f32, ambient: &Ambient) -> f32 {
        let mut factor = 1.0f64;
        if self.temperature_enabled {
            factor *= self.temperature_factor(ambient.temperature_c) as f64;
        }
        if self.humidity_enabled {
            factor *= self.humidity_factor(ambient.humidity_pct) as f64;
        }
        finalize(raw_ppm as f64 * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CompensationEngine {
        CompensationEngine::new(-0.01, 0.005)
    }

    #[test]
    fn disabled_by_default() {
        let mut e = engine();
        e.set_ambient(Ambient { temperature_c: 40.0, humidity_pct: 90.0 }).unwrap();
        assert!(!e.is_active());
        assert_eq!(e.apply(100.0), 100.0);
    }

    #[test]
    fn no_ambient_means_no_correction() {
        let mut e = engine();
        e.set_temperature_enabled(true);
        e.set_humidity_enabled(true);
        assert_eq!(e.apply(100.0), 100.0);
    }

    #[test]
    fn factors_at_reference_are_unity() {
        let e = engine();
        assert_eq!(e.temperature_factor(20.0), 1.0);
        assert_eq!(e.humidity_factor(60.0), 1.0);
    }

    #[test]
    fn independent_toggles() {
        let mut e = engine();
        e.set_ambient(Ambient { temperature_c: 30.0, humidity_pct: 80.0 }).unwrap();

        e.set_temperature_enabled(true);
        // 1 - 0.01 × 10 = 0.9
        assert!((e.apply(100.0) - 90.0).abs() < 1e-4);

        e.set_humidity_enabled(true);
        // 0.9 × (1 + 0.005 × 20) = 0.99
        assert!((e.apply(100.0) - 99.0).abs() < 1e-4);

        e.set_temperature_enabled(false);
        assert!((e.apply(100.0) - 110.0).abs() < 1e-4);
    }

    #[test]
    fn output_stays_non_negative_and_finite() {
        let mut e = engine();
        e.set_temperature_enabled(true);
        // Factor 1 - 0.01 × 180 = -0.8
        let extreme = Ambient { temperature_c: 200.0, humidity_pct: 60.0 };
        assert_eq!(e.compensate(100.0, &extreme), 0.0);

        let mut big = CompensationEngine::new(1.0, 0.0);
        big.set_temperature_enabled(true);
        let hot = Ambient { temperature_c: 1000.0, humidity_pct: 60.0 };
        assert_eq!(big.compensate(f32::MAX, &hot), f32::MAX);
    }

    #[test]
    fn clear_ambient_stops_correction() {
        let mut e = engine();
        e.set_temperature_enabled(true);
        e.set_ambient(Ambient { temperature_c: 0.0, humidity_pct: 60.0 }).unwrap();
        assert!(e.is_active());
        e.clear_ambient();
        assert!(!e.is_active());
        assert_eq!(e.apply(50.0), 50.0);
    }

    #[test]
    fn non_finite_ambient_is_rejected() {
        let mut e = engine();
        e.set_temperature_enabled(true);
        e.set_humidity_enabled(true);
        let good = Ambient { temperature_c: 25.0, humidity_pct: 50.0 };
        e.set_ambient(good).unwrap();

        let bad = [
            Ambient { temperature_c: f32::NAN, humidity_pct: 50.0 },
            Ambient { temperature_c: f32::INFINITY, humidity_pct: 50.0 },
            Ambient { temperature_c: 25.0, humidity_pct: f32::NAN },
            Ambient { temperature_c: 25.0, humidity_pct: f32::NEG_INFINITY },
        ];
        for ambient in bad {
            assert!(matches!(
                e.set_ambient(ambient),
                Err(SensorError::InvalidConfig { .. })
            ));
            assert_eq!(e.ambient(), Some(good));
        }

        let expected = 100.0 * e.temperature_factor(25.0) * e.humidity_factor(50.0);
        assert!((e.apply(100.0) - expected).abs() < 1e-3);
    }
}
