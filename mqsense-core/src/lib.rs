//! Calibration and ppm conversion engine for MQ gas sensors
//!
//! Turns a raw ADC reading from an MQ-2, MQ-135, MQ-131 or MQ-303A divider
//! into a gas concentration, using the datasheet resistance-ratio curves and
//! a clean-air baseline.
//!
//! Key constraints:
//! - `no_std` capable, no heap allocation
//! - Numeric edge cases are clamped, never panic
//! - Hardware access only through the `AdcChannel` and `DelayNs` seams
//!
//! ```no_run
//! use mqsense_core::{MqSensor, SensorConfig, SensorType, VoltageSampler};
//! # use mqsense_core::sampler::sim::{FixedAdc, SimDelay};
//! # let (adc, delay) = (FixedAdc::new(200), SimDelay::new());
//!
//! let config = SensorConfig::default();
//! let sampler = VoltageSampler::new(adc, delay, &config);
//! let mut sensor = MqSensor::new(SensorType::Mq135, sampler, config)?;
//!
//! sensor.initialize()?;
//! sensor.calibrate_in_clean_air(0.0)?;
//!
//! let ppm = sensor.read_sensor(0.0)?;
//! # Ok::<(), mqsense_core::SensorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod compensation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod profile;
pub mod ratio;
pub mod regression;
pub mod resistance;
pub mod sampler;
pub mod sensor;
pub mod state;

// Public API
pub use calibration::{CalibrationManager, CalibrationReport};
pub use compensation::{Ambient, CompensationEngine, EnvironmentalCompensation};
pub use config::SensorConfig;
pub use errors::{SensorError, SensorResult, Status};
pub use profile::{GasType, RatioFamily, RegressionMethod, SensorProfile, SensorType};
pub use regression::RegressionModel;
pub use sampler::{AdcChannel, SampleMode, VoltageSampler, VoltageSource};
pub use sensor::MqSensor;
pub use state::{MeasurementState, SensorState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
