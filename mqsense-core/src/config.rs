//! Driver Configuration
//!
//! Board-level parameters that do not depend on the sensor model: how the
//! divider is built and how the ADC samples it. Defaults describe the common
//! 5 V breakout on a 10-bit converter.
//!
//! ```rust
//! use mqsense_core::SensorConfig;
//!
//! // 3.3 V board with a 12-bit ADC and a 20 kΩ load resistor
//! let config = SensorConfig {
//!     supply_voltage: 3.3,
//!     load_resistance: 20.0,
//!     adc_bits: 12,
//!     adc_vref: 3.3,
//!     ..SensorConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.full_scale_counts(), 4095.0);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    physics::{DEFAULT_LOAD_RESISTANCE_KOHM, DEFAULT_SUPPLY_V},
    sensors::{DEFAULT_ADC_BITS, DEFAULT_ADC_VREF, MAX_ADC_BITS},
    time::{DEFAULT_RETRIES, DEFAULT_RETRY_INTERVAL_MS},
};
use crate::errors::{SensorError, SensorResult};

/// Board and sampling parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Divider supply voltage (V)
    pub supply_voltage: f32,
    /// Load resistor RL (kΩ)
    pub load_resistance: f32,
    /// ADC resolution (bits)
    pub adc_bits: u8,
    /// ADC reference voltage (V)
    pub adc_vref: f32,
    /// Conversions averaged per voltage sample
    pub retries: u8,
    /// Delay between conversions (ms)
    pub retry_interval_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            supply_voltage: DEFAULT_SUPPLY_V,
            load_resistance: DEFAULT_LOAD_RESISTANCE_KOHM,
            adc_bits: DEFAULT_ADC_BITS,
            adc_vref: DEFAULT_ADC_VREF,
            retries: DEFAULT_RETRIES,
            retry_interval_ms: DEFAULT_RETRY_INTERVAL_MS,
        }
    }
}

impl SensorConfig {
    /// Largest code the ADC can produce, `2^bits - 1`
    pub fn full_scale_counts(&self) -> f32 {
        let bits = self.adc_bits.clamp(1, MAX_ADC_BITS) as u32;
        ((1u32 << bits) - 1) as f32
    }

    /// Reject parameters the divider model cannot work with
    pub fn validate(&self) -> SensorResult<()> {
        if !(self.supply_voltage.is_finite() && self.supply_voltage > 0.0) {
            return Err(SensorError::InvalidConfig {
                reason: "supply voltage must be positive",
            });
        }
        if !(self.load_resistance.is_finite() && self.load_resistance > 0.0) {
            return Err(SensorError::InvalidConfig {
                reason: "load resistance must be positive",
            });
        }
        if self.adc_bits == 0 || self.adc_bits > MAX_ADC_BITS {
            return Err(SensorError::InvalidConfig {
                reason: "ADC resolution must be 1-16 bits",
            });
        }
        if !(self.adc_vref.is_finite() && self.adc_vref > 0.0) {
            return Err(SensorError::InvalidConfig {
                reason: "ADC reference must be positive",
            });
        }
        if self.retries == 0 {
            return Err(SensorError::InvalidConfig {
                reason: "at least one conversion per sample",
            });
        }
        Ok(())
    }
}
