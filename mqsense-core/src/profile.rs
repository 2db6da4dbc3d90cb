//! Sensor and Gas Profiles
//!
//! ## Curve Model
//!
//! Every MQ datasheet plots Rs/R0 against concentration on log-log axes. A
//! straight line on those axes is a power law, so each gas curve reduces to
//! two numbers:
//!
//! ```text
//! ppm = a × ratio^b
//! ```
//!
//! The coefficients below are least-squares fits of the datasheet curves
//! (the same fits the MQUnifiedsensor project publishes). Together with the
//! per-sensor metadata in [`crate::constants::sensors`] they form one
//! immutable [`SensorProfile`] per `(SensorType, GasType)` pair.
//!
//! ## Table Design
//!
//! The table is a plain `static` array searched linearly. With fifteen
//! entries a scan is cheaper than any index structure and the table stays
//! inspectable from tests and host tooling.
//!
//! ```rust
//! use mqsense_core::profile::{SensorProfile, SensorType, GasType};
//!
//! let profile = SensorProfile::lookup(SensorType::Mq135, GasType::Co2)?;
//! assert_eq!(profile.a, 110.47);
//! assert_eq!(profile.clean_air_ratio, 3.6);
//! # Ok::<(), mqsense_core::SensorError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{sensors::*, time::SECONDS_PER_HOUR},
    errors::{SensorError, SensorResult},
};

/// Supported sensor models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorType {
    /// Combustible gas and smoke
    Mq2,
    /// Air quality (CO2, NH3, VOCs)
    Mq135,
    /// Ozone
    Mq131,
    /// Alcohol, low-power
    Mq303a,
}

/// How the clean-air-normalized ratio is formed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RatioFamily {
    /// `Rs / R0`: resistance falls as concentration rises
    Direct,
    /// `R0 / Rs`: oxidizing gases raise the resistance
    Inverted,
}

impl SensorType {
    /// Every supported model
    pub const ALL: [SensorType; 4] = [
        SensorType::Mq2,
        SensorType::Mq135,
        SensorType::Mq131,
        SensorType::Mq303a,
    ];

    /// Model name as printed on the part
    pub fn name(&self) -> &'static str {
        match self {
            SensorType::Mq2 => "MQ-2",
            SensorType::Mq135 => "MQ-135",
            SensorType::Mq131 => "MQ-131",
            SensorType::Mq303a => "MQ-303A",
        }
    }

    /// Ratio orientation used by this model's datasheet curves
    pub fn ratio_family(&self) -> RatioFamily {
        match self {
            SensorType::Mq131 => RatioFamily::Inverted,
            _ => RatioFamily::Direct,
        }
    }

    /// Whether the reference circuit puts a diode in series with the supply
    pub fn has_diode_drop(&self) -> bool {
        matches!(self, SensorType::Mq303a)
    }

    /// Gas selected when none is given explicitly
    pub fn default_gas(&self) -> GasType {
        match self {
            SensorType::Mq2 => GasType::Lpg,
            SensorType::Mq135 => GasType::Co2,
            SensorType::Mq131 => GasType::O3,
            SensorType::Mq303a => GasType::Alcohol,
        }
    }
}

/// Target gases across the supported models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GasType {
    /// Liquefied petroleum gas
    Lpg,
    /// Hydrogen
    H2,
    /// Carbon monoxide
    Co,
    /// Ethanol vapour
    Alcohol,
    /// Propane
    Propane,
    /// Carbon dioxide
    Co2,
    /// Ammonia
    Nh3,
    /// Toluene
    Toluene,
    /// Acetone
    Acetone,
    /// Ozone
    O3,
    /// Iso-butane
    IsoButane,
}

impl GasType {
    /// Human-readable gas name
    pub fn name(&self) -> &'static str {
        match self {
            GasType::Lpg => "LPG",
            GasType::H2 => "Hydrogen",
            GasType::Co => "Carbon Monoxide",
            GasType::Alcohol => "Alcohol",
            GasType::Propane => "Propane",
            GasType::Co2 => "Carbon Dioxide",
            GasType::Nh3 => "Ammonia",
            GasType::Toluene => "Toluene",
            GasType::Acetone => "Acetone",
            GasType::O3 => "Ozone",
            GasType::IsoButane => "Iso-butane",
        }
    }
}

/// Regression form mapping ratio to ppm
///
/// Discriminants match the historical driver codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RegressionMethod {
    /// `log10(ppm) = log10(a) + b·log10(ratio)`, i.e. `ppm = a·ratio^b`
    Exponential = 1,
    /// `log10(ppm) = (log10(ratio) - b) / a`
    Linear = 2,
}

/// Immutable calibration data for one sensor/gas selection
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorProfile {
    /// Sensor model
    pub sensor: SensorType,
    /// Target gas
    pub gas: GasType,
    /// Curve coefficient `a`
    pub a: f32,
    /// Curve coefficient `b`
    pub b: f32,
    /// Lower end of the rated detection range (ppm)
    pub min_ppm: f32,
    /// Upper end of the rated detection range (ppm)
    pub max_ppm: f32,
    /// Regression form the coefficients belong to
    pub regression: RegressionMethod,
    /// Expected ratio in clean air; the calibration reference point
    pub clean_air_ratio: f32,
    /// Heater supply (V)
    pub heater_voltage: f32,
    /// Warm-up before readings stabilize (s)
    pub preheat_seconds: u32,
    /// Initial burn-in before the first calibration (h)
    pub burn_in_hours: u32,
    /// Fractional ppm change per °C from the reference temperature
    pub temp_coeff: f32,
    /// Fractional ppm change per %RH from the reference humidity
    pub humidity_coeff: f32,
}

impl SensorProfile {
    /// Find the profile for a sensor/gas pair
    pub fn lookup(sensor: SensorType, gas: GasType) -> SensorResult<Self> {
        PROFILES
            .iter()
            .find(|p| p.sensor == sensor && p.gas == gas)
            .copied()
            .ok_or(SensorError::ProfileNotFound)
    }

    /// Profile for the sensor's default gas
    pub fn default_for(sensor: SensorType) -> Self {
        // Every model has a row for its default gas; the fallback is never hit.
        Self::lookup(sensor, sensor.default_gas()).unwrap_or(GENERIC)
    }

    /// All profiles available for one sensor model
    pub fn for_sensor(sensor: SensorType) -> impl Iterator<Item = &'static SensorProfile> {
        PROFILES.iter().filter(move |p| p.sensor == sensor)
    }

    /// Whether a concentration lies inside the rated detection range
    pub fn in_rated_range(&self, ppm: f32) -> bool {
        ppm >= self.min_ppm && ppm <= self.max_ppm
    }

    /// Burn-in duration in seconds
    pub fn burn_in_seconds(&self) -> u32 {
        self.burn_in_hours.saturating_mul(SECONDS_PER_HOUR)
    }
}

/// Fallback curve for unknown parts (`a = 100`, `b = -1.5`)
pub const GENERIC: SensorProfile = SensorProfile {
    sensor: SensorType::Mq2,
    gas: GasType::Lpg,
    a: 100.0,
    b: -1.5,
    min_ppm: 0.0,
    max_ppm: 10_000.0,
    regression: RegressionMethod::Exponential,
    clean_air_ratio: MQ2_CLEAN_AIR_RATIO,
    heater_voltage: MQ2_HEATER_V,
    preheat_seconds: MQ2_PREHEAT_S,
    burn_in_hours: MQ2_BURN_IN_H,
    temp_coeff: 0.0,
    humidity_coeff: 0.0,
};

const fn mq2(gas: GasType, a: f32, b: f32, min_ppm: f32, max_ppm: f32) -> SensorProfile {
    SensorProfile {
        sensor: SensorType::Mq2,
        gas,
        a,
        b,
        min_ppm,
        max_ppm,
        regression: RegressionMethod::Exponential,
        clean_air_ratio: MQ2_CLEAN_AIR_RATIO,
        heater_voltage: MQ2_HEATER_V,
        preheat_seconds: MQ2_PREHEAT_S,
        burn_in_hours: MQ2_BURN_IN_H,
        temp_coeff: MQ2_TEMP_COEFF,
        humidity_coeff: MQ2_HUMIDITY_COEFF,
    }
}

const fn mq135(gas: GasType, a: f32, b: f32, min_ppm: f32, max_ppm: f32) -> SensorProfile {
    SensorProfile {
        sensor: SensorType::Mq135,
        gas,
        a,
        b,
        min_ppm,
        max_ppm,
        regression: RegressionMethod::Exponential,
        clean_air_ratio: MQ135_CLEAN_AIR_RATIO,
        heater_voltage: MQ135_HEATER_V,
        preheat_seconds: MQ135_PREHEAT_S,
        burn_in_hours: MQ135_BURN_IN_H,
        temp_coeff: MQ135_TEMP_COEFF,
        humidity_coeff: MQ135_HUMIDITY_COEFF,
    }
}

const fn mq131(gas: GasType, a: f32, b: f32, min_ppm: f32, max_ppm: f32) -> SensorProfile {
    SensorProfile {
        sensor: SensorType::Mq131,
        gas,
        a,
        b,
        min_ppm,
        max_ppm,
        regression: RegressionMethod::Exponential,
        clean_air_ratio: MQ131_CLEAN_AIR_RATIO,
        heater_voltage: MQ131_HEATER_V,
        preheat_seconds: MQ131_PREHEAT_S,
        burn_in_hours: MQ131_BURN_IN_H,
        temp_coeff: MQ131_TEMP_COEFF,
        humidity_coeff: MQ131_HUMIDITY_COEFF,
    }
}

const fn mq303a(gas: GasType, a: f32, b: f32, min_ppm: f32, max_ppm: f32) -> SensorProfile {
    SensorProfile {
        sensor: SensorType::Mq303a,
        gas,
        a,
        b,
        min_ppm,
        max_ppm,
        regression: RegressionMethod::Exponential,
        clean_air_ratio: MQ303A_CLEAN_AIR_RATIO,
        heater_voltage: MQ303A_HEATER_V,
        preheat_seconds: MQ303A_PREHEAT_S,
        burn_in_hours: MQ303A_BURN_IN_H,
        temp_coeff: MQ303A_TEMP_COEFF,
        humidity_coeff: MQ303A_HUMIDITY_COEFF,
    }
}

/// Static coefficient table keyed by `(sensor, gas)`
pub static PROFILES: [SensorProfile; 15] = [
    //    gas                   a          b       min     max
    mq2(GasType::Lpg,         574.25,  -2.222,  200.0, 10_000.0),
    mq2(GasType::H2,          987.99,  -2.162,  300.0,  5_000.0),
    mq2(GasType::Co,       36_974.0,   -3.109,  200.0, 10_000.0),
    mq2(GasType::Alcohol,   3_616.1,   -2.675,  100.0,  2_000.0),
    mq2(GasType::Propane,     658.71,  -2.168,  200.0,  5_000.0),
    mq135(GasType::Co2,       110.47,  -2.862,   10.0,  1_000.0),
    mq135(GasType::Co,        605.18,  -3.937,   10.0,    200.0),
    mq135(GasType::Alcohol,    77.255, -3.18,    10.0,    300.0),
    mq135(GasType::Nh3,       102.2,   -2.473,   10.0,    300.0),
    mq135(GasType::Toluene,    44.947, -3.445,   10.0,    300.0),
    mq135(GasType::Acetone,    34.668, -3.369,   10.0,    300.0),
    mq131(GasType::O3,         23.943, -1.11,     0.01,     1.0),
    mq303a(GasType::Alcohol,    4.2,   -1.0,     20.0,  1_000.0),
    mq303a(GasType::IsoButane,  6.2144, -2.894, 100.0, 10_000.0),
    mq303a(GasType::H2,         4.1487, -2.716, 100.0, 10_000.0),
];
