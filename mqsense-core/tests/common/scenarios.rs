//! Exposure scenarios
//!
//! Each scenario describes a clean-air calibration followed by an exposure,
//! as divider voltages on the default 5 V / 10 kΩ board.

use mqsense_core::{GasType, SensorType};

/// One calibrate-then-expose run
#[derive(Debug, Clone, Copy)]
pub struct Exposure {
    pub name: &'static str,
    pub sensor: SensorType,
    pub gas: GasType,
    /// Divider voltage in clean air (V)
    pub clean_air_v: f32,
    /// Divider voltage during exposure (V)
    pub exposed_v: f32,
}

/// Scenarios where the gas pushes the reading up
///
/// Direct-family sensors lose resistance in gas, so the divider voltage
/// rises. MQ-131 gains resistance in ozone and its voltage falls.
pub const EXPOSURES: [Exposure; 4] = [
    Exposure {
        name: "kitchen LPG leak",
        sensor: SensorType::Mq2,
        gas: GasType::Lpg,
        clean_air_v: 0.45,
        exposed_v: 1.6,
    },
    Exposure {
        name: "crowded room CO2",
        sensor: SensorType::Mq135,
        gas: GasType::Co2,
        clean_air_v: 1.1,
        exposed_v: 1.5,
    },
    Exposure {
        name: "ozone generator",
        sensor: SensorType::Mq131,
        gas: GasType::O3,
        clean_air_v: 2.0,
        exposed_v: 1.2,
    },
    Exposure {
        name: "breath alcohol",
        sensor: SensorType::Mq303a,
        gas: GasType::Alcohol,
        clean_air_v: 2.2,
        exposed_v: 3.4,
    },
];
