//! Common fixtures for integration tests
//!
//! This module provides:
//! - Sensors wired to simulated ADCs at a known divider voltage
//! - Code/voltage conversion for the default 10-bit, 5 V converter
//! - The closed-form divider and calibration formulas to check against

#![allow(dead_code)]

pub mod scenarios;

use mqsense_core::{
    sampler::sim::{FixedAdc, FixedVoltage, SimDelay},
    GasType, MqSensor, SensorConfig, SensorType, VoltageSampler,
};

/// Sensor driven by a real sampler over a simulated ADC
pub type SimSensor = MqSensor<VoltageSampler<FixedAdc, SimDelay>>;

/// Default board: 5 V, 10 kΩ, 10-bit ADC
pub fn board() -> SensorConfig {
    SensorConfig::default()
}

/// Board with a single conversion per sample, for fast loops
pub fn fast_board() -> SensorConfig {
    SensorConfig {
        retries: 1,
        retry_interval_ms: 0,
        ..SensorConfig::default()
    }
}

/// ADC code for a divider voltage on the default converter
pub fn code_for(volts: f32) -> u16 {
    let code = volts * 1023.0 / 5.0;
    code.round().clamp(0.0, 1023.0) as u16
}

/// Voltage the default converter reports for a code
pub fn volts_for(code: u16) -> f32 {
    code as f32 * 5.0 / 1023.0
}

/// `Rs = Vcc × RL / V - RL`, clamped at zero
pub fn expected_rs(vcc: f32, rl: f32, v: f32) -> f32 {
    ((vcc * rl / v) - rl).max(0.0)
}

/// `r0 = max(0, Rs / K + correction)`
pub fn expected_r0(vcc: f32, rl: f32, v: f32, clean_air_ratio: f32, correction: f32) -> f32 {
    (expected_rs(vcc, rl, v) / clean_air_ratio + correction).max(0.0)
}

/// Sensor over a simulated ADC fixed at `code`
pub fn sim_sensor(sensor: SensorType, code: u16) -> SimSensor {
    let config = board();
    let sampler = VoltageSampler::new(FixedAdc::new(code), SimDelay::new(), &config);
    MqSensor::new(sensor, sampler, config).expect("default profile exists")
}

/// Sensor over a simulated ADC for a specific gas
pub fn sim_sensor_for(sensor: SensorType, gas: GasType, code: u16) -> SimSensor {
    let config = fast_board();
    let sampler = VoltageSampler::new(FixedAdc::new(code), SimDelay::new(), &config);
    MqSensor::with_gas(sensor, gas, sampler, config).expect("profile exists")
}

/// Sensor pinned to a voltage, bypassing ADC quantization
pub fn pinned_sensor(sensor: SensorType, volts: f32) -> MqSensor<FixedVoltage> {
    MqSensor::new(sensor, FixedVoltage::new(volts), board()).expect("default profile exists")
}

/// Change the code the simulated ADC converts to
pub fn set_code(sensor: &mut SimSensor, code: u16) {
    if let Some(mut adc) = sensor.source_mut().release() {
        adc.set(code);
        sensor.source_mut().bind(adc);
    }
}

/// Relative closeness with an absolute floor for values near zero
pub fn approx_eq(actual: f32, expected: f32, rel: f32) -> bool {
    let tolerance = (expected.abs() * rel).max(1e-6);
    (actual - expected).abs() <= tolerance
}
