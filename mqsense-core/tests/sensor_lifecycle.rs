//! Integration tests for the sensor lifecycle
//!
//! Drives complete sensors through simulated ADCs: initialization,
//! calibration, reading and the failure paths between them.

mod common;

use mqsense_core::{
    sampler::sim::{FixedAdc, FixedVoltage, SimDelay},
    GasType, MqSensor, SampleMode, SensorError, SensorState, SensorType, Status, VoltageSampler,
};

use common::{
    approx_eq, board, code_for, expected_r0, expected_rs, pinned_sensor, scenarios::EXPOSURES,
    set_code, sim_sensor, sim_sensor_for, volts_for,
};

#[test]
fn test_full_lifecycle_mq2() {
    let code = code_for(0.45);
    let mut sensor = sim_sensor(SensorType::Mq2, code);

    sensor.initialize().unwrap();
    assert_eq!(sensor.state(), SensorState::Uninitialized);

    let r0 = sensor.calibrate_in_clean_air(0.0).unwrap();
    let v = volts_for(code);
    assert!(approx_eq(r0, expected_r0(5.0, 10.0, v, 9.83, 0.0), 1e-4));
    assert_eq!(sensor.state(), SensorState::Ready);

    // Still in clean air: ratio sits at the clean-air point
    let ppm = sensor.read_sensor(0.0).unwrap();
    assert!(approx_eq(sensor.ratio(), 9.83, 1e-3));
    assert!(approx_eq(ppm, 574.25 * libm::powf(9.83, -2.222), 1e-2));
    assert_eq!(sensor.ppm(), ppm);
}

#[test]
fn test_calibration_formula_matches_closed_form() {
    for (volts, ratio, correction) in [(1.0, 9.83, 0.0), (2.5, 3.6, 0.5), (0.8, 15.0, -0.2)] {
        let mut sensor = pinned_sensor(SensorType::Mq135, volts);
        let r0 = sensor.calibrate(ratio, correction).unwrap();
        let expected = expected_r0(5.0, 10.0, volts, ratio, correction);
        assert!(
            approx_eq(r0, expected, 1e-5),
            "V={} K={} corr={}: got {} expected {}",
            volts, ratio, correction, r0, expected
        );
    }
}

#[test]
fn test_calibration_blocks_for_every_conversion() {
    let mut sensor = sim_sensor(SensorType::Mq135, 300);
    sensor.calibrate_in_clean_air(0.0).unwrap();

    // 10 samples × 10 conversions × 20 ms
    let config = board();
    let expected_ms = 10 * config.retries as u64 * config.retry_interval_ms as u64;
    assert_eq!(sensor.source().delay().elapsed_ms(), expected_ms);
}

#[test]
fn test_exposures_raise_concentration() {
    for exposure in EXPOSURES {
        let mut sensor = sim_sensor_for(exposure.sensor, exposure.gas, code_for(exposure.clean_air_v));
        sensor.calibrate_in_clean_air(0.0).unwrap();
        let clean = sensor.read_sensor(0.0).unwrap();

        set_code(&mut sensor, code_for(exposure.exposed_v));
        let exposed = sensor.read_sensor(0.0).unwrap();

        assert!(
            exposed > clean,
            "{}: exposed {} ppm not above clean-air {} ppm",
            exposure.name, exposed, clean
        );
        assert!(exposed.is_finite());
    }
}

#[test]
fn test_mq303a_supply_symmetry() {
    let mut sensor = pinned_sensor(SensorType::Mq303a, 2.0);
    let vcc = sensor.vcc();

    // Calibration uses the nominal supply
    let r0 = sensor.calibrate_in_clean_air(0.0).unwrap();
    assert!(approx_eq(r0, expected_rs(5.0, 10.0, 2.0), 1e-5));
    assert_eq!(sensor.vcc(), vcc);

    // Reads use the offset supply, without ever storing it
    for _ in 0..100 {
        sensor.read_sensor(0.0).unwrap();
        assert_eq!(sensor.vcc(), vcc);
    }
    assert!(approx_eq(sensor.rs(), expected_rs(4.55, 10.0, 2.0), 1e-5));
}

#[test]
fn test_mq303a_symmetry_survives_failed_reads() {
    let config = board();
    let sampler: VoltageSampler<FixedAdc, SimDelay> = VoltageSampler::unbound(SimDelay::new(), &config);
    let mut sensor = MqSensor::new(SensorType::Mq303a, sampler, config).unwrap();
    sensor.set_r0(10.0).unwrap();

    for _ in 0..10 {
        assert_eq!(sensor.read_sensor(0.0), Err(SensorError::NoHardware));
    }
    assert_eq!(sensor.vcc(), 5.0);
}

#[test]
fn test_set_ratio_is_idempotent() {
    let mut sensor = pinned_sensor(SensorType::Mq2, 1.0);
    for ratio in [0.001, 0.5, 1.0, 2.0, 9.83, 1e6] {
        let first = sensor.set_ratio_and_get_ppm(ratio);
        let second = sensor.set_ratio_and_get_ppm(ratio);
        assert_eq!(first.to_bits(), second.to_bits());
    }
}

#[test]
fn test_power_law_reference_points() {
    let mut sensor = pinned_sensor(SensorType::Mq2, 1.0);
    assert!(approx_eq(sensor.set_ratio_and_get_ppm(1.0), 574.25, 1e-5));
    assert!(approx_eq(sensor.set_ratio_and_get_ppm(2.0), 123.087, 1e-4));
}

#[test]
fn test_status_codes() {
    let missing = MqSensor::with_gas(SensorType::Mq2, GasType::O3, FixedVoltage::new(1.0), board())
        .map(|_| ());
    assert_eq!(Status::from(&missing), Status::NotFound);
    assert_eq!(Status::NotFound as u8, 0x04);

    let mut sensor = pinned_sensor(SensorType::Mq2, 1.0);
    let uncalibrated = sensor.read_sensor(0.0);
    assert_eq!(Status::from(&uncalibrated), Status::Error);

    sensor.calibrate_in_clean_air(0.0).unwrap();
    let ok = sensor.read_sensor(0.0);
    assert_eq!(Status::from(&ok), Status::Ok);
    assert_eq!(Status::Ok as u8, 0x00);
}

#[test]
fn test_restored_baseline_matches_calibration() {
    let mut calibrated = pinned_sensor(SensorType::Mq135, 1.2);
    let r0 = calibrated.calibrate_in_clean_air(0.0).unwrap();
    let reference = calibrated.read_sensor(0.0).unwrap();

    let mut restored = pinned_sensor(SensorType::Mq135, 1.2);
    restored.set_r0(r0).unwrap();
    assert_eq!(restored.state(), SensorState::Ready);
    assert_eq!(restored.read_sensor(0.0).unwrap(), reference);
}

#[test]
fn test_external_adc_path() {
    let config = board();
    let sampler: VoltageSampler<FixedAdc, SimDelay> = VoltageSampler::unbound(SimDelay::new(), &config);
    let mut sensor = MqSensor::new(SensorType::Mq2, sampler, config).unwrap();
    sensor.set_r0(10.0).unwrap();

    // Unbound hardware still accepts injected and external readings
    let v = sensor.set_adc(512);
    assert!(approx_eq(v, volts_for(512), 1e-6));
    assert_eq!(sensor.adc(), 512.0);

    sensor.external_adc_update(1.25);
    assert_eq!(sensor.voltage(SampleMode::Cached).unwrap(), 1.25);
    assert_eq!(sensor.last_voltage(), 1.25);

    // Sampling needs the channel
    assert_eq!(sensor.update(), Err(SensorError::NoHardware));
}
