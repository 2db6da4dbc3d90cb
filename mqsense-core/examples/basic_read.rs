//! Basic MQ-135 Read Example
//!
//! Walks one sensor through its lifecycle against a simulated ADC:
//! initialization, clean-air calibration, and a series of reads as the
//! simulated air quality worsens.
//!
//! ## What You'll Learn
//!
//! - Wiring an `AdcChannel` and a `DelayNs` into a `VoltageSampler`
//! - Calibrating against the profile's clean-air ratio
//! - Reading ppm and inspecting the intermediate resistance and ratio
//! - Enabling temperature and humidity compensation
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example basic_read
//! ```

use mqsense_core::{
    sampler::sim::{FixedAdc, SimDelay},
    GasType, MqSensor, SensorConfig, SensorError, SensorType, VoltageSampler,
};

fn main() -> Result<(), SensorError> {
    println!("MQSense Basic Read Example");
    println!("==========================\n");

    let config = SensorConfig::default();

    // Clean air on a 5 V / 10 kΩ board reads about 1.1 V on an MQ-135
    let sampler = VoltageSampler::new(FixedAdc::new(225), SimDelay::new(), &config);
    let mut sensor = MqSensor::with_gas(SensorType::Mq135, GasType::Co2, sampler, config)?;

    let profile = *sensor.profile();
    println!("Sensor: {} measuring {}", profile.sensor.name(), profile.gas.name());
    println!("  Curve: ppm = {} × ratio^{}", profile.a, profile.b);
    println!("  Rated range: {}-{} ppm", profile.min_ppm, profile.max_ppm);
    println!("  Preheat: {} s, burn-in: {} h", profile.preheat_seconds, profile.burn_in_hours);
    println!();

    sensor.initialize()?;

    let report = sensor.calibrate_with_report(profile.clean_air_ratio, 0.0)?;
    println!("Calibrated R0 = {:.3} kΩ over {} samples (spread {:.4})",
        report.r0, report.samples.len(), report.spread());
    println!();

    println!("{:>6} {:>8} {:>10} {:>8} {:>10}", "code", "volts", "Rs (kΩ)", "ratio", "ppm");
    for code in [225u16, 260, 300, 350, 420] {
        if let Some(mut adc) = sensor.source_mut().release() {
            adc.set(code);
            sensor.source_mut().bind(adc);
        }

        let ppm = sensor.read_sensor(0.0)?;
        let marker = if profile.in_rated_range(ppm) { "" } else { "  (outside rated range)" };
        println!(
            "{:>6} {:>8.3} {:>10.3} {:>8.3} {:>10.2}{}",
            code,
            sensor.last_voltage(),
            sensor.rs(),
            sensor.ratio(),
            ppm,
            marker
        );
    }
    println!();

    // Warm, humid room
    sensor.set_ambient(28.0, 75.0)?;
    sensor.set_temperature_compensation(true);
    sensor.set_humidity_compensation(true);
    let compensated = sensor.read_sensor(0.0)?;
    println!("Compensated for 28 °C / 75 %RH: {:.2} ppm", compensated);

    let elapsed = sensor.source().delay().elapsed_ms();
    println!("Simulated sampling time: {} ms", elapsed);

    Ok(())
}
