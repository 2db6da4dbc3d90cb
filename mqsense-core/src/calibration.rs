//! Clean-Air Baseline Calibration
//!
//! ## Protocol
//!
//! In clean air the sensor sits at a known point of its curve: the
//! manufacturer's clean-air ratio `K` (Rs/R0 ≈ 9.83 for an MQ-2). Measuring
//! Rs there gives the baseline directly:
//!
//! ```text
//! r0_i = max(0, Rs_i / K + correction)      for i in 0..samples
//! r0   = mean(r0_i)
//! ```
//!
//! Each `Rs_i` comes from a full averaged voltage sample, so one calibration
//! blocks for `samples × retries × retry_interval_ms`.
//!
//! ## Supply Offset
//!
//! Calibration divides with the nominal supply voltage for every model. The
//! MQ-303A diode drop is a read-path adjustment only.

use heapless::Vec;

use crate::constants::time::CALIBRATION_SAMPLES;
use crate::errors::{SensorError, SensorResult};
use crate::resistance::sensor_resistance;
use crate::sampler::VoltageSource;

/// Outcome of one calibration run
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// Mean baseline resistance (unit of RL)
    pub r0: f32,
    /// Per-sample baseline values
    pub samples: Vec<f32, CALIBRATION_SAMPLES>,
    /// Reference ratio the run was made against
    pub clean_air_ratio: f32,
    /// Correction added to every sample
    pub correction: f32,
}

impl CalibrationReport {
    /// Difference between the largest and smallest sample
    ///
    /// A large spread means the sensor had not settled (still preheating, or
    /// the air was not clean).
    pub fn spread(&self) -> f32 {
        let min = self.samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if self.samples.is_empty() { 0.0 } else { max - min }
    }
}

/// Runs the averaged clean-air calibration
#[derive(Debug, Clone, Copy)]
pub struct CalibrationManager {
    samples: usize,
}

impl Default for CalibrationManager {
    fn default() -> Self {
        Self { samples: CALIBRATION_SAMPLES }
    }
}

impl CalibrationManager {
    /// Manager averaging the default number of samples
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager averaging `samples` samples, clamped to `1..=CALIBRATION_SAMPLES`
    pub fn with_samples(samples: usize) -> Self {
        Self { samples: samples.clamp(1, CALIBRATION_SAMPLES) }
    }

    /// Number of samples averaged per run
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sample the source and compute the baseline
    pub fn run<V: VoltageSource>(
        &self,
        source: &mut V,
        vcc: f32,
        rl: f32,
        clean_air_ratio: f32,
        correction: f32,
    ) -> SensorResult<CalibrationReport> {
        if !(clean_air_ratio.is_finite() && clean_air_ratio > 0.0) {
            return Err(SensorError::InvalidCleanAirRatio { ratio: clean_air_ratio });
        }

        let mut samples = Vec::new();
        for _ in 0..self.samples {
            let volts = source.sample()?;
            let rs = sensor_resistance(vcc, rl, volts);
            // Capacity equals the clamp upper bound, so the push cannot fail
            let _ = samples.push(baseline_sample(rs, clean_air_ratio, correction));
        }

        let sum: f32 = samples.iter().sum();
        let r0 = sum / samples.len() as f32;

        log_info!(
            "Calibrated against clean-air ratio {}: r0 = {} over {} samples",
            clean_air_ratio,
            r0,
            samples.len()
        );

        Ok(CalibrationReport { r0, samples, clean_air_ratio, correction })
    }
}

/// Baseline implied by one clean-air resistance measurement
pub fn baseline_sample(rs: f32, clean_air_ratio: f32, correction: f32) -> f32 {
    let r0 = rs / clean_air_ratio + correction;
    if r0.is_nan() || r0 < 0.0 {
        0.0
    } else {
        r0
    }
}
