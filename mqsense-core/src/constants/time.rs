//! Sampling and Calibration Timing
//!
//! All sampling is a blocking loop: `retries` conversions separated by a
//! fixed delay. Total duration of one voltage sample is therefore
//! `retries × retry_interval_ms`.

/// Default number of ADC conversions averaged per voltage sample.
///
/// Source: MQUnifiedsensor reference driver default
pub const DEFAULT_RETRIES: u8 = 10;

/// Default delay between consecutive ADC conversions (milliseconds).
///
/// Source: MQUnifiedsensor reference driver default
pub const DEFAULT_RETRY_INTERVAL_MS: u32 = 20;

/// Number of baseline samples averaged by one calibration run.
///
/// Each sample is itself an averaged voltage, so a calibration takes
/// `CALIBRATION_SAMPLES × retries × retry_interval_ms`.
pub const CALIBRATION_SAMPLES: usize = 10;

/// Seconds per hour, for burn-in durations expressed in hours.
pub const SECONDS_PER_HOUR: u32 = 3600;
