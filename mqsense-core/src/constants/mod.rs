//! Constants for MQSense Core
//!
//! Centralized numeric values used by the conversion engine. Every constant
//! carries its unit in the name and a note on where the number comes from.
//!
//! ## Organization
//!
//! - **Physics**: circuit model values and float-domain limits
//! - **Sensors**: per-sensor coefficients and datasheet metadata
//! - **Time**: sampling and calibration timing
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the datasheet or curve fit a coefficient was taken from
//! 3. Use descriptive names that include units

/// Circuit model constants and floating-point guard limits.
pub mod physics;

/// Regression coefficients and datasheet metadata per sensor and gas.
pub mod sensors;

/// Sampling intervals and calibration sample counts.
pub mod time;

pub use physics::{
    DIODE_DROP_V, RATIO_FLOOR, REFERENCE_TEMPERATURE_C, REFERENCE_HUMIDITY_PCT,
    MAX_COEFFICIENT_A, MAX_COEFFICIENT_B,
};

pub use time::{
    DEFAULT_RETRIES, DEFAULT_RETRY_INTERVAL_MS, CALIBRATION_SAMPLES,
};
