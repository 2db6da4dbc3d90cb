//! Circuit Model and Numeric Guard Constants
//!
//! The MQ sensing element sits in a voltage divider with a load resistor
//! `RL`. Everything the engine derives (Rs, Rs/R0, ppm) flows from that
//! divider, so the values here describe the divider and the limits of the
//! float domain the regression is evaluated in.

// ===== VOLTAGE DIVIDER =====

/// Default supply voltage across the divider (V).
///
/// MQ modules are powered from a 5 V rail on every reference board.
///
/// Source: Hanwei MQ-2 / MQ-135 datasheets
pub const DEFAULT_SUPPLY_V: f32 = 5.0;

/// Default load resistance (kΩ).
///
/// Breakout boards ship with a 10 kΩ trimmer or fixed resistor.
///
/// Source: Common FC-22 / Flying-Fish module schematics
pub const DEFAULT_LOAD_RESISTANCE_KOHM: f32 = 10.0;

/// Forward drop of the series diode in the MQ-303A reference circuit (V).
///
/// Subtracted from the supply only while computing Rs on the read path.
///
/// Source: Hanwei MQ-303A application circuit
pub const DIODE_DROP_V: f32 = 0.45;

// ===== RATIO DOMAIN =====

/// Smallest ratio handed to the regression (dimensionless).
///
/// A corrected ratio at or below zero is replaced by this value because the
/// next stage takes its logarithm.
pub const RATIO_FLOOR: f32 = 0.001;

// ===== COEFFICIENT BOUNDS =====

/// Magnitude limit for the `a` coefficient.
pub const MAX_COEFFICIENT_A: f32 = 1e30;

/// Magnitude limit for the `b` coefficient.
///
/// Far wider than any tabulated slope (all within ±4); kept as the driver
/// historically clamped it.
pub const MAX_COEFFICIENT_B: f32 = 100.0;

// ===== FLOAT DOMAIN =====

/// log10 of the largest finite `f32`.
///
/// A regression log value above this would overflow on exponentiation.
pub const MAX_LOG10_PPM: f64 = 38.531_839_419_103_626;

/// log10 of the smallest normal positive `f32`.
///
/// A regression log value below this underflows to zero.
pub const MIN_LOG10_PPM: f64 = -37.929_779_453_661_63;

// ===== ENVIRONMENTAL REFERENCE =====

/// Temperature at which the datasheet curves were recorded (°C).
///
/// Source: MQ-series datasheets, "standard test conditions"
pub const REFERENCE_TEMPERATURE_C: f32 = 20.0;

/// Relative humidity at which the datasheet curves were recorded (%RH).
///
/// Source: MQ-series datasheets, "standard test conditions"
pub const REFERENCE_HUMIDITY_PCT: f32 = 60.0;
