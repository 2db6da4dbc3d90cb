//! Sensor Specifications
//!
//! Per-sensor metadata taken from the Hanwei/Winsen datasheets. The
//! per-gas regression curves live in the profile table
//! ([`crate::profile::PROFILES`]); this module holds what is shared by every
//! gas a sensor can report.
//!
//! Temperature and humidity coefficients are linearizations of the
//! datasheet "Rs/R0 vs temperature/humidity" curves around the reference
//! conditions (20 °C, 60 %RH), expressed as fractional ppm change per unit.

// ===== MQ-2 (combustible gas, smoke) =====

/// Rs/R0 in clean air.
///
/// Source: MQ-2 datasheet sensitivity curve, "air" line
pub const MQ2_CLEAN_AIR_RATIO: f32 = 9.83;

/// Heater voltage (V).
pub const MQ2_HEATER_V: f32 = 5.0;

/// Warm-up before readings stabilize (seconds).
pub const MQ2_PREHEAT_S: u32 = 20;

/// Burn-in before first calibration (hours).
pub const MQ2_BURN_IN_H: u32 = 24;

/// Fractional ppm change per °C away from 20 °C.
pub const MQ2_TEMP_COEFF: f32 = -0.009;

/// Fractional ppm change per %RH away from 60 %RH.
pub const MQ2_HUMIDITY_COEFF: f32 = -0.003;

// ===== MQ-135 (air quality) =====

/// Rs/R0 in clean air.
///
/// Source: MQ-135 datasheet sensitivity curve, "air" line
pub const MQ135_CLEAN_AIR_RATIO: f32 = 3.6;

/// Heater voltage (V).
pub const MQ135_HEATER_V: f32 = 5.0;

/// Warm-up before readings stabilize (seconds).
pub const MQ135_PREHEAT_S: u32 = 20;

/// Burn-in before first calibration (hours).
pub const MQ135_BURN_IN_H: u32 = 24;

/// Fractional ppm change per °C away from 20 °C.
pub const MQ135_TEMP_COEFF: f32 = -0.012;

/// Fractional ppm change per %RH away from 60 %RH.
pub const MQ135_HUMIDITY_COEFF: f32 = -0.004;

// ===== MQ-131 (ozone, inverted ratio R0/Rs) =====

/// Rs/R0 in clean air.
///
/// Calibration divides the clean-air Rs by this value like every other
/// family; only reads use the inverted R0/Rs form.
///
/// Source: MQ-131 low-concentration datasheet
pub const MQ131_CLEAN_AIR_RATIO: f32 = 15.0;

/// Heater voltage (V).
pub const MQ131_HEATER_V: f32 = 6.0;

/// Warm-up before readings stabilize (seconds).
pub const MQ131_PREHEAT_S: u32 = 60;

/// Burn-in before first calibration (hours).
pub const MQ131_BURN_IN_H: u32 = 48;

/// Fractional ppm change per °C away from 20 °C.
pub const MQ131_TEMP_COEFF: f32 = 0.0085;

/// Fractional ppm change per %RH away from 60 %RH.
pub const MQ131_HUMIDITY_COEFF: f32 = 0.006;

// ===== MQ-303A (alcohol, diode-drop supply) =====

/// Rs/R0 in clean air.
///
/// Source: MQ-303A datasheet
pub const MQ303A_CLEAN_AIR_RATIO: f32 = 1.0;

/// Heater voltage (V).
///
/// The MQ-303A is a low-power part with a 0.9 V heater.
pub const MQ303A_HEATER_V: f32 = 0.9;

/// Warm-up before readings stabilize (seconds).
pub const MQ303A_PREHEAT_S: u32 = 60;

/// Burn-in before first calibration (hours).
pub const MQ303A_BURN_IN_H: u32 = 48;

/// Fractional ppm change per °C away from 20 °C.
pub const MQ303A_TEMP_COEFF: f32 = -0.006;

/// Fractional ppm change per %RH away from 60 %RH.
pub const MQ303A_HUMIDITY_COEFF: f32 = -0.0025;

// ===== ADC =====

/// Largest supported ADC resolution (bits).
///
/// Codes are carried as `u16`.
pub const MAX_ADC_BITS: u8 = 16;

/// Default ADC resolution (bits), as on AVR Arduino boards.
pub const DEFAULT_ADC_BITS: u8 = 10;

/// Default ADC reference voltage (V).
pub const DEFAULT_ADC_VREF: f32 = 5.0;
