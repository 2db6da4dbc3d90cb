//! Log-Domain Regression with Overflow Protection
//!
//! ## The Two Models
//!
//! MQ datasheets give concentration curves on log-log axes. Two fits are in
//! use:
//!
//! ```text
//! Exponential (power law):  log10(ppm) = log10(a) + b·log10(ratio)
//! Linear (log-linear):      log10(ppm) = (log10(ratio) - b) / a
//! ```
//!
//! Both are evaluated in the log domain and exponentiated once at the end.
//!
//! ## Overflow Guard
//!
//! A user-set `a` of 1e30 or a floored ratio of 0.001 with `b = -100` gives
//! `log10(ppm)` far outside what an `f32` can hold. Calling `pow` on those
//! values only produces `inf` or a denormal. The guard checks the log value
//! against the representable range first:
//!
//! ```text
//!      0 ppm  ◄── below log10(f32::MIN_POSITIVE) ≈ -37.93
//! f32::MAX    ◄── above log10(f32::MAX)          ≈  38.53
//! ```
//!
//! and only calls the power function for values in between.
//!
//! ## Uncalibrated Model
//!
//! `a == 0` means "no curve loaded". Both models return 0 ppm for it rather
//! than an error; callers track calibration state themselves.

use crate::constants::physics::{
    MAX_COEFFICIENT_A, MAX_COEFFICIENT_B, MAX_LOG10_PPM, MIN_LOG10_PPM,
};
use crate::profile::{RegressionMethod, SensorProfile};

/// Working regression coefficients
///
/// Seeded from a [`SensorProfile`] and adjustable at runtime. The setters are
/// total: any input is accepted and the stored value always respects the
/// coefficient bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    a: f32,
    b: f32,
    method: RegressionMethod,
}

impl RegressionModel {
    /// Create a model, clamping the coefficients
    pub fn new(a: f32, b: f32, method: RegressionMethod) -> Self {
        let mut model = Self { a: 0.0, b: 0.0, method };
        model.set_a(a);
        model.set_b(b);
        model
    }

    /// Model carrying a profile's curve
    pub fn from_profile(profile: &SensorProfile) -> Self {
        Self::new(profile.a, profile.b, profile.regression)
    }

    /// Coefficient `a`
    pub fn a(&self) -> f32 {
        self.a
    }

    /// Coefficient `b`
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Active regression form
    pub fn method(&self) -> RegressionMethod {
        self.method
    }

    /// Set `a`, clamped to ±1e30; NaN and infinities become 0
    pub fn set_a(&mut self, value: f32) {
        self.a = clamp_coefficient(value, MAX_COEFFICIENT_A);
    }

    /// Set `b`, clamped to ±100; NaN and infinities become 0
    pub fn set_b(&mut self, value: f32) {
        self.b = clamp_coefficient(value, MAX_COEFFICIENT_B);
    }

    /// Switch the regression form
    pub fn set_method(&mut self, method: RegressionMethod) {
        self.method = method;
    }

    /// Concentration for a ratio
    ///
    /// Always finite and non-negative. A zero `a`, or a ratio that is not
    /// strictly positive, yields 0.
    pub fn evaluate(&self, ratio: f32) -> f32 {
        if self.a == 0.0 || ratio.is_nan() || ratio <= 0.0 {
            return 0.0;
        }

        let a = self.a as f64;
        let b = self.b as f64;
        let log_ratio = libm::log10(ratio as f64);

        let log_ppm = match self.method {
            RegressionMethod::Exponential => libm::log10(a) + b * log_ratio,
            RegressionMethod::Linear => (log_ratio - b) / a,
        };

        finalize(exp10_guarded(log_ppm))
    }
}

impl From<&SensorProfile> for RegressionModel {
    fn from(profile: &SensorProfile) -> Self {
        Self::from_profile(profile)
    }
}

fn clamp_coefficient(value: f32, bound: f32) -> f32 {
    if !value.is_finite() {
        0.0
    } else {
        value.clamp(-bound, bound)
    }
}

/// Whether `10^log_ppm` falls outside the normal `f32` range
pub fn will_overflow(log_ppm: f64) -> bool {
    log_ppm > MAX_LOG10_PPM || log_ppm < MIN_LOG10_PPM
}

/// `base^exp` with exact shortcuts for exponents 0, 1 and 2
pub fn safe_pow(base: f64, exp: f64) -> f64 {
    if exp == 0.0 {
        1.0
    } else if exp == 1.0 {
        base
    } else if exp == 2.0 {
        base * base
    } else {
        libm::pow(base, exp)
    }
}

/// `10^log_ppm`, short-circuiting values the guard rejects
///
/// NaN propagates and is mapped by the final clamp.
fn exp10_guarded(log_ppm: f64) -> f64 {
    if will_overflow(log_ppm) {
        let clamped = if log_ppm > 0.0 { f32::MAX as f64 } else { 0.0 };
        log_debug!("log10(ppm) {} outside f32 range, clamped to {}", log_ppm, clamped);
        clamped
    } else {
        safe_pow(10.0, log_ppm)
    }
}

/// Enforce the ppm invariants: non-negative and finite
pub(crate) fn finalize(ppm: f64) -> f32 {
    if !ppm.is_finite() {
        return f32::MAX;
    }
    let ppm = ppm.max(0.0) as f32;
    // f64 values just past f32::MAX round to inf on the cast
    if ppm.is_finite() { ppm } else { f32::MAX }
}
