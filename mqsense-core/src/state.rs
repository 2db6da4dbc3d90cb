//! Per-sensor mutable measurement state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::SensorConfig;

/// Calibration lifecycle
///
/// ```text
/// Uninitialized ──calibrate──► Calibrating ──ok──► Ready
///                                   │                │
///                                   └──fail──► (previous state)
///                                                    │
///                      Ready ──calibrate──► Calibrating
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorState {
    /// No baseline yet
    Uninitialized,
    /// Calibration in progress
    Calibrating,
    /// Baseline available, reads are defined
    Ready,
}

impl SensorState {
    /// Short label for log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Calibrating => "calibrating",
            Self::Ready => "ready",
        }
    }
}

/// Everything the last measurement cycle produced
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementState {
    /// Nominal supply voltage (V); never carries the diode offset
    pub vcc: f32,
    /// Load resistance RL (kΩ)
    pub rl: f32,
    /// Last raw ADC code
    pub last_raw_adc: f32,
    /// Last divider voltage (V)
    pub last_voltage: f32,
    /// Calibrated baseline resistance
    pub r0: Option<f32>,
    /// Last computed sensor resistance
    pub rs_calc: f32,
    /// Last ratio fed to the regression
    pub ratio: f32,
    /// Last concentration (ppm)
    pub ppm: f32,
    /// Lifecycle state
    pub state: SensorState,
}

impl MeasurementState {
    /// Fresh state for a board configuration
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            vcc: config.supply_voltage,
            rl: config.load_resistance,
            last_raw_adc: 0.0,
            last_voltage: 0.0,
            r0: None,
            rs_calc: 0.0,
            ratio: 0.0,
            ppm: 0.0,
            state: SensorState::Uninitialized,
        }
    }

    /// Whether a baseline is available for reads
    pub fn is_ready(&self) -> bool {
        self.state == SensorState::Ready && self.r0.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let state = MeasurementState::new(&SensorConfig::default());
        assert_eq!(state.state, SensorState::Uninitialized);
        assert_eq!(state.r0, None);
        assert_eq!(state.vcc, 5.0);
        assert_eq!(state.rl, 10.0);
        assert!(!state.is_ready());
    }

    #[test]
    fn state_names() {
        assert_eq!(SensorState::Ready.name(), "ready");
        assert_eq!(SensorState::Calibrating.name(), "calibrating");
    }
}
