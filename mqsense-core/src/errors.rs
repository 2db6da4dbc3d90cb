//! Error Types for Sensor Lifecycle Failures
//!
//! ## Design Philosophy
//!
//! The conversion engine never fails on numbers. Division by zero, logarithm
//! domain errors and float overflow are all handled by clamping (see
//! [`crate::ratio`] and [`crate::regression`]). What remains are lifecycle
//! failures: hardware that was never bound, a reading requested before any
//! baseline exists, a profile that does not exist.
//!
//! Like the rest of the crate the error type is built for embedded targets:
//!
//! 1. **No Heap Allocation**: reasons are `&'static str`, never `String`.
//! 2. **Copy Semantics**: errors are returned by value from the hot read path.
//! 3. **Status Codes**: every error maps onto the driver status codes
//!    (`OK = 0x00`, `ERROR = 0x01`, `NOT_FOUND = 0x04`) for callers that
//!    forward results over a register map or a serial protocol.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use mqsense_core::{SensorError, Status};
//!
//! fn report(err: SensorError) -> u8 {
//!     match err {
//!         SensorError::NotCalibrated => {
//!             // run calibrate_in_clean_air() and retry
//!         }
//!         SensorError::NoHardware => {
//!             // wiring problem, nothing to retry
//!         }
//!         _ => {}
//!     }
//!     err.status() as u8
//! }
//!
//! assert_eq!(report(SensorError::ProfileNotFound), Status::NotFound as u8);
//! ```

use thiserror_no_std::Error;

/// Result type for sensor operations
pub type SensorResult<T> = Result<T, SensorError>;

/// Driver status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Operation completed
    Ok = 0x00,
    /// Operation failed
    Error = 0x01,
    /// Requested sensor or gas profile does not exist
    NotFound = 0x04,
}

impl<T> From<&SensorResult<T>> for Status {
    fn from(result: &SensorResult<T>) -> Self {
        match result {
            Ok(_) => Status::Ok,
            Err(e) => e.status(),
        }
    }
}

/// Sensor errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SensorError {
    /// No ADC channel is bound to the sensor
    #[error("No hardware handle bound")]
    NoHardware,

    /// The ADC reported a conversion failure
    #[error("ADC read failed")]
    AdcRead,

    /// A concentration was requested before any baseline resistance exists
    #[error("Sensor not calibrated")]
    NotCalibrated,

    /// No profile for the requested sensor/gas combination
    #[error("Sensor profile not found")]
    ProfileNotFound,

    /// Clean-air reference ratio must be finite and positive
    #[error("Invalid clean-air ratio {ratio}")]
    InvalidCleanAirRatio {
        /// The rejected ratio
        ratio: f32,
    },

    /// Driver configuration is unusable
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which parameter was rejected
        reason: &'static str,
    },
}

impl SensorError {
    /// Status code reported for this error
    pub fn status(&self) -> Status {
        match self {
            Self::ProfileNotFound => Status::NotFound,
            _ => Status::Error,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NoHardware =>
                defmt::write!(fmt, "No hardware handle bound"),
            Self::AdcRead =>
                defmt::write!(fmt, "ADC read failed"),
            Self::NotCalibrated =>
                defmt::write!(fmt, "Sensor not calibrated"),
            Self::ProfileNotFound =>
                defmt::write!(fmt, "Sensor profile not found"),
            Self::InvalidCleanAirRatio { ratio } =>
                defmt::write!(fmt, "Invalid clean-air ratio {}", ratio),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid configuration: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_driver_values() {
        assert_eq!(Status::Ok as u8, 0x00);
        assert_eq!(Status::Error as u8, 0x01);
        assert_eq!(Status::NotFound as u8, 0x04);
    }

    #[test]
    fn errors_map_to_status() {
        assert_eq!(SensorError::NoHardware.status(), Status::Error);
        assert_eq!(SensorError::NotCalibrated.status(), Status::Error);
        assert_eq!(SensorError::ProfileNotFound.status(), Status::NotFound);

        let ok: SensorResult<f32> = Ok(1.0);
        assert_eq!(Status::from(&ok), Status::Ok);

        let err: SensorResult<f32> = Err(SensorError::AdcRead);
        assert_eq!(Status::from(&err), Status::Error);
    }
}
