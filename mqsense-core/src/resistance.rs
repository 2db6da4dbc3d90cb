//! Sensor Resistance from the Divider Voltage
//!
//! ## Circuit
//!
//! ```text
//!   Vcc ──[ Rs (sensor) ]──┬──[ RL ]── GND
//!                          │
//!                       Vsensor ──► ADC
//! ```
//!
//! Solving the divider for the sensing element:
//!
//! ```text
//! Rs = (Vcc × RL / Vsensor) - RL
//! ```
//!
//! Rs comes out in the unit RL is given in (kΩ by convention).
//!
//! ## Diode-Drop Family
//!
//! The MQ-303A reference circuit feeds the element through a series diode,
//! so the divider sees `Vcc - 0.45 V`. The offset is applied to a local copy
//! of the supply for the duration of one computation; the configured supply
//! voltage is never written, which keeps repeated reads free of drift.

use crate::constants::physics::DIODE_DROP_V;
use crate::profile::SensorType;

/// Supply voltage seen by the divider on the read path
pub fn effective_supply(vcc: f32, sensor: SensorType) -> f32 {
    if sensor.has_diode_drop() {
        vcc - DIODE_DROP_V
    } else {
        vcc
    }
}

/// Sensor resistance for a divider voltage
///
/// Never negative. A non-positive or non-finite voltage means the ADC saw
/// no current through the divider (open element); that reads as the largest
/// representable resistance instead of dividing by zero.
pub fn sensor_resistance(vcc: f32, rl: f32, v_sensor: f32) -> f32 {
    if !(v_sensor.is_finite() && v_sensor > 0.0) {
        log_warn!("Divider voltage {} not positive, treating element as open", v_sensor);
        return f32::MAX;
    }

    let rs = (vcc * rl / v_sensor) - rl;
    if rs.is_nan() || rs < 0.0 {
        0.0
    } else if rs.is_infinite() {
        f32::MAX
    } else {
        rs
    }
}

/// Sensor resistance on the read path, including any supply offset
pub fn read_path_resistance(sensor: SensorType, vcc: f32, rl: f32, v_sensor: f32) -> f32 {
    sensor_resistance(effective_supply(vcc, sensor), rl, v_sensor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_formula() {
        // 5 V supply, 10 kΩ load, 2.5 V at the midpoint: Rs == RL
        assert!((sensor_resistance(5.0, 10.0, 2.5) - 10.0).abs() < 1e-5);

        // 1 V at the midpoint: Rs = 50 - 10 = 40 kΩ
        assert!((sensor_resistance(5.0, 10.0, 1.0) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn never_negative() {
        // Voltage above the supply would imply negative resistance
        assert_eq!(sensor_resistance(5.0, 10.0, 6.0), 0.0);
    }

    #[test]
    fn zero_voltage_is_open_circuit() {
        assert_eq!(sensor_resistance(5.0, 10.0, 0.0), f32::MAX);
        assert_eq!(sensor_resistance(5.0, 10.0, -0.1), f32::MAX);
        assert_eq!(sensor_resistance(5.0, 10.0, f32::NAN), f32::MAX);
    }

    #[test]
    fn diode_offset_only_for_mq303a() {
        assert_eq!(effective_supply(5.0, SensorType::Mq2), 5.0);
        assert!((effective_supply(5.0, SensorType::Mq303a) - 4.55).abs() < 1e-6);

        // 4.55 × 10 / 2.5 - 10 = 8.2 kΩ
        let rs = read_path_resistance(SensorType::Mq303a, 5.0, 10.0, 2.5);
        assert!((rs - 8.2).abs() < 1e-4);
    }
}
