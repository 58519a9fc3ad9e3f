//! Unit conversion at the simulator boundary.
//!
//! Internal integration is SI only. Anything expressed in mph, yards, feet,
//! RPM or degrees is converted here and nowhere else.

use std::f32::consts::PI;

pub const MPS_PER_MPH: f32 = 0.447_04;
pub const METERS_PER_YARD: f32 = 0.9144;
pub const METERS_PER_FOOT: f32 = 0.3048;

#[inline]
pub fn mph_to_mps(mph: f32) -> f32 {
    mph * MPS_PER_MPH
}

#[inline]
pub fn mps_to_mph(mps: f32) -> f32 {
    mps / MPS_PER_MPH
}

#[inline]
pub fn yards_to_meters(yards: f32) -> f32 {
    yards * METERS_PER_YARD
}

#[inline]
pub fn meters_to_yards(meters: f32) -> f32 {
    meters / METERS_PER_YARD
}

#[inline]
pub fn feet_to_meters(feet: f32) -> f32 {
    feet * METERS_PER_FOOT
}

#[inline]
pub fn rpm_to_rad_s(rpm: f32) -> f32 {
    rpm * 2.0 * PI / 60.0
}

#[inline]
pub fn rad_s_to_rpm(rad_s: f32) -> f32 {
    rad_s * 60.0 / (2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_conversions() {
        assert!((mph_to_mps(100.0) - 44.704).abs() < 1e-3);
        assert!((mps_to_mph(mph_to_mps(163.0)) - 163.0).abs() < 1e-3);
    }

    #[test]
    fn test_distance_conversions() {
        assert!((yards_to_meters(100.0) - 91.44).abs() < 1e-3);
        assert!((meters_to_yards(91.44) - 100.0).abs() < 1e-3);
        assert!((feet_to_meters(10.0) - 3.048).abs() < 1e-4);
    }

    #[test]
    fn test_spin_conversions() {
        // 60 RPM is one revolution per second
        assert!((rpm_to_rad_s(60.0) - 2.0 * PI).abs() < 1e-5);
        assert!((rad_s_to_rpm(rpm_to_rad_s(2700.0)) - 2700.0).abs() < 1e-2);
    }
}
