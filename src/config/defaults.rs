//! Default values for the module configuration.

use std::f64::consts::PI;

use crate::{control::pid::PidGains, hardware::devices::IdleMode};

/// Diameter of the drive wheel (4 inch) in meters
const WHEEL_DIAMETER_IN_METERS: f64 = 0.1016;

/// Motor rotations per wheel rotation
const DRIVE_GEAR_RATIO: f64 = 6.75;

/// Counts per revolution of the magnetic steering encoder
const STEERING_ENCODER_COUNTS_PER_REVOLUTION: f64 = 4096.0;

pub(super) fn control_period() -> f64 {
    0.02
}

pub(super) fn drive_gains() -> PidGains {
    PidGains::proportional(1.0)
}

/// Meters travelled per drive motor rotation
pub(super) fn drive_position_conversion_factor() -> f64 {
    PI * WHEEL_DIAMETER_IN_METERS / DRIVE_GEAR_RATIO
}

/// Meters per second per drive motor RPM
pub(super) fn drive_velocity_conversion_factor() -> f64 {
    drive_position_conversion_factor() / 60.0
}

pub(super) fn idle_mode() -> IdleMode {
    IdleMode::Brake
}

pub(super) fn integral_limit() -> f64 {
    1.0
}

pub(super) fn turning_distance_per_pulse() -> f64 {
    2.0 * PI / STEERING_ENCODER_COUNTS_PER_REVOLUTION
}

pub(super) fn turning_gains() -> PidGains {
    PidGains::proportional(1.0)
}
