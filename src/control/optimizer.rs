//! Reduces a desired module state to the equivalent state that needs the least steering.
//!
//! A wheel pointing at angle `a` and driving forwards moves the robot the same way as the
//! wheel pointing at `a + PI` and driving backwards. Reversing the drive motor is much
//! faster than rotating the steering, so whenever reaching the desired angle would need
//! more than a quarter turn the module turns to the opposite angle and reverses instead.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{hardware::module_state::ModuleState, number_space::wrap_angle};

/// The amount, in radians, by which the rotation must exceed a quarter turn before the
/// state is reversed. Rotations within this band of a quarter turn are left as is, which
/// keeps a reversed state from being reversed again by rounding in the wrap.
pub const QUARTER_TURN_TOLERANCE: f64 = 1e-9;

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod optimizer_tests;

/// Returns the state equivalent to `desired` that needs at most a quarter turn of steering
/// from `current_angle`.
///
/// When the shortest rotation from `current_angle` to the desired angle is larger than
/// PI / 2 (by more than [QUARTER_TURN_TOLERANCE]) the returned state has the velocity
/// reversed and the angle rotated by PI. A rotation of exactly PI / 2 is left as is.
///
/// ## Parameters
///
/// * 'desired' - The state the module should reach.
/// * 'current_angle' - The current steering angle in radians.
///
/// ## Example
///
/// ```
/// use swerve_module_control::control::optimizer::optimize;
/// use swerve_module_control::hardware::module_state::ModuleState;
///
/// let optimized = optimize(ModuleState::new(2.0, 170.0_f64.to_radians()), 0.0);
/// assert_eq!(-2.0, optimized.velocity());
/// assert!((optimized.angle() + 10.0_f64.to_radians()).abs() < 1e-12);
/// ```
pub fn optimize(desired: ModuleState, current_angle: f64) -> ModuleState {
    let rotation = required_rotation(desired.angle(), current_angle);
    if rotation.abs() > FRAC_PI_2 + QUARTER_TURN_TOLERANCE {
        ModuleState::new(-desired.velocity(), wrap_angle(desired.angle() + PI))
    } else {
        desired
    }
}

/// Returns the shortest signed rotation, in (-PI, PI], needed to turn from `current_angle`
/// to `target_angle`.
pub fn required_rotation(target_angle: f64, current_angle: f64) -> f64 {
    wrap_angle(target_angle - current_angle)
}
