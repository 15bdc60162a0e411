use std::fmt::Display;

use crate::number_space::wrap_angle;

#[cfg(test)]
#[path = "module_state_tests.rs"]
mod module_state_tests;

/// Stores the velocity and heading of a single swerve module.
///
/// The state is used both for the measured state of a module and for the state that
/// a module is commanded to reach.
///
/// The angle is always stored in the canonical (-PI, PI] range. Angles passed in
/// when creating the state are wrapped into that range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleState {
    /// The signed velocity of the wheel in meters per second.
    velocity: f64,

    /// The heading of the wheel in radians, relative to the module's logical zero.
    angle: f64,
}

impl ModuleState {
    /// Returns the heading of the wheel in radians, in the range (-PI, PI].
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns the signed velocity of the wheel in meters per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Creates a new [ModuleState] instance
    ///
    /// ## Parameters
    ///
    /// * 'velocity' - The signed velocity of the wheel in meters per second.
    /// * 'angle' - The heading of the wheel in radians. Will be wrapped into (-PI, PI].
    pub fn new(velocity: f64, angle: f64) -> Self {
        Self {
            velocity,
            angle: wrap_angle(angle),
        }
    }
}

impl Display for ModuleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ModuleState [velocity: {:.3} m/s, angle: {:.3} rad]",
            self.velocity, self.angle
        )
    }
}

/// Stores the outputs computed for the drive and the steering actuators
/// during a single control cycle.
///
/// The range of the outputs is defined by the actuators. Clamping or saturating
/// the values is left to the actuator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModuleCommand {
    drive_output: f64,
    turn_output: f64,
}

impl ModuleCommand {
    /// Returns the output for the drive actuator.
    pub fn drive_output(&self) -> f64 {
        self.drive_output
    }

    /// Returns the output for the steering actuator.
    pub fn turn_output(&self) -> f64 {
        self.turn_output
    }

    /// Creates a new [ModuleCommand] with the given outputs.
    pub fn new(drive_output: f64, turn_output: f64) -> Self {
        Self {
            drive_output,
            turn_output,
        }
    }
}

/// The calibration angle that aligns the physical zero of a steering sensor with the
/// logical zero of the module.
///
/// The offset is added to the raw sensor angle. It is fixed once created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringOffset {
    radians: f64,
}

impl SteeringOffset {
    /// Creates an offset from an angle in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }

    /// Creates an offset from an angle in radians.
    pub fn from_radians(radians: f64) -> Self {
        Self { radians }
    }

    /// Returns the offset in radians.
    pub fn radians(&self) -> f64 {
        self.radians
    }

    /// Applies the offset to a raw sensor angle and wraps the result into (-PI, PI].
    pub fn apply(&self, raw_angle_in_radians: f64) -> f64 {
        wrap_angle(raw_angle_in_radians + self.radians)
    }
}

impl Default for SteeringOffset {
    fn default() -> Self {
        Self::from_radians(0.0)
    }
}
