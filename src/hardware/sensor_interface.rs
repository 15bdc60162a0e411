//! Defines the interface for the sensors of a module

use crate::Error;

/// Defines the interface for hardware that senses the state of a swerve module.
pub trait ModuleSensor {
    /// Returns the absolute reference angle of the steering in radians. This is
    /// used to calibrate the steering at startup.
    fn absolute_reference(&self) -> Result<f64, Error>;

    /// Returns the distance travelled by the wheel in meters.
    fn drive_position(&self) -> Result<f64, Error>;

    /// Returns the current velocity of the wheel in meters per second.
    fn drive_velocity(&self) -> Result<f64, Error>;

    /// Returns the current steering angle in radians. The angle has the steering
    /// offset applied and is wrapped into (-PI, PI].
    fn steering_angle(&self) -> Result<f64, Error>;
}
