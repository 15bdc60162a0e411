use crate::Error;

use super::sensor_interface::ModuleSensor;

#[cfg(test)]
#[path = "actuator_interface_tests.rs"]
mod actuator_interface_tests;

/// Defines the interface for hardware that moves a swerve module.
pub trait ModuleActuator {
    /// Returns a value indicating if the drive motor direction is inverted.
    fn is_drive_inverted(&self) -> bool;

    /// Zeros the position of the drive encoder.
    fn reset_drive_position(&mut self) -> Result<(), Error>;

    /// Sets the direction of the drive motor.
    fn set_drive_inverted(&mut self, inverted: bool) -> Result<(), Error>;

    /// Sends an output to the drive motor.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceWrite] - Returned when the output could not be sent. The write is
    ///   not retried.
    fn write_drive_output(&mut self, output: f64) -> Result<(), Error>;

    /// Sends an output to the steering motor.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceWrite] - Returned when the output could not be sent. The write is
    ///   not retried.
    fn write_turn_output(&mut self, output: f64) -> Result<(), Error>;
}

/// Defines the complete set of hardware capabilities a module needs.
///
/// Implemented for every type that is both a [ModuleSensor] and a [ModuleActuator].
pub trait ModuleHardware: ModuleSensor + ModuleActuator {}

impl<T: ModuleSensor + ModuleActuator> ModuleHardware for T {}

impl ModuleSensor for Box<dyn ModuleHardware> {
    fn absolute_reference(&self) -> Result<f64, Error> {
        (**self).absolute_reference()
    }

    fn drive_position(&self) -> Result<f64, Error> {
        (**self).drive_position()
    }

    fn drive_velocity(&self) -> Result<f64, Error> {
        (**self).drive_velocity()
    }

    fn steering_angle(&self) -> Result<f64, Error> {
        (**self).steering_angle()
    }
}

impl ModuleActuator for Box<dyn ModuleHardware> {
    fn is_drive_inverted(&self) -> bool {
        (**self).is_drive_inverted()
    }

    fn reset_drive_position(&mut self) -> Result<(), Error> {
        (**self).reset_drive_position()
    }

    fn set_drive_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        (**self).set_drive_inverted(inverted)
    }

    fn write_drive_output(&mut self, output: f64) -> Result<(), Error> {
        (**self).write_drive_output(output)
    }

    fn write_turn_output(&mut self, output: f64) -> Result<(), Error> {
        (**self).write_turn_output(output)
    }
}
