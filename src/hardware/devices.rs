//! Defines the interfaces for the individual devices that make up a module.
//!
//! Vendor drivers for motor controllers and encoders implement these traits. The
//! module hardware implementations in [crate::hardware::competition] and
//! [crate::hardware::test_bench] combine the devices into the capabilities that
//! a [crate::swerve_module::SwerveModule] needs.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Defines what a motor does when it is given a zero output.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleMode {
    /// The motor actively resists motion.
    Brake,

    /// The motor spins freely.
    Coast,
}

/// Stores the settings applied to a motor controller when it is initialized.
#[derive(Clone, Debug, PartialEq)]
pub struct MotorSettings {
    /// Indicates if positive outputs should turn the motor in the reverse direction.
    pub inverted: bool,

    /// The behaviour of the motor at zero output.
    pub idle_mode: IdleMode,

    /// The nominal battery voltage the outputs are compensated against, if any.
    pub voltage_compensation: Option<f64>,
}

impl Default for MotorSettings {
    fn default() -> Self {
        Self {
            inverted: false,
            idle_mode: IdleMode::Brake,
            voltage_compensation: None,
        }
    }
}

/// Defines the interface for a motor controller.
pub trait MotorController {
    /// Returns a human readable name for the device, used in errors and logging.
    fn name(&self) -> &str;

    /// Applies the given settings to the device.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceInitialization] - Returned when the device rejects the settings.
    fn configure(&mut self, settings: &MotorSettings) -> Result<(), Error>;

    /// Returns a value indicating if the motor direction is inverted.
    fn is_inverted(&self) -> bool;

    /// Sets the direction of the motor.
    fn set_inverted(&mut self, inverted: bool) -> Result<(), Error>;

    /// Sets the output of the motor. The range of the output is defined by the device.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceWrite] - Returned when the output could not be sent to the device.
    fn set_output(&mut self, output: f64) -> Result<(), Error>;
}

/// Defines the interface for a relative encoder.
///
/// Positions and velocities are in the native units of the device. Conversion to
/// physical units is done by the module hardware.
pub trait Encoder {
    /// Returns a human readable name for the device, used in errors and logging.
    fn name(&self) -> &str;

    /// Returns the current position in native units.
    fn position(&self) -> Result<f64, Error>;

    /// Overwrites the current position of the encoder.
    fn set_position(&mut self, position: f64) -> Result<(), Error>;

    /// Returns the current velocity in native units per second.
    fn velocity(&self) -> Result<f64, Error>;
}

/// Defines the interface for an absolute angle encoder.
pub trait AbsoluteEncoder {
    /// Returns a human readable name for the device, used in errors and logging.
    fn name(&self) -> &str;

    /// Returns the absolute angle of the encoder in radians.
    fn absolute_angle(&self) -> Result<f64, Error>;
}
