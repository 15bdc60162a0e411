use log::debug;

use crate::Error;

use super::devices::{Encoder, MotorController, MotorSettings};

#[cfg(test)]
#[path = "drive_unit_tests.rs"]
mod drive_unit_tests;

/// The drive motor and drive encoder of a module. The drive side is identical for all
/// hardware variants.
pub(crate) struct DriveUnit {
    motor: Box<dyn MotorController>,
    encoder: Box<dyn Encoder>,

    /// Converts native encoder position units to meters.
    position_conversion_factor: f64,

    /// Converts native encoder velocity units to meters per second.
    velocity_conversion_factor: f64,
}

impl DriveUnit {
    /// Configures the drive motor and zeros the drive encoder.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceInitialization] - Returned for the first device that fails. Devices
    ///   after the failing device are not touched.
    pub(crate) fn initialize(
        mut motor: Box<dyn MotorController>,
        mut encoder: Box<dyn Encoder>,
        settings: &MotorSettings,
        position_conversion_factor: f64,
        velocity_conversion_factor: f64,
    ) -> Result<Self, Error> {
        motor
            .configure(settings)
            .map_err(|e| initialization_error(motor.name(), e))?;
        encoder
            .set_position(0.0)
            .map_err(|e| initialization_error(encoder.name(), e))?;

        Ok(Self {
            motor,
            encoder,
            position_conversion_factor,
            velocity_conversion_factor,
        })
    }

    pub(crate) fn is_inverted(&self) -> bool {
        self.motor.is_inverted()
    }

    pub(crate) fn position(&self) -> Result<f64, Error> {
        Ok(self.encoder.position()? * self.position_conversion_factor)
    }

    pub(crate) fn reset_position(&mut self) -> Result<(), Error> {
        debug!("Zeroing drive encoder {}", self.encoder.name());
        self.encoder.set_position(0.0)
    }

    pub(crate) fn set_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        debug!(
            "Setting drive motor {} inverted to {}",
            self.motor.name(),
            inverted
        );
        self.motor.set_inverted(inverted)
    }

    pub(crate) fn velocity(&self) -> Result<f64, Error> {
        Ok(self.encoder.velocity()? * self.velocity_conversion_factor)
    }

    pub(crate) fn write(&mut self, output: f64) -> Result<(), Error> {
        self.motor.set_output(output)
    }
}

/// Converts the error from a device into an initialization error for that device.
pub(crate) fn initialization_error(device: &str, error: Error) -> Error {
    match error {
        Error::DeviceInitialization { .. } => error,
        other => Error::DeviceInitialization {
            device: device.to_string(),
            reason: other.to_string(),
        },
    }
}
