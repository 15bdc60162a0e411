//! The module hardware used on the competition robot.
//!
//! The steering angle is measured by the relative encoder built into the steering motor.
//! At startup the relative encoder is seeded with the angle from a separate absolute
//! encoder, after which the absolute encoder is only read on request.

use log::{info, warn};

use crate::{config::ModuleConfig, number_space::wrap_angle, Error};

use super::{
    actuator_interface::ModuleActuator,
    devices::{AbsoluteEncoder, Encoder, MotorController},
    drive_unit::{initialization_error, DriveUnit},
    module_state::SteeringOffset,
    sensor_interface::ModuleSensor,
};

#[cfg(test)]
#[path = "competition_tests.rs"]
mod competition_tests;

/// Stores the devices of a competition module before they are initialized.
pub struct CompetitionDevices {
    /// The motor that drives the wheel.
    pub drive_motor: Box<dyn MotorController>,

    /// The encoder that measures the wheel rotation.
    pub drive_encoder: Box<dyn Encoder>,

    /// The motor that steers the wheel.
    pub steering_motor: Box<dyn MotorController>,

    /// The relative encoder of the steering motor, in native units.
    pub steering_encoder: Box<dyn Encoder>,

    /// The absolute encoder used to calibrate the steering encoder.
    pub absolute_encoder: Box<dyn AbsoluteEncoder>,
}

/// The hardware of a competition module.
pub struct CompetitionHardware {
    drive: DriveUnit,
    steering_motor: Box<dyn MotorController>,
    steering_encoder: Box<dyn Encoder>,
    absolute_encoder: Box<dyn AbsoluteEncoder>,

    /// Converts native steering encoder units to radians.
    turning_distance_per_pulse: f64,

    offset: SteeringOffset,
}

impl CompetitionHardware {
    /// Configures the devices of a competition module.
    ///
    /// The drive motor is configured first, then the drive encoder is zeroed, then the
    /// steering motor is configured. Finally the absolute encoder is read and the steering
    /// encoder is set to match it.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceInitialization] - Returned for the first device that fails. No further
    ///   device calls are made after a failure.
    pub fn initialize(config: &ModuleConfig, devices: CompetitionDevices) -> Result<Self, Error> {
        Self::initialize_devices(config, devices).map_err(|e| {
            warn!("Failed to initialize competition module {}: {}", config.name, e);
            e
        })
    }

    fn initialize_devices(
        config: &ModuleConfig,
        devices: CompetitionDevices,
    ) -> Result<Self, Error> {
        let CompetitionDevices {
            drive_motor,
            drive_encoder,
            mut steering_motor,
            mut steering_encoder,
            absolute_encoder,
        } = devices;

        let drive = DriveUnit::initialize(
            drive_motor,
            drive_encoder,
            &config.drive_motor_settings(),
            config.drive_position_conversion_factor,
            config.drive_velocity_conversion_factor,
        )?;

        steering_motor
            .configure(&config.steering_motor_settings())
            .map_err(|e| initialization_error(steering_motor.name(), e))?;

        let absolute_angle = absolute_encoder
            .absolute_angle()
            .map_err(|e| initialization_error(absolute_encoder.name(), e))?;
        steering_encoder
            .set_position(absolute_angle / config.turning_distance_per_pulse)
            .map_err(|e| initialization_error(steering_encoder.name(), e))?;

        let hardware = Self {
            drive,
            steering_motor,
            steering_encoder,
            absolute_encoder,
            turning_distance_per_pulse: config.turning_distance_per_pulse,
            offset: config.steering_offset(),
        };

        info!(
            "Initialized competition module {} with the steering calibrated to {:.3} rad",
            config.name,
            hardware.offset.apply(absolute_angle)
        );

        Ok(hardware)
    }
}

impl ModuleSensor for CompetitionHardware {
    fn absolute_reference(&self) -> Result<f64, Error> {
        Ok(wrap_angle(self.absolute_encoder.absolute_angle()?))
    }

    fn drive_position(&self) -> Result<f64, Error> {
        self.drive.position()
    }

    fn drive_velocity(&self) -> Result<f64, Error> {
        self.drive.velocity()
    }

    fn steering_angle(&self) -> Result<f64, Error> {
        let raw = self.steering_encoder.position()? * self.turning_distance_per_pulse;
        Ok(self.offset.apply(raw))
    }
}

impl ModuleActuator for CompetitionHardware {
    fn is_drive_inverted(&self) -> bool {
        self.drive.is_inverted()
    }

    fn reset_drive_position(&mut self) -> Result<(), Error> {
        self.drive.reset_position()
    }

    fn set_drive_inverted(&mut self, inverted: bool) -> Result<(), Error> {
        self.drive.set_inverted(inverted)
    }

    fn write_drive_output(&mut self, output: f64) -> Result<(), Error> {
        self.drive.write(output)
    }

    fn write_turn_output(&mut self, output: f64) -> Result<(), Error> {
        self.steering_motor.set_output(output)
    }
}
