//! The module hardware used on the test bench robot.
//!
//! The steering motor controller has an absolute magnetic encoder attached to it. The
//! steering angle is read from that encoder every cycle, so no calibration is needed at
//! startup.

use log::{info, warn};

use crate::{config::ModuleConfig, number_space::wrap_angle, Error};

use super::{
    actuator_interface::ModuleActuator,
    devices::{Encoder, MotorController},
    drive_unit::{initialization_error, DriveUnit},
    module_state::SteeringOffset,
    sensor_interface::ModuleSensor,
};

#[cfg(test)]
#[path = "test_bench_tests.rs"]
mod test_bench_tests;

/// Stores the devices of a test bench module before they are initialized.
pub struct TestBenchDevices {
    /// The motor that drives the wheel.
    pub drive_motor: Box<dyn MotorController>,

    /// The encoder that measures the wheel rotation.
    pub drive_encoder: Box<dyn Encoder>,

    /// The motor that steers the wheel.
    pub steering_motor: Box<dyn MotorController>,

    /// The absolute magnetic encoder on the steering motor controller, in native counts.
    pub steering_encoder: Box<dyn Encoder>,
}

/// The hardware of a test bench module.
pub struct TestBenchHardware {
    drive: DriveUnit,
    steering_motor: Box<dyn MotorController>,
    steering_encoder: Box<dyn Encoder>,

    /// Converts native steering encoder counts to radians.
    turning_distance_per_pulse: f64,

    offset: SteeringOffset,
}

impl TestBenchHardware {
    /// Configures the devices of a test bench module.
    ///
    /// The drive motor is configured first, then the drive encoder is zeroed, then the
    /// steering motor is configured and finally the steering encoder is read once to make
    /// sure it responds.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceInitialization] - Returned for the first device that fails. No further
    ///   device calls are made after a failure.
    pub fn initialize(config: &ModuleConfig, devices: TestBenchDevices) -> Result<Self, Error> {
        Self::initialize_devices(config, devices).map_err(|e| {
            warn!("Failed to initialize test bench module {}: {}", config.name, e);
            e
        })
    }

    fn initialize_devices(
        config: &ModuleConfig,
        devices: TestBenchDevices,
    ) -> Result<Self, Error> {
        let TestBenchDevices {
            drive_motor,
            drive_encoder,
            mut steering_motor,
            steering_encoder,
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

        let raw = steering_encoder
            .position()
            .map_err(|e| initialization_error(steering_encoder.name(), e))?;

        let hardware = Self {
            drive,
            steering_motor,
            steering_encoder,
            turning_distance_per_pulse: config.turning_distance_per_pulse,
            offset: config.steering_offset(),
        };

        info!(
            "Initialized test bench module {} with the steering at {:.3} rad",
            config.name,
            hardware.offset.apply(raw * hardware.turning_distance_per_pulse)
        );

        Ok(hardware)
    }

    fn raw_steering_angle(&self) -> Result<f64, Error> {
        Ok(self.steering_encoder.position()? * self.turning_distance_per_pulse)
    }
}

impl ModuleSensor for TestBenchHardware {
    fn absolute_reference(&self) -> Result<f64, Error> {
        Ok(wrap_angle(self.raw_steering_angle()?))
    }

    fn drive_position(&self) -> Result<f64, Error> {
        self.drive.position()
    }

    fn drive_velocity(&self) -> Result<f64, Error> {
        self.drive.velocity()
    }

    fn steering_angle(&self) -> Result<f64, Error> {
        Ok(self.offset.apply(self.raw_steering_angle()?))
    }
}

impl ModuleActuator for TestBenchHardware {
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
