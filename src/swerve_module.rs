//! The control loop for a single swerve module.
//!
//! A [SwerveModule] owns the module hardware together with a velocity controller for the
//! drive motor and an angle controller for the steering motor. Once per control cycle the
//! owner passes the desired [ModuleState] to [SwerveModule::set_desired_state], which
//! reads the sensors, optimizes the desired state, calculates both outputs and writes them
//! to the motors.

use log::{debug, info, trace};

use crate::{
    config::ModuleConfig,
    control::{
        optimizer::optimize,
        pid::PidController,
        profiled_pid::ProfiledPidController,
    },
    hardware::{
        actuator_interface::{ModuleActuator, ModuleHardware},
        module_state::{ModuleCommand, ModuleState},
        select_hardware,
        sensor_interface::ModuleSensor,
        ModuleDevices,
    },
    number_space::NumberSpaceType,
    Error,
};

#[cfg(test)]
#[path = "swerve_module_tests.rs"]
mod swerve_module_tests;

/// The controller that steers the wheel.
enum TurningController {
    /// Drives straight towards the target angle.
    Direct(PidController),

    /// Follows a trapezoidal profile towards the target angle.
    Profiled(ProfiledPidController),
}

impl TurningController {
    fn calculate(&mut self, measurement: f64, target: f64) -> f64 {
        match self {
            TurningController::Direct(pid) => pid.calculate(measurement, target),
            TurningController::Profiled(profiled) => profiled.calculate(measurement, target),
        }
    }

    fn reset(&mut self, measurement: f64) {
        match self {
            TurningController::Direct(pid) => pid.reset(),
            TurningController::Profiled(profiled) => profiled.reset(measurement),
        }
    }
}

/// A single swerve module: a wheel that is driven by one motor and steered by another.
///
/// The hardware is fixed when the module is created. Use [SwerveModule::from_devices] to
/// pick the hardware variant from the configuration, or [SwerveModule::new] to supply an
/// already initialized [ModuleHardware].
pub struct SwerveModule<H: ModuleHardware = Box<dyn ModuleHardware>> {
    name: String,
    hardware: H,
    drive_controller: PidController,
    turning_controller: TurningController,
}

impl SwerveModule<Box<dyn ModuleHardware>> {
    /// Initializes the hardware variant named in the configuration from the given devices
    /// and creates a module that uses it.
    ///
    /// ## Parameters
    ///
    /// * 'config' - The configuration of the module.
    /// * 'devices' - The devices for the hardware variant named in the configuration.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidConfiguration] - Returned when a configuration value is out of range.
    ///   No devices are touched in that case.
    /// * [Error::HardwareVariantMismatch] - Returned when the devices belong to a different
    ///   hardware variant than the configuration names.
    /// * [Error::DeviceInitialization] - Returned when one of the devices fails to initialize.
    pub fn from_devices(config: &ModuleConfig, devices: ModuleDevices) -> Result<Self, Error> {
        config.validate()?;
        let hardware = select_hardware(config, devices)?;
        Self::new(config, hardware)
    }
}

impl<H: ModuleHardware> SwerveModule<H> {
    /// Returns the current steering angle in radians, in (-PI, PI].
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceRead] - Returned when the steering sensor cannot be read.
    pub fn angle(&self) -> Result<f64, Error> {
        self.hardware.steering_angle()
    }

    /// Returns the distance the wheel has travelled since the last encoder reset, in meters.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceRead] - Returned when the drive encoder cannot be read.
    pub fn drive_position(&self) -> Result<f64, Error> {
        self.hardware.drive_position()
    }

    /// Returns the hardware of the module.
    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    /// Reverses the direction of the drive motor.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceWrite] - Returned when the motor controller rejects the change.
    pub fn invert_drive(&mut self) -> Result<(), Error> {
        let inverted = !self.hardware.is_drive_inverted();
        self.hardware.set_drive_inverted(inverted)?;

        debug!("Module {} drive inverted: {}", self.name, inverted);
        Ok(())
    }

    /// Returns the name of the module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a new [SwerveModule] for initialized hardware.
    ///
    /// The drive direction is set from the configuration and the drive encoder is zeroed.
    ///
    /// ## Parameters
    ///
    /// * 'config' - The configuration of the module.
    /// * 'hardware' - The initialized hardware of the module.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidConfiguration] - Returned when a configuration value is out of range.
    /// * [Error::DeviceWrite] - Returned when the drive direction cannot be set or the drive
    ///   encoder cannot be zeroed.
    pub fn new(config: &ModuleConfig, mut hardware: H) -> Result<Self, Error> {
        config.validate()?;

        hardware.set_drive_inverted(config.drive_inverted)?;
        hardware.reset_drive_position()?;

        let period = config.control_period_in_seconds;
        let drive_controller =
            PidController::new(config.drive_gains, NumberSpaceType::LinearUnlimited, period)
                .with_integral_limit(config.integral_limit);

        let turning_controller = match config.turning_constraints {
            Some(constraints) => TurningController::Profiled(
                ProfiledPidController::new(
                    config.turning_gains,
                    NumberSpaceType::Angular,
                    period,
                    constraints,
                )
                .with_integral_limit(config.integral_limit),
            ),
            None => TurningController::Direct(
                PidController::new(config.turning_gains, NumberSpaceType::Angular, period)
                    .with_integral_limit(config.integral_limit),
            ),
        };

        info!(
            "Created swerve module {} ({} steering)",
            config.name,
            match &turning_controller {
                TurningController::Direct(_) => "direct",
                TurningController::Profiled(_) => "profiled",
            }
        );

        Ok(Self {
            name: config.name.clone(),
            hardware,
            drive_controller,
            turning_controller,
        })
    }

    /// Clears the accumulated state of both controllers. A profiled steering controller
    /// restarts its profile from the current steering angle.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceRead] - Returned when the steering sensor cannot be read. The
    ///   controllers are left unchanged in that case.
    pub fn reset_controllers(&mut self) -> Result<(), Error> {
        let angle = self.hardware.steering_angle()?;

        self.drive_controller.reset();
        self.turning_controller.reset(angle);

        debug!("Module {} controllers reset at {:.3} rad", self.name, angle);
        Ok(())
    }

    /// Zeros the drive encoder.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceWrite] - Returned when the encoder cannot be zeroed.
    pub fn reset_encoders(&mut self) -> Result<(), Error> {
        self.hardware.reset_drive_position()
    }

    /// Drives the module towards the desired state for one control cycle.
    ///
    /// The desired state is first optimized against the current steering angle, so the
    /// steering never needs to turn more than a quarter turn. Then the drive output is
    /// calculated from the velocity error and the turn output from the angle error. The
    /// drive output is written before the turn output.
    ///
    /// ## Parameters
    ///
    /// * 'desired' - The velocity and angle the module should reach.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceRead] - Returned when a sensor cannot be read. Nothing is written.
    /// * [Error::DeviceWrite] - Returned when an output cannot be written. When the drive
    ///   output fails the turn output is not written. Writes are not retried.
    pub fn set_desired_state(&mut self, desired: ModuleState) -> Result<ModuleCommand, Error> {
        let current_angle = self.hardware.steering_angle()?;
        let current_velocity = self.hardware.drive_velocity()?;

        let target = optimize(desired, current_angle);

        let drive_output = self
            .drive_controller
            .calculate(current_velocity, target.velocity());
        let turn_output = self
            .turning_controller
            .calculate(current_angle, target.angle());

        self.hardware.write_drive_output(drive_output)?;
        self.hardware.write_turn_output(turn_output)?;

        let command = ModuleCommand::new(drive_output, turn_output);
        self.trace_cycle(&desired, &target, &command);

        Ok(command)
    }

    /// Returns the measured velocity and steering angle of the module.
    ///
    /// ## Errors
    ///
    /// * [Error::DeviceRead] - Returned when a sensor cannot be read.
    pub fn state(&self) -> Result<ModuleState, Error> {
        Ok(ModuleState::new(
            self.hardware.drive_velocity()?,
            self.hardware.steering_angle()?,
        ))
    }

    #[cfg_attr(test, mutants::skip)] // Only produces log output
    fn trace_cycle(&self, desired: &ModuleState, target: &ModuleState, command: &ModuleCommand) {
        trace!(
            "Module {} desired {} optimized {} drive output {:.4} turn output {:.4}",
            self.name,
            desired,
            target,
            command.drive_output(),
            command.turn_output()
        );
    }
}
