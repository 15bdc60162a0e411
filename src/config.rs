//! Configuration for a single swerve module.
//!
//! The configuration can be created in code, or loaded from YAML. All fields except the
//! module name have defaults, so a minimal YAML document only needs the name:
//!
//! ```
//! use swerve_module_control::config::{HardwareVariant, ModuleConfig};
//!
//! let config = ModuleConfig::from_yaml("name: front_left").unwrap();
//! assert_eq!("front_left", config.name);
//! assert_eq!(HardwareVariant::Competition, config.hardware_variant);
//! assert_eq!(0.02, config.control_period_in_seconds);
//! ```

mod defaults;

use std::{fmt::Display, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    control::{motion_profile::ProfileConstraints, pid::PidGains},
    hardware::{
        devices::{IdleMode, MotorSettings},
        module_state::SteeringOffset,
    },
    Error,
};

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

/// Defines the hardware a module is built from.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareVariant {
    /// The steering is measured by a relative encoder that is calibrated from an absolute
    /// encoder at startup.
    #[default]
    Competition,

    /// The steering is measured by an absolute magnetic encoder attached to the steering
    /// motor controller.
    TestBench,
}

impl Display for HardwareVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HardwareVariant::Competition => write!(f, "competition"),
            HardwareVariant::TestBench => write!(f, "test bench"),
        }
    }
}

/// The configuration for a single swerve module.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ModuleConfig {
    /// The name of the module, e.g. 'front_left'.
    pub name: String,

    /// The hardware the module is built from.
    #[serde(default)]
    pub hardware_variant: HardwareVariant,

    /// Indicates if the drive motor direction is inverted.
    #[serde(default)]
    pub drive_inverted: bool,

    /// Indicates if the steering motor direction is inverted.
    #[serde(default)]
    pub steering_inverted: bool,

    /// The angle, in degrees, that is added to the steering sensor reading to align the
    /// physical zero of the sensor with the logical zero of the module.
    #[serde(default)]
    pub steering_offset_in_degrees: f64,

    /// The gains for the drive velocity controller.
    #[serde(default = "defaults::drive_gains")]
    pub drive_gains: PidGains,

    /// The gains for the steering angle controller.
    #[serde(default = "defaults::turning_gains")]
    pub turning_gains: PidGains,

    /// The maximum magnitude of the integral contribution of either controller.
    #[serde(default = "defaults::integral_limit")]
    pub integral_limit: f64,

    /// The time between control cycles.
    #[serde(default = "defaults::control_period")]
    pub control_period_in_seconds: f64,

    /// When set the steering follows a trapezoidal motion profile with these limits, in
    /// radians per second and radians per second squared.
    #[serde(default)]
    pub turning_constraints: Option<ProfileConstraints>,

    /// Converts drive encoder positions to meters.
    #[serde(default = "defaults::drive_position_conversion_factor")]
    pub drive_position_conversion_factor: f64,

    /// Converts drive encoder velocities to meters per second.
    #[serde(default = "defaults::drive_velocity_conversion_factor")]
    pub drive_velocity_conversion_factor: f64,

    /// Converts steering encoder positions to radians.
    #[serde(default = "defaults::turning_distance_per_pulse")]
    pub turning_distance_per_pulse: f64,

    /// The behaviour of both motors at zero output.
    #[serde(default = "defaults::idle_mode")]
    pub idle_mode: IdleMode,

    /// The nominal voltage the steering motor output is compensated against, if any.
    #[serde(default)]
    pub voltage_compensation: Option<f64>,
}

impl ModuleConfig {
    /// Returns the settings for the drive motor.
    pub fn drive_motor_settings(&self) -> MotorSettings {
        MotorSettings {
            inverted: self.drive_inverted,
            idle_mode: self.idle_mode,
            voltage_compensation: None,
        }
    }

    /// Parses a configuration from a YAML document and validates it.
    ///
    /// ## Errors
    ///
    /// * [Error::ConfigurationLoad] - Returned when the document cannot be parsed.
    /// * [Error::InvalidConfiguration] - Returned when a value is out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        let config: ModuleConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::ConfigurationLoad(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration from a YAML file and validates it.
    ///
    /// ## Errors
    ///
    /// * [Error::ConfigurationLoad] - Returned when the file cannot be read or parsed.
    /// * [Error::InvalidConfiguration] - Returned when a value is out of range.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigurationLoad(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_yaml(&contents)?;

        info!(
            "Loaded configuration for module {} from {}",
            config.name,
            path.display()
        );
        Ok(config)
    }

    /// Creates a configuration with the given name and default values for everything else.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hardware_variant: HardwareVariant::default(),
            drive_inverted: false,
            steering_inverted: false,
            steering_offset_in_degrees: 0.0,
            drive_gains: defaults::drive_gains(),
            turning_gains: defaults::turning_gains(),
            integral_limit: defaults::integral_limit(),
            control_period_in_seconds: defaults::control_period(),
            turning_constraints: None,
            drive_position_conversion_factor: defaults::drive_position_conversion_factor(),
            drive_velocity_conversion_factor: defaults::drive_velocity_conversion_factor(),
            turning_distance_per_pulse: defaults::turning_distance_per_pulse(),
            idle_mode: defaults::idle_mode(),
            voltage_compensation: None,
        }
    }

    /// Returns the settings for the steering motor.
    pub fn steering_motor_settings(&self) -> MotorSettings {
        MotorSettings {
            inverted: self.steering_inverted,
            idle_mode: self.idle_mode,
            voltage_compensation: self.voltage_compensation,
        }
    }

    /// Returns the steering offset.
    pub fn steering_offset(&self) -> SteeringOffset {
        SteeringOffset::from_degrees(self.steering_offset_in_degrees)
    }

    /// Checks that all values are in range.
    ///
    /// ## Errors
    ///
    /// * [Error::InvalidConfiguration] - Returned for the first value that is out of range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(invalid("the module name must not be empty"));
        }

        if !(self.control_period_in_seconds.is_finite() && self.control_period_in_seconds > 0.0)
        {
            return Err(invalid(&format!(
                "the control period must be a positive number of seconds, got {}",
                self.control_period_in_seconds
            )));
        }

        if !self.drive_gains.is_finite() {
            return Err(invalid("the drive gains must be finite"));
        }

        if !self.turning_gains.is_finite() {
            return Err(invalid("the turning gains must be finite"));
        }

        if !(self.integral_limit.is_finite() && self.integral_limit >= 0.0) {
            return Err(invalid(&format!(
                "the integral limit must be a finite, non-negative number, got {}",
                self.integral_limit
            )));
        }

        if !self.steering_offset_in_degrees.is_finite() {
            return Err(invalid("the steering offset must be finite"));
        }

        if let Some(constraints) = &self.turning_constraints {
            if !constraints.is_valid() {
                return Err(invalid(&format!(
                    "the turning constraints must be positive, got {:?}",
                    constraints
                )));
            }
        }

        for (name, factor) in [
            (
                "drive position conversion factor",
                self.drive_position_conversion_factor,
            ),
            (
                "drive velocity conversion factor",
                self.drive_velocity_conversion_factor,
            ),
            ("turning distance per pulse", self.turning_distance_per_pulse),
        ] {
            if !factor.is_finite() || factor == 0.0 {
                return Err(invalid(&format!(
                    "the {} must be a finite, non-zero number, got {}",
                    name, factor
                )));
            }
        }

        if let Some(voltage) = self.voltage_compensation {
            if !(voltage.is_finite() && voltage > 0.0) {
                return Err(invalid(&format!(
                    "the voltage compensation must be positive, got {}",
                    voltage
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidConfiguration(message.to_string())
}
