#![warn(missing_docs)]

//! Control kernel for a single swerve (independently steered and driven) wheel module.
//!
//! Provides the closed-loop control that turns a desired wheel velocity and heading into
//! drive and steering outputs, together with a hardware abstraction so that the control
//! logic can run against different motor controller and sensor combinations.

use thiserror::Error;

/// Loading and validation of the module configuration
pub mod config;

/// Provides the controllers used to drive a module: PID, motion profiles and angle optimization
pub mod control;

/// Provides the interfaces and implementations for the module hardware
pub mod hardware;

/// Defines different number spaces
pub mod number_space;

/// Defines the swerve module that ties the controllers and the hardware together
pub mod swerve_module;

/// Defines the different errors for the swerve module crate.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that a device could not be initialized. No further calls are made to the
    /// hardware once this error has been returned.
    #[error("Failed to initialize device {device}: {reason}")]
    DeviceInitialization {
        /// The name of the device that failed to initialize.
        device: String,
        /// A description of the failure.
        reason: String,
    },

    /// Indicates that reading a value from a device failed.
    #[error("Failed to read from device {device}: {reason}")]
    DeviceRead {
        /// The name of the device that failed.
        device: String,
        /// A description of the failure.
        reason: String,
    },

    /// Indicates that writing a value to a device failed.
    #[error("Failed to write to device {device}: {reason}")]
    DeviceWrite {
        /// The name of the device that failed.
        device: String,
        /// A description of the failure.
        reason: String,
    },

    /// Indicates that a configuration value is invalid.
    #[error("The configuration is invalid: {0}")]
    InvalidConfiguration(String),

    /// Indicates that the configuration could not be read or parsed.
    #[error("Failed to load the configuration: {0}")]
    ConfigurationLoad(String),

    /// Indicates that the devices provided for a module do not match the hardware
    /// variant selected in the configuration.
    #[error("Expected devices for the {expected} hardware variant but got devices for {found}")]
    HardwareVariantMismatch {
        /// The hardware variant named in the configuration.
        expected: String,
        /// The hardware variant the provided devices belong to.
        found: String,
    },
}
