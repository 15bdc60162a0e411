/// Defines the device level interfaces for motor controllers and encoders
pub mod devices;

/// Defines the interface used by a module to command its actuators
pub mod actuator_interface;

/// Defines the interface used by a module to read its sensors
pub mod sensor_interface;

/// Provides structures that describe the state of, and commands for, a module
pub mod module_state;

/// Provides the module hardware for the competition robot
pub mod competition;

/// Provides the module hardware for the test bench robot
pub mod test_bench;

/// Provides in-memory devices for testing and benchmarking
pub mod simulated;

mod drive_unit;
mod selection;

pub use selection::{select_hardware, ModuleDevices};
