/// Provides the optimization of a desired module state against the current heading
pub mod optimizer;

/// Provides trapezoidal motion profiles
pub mod motion_profile;

/// Provides a PID controller that works in linear and angular number spaces
pub mod pid;

/// Provides a PID controller that follows a trapezoidal motion profile
pub mod profiled_pid;
