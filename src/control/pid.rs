//! Defines a PID controller that measures its error in a [NumberSpaceType].
//!
//! In a linear number space the error is the plain difference between the setpoint and
//! the measurement. In the angular number space the error is the shortest way around the
//! circle, so a setpoint of 170 degrees and a measurement of -170 degrees give an error of
//! -20 degrees rather than 340 degrees. The derivative term is calculated from the change
//! in that wrapped error, so a measurement that crosses the seam at PI does not cause a
//! spike in the output.

use serde::{Deserialize, Serialize};

use crate::number_space::{to_number_space, NumberSpaceType, RealNumberValueSpace};

#[cfg(test)]
#[path = "pid_tests.rs"]
mod pid_tests;

/// The default limit for the contribution of the integral term to the output.
pub const DEFAULT_INTEGRAL_LIMIT: f64 = 1.0;

/// Stores the gains for a [PidController].
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct PidGains {
    /// The proportional gain.
    pub kp: f64,

    /// The integral gain.
    #[serde(default)]
    pub ki: f64,

    /// The derivative gain.
    #[serde(default)]
    pub kd: f64,
}

impl PidGains {
    /// Returns a value indicating if all the gains are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.kp.is_finite() && self.ki.is_finite() && self.kd.is_finite()
    }

    /// Creates a new set of gains.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }

    /// Creates a set of gains with only a proportional gain.
    pub fn proportional(kp: f64) -> Self {
        Self::new(kp, 0.0, 0.0)
    }
}

/// A proportional-integral-derivative controller that runs at a fixed period.
///
/// The controller keeps the accumulated error and the previous error between calls to
/// [PidController::calculate]. The integral contribution to the output is clamped to
/// plus or minus the integral limit to prevent windup when the setpoint cannot be reached.
/// The output itself is not clamped. An integral gain that is NaN or infinite cannot be
/// limited, so the integral term is left out of the output in that case.
pub struct PidController {
    gains: PidGains,

    /// The kind of number space the errors are measured in.
    number_space_type: NumberSpaceType,

    /// The number space the errors are measured in.
    number_space: Box<dyn RealNumberValueSpace>,

    /// The time between calls to calculate.
    period_in_seconds: f64,

    /// The maximum magnitude of the integral contribution to the output.
    integral_limit: f64,

    /// The sum of error * period.
    integral: f64,

    /// The error from the last call to calculate, if there was one since the last reset.
    previous_error: Option<f64>,

    /// The rate of change of the error from the last call to calculate.
    error_derivative: f64,

    /// The setpoint from the last call to calculate.
    setpoint: f64,
}

impl PidController {
    /// Returns a value indicating if the error from the last calculation is within the
    /// given tolerance. Returns false if nothing has been calculated since the last reset.
    pub fn at_setpoint(&self, tolerance: f64) -> bool {
        match self.previous_error {
            Some(error) => error.abs() <= tolerance,
            None => false,
        }
    }

    /// Calculates the output of the controller for the given measurement and setpoint.
    ///
    /// ## Parameters
    ///
    /// * 'measurement' - The current value of the process variable.
    /// * 'setpoint' - The value the process variable should reach.
    pub fn calculate(&mut self, measurement: f64, setpoint: f64) -> f64 {
        self.setpoint = self.number_space.normalize_value(setpoint);
        let error = self
            .number_space
            .smallest_distance_between_values(measurement, self.setpoint);

        self.error_derivative = match self.previous_error {
            Some(previous) => {
                self.number_space
                    .smallest_distance_between_values(previous, error)
                    / self.period_in_seconds
            }
            None => 0.0,
        };

        self.integral += error * self.period_in_seconds;
        let integral_term = if self.gains.ki == 0.0 {
            0.0
        } else if self.gains.ki.is_finite() {
            let bound = self.integral_limit / self.gains.ki.abs();
            self.integral = self.integral.clamp(-bound, bound);
            self.gains.ki * self.integral
        } else {
            // A non-finite integral gain cannot be limited so it does not contribute
            self.integral = 0.0;
            0.0
        };

        self.previous_error = Some(error);

        self.gains.kp * error + integral_term + self.gains.kd * self.error_derivative
    }

    /// Returns the error from the last calculation, or zero if nothing has been
    /// calculated since the last reset.
    pub fn error(&self) -> f64 {
        self.previous_error.unwrap_or(0.0)
    }

    /// Returns the rate of change of the error from the last calculation.
    pub fn error_derivative(&self) -> f64 {
        self.error_derivative
    }

    /// Returns the gains of the controller.
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    /// Returns the accumulated error * time.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Returns the maximum magnitude of the integral contribution to the output.
    pub fn integral_limit(&self) -> f64 {
        self.integral_limit
    }

    /// Returns a value indicating if the error is measured in the angular number space.
    pub fn is_continuous(&self) -> bool {
        self.number_space_type == NumberSpaceType::Angular
    }

    /// Creates a new [PidController].
    ///
    /// ## Parameters
    ///
    /// * 'gains' - The proportional, integral and derivative gains.
    /// * 'number_space_type' - The number space that the measurement and setpoint live in.
    /// * 'period_in_seconds' - The time between calls to [PidController::calculate].
    ///
    /// ## Example
    ///
    /// ```
    /// use swerve_module_control::control::pid::{PidController, PidGains};
    /// use swerve_module_control::number_space::NumberSpaceType;
    ///
    /// let mut pid = PidController::new(PidGains::proportional(2.0), NumberSpaceType::LinearUnlimited, 0.02);
    /// assert_eq!(2.0, pid.calculate(1.0, 2.0));
    /// ```
    pub fn new(gains: PidGains, number_space_type: NumberSpaceType, period_in_seconds: f64) -> Self {
        Self {
            gains,
            number_space_type,
            number_space: to_number_space(number_space_type),
            period_in_seconds,
            integral_limit: DEFAULT_INTEGRAL_LIMIT,
            integral: 0.0,
            previous_error: None,
            error_derivative: 0.0,
            setpoint: 0.0,
        }
    }

    /// Returns the time between calls to calculate.
    pub fn period(&self) -> f64 {
        self.period_in_seconds
    }

    /// Clears the accumulated error and the previous error.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = None;
        self.error_derivative = 0.0;
    }

    /// Updates the gains. The accumulated error is kept.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.gains = gains;
    }

    /// Returns the setpoint from the last calculation.
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Sets the maximum magnitude of the integral contribution to the output.
    ///
    /// Negative limits are treated as their magnitude. A NaN limit disables the
    /// integral contribution.
    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = if limit.is_nan() { 0.0 } else { limit.abs() };
        self
    }
}
