//! Defines a PID controller that tracks a trapezoidal motion profile towards its goal
//! instead of jumping to the goal directly.

use crate::number_space::{wrap_angle, NumberSpaceType};

use super::{
    motion_profile::{ProfileConstraints, ProfileState, TrapezoidProfile},
    pid::{PidController, PidGains},
};

#[cfg(test)]
#[path = "profiled_pid_tests.rs"]
mod profiled_pid_tests;

/// A [PidController] whose setpoint moves towards the goal along a [TrapezoidProfile].
///
/// Every call to [ProfiledPidController::calculate] advances the profile by one period
/// and uses the resulting profile position as the setpoint for the PID controller.
///
/// In the angular number space the goal and the current profile setpoint are moved to
/// within half a turn of the measurement before the profile is advanced, so that the
/// profile always takes the short way around.
pub struct ProfiledPidController {
    pid: PidController,
    profile: TrapezoidProfile,

    /// The current profile setpoint. Unknown until the first calculation or reset.
    setpoint: Option<ProfileState>,

    /// The goal from the last calculation.
    goal: ProfileState,
}

impl ProfiledPidController {
    /// Calculates the output of the controller.
    ///
    /// When the controller has not been [reset](ProfiledPidController::reset) the profile
    /// starts at the first measurement, standing still.
    ///
    /// ## Parameters
    ///
    /// * 'measurement' - The current value of the process variable.
    /// * 'goal' - The position the process variable should end up at.
    pub fn calculate(&mut self, measurement: f64, goal: f64) -> f64 {
        let mut goal = ProfileState::new(goal, 0.0);
        let mut setpoint = self
            .setpoint
            .unwrap_or_else(|| ProfileState::new(measurement, 0.0));

        if self.pid.is_continuous() {
            goal.position = measurement + wrap_angle(goal.position - measurement);
            setpoint.position = measurement + wrap_angle(setpoint.position - measurement);
        }

        let next = self.profile.calculate(self.pid.period(), setpoint, goal);
        self.setpoint = Some(next);
        self.goal = goal;

        self.pid.calculate(measurement, next.position)
    }

    /// Returns the constraints of the motion profile.
    pub fn constraints(&self) -> ProfileConstraints {
        self.profile.constraints()
    }

    /// Returns the goal from the last calculation.
    pub fn goal(&self) -> ProfileState {
        self.goal
    }

    /// Creates a new [ProfiledPidController].
    ///
    /// ## Parameters
    ///
    /// * 'gains' - The gains of the PID controller.
    /// * 'number_space_type' - The number space the measurements and goals live in.
    /// * 'period_in_seconds' - The time between calls to calculate.
    /// * 'constraints' - The velocity and acceleration limits of the profile.
    pub fn new(
        gains: PidGains,
        number_space_type: NumberSpaceType,
        period_in_seconds: f64,
        constraints: ProfileConstraints,
    ) -> Self {
        Self {
            pid: PidController::new(gains, number_space_type, period_in_seconds),
            profile: TrapezoidProfile::new(constraints),
            setpoint: None,
            goal: ProfileState::default(),
        }
    }

    /// Returns the underlying PID controller.
    pub fn pid(&self) -> &PidController {
        &self.pid
    }

    /// Restarts the profile from the given measurement, standing still, and clears the
    /// state of the PID controller.
    pub fn reset(&mut self, measurement: f64) {
        self.setpoint = Some(ProfileState::new(measurement, 0.0));
        self.pid.reset();
    }

    /// Returns the current profile setpoint, if the profile has started.
    pub fn setpoint(&self) -> Option<ProfileState> {
        self.setpoint
    }

    /// Sets the maximum magnitude of the integral contribution to the output.
    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.pid = self.pid.with_integral_limit(limit);
        self
    }
}
