//! Defines a trapezoidal motion profile.
//!
//! A trapezoidal profile moves from the current state to a goal state by accelerating at the
//! maximum acceleration until either the maximum velocity is reached or it is time to start
//! slowing down, cruising at the maximum velocity and then decelerating at the maximum
//! acceleration so that the goal is reached with the goal velocity. When the distance is too
//! short to reach the maximum velocity the profile is a triangle instead of a trapezoid.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "motion_profile_tests.rs"]
mod motion_profile_tests;

/// Stores the velocity and acceleration limits of a profile.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProfileConstraints {
    /// The maximum velocity in units per second.
    pub max_velocity: f64,

    /// The maximum acceleration in units per second squared.
    pub max_acceleration: f64,
}

impl ProfileConstraints {
    /// Returns a value indicating if both limits are finite and larger than zero.
    pub fn is_valid(&self) -> bool {
        self.max_velocity.is_finite()
            && self.max_acceleration.is_finite()
            && self.max_velocity > 0.0
            && self.max_acceleration > 0.0
    }

    /// Creates a new set of constraints.
    pub fn new(max_velocity: f64, max_acceleration: f64) -> Self {
        Self {
            max_velocity,
            max_acceleration,
        }
    }
}

/// Stores a position and a velocity along a profile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProfileState {
    /// The position in units.
    pub position: f64,

    /// The velocity in units per second.
    pub velocity: f64,
}

impl ProfileState {
    /// Creates a new profile state.
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    fn directed(&self, direction: f64) -> Self {
        Self::new(self.position * direction, self.velocity * direction)
    }
}

/// A trapezoidal motion profile with fixed constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrapezoidProfile {
    constraints: ProfileConstraints,
}

impl TrapezoidProfile {
    /// Calculates the state of the profile `t` seconds after leaving `current` on the way
    /// to `goal`.
    ///
    /// ## Parameters
    ///
    /// * 'time_in_seconds' - The time since the profile started.
    /// * 'current' - The state at the start of the profile.
    /// * 'goal' - The state at the end of the profile.
    ///
    /// ## Example
    ///
    /// ```
    /// use swerve_module_control::control::motion_profile::{
    ///     ProfileConstraints, ProfileState, TrapezoidProfile,
    /// };
    ///
    /// let profile = TrapezoidProfile::new(ProfileConstraints::new(1.0, 1.0));
    /// let state = profile.calculate(0.5, ProfileState::default(), ProfileState::new(10.0, 0.0));
    /// assert_eq!(0.5, state.velocity);
    /// assert_eq!(0.125, state.position);
    /// ```
    pub fn calculate(
        &self,
        time_in_seconds: f64,
        current: ProfileState,
        goal: ProfileState,
    ) -> ProfileState {
        let max_velocity = self.constraints.max_velocity;
        let max_acceleration = self.constraints.max_acceleration;

        // Work in a frame where the goal is always in the positive direction
        let direction = if current.position > goal.position {
            -1.0
        } else {
            1.0
        };
        let mut current = current.directed(direction);
        let goal = goal.directed(direction);

        if current.velocity > max_velocity {
            current.velocity = max_velocity;
        }

        // The time and distance needed to reach the current and goal velocities
        // from a standstill
        let cutoff_begin = current.velocity / max_acceleration;
        let cutoff_distance_begin = cutoff_begin * cutoff_begin * max_acceleration / 2.0;

        let cutoff_end = goal.velocity / max_acceleration;
        let cutoff_distance_end = cutoff_end * cutoff_end * max_acceleration / 2.0;

        // The distance covered by a profile that starts and ends at a standstill
        let full_trapezoid_distance =
            cutoff_distance_begin + (goal.position - current.position) + cutoff_distance_end;
        let mut acceleration_time = max_velocity / max_acceleration;

        let mut full_speed_distance =
            full_trapezoid_distance - acceleration_time * acceleration_time * max_acceleration;

        // Too short to reach full speed
        if full_speed_distance < 0.0 {
            acceleration_time = (full_trapezoid_distance / max_acceleration).sqrt();
            full_speed_distance = 0.0;
        }

        let end_acceleration = acceleration_time - cutoff_begin;
        let end_full_speed = end_acceleration + full_speed_distance / max_velocity;
        let end_deceleration = end_full_speed + acceleration_time - cutoff_end;

        let t = time_in_seconds;
        let mut result = current;
        if t < end_acceleration {
            result.velocity += t * max_acceleration;
            result.position += (current.velocity + t * max_acceleration / 2.0) * t;
        } else if t < end_full_speed {
            result.velocity = max_velocity;
            result.position += (current.velocity + end_acceleration * max_acceleration / 2.0)
                * end_acceleration
                + max_velocity * (t - end_acceleration);
        } else if t <= end_deceleration {
            let time_left = end_deceleration - t;
            result.velocity = goal.velocity + time_left * max_acceleration;
            result.position =
                goal.position - (goal.velocity + time_left * max_acceleration / 2.0) * time_left;
        } else {
            result = goal;
        }

        result.directed(direction)
    }

    /// Returns the constraints of the profile.
    pub fn constraints(&self) -> ProfileConstraints {
        self.constraints
    }

    /// Creates a new profile with the given constraints.
    pub fn new(constraints: ProfileConstraints) -> Self {
        Self { constraints }
    }
}
