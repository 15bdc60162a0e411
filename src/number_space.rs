//! Defines different ways to describe a space of numbers and how these spaces behave at the
//! boundaries.
//!
//! For instance a linear unbounded space has boundaries at +infinity and -infinity. This
//! type of space does not wrap around, i.e. the only way to get from the lower boundary to the
//! upper boundary is to pass through all the numbers between the boundaries. A wheel velocity
//! lives in this kind of space.
//!
//! On the contrary an angular space wraps around, i.e. in order to go from one angle to another
//! you can either turn forwards or turn backwards. The angular space used by this crate is the
//! canonical (-PI, PI] range. Angles are always normalized into this range before they are
//! compared or stored, so PI is a member of the space and -PI is mapped onto PI.
//!
//! The [to_number_space()] function is used to create either of these number spaces.

use std::f64::consts::{PI, TAU};

#[cfg(test)]
#[path = "number_space_tests.rs"]
mod number_space_tests;

/// Defines the different kinds of number spaces available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberSpaceType {
    /// Indicates that a number space is a linear number space where numbers sequentially
    /// increase from -infinity to +infinity.
    LinearUnlimited,

    /// Indicates that a number space is an angular number space covering the half-open
    /// range (-PI, PI] in radians.
    Angular,
}

/// Defines an abstraction over number spaces
pub trait RealNumberValueSpace {
    /// Returns the value in the space that is equivalent to the given value.
    ///
    /// Normalizing the value is useful in periodic number spaces.
    ///
    /// ## Parameters
    ///
    /// * `value` - The value that should be normalized.
    ///
    /// ## Example
    ///
    /// ```
    /// use core::f64::consts::PI;
    /// use swerve_module_control::number_space::{ NumberSpaceType, to_number_space };
    ///
    /// // Create a linear space
    /// let space = to_number_space(NumberSpaceType::LinearUnlimited);
    /// let value = space.normalize_value(1.0);
    /// assert_eq!(1.0, value);
    ///
    /// // Create an angular space that runs from -PI to PI
    /// let space = to_number_space(NumberSpaceType::Angular);
    /// let value = space.normalize_value(-PI);
    /// assert_eq!(PI, value);
    /// ```
    fn normalize_value(&self, value: f64) -> f64;

    /// Returns the smallest signed distance needed to travel from `start` to `end`.
    ///
    /// The smallest distance for unlimited number spaces is equal to the distance
    /// between the numbers. However for a periodic number space the distance across
    /// a boundary may be shorter.
    ///
    /// ## Parameters
    ///
    /// * `start` - The starting value.
    /// * `end` - The ending value
    ///
    /// ## Example
    ///
    /// ```
    /// use core::f64::consts::PI;
    /// use swerve_module_control::number_space::{ NumberSpaceType, to_number_space };
    ///
    /// // Create a linear space
    /// let space = to_number_space(NumberSpaceType::LinearUnlimited);
    /// let value = space.smallest_distance_between_values(1.0, 2.0);
    /// assert_eq!(1.0, value);
    ///
    /// // Create an angular space
    /// let space = to_number_space(NumberSpaceType::Angular);
    /// let value = space.smallest_distance_between_values(0.0, 1.5 * PI);
    /// assert!((value + 0.5 * PI).abs() < 1e-12);
    /// ```
    fn smallest_distance_between_values(&self, start: f64, end: f64) -> f64;
}

/// Defines a linear unbounded number space with no boundaries
///
/// The linear unbounded number space is what we normally think of as a set
/// of numbers, ranging from -infinity to +infinity.
pub(crate) struct LinearUnboundedSpace {}

impl LinearUnboundedSpace {
    pub fn new() -> LinearUnboundedSpace {
        LinearUnboundedSpace {}
    }
}

impl RealNumberValueSpace for LinearUnboundedSpace {
    fn normalize_value(&self, value: f64) -> f64 {
        value
    }

    fn smallest_distance_between_values(&self, start: f64, end: f64) -> f64 {
        end - start
    }
}

/// Defines the periodic number space (-PI, PI] that wraps around every 2 PI.
pub(crate) struct AngularSpace {}

impl AngularSpace {
    pub fn new() -> AngularSpace {
        AngularSpace {}
    }
}

impl RealNumberValueSpace for AngularSpace {
    fn normalize_value(&self, value: f64) -> f64 {
        wrap_angle(value)
    }

    fn smallest_distance_between_values(&self, start: f64, end: f64) -> f64 {
        wrap_angle(end - start)
    }
}

/// Wraps an angle in radians into the canonical (-PI, PI] range.
///
/// Non-finite values cannot be wrapped and produce NaN.
///
/// ```
/// use core::f64::consts::PI;
/// use swerve_module_control::number_space::wrap_angle;
///
/// assert_eq!(PI, wrap_angle(-PI));
/// assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-12);
/// ```
pub fn wrap_angle(angle_in_radians: f64) -> f64 {
    if !angle_in_radians.is_finite() {
        return f64::NAN;
    }

    // The remainder has the sign of the dividend so it is in (-2 PI, 2 PI)
    let remainder = angle_in_radians % TAU;
    if remainder <= -PI {
        remainder + TAU
    } else if remainder > PI {
        remainder - TAU
    } else {
        remainder
    }
}

/// Returns a [RealNumberValueSpace] instance for the given number space type.
///
/// ```
/// use core::f64::consts::PI;
/// use swerve_module_control::number_space::{ NumberSpaceType, to_number_space };
///
/// // Create a linear space
/// let space = to_number_space(NumberSpaceType::LinearUnlimited);
/// assert_eq!(3.0, space.smallest_distance_between_values(-1.0, 2.0));
///
/// // Create an angular space
/// let space = to_number_space(NumberSpaceType::Angular);
/// assert!((space.normalize_value(3.0 * PI) - PI).abs() < 1e-12);
/// ```
pub fn to_number_space(number_space_type: NumberSpaceType) -> Box<dyn RealNumberValueSpace> {
    match number_space_type {
        NumberSpaceType::LinearUnlimited => Box::new(LinearUnboundedSpace::new()),
        NumberSpaceType::Angular => Box::new(AngularSpace::new()),
    }
}
