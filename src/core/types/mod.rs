//! # Core Types Module
//!
//! Value types shared by every sampler.
//!
//! ## Example
//!
//! ```rust
//! use host_sampler::core::types::Percentage;
//!
//! let p = Percentage::from_f64(150.0);
//! assert_eq!(p.as_f64(), 100.0);
//!
//! // Division by zero yields an empty reading, never NaN
//! assert_eq!(Percentage::ratio(5.0, 0.0).as_f64(), 0.0);
//! ```

use serde::Serialize;

/// Represents a percentage value between 0.0 and 100.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Percentage {
    /// The empty reading every failure path degrades to
    pub const ZERO: Self = Self(0.0);

    /// A full reading, also used for "no battery constraint"
    pub const FULL: Self = Self(100.0);

    /// Creates a new Percentage from a value between 0 and 100
    /// Returns None if the value is outside the valid range
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=100.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a new percentage value, clamping it to the range 0.0-100.0.
    ///
    /// NaN maps to 0.0 so a degenerate computation can never leak into a snapshot.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// `part / whole * 100`, clamped. A zero or non-finite `whole` yields 0.
    pub fn ratio(part: f64, whole: f64) -> Self {
        if whole == 0.0 || !whole.is_finite() {
            return Self::ZERO;
        }
        Self::from_f64(part / whole * 100.0)
    }

    /// Returns the percentage value as a float
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl From<Percentage> for f64 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}
