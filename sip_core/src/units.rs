//! # Unit Types
//!
//! Type-safe wrappers for the metric quantities the engine mixes: lengths
//! in meters (wall extents, heights, linear meters of framing) and areas in
//! square meters (facades, floor, roof). They are plain `f64` newtypes that
//! serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::units::{Meters, SquareMeters};
//!
//! let wall = Meters(6.0);
//! let height = Meters(2.44);
//! let area: SquareMeters = wall * height;
//! assert!((area.0 - 14.64).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

impl Mul for Meters {
    type Output = SquareMeters;
    fn mul(self, rhs: Meters) -> SquareMeters {
        SquareMeters(self.0 * rhs.0)
    }
}

impl Div<Meters> for SquareMeters {
    type Output = Meters;
    fn div(self, rhs: Meters) -> Meters {
        Meters(self.0 / rhs.0)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// Clamp negatives and non-finite values to zero
            pub fn non_negative(self) -> Self {
                if self.0.is_finite() && self.0 > 0.0 {
                    self
                } else {
                    Self(0.0)
                }
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(SquareMeters);
