//! # Quote Calculations
//!
//! The calculation pipeline, leaf-first:
//!
//! - [`segments`] - surviving wall segments per side after recesses
//! - [`facade`] - per-facade area, panel count and opening trim
//! - [`geometry`] - `calculate_geometry` -> [`GeometrySnapshot`]
//! - [`quantities`] - `calculate_quantities` -> [`Quantities`]
//! - [`budget`] - `calculate_budget` -> [`Budget`]
//!
//! Every function is pure: same inputs, same output, no I/O and no hidden
//! state. None of them return errors; bad input degrades to zero so a live
//! quote always renders.

pub mod budget;
pub mod facade;
pub mod geometry;
pub mod quantities;
pub mod segments;

pub use budget::{calculate_budget, Budget, BudgetLine, LineOverride};
pub use facade::FacadeStats;
pub use geometry::{calculate_geometry, GeometrySnapshot};
pub use quantities::{calculate_quantities, Quantities};
pub use segments::{wall_segments, Segment};

/// `ceil(value)` as a whole count; negative or non-finite values give 0.
pub fn ceil_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.ceil() as u64
    } else {
        0
    }
}
