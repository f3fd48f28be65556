//! Rectangular notches cut into the footprint (L/C-shaped plans).

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::constants::CORNER_EPSILON;
use crate::errors::{CalcError, CalcResult};

/// A rectangular inset on one side of the plan.
///
/// `x` and `width` are measured along the side's local coordinate,
/// `depth` inward from the side.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "r-1",
///   "side": "Norte",
///   "x": 0.0,
///   "width": 2.0,
///   "depth": 1.0,
///   "height": 2.44,
///   "hideBase": true,
///   "hideSideWall": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recess {
    pub id: String,
    pub side: Side,
    /// Offset from the start of the side
    pub x: f64,
    /// Extent along the side
    pub width: f64,
    /// How far the notch cuts inward
    pub depth: f64,
    /// Wall height of the notch (rendering only)
    pub height: f64,
    /// The perimeter wall at this position is replaced by the notch's walls
    pub hide_base: bool,
    /// Also drop the adjacent side's wall next to the notch's corner
    pub hide_side_wall: bool,
}

impl Default for Recess {
    fn default() -> Self {
        Recess {
            id: String::new(),
            side: Side::Norte,
            x: 0.0,
            width: 2.0,
            depth: 1.0,
            height: 2.44,
            hide_base: true,
            hide_side_wall: false,
        }
    }
}

impl Recess {
    /// Floor area removed by the notch
    pub fn floor_area(&self) -> f64 {
        self.width * self.depth
    }

    /// Touches the start of its side.
    pub fn touches_start(&self) -> bool {
        self.x < CORNER_EPSILON
    }

    /// Touches the end of a side of length `side_length`.
    pub fn touches_end(&self, side_length: f64) -> bool {
        self.x + self.width > side_length - CORNER_EPSILON
    }

    /// Extra exterior perimeter contributed by the notch's own walls.
    ///
    /// With the base hidden the two side walls show; if the adjacent corner
    /// wall is hidden too, the removed corner wall offsets them.
    pub fn extra_perimeter(&self) -> f64 {
        match (self.hide_base, self.hide_side_wall) {
            (true, false) => 2.0 * self.depth,
            (true, true) => 0.0,
            (false, _) => 2.0 * self.depth + self.width,
        }
    }

    /// Check `0 <= x`, `x + width <= side_length`, `depth > 0`.
    ///
    /// The calculation engine does not call this; it is meant for the edge
    /// where a plan is committed.
    pub fn validate(&self, side_length: f64) -> CalcResult<()> {
        if !(self.x >= 0.0) {
            return Err(CalcError::invalid_input("x", self.x.to_string(), "Offset cannot be negative"));
        }
        if !(self.width > 0.0) {
            return Err(CalcError::invalid_input("width", self.width.to_string(), "Width must be positive"));
        }
        if self.x + self.width > side_length + 1e-9 {
            return Err(CalcError::invalid_input(
                "width",
                self.width.to_string(),
                format!("Recess ends at {} but side {} is {} long", self.x + self.width, self.side, side_length),
            ));
        }
        if !(self.depth > 0.0) {
            return Err(CalcError::invalid_input("depth", self.depth.to_string(), "Depth must be positive"));
        }
        Ok(())
    }
}
