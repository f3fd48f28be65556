//! Doors and windows.

use serde::{Deserialize, Serialize};

use super::side::Side;
use crate::constants::{DOOR_SIZE, WINDOW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    #[default]
    Window,
    Door,
}

impl OpeningType {
    /// Default `(width, height)` for a new opening of this type
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            OpeningType::Door => DOOR_SIZE,
            OpeningType::Window => WINDOW_SIZE,
        }
    }
}

/// A cutout in a facade or interior wall.
///
/// `side` is a facade name (`"Norte"`, ...) or the id of an interior wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opening {
    pub id: String,
    pub side: String,
    #[serde(rename = "type")]
    pub opening_type: OpeningType,
    pub width: f64,
    pub height: f64,
    /// Offset along the wall
    pub x: f64,
    /// Sill height
    pub y: f64,
}

impl Default for Opening {
    fn default() -> Self {
        Opening::new(OpeningType::Window, Side::Norte.name(), 0.0, 0.0)
    }
}

impl Opening {
    /// A new opening with the default size for its type.
    pub fn new(opening_type: OpeningType, side: impl Into<String>, x: f64, y: f64) -> Self {
        let (width, height) = opening_type.default_size();
        Opening {
            id: String::new(),
            side: side.into(),
            opening_type,
            width,
            height,
            x,
            y,
        }
    }

    /// A 0.9 x 2.1 door standing on the floor
    pub fn door(side: impl Into<String>, x: f64) -> Self {
        Opening::new(OpeningType::Door, side, x, 0.0)
    }

    /// A 1.2 x 1.2 window at sill height `y`
    pub fn window(side: impl Into<String>, x: f64, y: f64) -> Self {
        Opening::new(OpeningType::Window, side, x, y)
    }

    /// The facade this opening sits on, if `side` names one.
    pub fn facade(&self) -> Option<Side> {
        Side::from_name(&self.side)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Trim length around the opening, `(width + height) * 2`
    pub fn perimeter(&self) -> f64 {
        (self.width + self.height) * 2.0
    }
}
