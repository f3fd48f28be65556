//! Interior partitions.

use serde::{Deserialize, Deserializer, Serialize};

/// A straight interior wall, in either of the two shapes found in saved
/// state: the canonical origin + length + orientation, or the legacy
/// two-endpoint form.
///
/// Loading picks `Legacy` when either `x1` or `x2` is present and
/// `Canonical` otherwise; missing coordinates read as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InteriorWall {
    Canonical {
        id: String,
        x: f64,
        y: f64,
        length: f64,
        #[serde(rename = "isVertical")]
        is_vertical: bool,
    },
    Legacy {
        id: String,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

/// Flat view over both wall shapes.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawWall {
    id: String,
    x: Option<f64>,
    y: Option<f64>,
    length: Option<f64>,
    #[serde(rename = "isVertical")]
    is_vertical: bool,
    x1: Option<f64>,
    y1: Option<f64>,
    x2: Option<f64>,
    y2: Option<f64>,
}

impl<'de> Deserialize<'de> for InteriorWall {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawWall::deserialize(deserializer)?;
        let wall = if raw.x1.is_some() || raw.x2.is_some() {
            InteriorWall::Legacy {
                id: raw.id,
                x1: raw.x1.unwrap_or(0.0),
                y1: raw.y1.unwrap_or(0.0),
                x2: raw.x2.unwrap_or(0.0),
                y2: raw.y2.unwrap_or(0.0),
            }
        } else {
            InteriorWall::Canonical {
                id: raw.id,
                x: raw.x.unwrap_or(0.0),
                y: raw.y.unwrap_or(0.0),
                length: raw.length.unwrap_or(0.0),
                is_vertical: raw.is_vertical,
            }
        };
        Ok(wall)
    }
}

impl InteriorWall {
    pub fn new(id: impl Into<String>, x: f64, y: f64, length: f64, is_vertical: bool) -> Self {
        InteriorWall::Canonical {
            id: id.into(),
            x,
            y,
            length,
            is_vertical,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            InteriorWall::Canonical { id, .. } | InteriorWall::Legacy { id, .. } => id,
        }
    }

    /// Wall length in meters; non-finite or negative lengths count as 0.
    pub fn length(&self) -> f64 {
        let len = match self {
            InteriorWall::Canonical { length, .. } => *length,
            InteriorWall::Legacy { x1, y1, x2, y2, .. } => (x2 - x1).hypot(y2 - y1),
        };
        if len.is_finite() && len > 0.0 {
            len
        } else {
            0.0
        }
    }
}

/// Total length of all interior walls
pub fn total_length(walls: &[InteriorWall]) -> f64 {
    walls.iter().map(InteriorWall::length).sum()
}
