//! Cardinal sides of the footprint.
//!
//! The plan is a `width` x `length` rectangle with Norte at the top. Each
//! side has a local 1-D coordinate running clockwise around the footprint:
//!
//! ```text
//!            Norte (0 -> width)
//!          +------------------>+
//!          ^                   |
//!  Oeste   |                   |  Este
//! (length  |                   |  (0 -> length)
//!   -> 0)  |                   v
//!          +<------------------+
//!            Sur (0 -> width, east to west)
//! ```

use serde::{Deserialize, Serialize};

use super::Dimensions;
use crate::units::Meters;

/// One of the four exterior facades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Norte,
    Sur,
    Este,
    Oeste,
}

impl Side {
    /// All sides in the order facades are reported
    pub const ALL: [Side; 4] = [Side::Norte, Side::Sur, Side::Este, Side::Oeste];

    pub fn name(&self) -> &'static str {
        match self {
            Side::Norte => "Norte",
            Side::Sur => "Sur",
            Side::Este => "Este",
            Side::Oeste => "Oeste",
        }
    }

    /// Parse a side name as used in opening `side` references.
    pub fn from_name(name: &str) -> Option<Side> {
        Side::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Extent of this side: width for Norte/Sur, length for Este/Oeste.
    pub fn extent(&self, dims: &Dimensions) -> Meters {
        match self {
            Side::Norte | Side::Sur => Meters(dims.width),
            Side::Este | Side::Oeste => Meters(dims.length),
        }
    }

    /// Side whose end meets this side's start.
    pub fn previous(&self) -> Side {
        match self {
            Side::Norte => Side::Oeste,
            Side::Este => Side::Norte,
            Side::Sur => Side::Este,
            Side::Oeste => Side::Sur,
        }
    }

    /// Side whose start meets this side's end.
    pub fn next(&self) -> Side {
        match self {
            Side::Norte => Side::Este,
            Side::Este => Side::Sur,
            Side::Sur => Side::Oeste,
            Side::Oeste => Side::Norte,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One value per side, serialized as `{"Norte": .., "Sur": .., "Este": .., "Oeste": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct BySide<T> {
    #[serde(rename = "Norte")]
    pub norte: T,
    #[serde(rename = "Sur")]
    pub sur: T,
    #[serde(rename = "Este")]
    pub este: T,
    #[serde(rename = "Oeste")]
    pub oeste: T,
}

impl<T> BySide<T> {
    /// Build from a function of the side
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        BySide {
            norte: f(Side::Norte),
            sur: f(Side::Sur),
            este: f(Side::Este),
            oeste: f(Side::Oeste),
        }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Norte => &self.norte,
            Side::Sur => &self.sur,
            Side::Este => &self.este,
            Side::Oeste => &self.oeste,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Norte => &mut self.norte,
            Side::Sur => &mut self.sur,
            Side::Este => &mut self.este,
            Side::Oeste => &mut self.oeste,
        }
    }

    /// Iterate `(side, value)` in [`Side::ALL`] order
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
