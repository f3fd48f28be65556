//! Roof profile of a single facade.

use serde::{Deserialize, Serialize};

use super::side::BySide;
use crate::units::Meters;

/// Profile of the wall's top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FacadeType {
    /// Constant height `h_base`
    #[default]
    #[serde(rename = "recto")]
    Flat,
    /// Linear ramp from `h_base` (left) to `h_max` (right)
    #[serde(rename = "inclinado")]
    Sloped,
    /// Symmetric gable peaking at `h_max` at mid-width
    #[serde(rename = "2-aguas")]
    Gable,
}

impl FacadeType {
    pub const ALL: [FacadeType; 3] = [FacadeType::Flat, FacadeType::Sloped, FacadeType::Gable];

    pub fn display_name(&self) -> &'static str {
        match self {
            FacadeType::Flat => "Recto",
            FacadeType::Sloped => "Inclinado",
            FacadeType::Gable => "2 Aguas",
        }
    }
}

impl std::fmt::Display for FacadeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Facade profile and heights (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    #[serde(rename = "type")]
    pub facade_type: FacadeType,
    #[serde(rename = "hBase")]
    pub h_base: f64,
    #[serde(rename = "hMax")]
    pub h_max: f64,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        FacadeConfig::flat(2.44)
    }
}

impl FacadeConfig {
    pub fn flat(height: f64) -> Self {
        FacadeConfig {
            facade_type: FacadeType::Flat,
            h_base: height,
            h_max: height,
        }
    }

    pub fn sloped(h_base: f64, h_max: f64) -> Self {
        FacadeConfig {
            facade_type: FacadeType::Sloped,
            h_base,
            h_max,
        }
    }

    pub fn gable(h_base: f64, h_max: f64) -> Self {
        FacadeConfig {
            facade_type: FacadeType::Gable,
            h_base,
            h_max,
        }
    }

    /// Peak height; a flat facade mirrors its base height.
    pub fn peak(&self) -> Meters {
        match self.facade_type {
            FacadeType::Flat => Meters(self.h_base),
            FacadeType::Sloped | FacadeType::Gable => Meters(self.h_max),
        }
    }

    /// Wall height at fraction `t` (0 = left end, 1 = right end) of the width.
    pub fn height_at(&self, t: f64) -> Meters {
        let t = t.clamp(0.0, 1.0);
        let rise = self.h_max - self.h_base;
        match self.facade_type {
            FacadeType::Flat => Meters(self.h_base),
            FacadeType::Sloped => Meters(self.h_base + rise * t),
            FacadeType::Gable => {
                let from_edge = if t <= 0.5 { t } else { 1.0 - t };
                Meters(self.h_base + rise * from_edge * 2.0)
            }
        }
    }
}

/// One facade config per cardinal side
pub type FacadeConfigs = BySide<FacadeConfig>;
