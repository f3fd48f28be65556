//! # Facade Area Model
//!
//! Gross area, panel count and opening trim for a single facade.
//!
//! | Profile | Area |
//! |---|---|
//! | recto | `w * hBase` |
//! | inclinado | `w * (hBase + hMax) / 2` |
//! | 2-aguas | `w * hBase + w * (hMax - hBase) / 2` |
//!
//! Panel count is `ceil(area / (1.22 * 2.44))` on the gross area. Recesses
//! never reduce it.

use serde::{Deserialize, Serialize};

use super::ceil_count;
use crate::building::{FacadeConfig, FacadeType, Opening, Side};
use crate::constants::{FRAMING_ML_PER_PANEL, PANEL_AREA};
use crate::units::{Meters, SquareMeters};

/// Per-facade output of the geometry snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeStats {
    /// Gross facade area (m²)
    pub area: f64,
    /// Panels needed for the gross area
    pub panels: u64,
    /// Linear meters of opening trim on this facade
    #[serde(rename = "openingML")]
    pub opening_ml: f64,
    /// Framing linear meters for this facade's panels
    #[serde(rename = "perimPanels")]
    pub perim_panels: f64,
    #[serde(rename = "isVisible")]
    pub is_visible: bool,
}

/// Gross area of a facade `width` wide, before openings.
pub fn facade_area(config: &FacadeConfig, width: Meters) -> SquareMeters {
    let base = Meters(config.h_base);
    let peak = Meters(config.h_max);
    let area = match config.facade_type {
        FacadeType::Flat => width * base,
        FacadeType::Sloped => width * (base + peak) / 2.0,
        FacadeType::Gable => width * base + width * (peak - base) / 2.0,
    };
    area.non_negative()
}

/// Sheets of `panel_area` needed to cover `area`.
pub fn panels_for_area(area: SquareMeters, panel_area: SquareMeters) -> u64 {
    if !(panel_area.0 > 0.0) {
        return 0;
    }
    ceil_count(area.0 / panel_area.0)
}

/// Trim length of the openings placed on `side`.
pub fn opening_ml(side: Side, openings: &[Opening]) -> f64 {
    openings
        .iter()
        .filter(|o| o.facade() == Some(side))
        .map(Opening::perimeter)
        .filter(|ml| ml.is_finite())
        .sum()
}

/// Stats for one facade; an invisible facade reports zeros.
pub fn facade_stats(side: Side, config: &FacadeConfig, width: Meters, openings: &[Opening], visible: bool) -> FacadeStats {
    if !visible {
        return FacadeStats {
            is_visible: false,
            ..Default::default()
        };
    }
    let area = facade_area(config, width);
    let panels = panels_for_area(area, PANEL_AREA);
    FacadeStats {
        area: area.0,
        panels,
        opening_ml: opening_ml(side, openings),
        perim_panels: panels as f64 * FRAMING_ML_PER_PANEL,
        is_visible: true,
    }
}
