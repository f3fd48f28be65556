//! # Geometry Aggregator
//!
//! Combines facade areas, recess deductions, interior walls, openings and
//! visibility/inclusion toggles into one [`GeometrySnapshot`]. Every other
//! stage (quantities, budget, export) reads from the snapshot.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::building::{Dimensions, FacadeConfigs};
//! use sip_core::calculations::geometry::calculate_geometry;
//! use sip_core::project::ProjectSettings;
//! use sip_core::selections::Selections;
//!
//! let geometry = calculate_geometry(
//!     &Dimensions::default(),
//!     &[],
//!     &FacadeConfigs::default(),
//!     &[],
//!     &ProjectSettings::default(),
//!     &Selections::default(),
//! );
//! assert_eq!(geometry.floor_area, 48.0);
//! assert_eq!(geometry.exterior_perimeter, 28.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::ceil_count;
use super::facade::{facade_stats, panels_for_area, FacadeStats};
use crate::building::{walls, BySide, Dimensions, FacadeConfigs, InteriorWall, Opening, Side};
use crate::constants::{FRAMING_ML_PER_PANEL, PANEL_AREA, PANEL_HEIGHT, PANEL_WIDTH, ROOF_AREA_FACTOR, SANDWICH_PANEL_WIDTH};
use crate::project::ProjectSettings;
use crate::selections::{RoofSystem, Selections};
use crate::units::SquareMeters;

/// Areas, perimeters and panel counts of the whole building.
///
/// Field names on the wire follow the export contract (`perimExt`,
/// `areaPiso`, `cantMurosExt`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySnapshot {
    /// Per-facade stats
    pub facades: BySide<FacadeStats>,

    /// Exterior perimeter including recess walls (ML)
    #[serde(rename = "perimExt")]
    pub exterior_perimeter: f64,
    /// Floor area after recess deductions (m²)
    #[serde(rename = "areaPiso")]
    pub floor_area: f64,
    /// Roof area, floor area times 1.25 (m²)
    #[serde(rename = "areaTecho")]
    pub roof_area: f64,

    #[serde(rename = "cantMurosExt")]
    pub exterior_wall_panels: u64,
    #[serde(rename = "cantMurosInt")]
    pub interior_wall_panels: u64,
    #[serde(rename = "cantPiso")]
    pub floor_panels: u64,
    #[serde(rename = "cantTecho")]
    pub roof_panels: u64,
    #[serde(rename = "totalPaneles")]
    pub total_panels: u64,

    /// Total interior wall length (ML)
    #[serde(rename = "tabiques")]
    pub interior_wall_length: f64,

    /// Exterior wall area from facade profiles, before openings (m²)
    #[serde(rename = "areaMurosBruta")]
    pub gross_wall_area: f64,
    /// Exterior wall area minus openings (m²)
    #[serde(rename = "areaMuros")]
    pub net_wall_area: f64,

    #[serde(rename = "perimAberturas")]
    pub opening_perimeter: f64,
    #[serde(rename = "areaAberturas")]
    pub opening_area: f64,
    #[serde(rename = "totalAberturasCount")]
    pub opening_count: u64,

    /// Framing ML for all panels (7.32 per panel)
    #[serde(rename = "perimLinealPaneles")]
    pub panel_framing_ml: f64,
    #[serde(rename = "perimMurosExt")]
    pub exterior_wall_framing_ml: f64,
    #[serde(rename = "perimMurosInt")]
    pub interior_wall_framing_ml: f64,
    #[serde(rename = "perimPiso")]
    pub floor_framing_ml: f64,
    #[serde(rename = "perimTecho")]
    pub roof_framing_ml: f64,
}

impl GeometrySnapshot {
    /// Panels quoted for walls (exterior + interior)
    pub fn wall_panels(&self) -> u64 {
        self.exterior_wall_panels.saturating_add(self.interior_wall_panels)
    }

    /// Replace every non-finite or negative float with 0.
    ///
    /// The formulas guard their divisions, so this only fires on corrupt
    /// input (NaN dimensions and the like).
    pub fn sanitize(&mut self) {
        let mut scrubbed = 0usize;
        let mut scrub = |v: &mut f64| {
            if !(v.is_finite() && *v >= 0.0) {
                if !v.is_finite() {
                    scrubbed += 1;
                }
                *v = 0.0;
            }
        };
        for side in Side::ALL {
            let stats = self.facades.get_mut(side);
            scrub(&mut stats.area);
            scrub(&mut stats.opening_ml);
            scrub(&mut stats.perim_panels);
        }
        for v in [
            &mut self.exterior_perimeter,
            &mut self.floor_area,
            &mut self.roof_area,
            &mut self.interior_wall_length,
            &mut self.gross_wall_area,
            &mut self.net_wall_area,
            &mut self.opening_perimeter,
            &mut self.opening_area,
            &mut self.panel_framing_ml,
            &mut self.exterior_wall_framing_ml,
            &mut self.interior_wall_framing_ml,
            &mut self.floor_framing_ml,
            &mut self.roof_framing_ml,
        ] {
            scrub(v);
        }
        if scrubbed > 0 {
            warn!(scrubbed, "non-finite geometry values replaced with 0");
        }
    }
}

/// Build the geometry snapshot.
///
/// Never fails: corrupt inputs degrade to zero.
#[instrument(skip_all, fields(recesses = settings.recesses.len(), openings = openings.len(), walls = interior_walls.len()))]
pub fn calculate_geometry(
    dims: &Dimensions,
    interior_walls: &[InteriorWall],
    facade_configs: &FacadeConfigs,
    openings: &[Opening],
    settings: &ProjectSettings,
    selections: &Selections,
) -> GeometrySnapshot {
    // 1. interior walls
    let interior_wall_length = walls::total_length(interior_walls);

    // 2. facades
    let mut facades = BySide::<FacadeStats>::default();
    let mut facade_area_total = 0.0;
    let mut facade_panels_total = 0u64;
    let mut min_base_height = f64::INFINITY;
    for side in Side::ALL {
        let config = facade_configs.get(side);
        let visible = settings.is_side_visible(side);
        let stats = facade_stats(side, config, side.extent(dims), openings, visible);
        if visible {
            facade_area_total += stats.area;
            facade_panels_total = facade_panels_total.saturating_add(stats.panels);
        }
        min_base_height = min_base_height.min(config.h_base);
        *facades.get_mut(side) = stats;
    }
    if !min_base_height.is_finite() {
        min_base_height = 0.0;
    }

    // 3. recesses on visible sides
    let mut recess_floor_deduction = 0.0;
    let mut recess_extra_perimeter = 0.0;
    for recess in settings.recesses.iter().filter(|r| settings.is_side_visible(r.side)) {
        recess_floor_deduction += recess.floor_area();
        recess_extra_perimeter += recess.extra_perimeter();
    }

    // 4. perimeter
    let base_perimeter: f64 = Side::ALL
        .into_iter()
        .filter(|s| settings.is_side_visible(*s))
        .map(|s| s.extent(dims).0)
        .sum();
    let exterior_perimeter = (base_perimeter + recess_extra_perimeter).max(0.0);

    // 5. floor
    let floor_area = (dims.footprint_area() - recess_floor_deduction).max(0.0);

    // 6. walls come from facade areas so recesses never shrink wall panels
    let gross_wall_area = facade_area_total;

    // 7. openings on visible walls
    let visible_openings = openings
        .iter()
        .filter(|o| o.facade().map_or(true, |side| settings.is_side_visible(side)));
    let mut opening_count = 0u64;
    let mut opening_perimeter = 0.0;
    let mut opening_area = 0.0;
    for opening in visible_openings {
        opening_count += 1;
        opening_perimeter += opening.perimeter();
        // negative sizes never add wall back
        opening_area += opening.area().max(0.0);
    }

    // 8. roof
    let roof_area = floor_area * ROOF_AREA_FACTOR;

    // 9. net wall
    let net_wall_area = (gross_wall_area - opening_area).max(0.0);

    // 10. panel counts per included element
    let exterior_wall_panels = if selections.include_exterior { facade_panels_total } else { 0 };
    let interior_wall_panels = if selections.include_interior {
        let wall_height = PANEL_HEIGHT.0.min(min_base_height);
        ceil_count(interior_wall_length * wall_height / PANEL_AREA.0)
    } else {
        0
    };
    let floor_panels = if selections.floor_included() {
        panels_for_area(SquareMeters(floor_area), PANEL_AREA)
    } else {
        0
    };
    let roof_panels = if selections.include_roof {
        let roof_panel_width = match selections.roof_system {
            RoofSystem::Sandwich => SANDWICH_PANEL_WIDTH,
            RoofSystem::Sip => PANEL_WIDTH,
        };
        panels_for_area(SquareMeters(roof_area), roof_panel_width * PANEL_HEIGHT)
    } else {
        0
    };

    // 11. totals, saturating once ceil_count hits u64::MAX
    let total_panels = exterior_wall_panels
        .saturating_add(interior_wall_panels)
        .saturating_add(floor_panels)
        .saturating_add(roof_panels);
    let framing = |panels: u64| panels as f64 * FRAMING_ML_PER_PANEL;

    let mut snapshot = GeometrySnapshot {
        facades,
        exterior_perimeter,
        floor_area,
        roof_area,
        exterior_wall_panels,
        interior_wall_panels,
        floor_panels,
        roof_panels,
        total_panels,
        interior_wall_length,
        gross_wall_area,
        net_wall_area,
        opening_perimeter,
        opening_area,
        opening_count,
        panel_framing_ml: framing(total_panels),
        exterior_wall_framing_ml: framing(exterior_wall_panels),
        interior_wall_framing_ml: framing(interior_wall_panels),
        floor_framing_ml: framing(floor_panels),
        roof_framing_ml: framing(roof_panels),
    };

    // 12. safety net
    snapshot.sanitize();

    debug!(
        floor_area = snapshot.floor_area,
        perimeter = snapshot.exterior_perimeter,
        total_panels = snapshot.total_panels,
        "geometry computed"
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::{FacadeConfig, Recess};
    use crate::selections::FoundationType;
    use approx::assert_relative_eq;

    fn scenario_a_dims() -> Dimensions {
        Dimensions {
            width: 6.0,
            length: 8.0,
            height: 2.44,
            ridge_height: 2.44,
        }
    }

    fn geometry(settings: &ProjectSettings, selections: &Selections, openings: &[Opening], walls: &[InteriorWall]) -> GeometrySnapshot {
        calculate_geometry(&scenario_a_dims(), walls, &FacadeConfigs::default(), openings, settings, selections)
    }

    #[test]
    fn test_scenario_a_flat_box() {
        let g = geometry(&ProjectSettings::default(), &Selections::default(), &[], &[]);

        assert_relative_eq!(g.floor_area, 48.0);
        assert_relative_eq!(g.exterior_perimeter, 28.0);
        assert_relative_eq!(g.facades.norte.area, 14.64, epsilon = 1e-9);
        assert_relative_eq!(g.facades.sur.area, 14.64, epsilon = 1e-9);
        assert_relative_eq!(g.facades.este.area, 19.52, epsilon = 1e-9);
        assert_relative_eq!(g.facades.oeste.area, 19.52, epsilon = 1e-9);
        assert_relative_eq!(g.gross_wall_area, 68.32, epsilon = 1e-9);
        assert_relative_eq!(g.roof_area, 60.0);

        assert_eq!(g.exterior_wall_panels, 5 + 5 + 7 + 7);
        assert_eq!(g.interior_wall_panels, 0);
        assert_eq!(g.floor_panels, 17);
        assert_eq!(g.roof_panels, 21);
        assert_eq!(g.total_panels, 24 + 17 + 21);
        assert_relative_eq!(g.panel_framing_ml, 62.0 * 7.32, epsilon = 1e-9);
        assert_relative_eq!(g.exterior_wall_framing_ml, 24.0 * 7.32, epsilon = 1e-9);
    }

    #[test]
    fn test_scenario_b_platea_has_no_floor_panels() {
        let selections = Selections {
            foundation_type: FoundationType::Platea,
            include_floor: true,
            ..Default::default()
        };
        let g = geometry(&ProjectSettings::default(), &selections, &[], &[]);
        assert_eq!(g.floor_panels, 0);
        assert_relative_eq!(g.floor_area, 48.0);
    }

    #[test]
    fn test_scenario_c_corner_recess() {
        let settings = ProjectSettings {
            recesses: vec![Recess {
                side: Side::Norte,
                x: 0.0,
                width: 2.0,
                depth: 1.0,
                hide_base: true,
                hide_side_wall: false,
                ..Default::default()
            }],
            ..Default::default()
        };
        let g = geometry(&settings, &Selections::default(), &[], &[]);
        assert_relative_eq!(g.floor_area, 46.0);
        assert_relative_eq!(g.exterior_perimeter, 30.0);
        // facade panels are computed on gross area
        assert_eq!(g.facades.norte.panels, 5);
        assert_relative_eq!(g.roof_area, 46.0 * 1.25);
    }

    #[test]
    fn test_recess_hidden_corner_adds_no_perimeter() {
        let settings = ProjectSettings {
            recesses: vec![Recess {
                side: Side::Norte,
                width: 2.0,
                depth: 1.0,
                hide_base: true,
                hide_side_wall: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let g = geometry(&settings, &Selections::default(), &[], &[]);
        assert_relative_eq!(g.exterior_perimeter, 28.0);
        assert_relative_eq!(g.floor_area, 46.0);
    }

    #[test]
    fn test_recess_without_hidden_base_adds_outline() {
        let settings = ProjectSettings {
            recesses: vec![Recess {
                side: Side::Este,
                x: 3.0,
                width: 2.0,
                depth: 1.0,
                hide_base: false,
                ..Default::default()
            }],
            ..Default::default()
        };
        let g = geometry(&settings, &Selections::default(), &[], &[]);
        assert_relative_eq!(g.exterior_perimeter, 28.0 + 4.0);
    }

    #[test]
    fn test_visibility_zeroes_side_and_its_recesses() {
        let mut settings = ProjectSettings {
            recesses: vec![Recess {
                side: Side::Sur,
                width: 2.0,
                depth: 1.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        settings.perimeter_visibility.insert(Side::Sur, false);
        let openings = vec![Opening::door("Sur", 1.0), Opening::window("Norte", 1.0, 1.0)];
        let g = geometry(&settings, &Selections::default(), &openings, &[]);

        assert!(!g.facades.sur.is_visible);
        assert_eq!(g.facades.sur.area, 0.0);
        assert_eq!(g.facades.sur.panels, 0);
        assert_eq!(g.facades.sur.opening_ml, 0.0);
        assert!(g.facades.norte.is_visible);
        assert_relative_eq!(g.facades.norte.area, 14.64, epsilon = 1e-9);

        assert_relative_eq!(g.exterior_perimeter, 22.0);
        assert_relative_eq!(g.floor_area, 48.0);
        assert_relative_eq!(g.gross_wall_area, 14.64 + 19.52 * 2.0, epsilon = 1e-9);
        assert_eq!(g.exterior_wall_panels, 5 + 7 + 7);
        assert_eq!(g.opening_count, 1);
    }

    #[test]
    fn test_openings_reduce_net_wall_area() {
        let openings = vec![Opening::door("Norte", 1.0), Opening::window("Este", 2.0, 1.0), Opening::door("w-1", 0.0)];
        let g = geometry(&ProjectSettings::default(), &Selections::default(), &openings, &[]);
        assert_eq!(g.opening_count, 3);
        assert_relative_eq!(g.opening_perimeter, 6.0 + 4.8 + 6.0, epsilon = 1e-9);
        assert_relative_eq!(g.opening_area, 1.89 + 1.44 + 1.89, epsilon = 1e-9);
        assert_relative_eq!(g.net_wall_area, 68.32 - g.opening_area, epsilon = 1e-9);
        // gross area is untouched by openings
        assert_relative_eq!(g.gross_wall_area, 68.32, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_opening_never_adds_wall() {
        let mut opening = Opening::window("Norte", 1.0, 1.0);
        opening.width = -3.0;
        let openings = vec![opening, Opening::door("Sur", 1.0)];
        let g = geometry(&ProjectSettings::default(), &Selections::default(), &openings, &[]);
        assert_relative_eq!(g.opening_area, 1.89, epsilon = 1e-9);
        assert_relative_eq!(g.net_wall_area, 68.32 - 1.89, epsilon = 1e-9);
        assert!(g.net_wall_area <= g.gross_wall_area);
    }

    #[test]
    fn test_huge_plan_saturates_panel_counts() {
        let dims = Dimensions {
            width: 1e10,
            length: 1e10,
            height: 2.44,
            ridge_height: 2.44,
        };
        let walls = vec![InteriorWall::new("w1", 0.0, 0.0, 1e10, false)];
        let g = calculate_geometry(
            &dims,
            &walls,
            &FacadeConfigs::default(),
            &[],
            &ProjectSettings::default(),
            &Selections::default(),
        );
        // 1e20 m² of floor is past u64::MAX panels
        assert_eq!(g.floor_panels, u64::MAX);
        assert_eq!(g.total_panels, u64::MAX);
        assert!(g.panel_framing_ml.is_finite());

        let mut configs = FacadeConfigs::default();
        configs.norte = FacadeConfig::flat(1e10);
        configs.sur = FacadeConfig::flat(1e10);
        let g = calculate_geometry(&dims, &walls, &configs, &[], &ProjectSettings::default(), &Selections::default());
        assert_eq!(g.exterior_wall_panels, u64::MAX);
        assert_eq!(g.wall_panels(), u64::MAX);
    }

    #[test]
    fn test_interior_panels_use_lowest_base_height() {
        let walls = vec![
            InteriorWall::new("w1", 0.0, 3.0, 6.0, false),
            InteriorWall::Legacy {
                id: "w2".to_string(),
                x1: 3.0,
                y1: 0.0,
                x2: 3.0,
                y2: 3.0,
            },
        ];
        let g = geometry(&ProjectSettings::default(), &Selections::default(), &[], &walls);
        assert_relative_eq!(g.interior_wall_length, 9.0);
        // 9 * 2.44 / 2.9768 = 7.38
        assert_eq!(g.interior_wall_panels, 8);

        let mut configs = FacadeConfigs::default();
        configs.oeste = FacadeConfig::flat(2.0);
        configs.este = FacadeConfig::gable(2.2, 3.5);
        let g = calculate_geometry(
            &scenario_a_dims(),
            &walls,
            &configs,
            &[],
            &ProjectSettings::default(),
            &Selections::default(),
        );
        // 9 * 2.0 / 2.9768 = 6.05
        assert_eq!(g.interior_wall_panels, 7);
    }

    #[test]
    fn test_sandwich_roof_uses_narrow_panels() {
        let selections = Selections {
            roof_system: RoofSystem::Sandwich,
            ..Default::default()
        };
        let g = geometry(&ProjectSettings::default(), &selections, &[], &[]);
        // 60 / 2.44 = 24.6
        assert_eq!(g.roof_panels, 25);
    }

    #[test]
    fn test_exclusions_zero_panel_counts() {
        let selections = Selections {
            include_exterior: false,
            include_interior: false,
            include_roof: false,
            include_floor: false,
            ..Default::default()
        };
        let walls = vec![InteriorWall::new("w1", 0.0, 3.0, 6.0, false)];
        let g = geometry(&ProjectSettings::default(), &selections, &[], &walls);
        assert_eq!(g.total_panels, 0);
        assert_eq!(g.panel_framing_ml, 0.0);
        // areas are still reported
        assert_relative_eq!(g.floor_area, 48.0);
        assert_eq!(g.facades.norte.panels, 5);
    }

    #[test]
    fn test_corrupt_dimensions_never_produce_nan() {
        let dims = Dimensions {
            width: f64::NAN,
            length: 8.0,
            height: 2.44,
            ridge_height: 2.44,
        };
        let g = calculate_geometry(
            &dims,
            &[],
            &FacadeConfigs::default(),
            &[],
            &ProjectSettings::default(),
            &Selections::default(),
        );
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(g.floor_area, 0.0);
        assert_eq!(g.exterior_perimeter, 0.0);
        assert!(json["areaPiso"].is_number());
    }

    #[test]
    fn test_snapshot_field_names() {
        let g = geometry(&ProjectSettings::default(), &Selections::default(), &[], &[]);
        let json = serde_json::to_value(&g).unwrap();
        for key in [
            "perimExt",
            "areaPiso",
            "areaTecho",
            "cantMurosExt",
            "cantMurosInt",
            "cantPiso",
            "cantTecho",
            "totalPaneles",
            "tabiques",
            "areaMurosBruta",
            "areaMuros",
            "perimAberturas",
            "perimLinealPaneles",
            "totalAberturasCount",
            "perimMurosExt",
            "perimMurosInt",
            "perimPiso",
            "perimTecho",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["facades"]["Norte"]["isVisible"], true);
        assert!(json["facades"]["Norte"].get("openingML").is_some());
    }
}
