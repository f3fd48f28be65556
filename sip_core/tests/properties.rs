//! Property-based tests for quoting engine invariants using the `proptest` crate.

use proptest::prelude::*;

use sip_core::building::{Dimensions, FacadeConfig, FacadeConfigs, Opening, Recess, Side};
use sip_core::calculations::facade::{facade_area, panels_for_area};
use sip_core::calculations::{calculate_geometry, calculate_quantities, GeometrySnapshot, LineOverride};
use sip_core::catalog::{MaterialKey, Usage};
use sip_core::constants::PANEL_AREA;
use sip_core::project::{Project, ProjectSettings};
use sip_core::selections::{FoundationType, RoofSystem, Selections};
use sip_core::units::{Meters, SquareMeters};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_dims() -> impl Strategy<Value = Dimensions> {
    (1.0f64..30.0, 1.0f64..30.0, 2.0f64..4.0, 0.0f64..3.0).prop_map(|(width, length, height, rise)| Dimensions {
        width,
        length,
        height,
        ridge_height: height + rise,
    })
}

fn arb_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Norte), Just(Side::Sur), Just(Side::Este), Just(Side::Oeste)]
}

/// A recess that fits inside its side, as fractions of the plan.
fn arb_recess() -> impl Strategy<Value = (Side, f64, f64, f64, bool, bool)> {
    (arb_side(), 0.0f64..1.0, 0.05f64..1.0, 0.05f64..0.9, any::<bool>(), any::<bool>())
}

fn place_recess(dims: &Dimensions, (side, start, span, depth, hide_base, hide_side_wall): (Side, f64, f64, f64, bool, bool)) -> Recess {
    let extent = side.extent(dims).value();
    let across = match side {
        Side::Norte | Side::Sur => dims.length,
        Side::Este | Side::Oeste => dims.width,
    };
    let width = extent * span;
    Recess {
        id: "r".to_string(),
        side,
        x: (extent - width) * start,
        width,
        depth: across * depth,
        height: dims.height,
        hide_base,
        hide_side_wall,
    }
}

fn arb_selections() -> impl Strategy<Value = Selections> {
    (any::<[bool; 5]>(), any::<bool>(), any::<bool>()).prop_map(|(flags, platea, sandwich)| {
        let mut selections = Selections {
            include_exterior: flags[0],
            include_interior: flags[1],
            include_roof: flags[2],
            include_floor: flags[3],
            include_engineering_detail: flags[4],
            roof_system: if sandwich { RoofSystem::Sandwich } else { RoofSystem::Sip },
            ..Default::default()
        };
        if platea {
            selections.set_foundation_type(FoundationType::Platea);
        }
        selections
    })
}

/// Finite numbers plus the corrupt values a persisted blob can carry.
fn arb_corrupt_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => 0.0f64..50.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => -50.0f64..0.0,
    ]
}

fn geometry(dims: &Dimensions, settings: &ProjectSettings, openings: &[Opening]) -> GeometrySnapshot {
    calculate_geometry(dims, &[], &FacadeConfigs::default(), openings, settings, &Selections::default())
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// 1. Facade area is strictly increasing in its governing height
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn flat_area_increases_with_base_height(
        width in 0.5f64..50.0,
        h in 0.1f64..10.0,
        delta in 0.01f64..5.0,
    ) {
        let low = facade_area(&FacadeConfig::flat(h), Meters(width));
        let high = facade_area(&FacadeConfig::flat(h + delta), Meters(width));
        prop_assert!(high.value() > low.value(), "{} !> {}", high.value(), low.value());
    }

    #[test]
    fn gable_area_increases_with_peak(
        width in 0.5f64..50.0,
        base in 0.1f64..5.0,
        rise in 0.0f64..5.0,
        delta in 0.01f64..5.0,
    ) {
        let low = facade_area(&FacadeConfig::gable(base, base + rise), Meters(width));
        let high = facade_area(&FacadeConfig::gable(base, base + rise + delta), Meters(width));
        prop_assert!(high.value() > low.value(), "{} !> {}", high.value(), low.value());
    }
}

// ---------------------------------------------------------------------------
// 2. Recesses never increase floor area
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn recesses_never_increase_floor_area(
        dims in arb_dims(),
        recesses in prop::collection::vec(arb_recess(), 1..4),
    ) {
        let settings = ProjectSettings {
            recesses: recesses.into_iter().map(|r| place_recess(&dims, r)).collect(),
            ..Default::default()
        };
        let g = geometry(&dims, &settings, &[]);
        prop_assert!(g.floor_area <= dims.width * dims.length + TOL);
        prop_assert!(g.floor_area >= 0.0);
    }

    #[test]
    fn single_recess_deducts_its_footprint(dims in arb_dims(), recess in arb_recess()) {
        let recess = place_recess(&dims, recess);
        let expected = (dims.width * dims.length - recess.width * recess.depth).max(0.0);
        let settings = ProjectSettings { recesses: vec![recess], ..Default::default() };
        let g = geometry(&dims, &settings, &[]);
        prop_assert!((g.floor_area - expected).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// 3. Panel counts cover the area with whole panels
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn panel_count_is_minimal_cover(area in 0.0f64..500.0) {
        let panels = panels_for_area(SquareMeters(area), PANEL_AREA);
        let p = PANEL_AREA.value();
        prop_assert!(panels as f64 * p >= area - TOL);
        if panels > 0 {
            prop_assert!((panels - 1) as f64 * p < area + TOL);
        } else {
            prop_assert!(area < TOL);
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Hiding a side zeroes it and leaves the others alone
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn hiding_a_side_zeroes_only_that_side(dims in arb_dims(), hidden in arb_side()) {
        let openings: Vec<Opening> = Side::ALL.iter().map(|s| Opening::door(s.name(), 0.0)).collect();
        let shown = geometry(&dims, &ProjectSettings::default(), &openings);

        let mut settings = ProjectSettings::default();
        settings.perimeter_visibility.insert(hidden, false);
        let g = geometry(&dims, &settings, &openings);

        let stats = g.facades.get(hidden);
        prop_assert!(!stats.is_visible);
        prop_assert_eq!(stats.area, 0.0);
        prop_assert_eq!(stats.panels, 0);
        prop_assert_eq!(stats.opening_ml, 0.0);

        for side in Side::ALL.into_iter().filter(|s| *s != hidden) {
            prop_assert_eq!(g.facades.get(side), shown.facades.get(side));
        }

        let before = shown.facades.get(hidden);
        prop_assert_eq!(g.exterior_wall_panels + before.panels, shown.exterior_wall_panels);
        prop_assert!((g.gross_wall_area + before.area - shown.gross_wall_area).abs() < TOL);
        prop_assert!((g.exterior_perimeter + hidden.extent(&dims).value() - shown.exterior_perimeter).abs() < TOL);
        prop_assert_eq!(g.opening_count + 1, shown.opening_count);
    }
}

// ---------------------------------------------------------------------------
// 5. Quantities depend only on current flags
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn toggling_floor_restores_quantities(dims in arb_dims(), selections in arb_selections()) {
        let settings = ProjectSettings::default();
        let run = |selections: &Selections| {
            let g = calculate_geometry(&dims, &[], &FacadeConfigs::default(), &[], &settings, selections);
            calculate_quantities(&g, selections, &dims)
        };
        let before = run(&selections);

        let mut toggled = selections.clone();
        toggled.include_floor = !toggled.include_floor;
        let _ = run(&toggled);
        toggled.include_floor = !toggled.include_floor;

        prop_assert_eq!(run(&toggled), before);
    }
}

// ---------------------------------------------------------------------------
// 6. A zero-quantity override suppresses a line without touching quantities
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn zero_override_suppresses_and_clears(
        dims in arb_dims(),
        usage in prop_oneof![Just(Usage::Exterior), Just(Usage::Piso), Just(Usage::Techo)],
        adjustment in -30.0f64..30.0,
    ) {
        let mut project = Project::new("c", "l");
        project.set_dimensions(dims);
        project.settings.adjustment_percentage = adjustment;
        let id = match usage {
            Usage::Exterior => project.selections.exterior_wall_id.clone(),
            Usage::Interior => project.selections.interior_wall_id.clone(),
            Usage::Piso => project.selections.floor_id.clone(),
            Usage::Techo => project.selections.roof_id.clone(),
        };
        let key = MaterialKey::panel(id, usage);
        let quantities = project.quantities();
        let budget = project.budget();

        project.set_override(key.clone(), LineOverride::qty(0.0));
        let suppressed = project.budget();
        let line = suppressed.items.iter().find(|l| l.id == key);
        prop_assert!(line.is_some());
        prop_assert_eq!(line.map(|l| l.total), Some(0.0));
        prop_assert_eq!(project.quantities(), quantities);

        project.clear_override(&key);
        prop_assert_eq!(project.budget(), budget);
    }
}

// ---------------------------------------------------------------------------
// 7. Corrupt inputs never leak NaN or infinity
// ---------------------------------------------------------------------------

fn assert_clean(value: &serde_json::Value, path: &str) -> Result<(), TestCaseError> {
    match value {
        serde_json::Value::Number(n) => {
            let v = n.as_f64().unwrap_or(0.0);
            prop_assert!(v.is_finite() && v >= 0.0, "{} = {}", path, v);
        }
        serde_json::Value::Object(map) => {
            for (key, inner) in map {
                assert_clean(inner, &format!("{path}.{key}"))?;
            }
        }
        serde_json::Value::Array(items) => {
            for (i, inner) in items.iter().enumerate() {
                assert_clean(inner, &format!("{path}[{i}]"))?;
            }
        }
        // serde_json writes non-finite floats as null
        serde_json::Value::Null => prop_assert!(false, "{} is null", path),
        _ => {}
    }
    Ok(())
}

proptest! {
    #[test]
    fn corrupt_inputs_never_produce_nan(
        width in arb_corrupt_f64(),
        length in arb_corrupt_f64(),
        height in arb_corrupt_f64(),
        h_max in arb_corrupt_f64(),
        depth in arb_corrupt_f64(),
        opening_width in arb_corrupt_f64(),
        selections in arb_selections(),
    ) {
        let dims = Dimensions { width, length, height, ridge_height: h_max };
        let mut configs = FacadeConfigs::default();
        configs.norte = FacadeConfig::gable(height, h_max);
        configs.este = FacadeConfig::sloped(height, h_max);
        let mut opening = Opening::window("Sur", 0.0, 0.0);
        opening.width = opening_width;
        let settings = ProjectSettings {
            recesses: vec![Recess { side: Side::Oeste, depth, ..Default::default() }],
            ..Default::default()
        };

        let g = calculate_geometry(&dims, &[], &configs, &[opening], &settings, &selections);
        let q = calculate_quantities(&g, &selections, &dims);
        let budget = sip_core::calculations::calculate_budget(&q, &sip_core::PriceCatalog::seeded(), &settings);

        assert_clean(&serde_json::to_value(&g).unwrap(), "geometry")?;
        prop_assert!(budget.total.is_finite() && budget.total >= 0.0);
        for line in &budget.items {
            prop_assert!(line.total.is_finite(), "{} total {}", line.id, line.total);
        }
    }
}
