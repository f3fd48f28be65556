//! # Quantity Deriver
//!
//! Expands a [`GeometrySnapshot`] plus the user's selections into the
//! bill of materials: a flat map of [`MaterialKey`] to whole-unit quantity.
//!
//! Every non-panel material is always present (0 when its condition is
//! false). Panel lines are keyed `catalogId@@USAGE` and emitted whenever
//! the element has a catalog id selected.
//!
//! ## Formulas
//!
//! `wall = cantMurosExt + cantMurosInt` (already gated by inclusion),
//! `floor = cantPiso`.
//!
//! | Material | Quantity | Condition |
//! |---|---|---|
//! | Roof beams 3x6 | `ceil(length / 0.6 * width * 1.1)` | roof |
//! | Floor beams 3x6 | `ceil(areaPiso * 2.5 * 1.1)` | floor on madera/metal |
//! | Binder 2x3 | `ceil((wall + floor) * 6.6)` | |
//! | Base plate 1x4 | `ceil(wall * 1.3)` | |
//! | Furring 2x2 | `ceil(perimExt * 5.5)` | |
//! | Threaded rod 1/2" | `ceil(wall * 1.3 / 5)` | no floor |
//! | Chemical anchor | `ceil(wall * 1.3 / 10)` | no floor |
//! | Nut + washer kit | `rod * 5` | |
//! | Screw 6x1.5" | `ceil(totalPaneles * 55 + perimAberturas * 6.6)` | |
//! | Screw 6x2" | `ceil(wall * 5.3)` | |
//! | Screw 8x3" | `ceil(cantMurosExt * 13)` | exterior |
//! | Hex 14x3" | `ceil(areaTecho * 4.5)` | roof |
//! | Torx 140 | `ceil((areaTecho + areaPiso) * 3.5)` | roof |
//! | Hex 14x5" | `ceil(areaTecho * 4.5)` | roof, sandwich panel |
//! | Torx 120 | `ceil(wall * 4)` | |
//! | PU foam | `ceil(totalPaneles * 8 / 25)` | |
//! | PU glue | `ceil(wall * 1.2 / 4)` | |
//! | Liquid membrane | `ceil(((ext * 1.3 + int * 1.3) * 0.15 + 30) / 20)` | |
//! | Wind/water barrier | `ceil((areaMurosBruta * 1.1 + areaTecho * 1.1) / 30)` | |
//! | Self-adhesive membrane | `ceil(wall * 1.3 / 25)` | |
//! | Metal sheet C27 | `ceil(areaTecho)` | |
//! | Engineering detail | `ceil(areaPiso)` | engineering detail |
//!
//! Over a slab (`platea`) there is no floor, so the rod/anchor hardware is
//! quoted.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use super::ceil_count;
use super::geometry::GeometrySnapshot;
use crate::building::Dimensions;
use crate::catalog::{ids, MaterialKey, Usage};
use crate::selections::{RoofSystem, Selections, StructureType};

/// Bill of materials: key -> whole units
pub type Quantities = BTreeMap<MaterialKey, u64>;

/// Derive every material quantity.
#[instrument(skip_all)]
pub fn calculate_quantities(geometry: &GeometrySnapshot, selections: &Selections, dims: &Dimensions) -> Quantities {
    let mut q = Quantities::new();
    let include_floor = selections.floor_included();

    let exterior = geometry.exterior_wall_panels;
    let interior = geometry.interior_wall_panels;
    let wall = geometry.wall_panels() as f64;
    let floor = geometry.floor_panels as f64;
    let total = geometry.total_panels as f64;
    let roof_area = geometry.roof_area;
    let floor_area = geometry.floor_area;

    // Panels
    let mut panel = |id: &str, usage: Usage, qty: u64| {
        if !id.is_empty() {
            q.insert(MaterialKey::panel(id, usage), qty);
        }
    };
    panel(&selections.exterior_wall_id, Usage::Exterior, if selections.include_exterior { exterior } else { 0 });
    panel(&selections.interior_wall_id, Usage::Interior, if selections.include_interior { interior } else { 0 });
    panel(&selections.floor_id, Usage::Piso, if include_floor { geometry.floor_panels } else { 0 });
    let roof_qty = match (selections.include_roof, selections.roof_system) {
        (false, _) => 0,
        (true, RoofSystem::Sandwich) => ceil_count(roof_area.round()),
        (true, RoofSystem::Sip) => geometry.roof_panels,
    };
    panel(&selections.roof_id, Usage::Techo, roof_qty);

    let mut set = |id: &str, qty: u64| {
        q.insert(MaterialKey::plain(id), qty);
    };

    // Structure
    set(
        ids::VIGA_TECHO_3X6,
        if selections.include_roof { ceil_count((dims.length / 0.6) * dims.width * 1.1) } else { 0 },
    );
    let floor_structure = matches!(selections.structure_type, StructureType::Madera | StructureType::Metal);
    set(
        ids::VIGA_PISO_3X6,
        if include_floor && floor_structure { ceil_count(floor_area * 2.5 * 1.1) } else { 0 },
    );
    set(ids::MADERA_2X3, ceil_count((wall + floor) * 6.6));
    set(ids::MADERA_1X4, ceil_count(wall * 1.3));
    set(ids::LISTON_2X2, ceil_count(geometry.exterior_perimeter * 5.5));

    // Anchoring, only without a floor
    let rods = if include_floor { 0 } else { ceil_count(wall * 1.3 / 5.0) };
    set(ids::VARILLA_12, rods);
    set(ids::ANCLAJE_QUIMICO, if include_floor { 0 } else { ceil_count(wall * 1.3 / 10.0) });
    set(ids::KIT_TUERCA_ARANDELA, rods.saturating_mul(5));

    // Fasteners
    set(ids::TORNILLO_6X1_5, ceil_count(total * 55.0 + geometry.opening_perimeter * 6.6));
    set(ids::TORNILLO_6X2, ceil_count(wall * 5.3));
    set(
        ids::TORNILLO_8X3,
        if selections.include_exterior { ceil_count(exterior as f64 * 13.0) } else { 0 },
    );
    set(ids::TORNILLO_HEX_14X3, if selections.include_roof { ceil_count(roof_area * 4.5) } else { 0 });
    set(
        ids::TORX_140,
        if selections.include_roof { ceil_count((roof_area + floor_area) * 3.5) } else { 0 },
    );
    set(
        ids::TORNILLO_HEX_14X5,
        if selections.include_roof && selections.is_sandwich_roof() { ceil_count(roof_area * 4.5) } else { 0 },
    );
    set(ids::TORX_120, ceil_count(wall * 4.0));

    // Chemicals
    set(ids::ESPUMA_PU, ceil_count(total * 8.0 / 25.0));
    set(ids::ADHESIVO_PU, ceil_count(wall * 1.2 / 4.0));
    set(
        ids::MEMBRANA_LIQUIDA,
        ceil_count(((exterior as f64 * 1.3 + interior as f64 * 1.3) * 0.15 + 30.0) / 20.0),
    );
    set(
        ids::BARRERA_HIDROFUGA,
        ceil_count((geometry.gross_wall_area * 1.1 + roof_area * 1.1) / 30.0),
    );
    set(ids::MEMBRANA_AUTOADHESIVA, ceil_count(wall * 1.3 / 25.0));

    // Roofing and services
    set(ids::CHAPA_C27, ceil_count(roof_area));
    set(
        ids::DETALLE_INGENIERIA,
        if selections.include_engineering_detail { ceil_count(floor_area) } else { 0 },
    );

    debug!(lines = q.len(), "quantities derived");
    q
}

/// Quantity of a plain material id, 0 when absent
pub fn quantity_of(quantities: &Quantities, id: &str) -> u64 {
    quantities.get(&MaterialKey::plain(id)).copied().unwrap_or(0)
}
