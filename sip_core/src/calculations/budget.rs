//! # Budget Composer
//!
//! Prices the bill of materials: joins quantities with the catalog, applies
//! manual line overrides and the global adjustment percentage, and returns
//! the itemized lines sorted by category.
//!
//! - Display metadata (name, unit, category) comes from the seed catalog
//!   when the id is known there, otherwise from the live catalog.
//! - Price comes from the live catalog, then the seed, then 0.
//! - A positive adjustment is a markup baked into each line price; a
//!   negative adjustment is a discount on the subtotal. Never both.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::calculations::budget::calculate_budget;
//! use sip_core::calculations::quantities::Quantities;
//! use sip_core::catalog::{MaterialKey, PriceCatalog, Usage};
//! use sip_core::project::ProjectSettings;
//!
//! let mut quantities = Quantities::new();
//! quantities.insert(MaterialKey::panel("OSB-70-E", Usage::Exterior), 10);
//!
//! let budget = calculate_budget(&quantities, &PriceCatalog::seeded(), &ProjectSettings::default());
//! assert_eq!(budget.items.len(), 1);
//! assert_eq!(budget.items[0].name, "Panel SIP OSB 70mm Muro (Perimetral)");
//! assert_eq!(budget.total, 1_060_970.0);
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::quantities::Quantities;
use crate::catalog::{seed_item, seed, MaterialKey, PriceCatalog};
use crate::project::ProjectSettings;

/// Manual replacement of any subset of a line's fields.
///
/// An override may also introduce a line that has no computed quantity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LineOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl LineOverride {
    /// Override only the quantity
    pub fn qty(qty: f64) -> Self {
        LineOverride {
            qty: Some(qty),
            ..Default::default()
        }
    }

    /// Override only the unit price
    pub fn price(price: f64) -> Self {
        LineOverride {
            price: Some(price),
            ..Default::default()
        }
    }
}

/// One priced line of the budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    /// Quantities-map key (`id` or `id@@USAGE`)
    pub id: MaterialKey,
    pub name: String,
    pub unit: String,
    pub category: String,
    /// Unit price after markup
    pub price: f64,
    pub qty: f64,
    /// `ceil(qty * price)`
    pub total: f64,
    pub is_overridden: bool,
}

/// Priced budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub items: Vec<BudgetLine>,
    /// `ceil(sum of line totals)`
    pub subtotal: f64,
    /// Subtotal after discount
    pub total: f64,
}

/// `(markup multiplier, discount factor)` for an adjustment percentage.
pub fn adjustment_factors(adjustment_percentage: f64) -> (f64, f64) {
    let pct = if adjustment_percentage.is_finite() { adjustment_percentage } else { 0.0 };
    let factor = 1.0 + pct / 100.0;
    if pct > 0.0 {
        (factor, 1.0)
    } else if pct < 0.0 {
        (1.0, factor)
    } else {
        (1.0, 1.0)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

/// Compose the budget. Never fails; unknown ids become placeholder lines.
#[instrument(skip_all, fields(quantities = quantities.len(), overrides = settings.overrides.len()))]
pub fn calculate_budget(quantities: &Quantities, catalog: &PriceCatalog, settings: &ProjectSettings) -> Budget {
    let (markup, discount) = adjustment_factors(settings.adjustment_percentage);

    let keys: BTreeSet<&MaterialKey> = quantities.keys().chain(settings.overrides.keys()).collect();

    let mut items = Vec::with_capacity(keys.len());
    for key in keys {
        let id = key.catalog_id.as_str();
        let line_override = settings.overrides.get(key);
        let computed = quantities.get(key).copied().unwrap_or(0) as f64;
        let qty = finite_or_zero(line_override.and_then(|o| o.qty).unwrap_or(computed));

        if qty <= 0.0 && line_override.is_none() {
            continue;
        }

        let live = catalog.get(id);
        let (mut name, unit, category) = match seed_item(id).or(live) {
            Some(item) => (item.name.clone(), item.unit.clone(), item.category.clone()),
            None => {
                warn!(id, "material not in catalog, using placeholder");
                (
                    format!("Panel Desconocido ({id})"),
                    "UNID".to_string(),
                    seed::CAT_PANELES.to_string(),
                )
            }
        };
        let base_price = live.or(seed_item(id)).map(|item| item.price).unwrap_or(0.0);

        if let Some(usage) = key.usage {
            name.push_str(usage.label());
        }

        let price = finite_or_zero(line_override.and_then(|o| o.price).unwrap_or(base_price) * markup);
        let total = finite_or_zero((qty * price).ceil());

        items.push(BudgetLine {
            id: key.clone(),
            name: line_override.and_then(|o| o.name.clone()).unwrap_or(name),
            unit: line_override.and_then(|o| o.unit.clone()).unwrap_or(unit),
            category: line_override.and_then(|o| o.category.clone()).unwrap_or(category),
            price,
            qty,
            total,
            is_overridden: line_override.is_some(),
        });
    }

    items.sort_by(|a, b| a.category.cmp(&b.category));

    let subtotal = items.iter().map(|line| line.total).sum::<f64>().ceil();
    let total = (subtotal * discount).ceil();

    debug!(lines = items.len(), subtotal, total, "budget composed");
    Budget { items, subtotal, total }
}
