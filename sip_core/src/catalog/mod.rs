//! # Price Catalog
//!
//! Material definitions and prices. A static seed list supplies canonical
//! names, units and categories; the live catalog (edited from the admin
//! screen and persisted with the project) supplies current prices.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::catalog::PriceCatalog;
//!
//! let mut catalog = PriceCatalog::seeded();
//! catalog.set_price("OSB-70-E", 110_000.0).unwrap();
//! assert_eq!(catalog.price_of("OSB-70-E"), Some(110_000.0));
//! ```

pub mod key;
pub mod seed;

pub use key::{MaterialKey, Usage};
pub use seed::{ids, seed_item, SEED_CATALOG};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceItem {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub category: String,
    pub price: f64,
}

impl Default for PriceItem {
    fn default() -> Self {
        PriceItem {
            id: String::new(),
            name: String::new(),
            unit: "UNID".to_string(),
            category: seed::CAT_PANELES.to_string(),
            price: 0.0,
        }
    }
}

/// Live, user-editable price list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCatalog(pub Vec<PriceItem>);

impl PriceCatalog {
    /// A catalog initialised from the seed list
    pub fn seeded() -> Self {
        PriceCatalog(SEED_CATALOG.clone())
    }

    pub fn items(&self) -> &[PriceItem] {
        &self.0
    }

    pub fn get(&self, id: &str) -> Option<&PriceItem> {
        self.0.iter().find(|item| item.id == id)
    }

    pub fn price_of(&self, id: &str) -> Option<f64> {
        self.get(id).map(|item| item.price)
    }

    /// Insert or replace an entry by id.
    pub fn upsert(&mut self, item: PriceItem) -> CalcResult<()> {
        if item.id.trim().is_empty() {
            return Err(CalcError::missing_field("id"));
        }
        check_price(item.price)?;
        match self.0.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.0.push(item),
        }
        Ok(())
    }

    /// Change the price of an existing entry.
    pub fn set_price(&mut self, id: &str, price: f64) -> CalcResult<()> {
        check_price(price)?;
        let item = self
            .0
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CalcError::material_not_found(id))?;
        item.price = price;
        Ok(())
    }

    /// Remove an entry, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<PriceItem> {
        let pos = self.0.iter().position(|item| item.id == id)?;
        Some(self.0.remove(pos))
    }

    /// Discard all edits and restore the seed list
    pub fn reset_to_seed(&mut self) {
        self.0 = SEED_CATALOG.clone();
    }

    /// Panel products selectable for a building element
    pub fn panels_for(&self, usage: Usage) -> Vec<&PriceItem> {
        self.0
            .iter()
            .filter(|item| item.category == seed::CAT_PANELES && item.id.ends_with(usage.panel_suffix()))
            .collect()
    }
}

fn check_price(price: f64) -> CalcResult<()> {
    if !(price.is_finite() && price >= 0.0) {
        return Err(CalcError::invalid_input("price", price.to_string(), "Price must be a non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_price() {
        let mut catalog = PriceCatalog::seeded();
        catalog.set_price(ids::VARILLA_12, 5_500.0).unwrap();
        assert_eq!(catalog.price_of(ids::VARILLA_12), Some(5_500.0));

        let err = catalog.set_price("MISSING", 1.0).unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
        assert!(catalog.set_price(ids::VARILLA_12, -1.0).is_err());
        assert!(catalog.set_price(ids::VARILLA_12, f64::NAN).is_err());
    }

    #[test]
    fn test_upsert_and_remove() {
        let mut catalog = PriceCatalog::default();
        let item = PriceItem {
            id: "FLETE".to_string(),
            name: "Flete".to_string(),
            unit: "GL".to_string(),
            category: seed::CAT_SERVICIOS.to_string(),
            price: 250_000.0,
        };
        catalog.upsert(item.clone()).unwrap();
        catalog
            .upsert(PriceItem {
                price: 300_000.0,
                ..item
            })
            .unwrap();
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.price_of("FLETE"), Some(300_000.0));
        assert!(catalog.remove("FLETE").is_some());
        assert!(catalog.remove("FLETE").is_none());
        assert!(catalog.upsert(PriceItem::default()).is_err());
    }

    #[test]
    fn test_reset_to_seed() {
        let mut catalog = PriceCatalog::seeded();
        catalog.remove("OSB-70-E");
        catalog.reset_to_seed();
        assert_eq!(catalog, PriceCatalog::seeded());
    }

    #[test]
    fn test_panels_for_usage() {
        let catalog = PriceCatalog::seeded();
        let roof: Vec<_> = catalog.panels_for(Usage::Techo).iter().map(|i| i.id.as_str()).collect();
        assert!(roof.contains(&"OSB-120-T"));
        assert!(roof.contains(&"SAND-50-T"));
        assert!(!roof.contains(&"OSB-70-E"));
    }

    #[test]
    fn test_catalog_serializes_as_array() {
        let catalog = PriceCatalog::seeded();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with('['));
        let back: PriceCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, catalog);
    }
}
