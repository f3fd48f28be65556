//! # Export Bundle
//!
//! A self-contained JSON document with everything needed to regenerate a
//! proposal outside the engine: the geometry snapshot, the quantities map
//! and the priced budget, verbatim. Field names are an external contract.
//!
//! ```text
//! {
//!   "version": "0.1.0",
//!   "exportedAt": "...",
//!   "client": { "name", "location" },
//!   "geometry": { "perimExt", "areaPiso", ... },
//!   "quantities": { "OSB-70-E@@EXTERIOR": 24, "TORX_120": 96, ... },
//!   "budget": { "items", "prices", "selections", "subtotal", "finalTotal" }
//! }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{BudgetLine, GeometrySnapshot, Quantities};
use crate::catalog::PriceItem;
use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};
use crate::selections::Selections;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportClient {
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportBudget {
    pub items: Vec<BudgetLine>,
    /// Live catalog at export time
    pub prices: Vec<PriceItem>,
    pub selections: Selections,
    pub subtotal: f64,
    pub final_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub client: ExportClient,
    pub geometry: GeometrySnapshot,
    pub quantities: Quantities,
    pub budget: ExportBudget,
}

impl ExportBundle {
    /// Run the pipeline on `project` and bundle the results.
    pub fn from_project(project: &Project) -> Self {
        let quote = project.quote();
        ExportBundle {
            version: SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            client: ExportClient {
                name: project.meta.client.clone(),
                location: project.meta.location.clone(),
            },
            geometry: quote.geometry,
            quantities: quote.quantities,
            budget: ExportBudget {
                items: quote.budget.items,
                prices: project.prices.items().to_vec(),
                selections: project.selections.clone(),
                subtotal: quote.budget.subtotal,
                final_total: quote.budget.total,
            },
        }
    }

    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(CalcError::serialization)
    }

    /// Write the bundle to `path`.
    pub fn write(&self, path: &Path) -> CalcResult<()> {
        let json = self.to_json()?;
        #[cfg(not(target_arch = "wasm32"))]
        crate::file_io::disk::write_atomic(path, json.as_bytes())?;
        #[cfg(target_arch = "wasm32")]
        std::fs::write(path, json.as_bytes())
            .map_err(|e| CalcError::file_error("write export", path.display().to_string(), e.to_string()))?;
        info!(path = %path.display(), total = self.budget.final_total, "export written");
        Ok(())
    }
}

/// Build the bundle for `project` and write it to `path`.
pub fn write_export(project: &Project, path: &Path) -> CalcResult<ExportBundle> {
    let bundle = ExportBundle::from_project(project);
    bundle.write(path)?;
    Ok(bundle)
}
