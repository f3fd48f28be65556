//! # Project State
//!
//! The `Project` struct is the whole configurator state: the building,
//! the user's selections, the live price catalog, per-project settings
//! (recesses, visibility, budget overrides) and the CRM list. It is
//! persisted as a single JSON blob (see [`crate::file_io`]) and passed by
//! reference into the pure calculation functions.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, client, timestamps)
//! ├── dimensions, interiorWalls, openings, facadeConfigs
//! ├── selections: Selections
//! ├── prices: PriceCatalog
//! ├── project: ProjectSettings (recesses, visibility, overrides, adjustment)
//! └── crm: Vec<CrmEntry>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sip_core::building::{OpeningType, Side};
//! use sip_core::project::Project;
//!
//! let mut project = Project::new("Familia Soto", "Frutillar");
//! project.add_opening(OpeningType::Door, Side::Norte.name(), 1.0, 0.0);
//!
//! let quote = project.quote();
//! assert_eq!(quote.geometry.opening_count, 1);
//! assert!(quote.budget.total > 0.0);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::building::{Dimensions, FacadeConfig, FacadeConfigs, FacadeType, InteriorWall, Opening, OpeningType, Recess, Side};
use crate::calculations::{
    calculate_budget, calculate_geometry, calculate_quantities, Budget, GeometrySnapshot, LineOverride, Quantities,
};
use crate::catalog::{MaterialKey, PriceCatalog};
use crate::crm::{self, CrmEntry, CrmStatus};
use crate::errors::{CalcError, CalcResult};
use crate::selections::{FoundationType, Selections};

/// Current schema version of the persisted state
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub meta: ProjectMetadata,
    pub dimensions: Dimensions,
    #[serde(alias = "walls")]
    pub interior_walls: Vec<InteriorWall>,
    pub openings: Vec<Opening>,
    pub facade_configs: FacadeConfigs,
    pub selections: Selections,
    pub prices: PriceCatalog,
    #[serde(rename = "project")]
    pub settings: ProjectSettings,
    pub crm: Vec<CrmEntry>,
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Geometry, bill of materials and budget computed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub geometry: GeometrySnapshot,
    pub quantities: Quantities,
    pub budget: Budget,
}

impl Project {
    /// Create a default 6 x 8 m flat-roof project priced from the seed catalog.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sip_core::project::Project;
    ///
    /// let project = Project::new("Familia Soto", "Frutillar");
    /// assert_eq!(project.meta.client, "Familia Soto");
    /// assert!(project.validate().is_ok());
    /// ```
    pub fn new(client: impl Into<String>, location: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                client: client.into(),
                location: location.into(),
                created: now,
                modified: now,
            },
            dimensions: Dimensions::default(),
            interior_walls: Vec::new(),
            openings: Vec::new(),
            facade_configs: FacadeConfigs::default(),
            selections: Selections::default(),
            prices: PriceCatalog::seeded(),
            settings: ProjectSettings::default(),
            crm: Vec::new(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    pub fn geometry(&self) -> GeometrySnapshot {
        calculate_geometry(
            &self.dimensions,
            &self.interior_walls,
            &self.facade_configs,
            &self.openings,
            &self.settings,
            &self.selections,
        )
    }

    pub fn quantities(&self) -> Quantities {
        calculate_quantities(&self.geometry(), &self.selections, &self.dimensions)
    }

    pub fn budget(&self) -> Budget {
        calculate_budget(&self.quantities(), &self.prices, &self.settings)
    }

    /// Run the full pipeline once.
    pub fn quote(&self) -> Quote {
        let geometry = self.geometry();
        let quantities = calculate_quantities(&geometry, &self.selections, &self.dimensions);
        let budget = calculate_budget(&quantities, &self.prices, &self.settings);
        Quote {
            geometry,
            quantities,
            budget,
        }
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Replace the dimensions and re-sync facade heights to them.
    ///
    /// Flat facades take the base height; sloped and gable facades keep
    /// their profile with base and ridge heights from `dims`.
    pub fn set_dimensions(&mut self, dims: Dimensions) {
        self.dimensions = dims;
        for side in Side::ALL {
            let cfg = self.facade_configs.get_mut(side);
            cfg.h_base = dims.height;
            cfg.h_max = match cfg.facade_type {
                FacadeType::Flat => dims.height,
                FacadeType::Sloped | FacadeType::Gable => dims.ridge_height,
            };
        }
        self.touch();
    }

    pub fn set_facade(&mut self, side: Side, config: FacadeConfig) {
        *self.facade_configs.get_mut(side) = config;
        self.touch();
    }

    pub fn set_foundation_type(&mut self, foundation: FoundationType) {
        self.selections.set_foundation_type(foundation);
        self.touch();
    }

    pub fn set_side_visibility(&mut self, side: Side, visible: bool) {
        self.settings.perimeter_visibility.insert(side, visible);
        self.touch();
    }

    /// Add a recess, assigning an id if it has none. Returns the id.
    pub fn add_recess(&mut self, mut recess: Recess) -> String {
        if recess.id.is_empty() {
            recess.id = new_id();
        }
        let id = recess.id.clone();
        self.settings.recesses.push(recess);
        self.touch();
        id
    }

    pub fn remove_recess(&mut self, id: &str) -> Option<Recess> {
        let pos = self.settings.recesses.iter().position(|r| r.id == id)?;
        self.touch();
        Some(self.settings.recesses.remove(pos))
    }

    /// Add a default-sized door or window. Returns the id.
    pub fn add_opening(&mut self, opening_type: OpeningType, side: impl Into<String>, x: f64, y: f64) -> String {
        let mut opening = Opening::new(opening_type, side, x, y);
        opening.id = new_id();
        let id = opening.id.clone();
        self.openings.push(opening);
        self.touch();
        id
    }

    pub fn remove_opening(&mut self, id: &str) -> Option<Opening> {
        let pos = self.openings.iter().position(|o| o.id == id)?;
        self.touch();
        Some(self.openings.remove(pos))
    }

    /// Add an interior partition. Returns the id.
    pub fn add_interior_wall(&mut self, x: f64, y: f64, length: f64, is_vertical: bool) -> String {
        let id = new_id();
        self.interior_walls.push(InteriorWall::new(id.clone(), x, y, length, is_vertical));
        self.touch();
        id
    }

    /// Remove a partition together with the openings placed on it.
    pub fn remove_interior_wall(&mut self, id: &str) -> Option<InteriorWall> {
        let pos = self.interior_walls.iter().position(|w| w.id() == id)?;
        let wall = self.interior_walls.remove(pos);
        self.openings.retain(|o| o.side != id);
        self.touch();
        Some(wall)
    }

    pub fn set_override(&mut self, key: MaterialKey, line: LineOverride) {
        self.settings.overrides.insert(key, line);
        self.touch();
    }

    pub fn clear_override(&mut self, key: &MaterialKey) -> Option<LineOverride> {
        let removed = self.settings.overrides.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    // ------------------------------------------------------------------
    // CRM
    // ------------------------------------------------------------------

    /// Snapshot the current quote total into a new CRM entry.
    pub fn record_quote(&mut self, contact: impl Into<String>) -> Uuid {
        let total = self.budget().total;
        let entry = CrmEntry::new(self.meta.client.clone(), contact, self.meta.location.clone(), total);
        let id = entry.id;
        info!(client = %entry.client, total, "quote recorded in CRM");
        self.crm.push(entry);
        self.touch();
        id
    }

    pub fn crm_entry_mut(&mut self, id: &Uuid) -> Option<&mut CrmEntry> {
        let entry = self.crm.iter_mut().find(|e| e.id == *id)?;
        self.meta.modified = Utc::now();
        Some(entry)
    }

    pub fn remove_crm_entry(&mut self, id: &Uuid) -> Option<CrmEntry> {
        let pos = self.crm.iter().position(|e| e.id == *id)?;
        self.touch();
        Some(self.crm.remove(pos))
    }

    pub fn crm_total_by_status(&self) -> Vec<(CrmStatus, f64)> {
        crm::total_by_status(&self.crm)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Check the plan for inconsistent geometry.
    ///
    /// The calculations never call this; they degrade to zero instead.
    /// Use it where a plan is committed or loaded.
    pub fn validate(&self) -> CalcResult<()> {
        self.dimensions.validate()?;

        for recess in &self.settings.recesses {
            recess.validate(recess.side.extent(&self.dimensions).0)?;
        }

        for opening in &self.openings {
            if !(opening.width > 0.0 && opening.height > 0.0) {
                return Err(CalcError::invalid_input(
                    "openings",
                    opening.id.clone(),
                    "Opening width and height must be positive",
                ));
            }
            let Some(side) = opening.facade() else {
                continue;
            };
            let extent = side.extent(&self.dimensions).0;
            if opening.x < 0.0 || opening.x + opening.width > extent + 1e-9 {
                return Err(CalcError::invalid_input(
                    "openings",
                    opening.id.clone(),
                    format!("Opening does not fit along {} ({} m)", side, extent),
                ));
            }
            let center = (opening.x + opening.width / 2.0) / extent;
            let wall_height = self.facade_configs.get(side).height_at(center).0;
            if opening.y + opening.height > wall_height + 1e-9 {
                return Err(CalcError::invalid_input(
                    "openings",
                    opening.id.clone(),
                    format!("Opening top at {:.2} m exceeds wall height {:.2} m", opening.y + opening.height, wall_height),
                ));
            }
        }
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Project metadata stored in the state header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Client name
    pub client: String,

    /// Building site
    pub location: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            client: String::new(),
            location: String::new(),
            created: now,
            modified: now,
        }
    }
}

/// Per-project plan and budget settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Footprint recesses
    pub recesses: Vec<Recess>,

    /// Per-side visibility; a side absent from the map is visible
    pub perimeter_visibility: BTreeMap<Side, bool>,

    /// Manual budget line overrides, keyed like the quantities map
    pub overrides: BTreeMap<MaterialKey, LineOverride>,

    /// Global price adjustment in percent (positive = markup, negative = discount)
    pub adjustment_percentage: f64,
}

impl ProjectSettings {
    pub fn is_side_visible(&self, side: Side) -> bool {
        self.perimeter_visibility.get(&side).copied().unwrap_or(true)
    }
}
