//! # Selections
//!
//! User choices that drive the bill of materials: which building elements
//! are quoted, which catalog panel each one uses, and the foundation,
//! structure and roof systems.

use serde::{Deserialize, Serialize};

/// Foundation system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundationType {
    /// Slab on grade: no floor panels
    Platea,
    /// Raised floor structure
    #[default]
    Estructura,
}

/// Material of the raised floor structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    #[default]
    Madera,
    Metal,
}

/// Roof cladding system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoofSystem {
    #[default]
    Sip,
    Sandwich,
}

/// Flat record of quoting choices.
///
/// ## JSON Example
///
/// ```json
/// {
///   "includeExterior": true,
///   "includeInterior": true,
///   "includeRoof": true,
///   "includeFloor": true,
///   "exteriorWallId": "OSB-70-E",
///   "interiorWallId": "OSB-70-I",
///   "roofId": "OSB-120-T",
///   "floorId": "OSB-120-P",
///   "roofSystem": "sip",
///   "foundationType": "estructura",
///   "structureType": "madera",
///   "includeEngineeringDetail": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selections {
    pub include_exterior: bool,
    pub include_interior: bool,
    pub include_roof: bool,
    pub include_floor: bool,
    pub exterior_wall_id: String,
    pub interior_wall_id: String,
    pub roof_id: String,
    pub floor_id: String,
    pub roof_system: RoofSystem,
    pub foundation_type: FoundationType,
    pub structure_type: StructureType,
    pub include_engineering_detail: bool,
}

impl Default for Selections {
    fn default() -> Self {
        Selections {
            include_exterior: true,
            include_interior: true,
            include_roof: true,
            include_floor: true,
            exterior_wall_id: "OSB-70-E".to_string(),
            interior_wall_id: "OSB-70-I".to_string(),
            roof_id: "OSB-120-T".to_string(),
            floor_id: "OSB-120-P".to_string(),
            roof_system: RoofSystem::Sip,
            foundation_type: FoundationType::Estructura,
            structure_type: StructureType::Madera,
            include_engineering_detail: false,
        }
    }
}

impl Selections {
    /// Whether floor panels are quoted: never over a slab.
    pub fn floor_included(&self) -> bool {
        self.include_floor && self.foundation_type != FoundationType::Platea
    }

    /// Switch foundation; a slab turns the floor toggle off.
    pub fn set_foundation_type(&mut self, foundation: FoundationType) {
        self.foundation_type = foundation;
        if foundation == FoundationType::Platea {
            self.include_floor = false;
        }
    }

    /// Whether the chosen roof panel is a sandwich product
    pub fn is_sandwich_roof(&self) -> bool {
        self.roof_id.contains("SAND-")
    }
}
