//! # sip_core - SIP House Quoting Engine
//!
//! `sip_core` turns a parametric description of a prefabricated
//! structural-insulated-panel house into panel counts, a full bill of
//! materials and an itemized budget. All inputs and outputs are
//! JSON-serializable so the engine can sit behind any UI or service.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: the calculation pipeline is pure functions over plain data
//! - **JSON-First**: all types implement Serialize/Deserialize, field names
//!   follow the exported contract
//! - **Never fails mid-quote**: bad input degrades to zero; structured
//!   errors only appear at the edges (validation, persistence, catalog admin)
//!
//! ## Quick Start
//!
//! ```rust
//! use sip_core::project::Project;
//!
//! let project = Project::new("Familia Soto", "Frutillar");
//! let quote = project.quote();
//!
//! assert_eq!(quote.geometry.floor_area, 48.0);
//! println!("total: {}", quote.budget.total);
//! ```
//!
//! ## Modules
//!
//! - [`building`] - dimensions, facades, recesses, openings, interior walls
//! - [`selections`] - inclusion toggles, panel choices, foundation and structure
//! - [`calculations`] - geometry, quantities and budget
//! - [`catalog`] - material keys, seed catalog and price administration
//! - [`project`] - application state and editing operations
//! - [`crm`] - quoted-client list
//! - [`file_io`] - state repository with atomic saves and locking
//! - [`export`] - JSON export bundle
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types

pub mod building;
pub mod calculations;
pub mod catalog;
pub mod constants;
pub mod crm;
pub mod errors;
pub mod export;
pub mod file_io;
pub mod project;
pub mod selections;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{Budget, GeometrySnapshot, Quantities};
pub use catalog::{MaterialKey, PriceCatalog};
pub use errors::{CalcError, CalcResult};
pub use export::ExportBundle;
pub use file_io::{MemoryRepository, StateRepository};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::JsonFileRepository;
pub use project::{Project, ProjectSettings, Quote};
