//! # Building Model
//!
//! Parametric description of the house the engine quotes: overall
//! dimensions, one roof profile per facade, recesses cut into the
//! footprint, interior partitions and openings.
//!
//! Every struct deserializes with defaults for absent fields, so partial
//! state coming from the configurator is always usable.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::building::{Dimensions, FacadeConfig, FacadeType};
//!
//! let dims = Dimensions::default();
//! assert!(dims.validate().is_ok());
//!
//! let gable = FacadeConfig::gable(2.44, 3.5);
//! assert_eq!(gable.facade_type, FacadeType::Gable);
//! ```

pub mod facade;
pub mod opening;
pub mod recess;
pub mod side;
pub mod walls;

pub use facade::{FacadeConfig, FacadeConfigs, FacadeType};
pub use opening::{Opening, OpeningType};
pub use recess::Recess;
pub use side::{BySide, Side};
pub use walls::InteriorWall;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Overall footprint and heights, in meters.
///
/// `height` is the base (minimum) wall height, `ridge_height` the peak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
    /// Extent of Norte/Sur
    pub width: f64,
    /// Extent of Este/Oeste
    pub length: f64,
    /// Base wall height
    pub height: f64,
    /// Peak height
    pub ridge_height: f64,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            width: 6.0,
            length: 8.0,
            height: 2.44,
            ridge_height: 2.44,
        }
    }
}

impl Dimensions {
    /// Check `width, length > 0` and `ridge_height >= height > 0`.
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [("width", self.width), ("length", self.length), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a positive number"));
            }
        }
        if !(self.ridge_height >= self.height) {
            return Err(CalcError::invalid_input(
                "ridgeHeight",
                self.ridge_height.to_string(),
                format!("Ridge height must be at least the base height ({})", self.height),
            ));
        }
        Ok(())
    }

    /// Gross footprint area before recesses
    pub fn footprint_area(&self) -> f64 {
        self.width * self.length
    }
}
