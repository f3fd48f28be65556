//! Domain constants shared by the calculation modules.
//!
//! All lengths are meters, all areas square meters.

use crate::units::{Meters, SquareMeters};

/// Standard SIP sheet width
pub const PANEL_WIDTH: Meters = Meters(1.22);

/// Standard SIP sheet height
pub const PANEL_HEIGHT: Meters = Meters(2.44);

/// Standard SIP sheet area (1.22 x 2.44)
pub const PANEL_AREA: SquareMeters = SquareMeters(1.22 * 2.44);

/// Width of a sandwich roof panel
pub const SANDWICH_PANEL_WIDTH: Meters = Meters(1.0);

/// Linear meters of framing charged per panel, regardless of adjacency
pub const FRAMING_ML_PER_PANEL: f64 = 7.32;

/// Roof area as a multiple of floor area (overhang + pitch approximation)
pub const ROOF_AREA_FACTOR: f64 = 1.25;

/// Tolerance used to decide whether a recess touches the end of its side
pub const CORNER_EPSILON: f64 = 0.01;

/// Default door size (width, height)
pub const DOOR_SIZE: (f64, f64) = (0.9, 2.1);

/// Default window size (width, height)
pub const WINDOW_SIZE: (f64, f64) = (1.2, 1.2);

/// Fixed storage key of the persisted application state
pub const STORAGE_KEY: &str = "sip-configurator-state";
