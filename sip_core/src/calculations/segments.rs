//! # Wall Segments
//!
//! Resolves which stretches of a perimeter side still carry a wall once
//! recesses are applied. Segments are expressed in the side's local 1-D
//! coordinate (`0..extent`, clockwise, see [`crate::building::side`]).
//!
//! - A recess with `hide_base` removes `[x, x + width]` from its own side.
//! - A recess with `hide_side_wall` touching the start of its side trims
//!   `depth` off the end of the previous side; touching the end trims
//!   `depth` off the start of the next side.
//!
//! ## Example
//!
//! ```rust
//! use sip_core::building::{Dimensions, Recess, Side};
//! use sip_core::calculations::segments::{wall_segments, Segment};
//!
//! let dims = Dimensions::default(); // 6 x 8
//! let recess = Recess { side: Side::Norte, x: 0.0, width: 2.0, depth: 1.0, ..Default::default() };
//!
//! let norte = wall_segments(Side::Norte, &dims, &[recess]);
//! assert_eq!(norte, vec![Segment { start: 2.0, end: 6.0 }]);
//! ```

use serde::{Deserialize, Serialize};

use crate::building::{Dimensions, Recess, Side};

/// Segments shorter than this are dropped
const MIN_SEGMENT: f64 = 1e-9;

/// A surviving stretch of wall along one side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// Remove `[cut_start, cut_end]` from every segment.
fn subtract(segments: Vec<Segment>, cut_start: f64, cut_end: f64) -> Vec<Segment> {
    if !(cut_end > cut_start) {
        return segments;
    }
    let mut out = Vec::with_capacity(segments.len() + 1);
    for seg in segments {
        if cut_end <= seg.start || cut_start >= seg.end {
            out.push(seg);
            continue;
        }
        if cut_start > seg.start {
            out.push(Segment {
                start: seg.start,
                end: cut_start,
            });
        }
        if cut_end < seg.end {
            out.push(Segment {
                start: cut_end,
                end: seg.end,
            });
        }
    }
    out.retain(|s| s.length() > MIN_SEGMENT);
    out
}

/// Ordered wall segments of `side` after applying every recess.
pub fn wall_segments(side: Side, dims: &Dimensions, recesses: &[Recess]) -> Vec<Segment> {
    let extent = side.extent(dims).0;
    if !(extent > MIN_SEGMENT) {
        return Vec::new();
    }

    let mut segments = vec![Segment { start: 0.0, end: extent }];

    for recess in recesses.iter().filter(|r| r.side == side && r.hide_base) {
        segments = subtract(segments, recess.x, recess.x + recess.width);
    }

    for recess in recesses.iter().filter(|r| r.hide_side_wall) {
        let own_extent = recess.side.extent(dims).0;
        if recess.touches_start() && recess.side.previous() == side {
            segments = subtract(segments, extent - recess.depth, extent);
        }
        if recess.touches_end(own_extent) && recess.side.next() == side {
            segments = subtract(segments, 0.0, recess.depth);
        }
    }

    segments
}
