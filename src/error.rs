//! Layout failure taxonomy.
//!
//! Every failure is fatal for the run: a sheet that cannot be laid out
//! aborts the whole document rather than emitting a partial one. Messages
//! carry the failing stage and the offending value so callers can diagnose
//! without re-running.

use core::fmt;

/// Why a sheet could not be laid out.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutError {
    /// Target selection was asked to pick from an empty pool.
    EmptyPool,

    /// The pool cannot supply distractors: fewer than two images, or no
    /// image distinct from the target.
    InsufficientPool {
        /// Number of images the pool actually held.
        available: usize,
    },

    /// Box sizing received an empty working list.
    EmptyWorkingList,

    /// The requested images-per-sheet count was zero.
    ZeroImagesRequested,

    /// The computed box cannot host a single column — images-per-sheet is
    /// far too large for the page, or the padding swallowed the box.
    DegenerateBox {
        /// Computed box width in millimeters (may be non-positive).
        width: f64,
        /// Computed box height in millimeters (may be non-positive).
        height: f64,
        /// Content width the box had to fit into, in millimeters.
        content_width: f64,
    },

    /// Scatter placement ran out of retries before every image found a
    /// free spot. Signals a configuration problem (too many images for
    /// the area), not a transient condition.
    PlacementExhausted {
        /// Images already placed when the budget ran out.
        placed: usize,
        /// Images the sheet asked for.
        requested: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyPool => write!(f, "cannot choose a target from an empty image pool"),
            Self::InsufficientPool { available } => write!(
                f,
                "pool of {available} image(s) cannot supply distractors distinct from the target (need at least 2)"
            ),
            Self::EmptyWorkingList => write!(f, "box sizing requires a non-empty working list"),
            Self::ZeroImagesRequested => write!(f, "images per sheet must be at least 1"),
            Self::DegenerateBox {
                width,
                height,
                content_width,
            } => write!(
                f,
                "computed box {width:.2}\u{d7}{height:.2} mm leaves no room for a column in {content_width:.2} mm of content width"
            ),
            Self::PlacementExhausted { placed, requested } => write!(
                f,
                "scatter retry budget exhausted after placing {placed} of {requested} images"
            ),
        }
    }
}

impl core::error::Error for LayoutError {}
