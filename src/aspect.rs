//! Normalized aspect ratios and the motifs they describe.
//!
//! Every source image enters the engine as a [`Motif`]: an opaque identity
//! plus an [`AspectRatio`] normalized so the larger native dimension maps to
//! 1.0. Sizing code can then treat "1" as "fills the box's primary axis" and
//! the other value as a fraction of it.
//!
//! # Example
//!
//! ```
//! use zenseek::{AspectRatio, FixedAxis};
//!
//! let wide = AspectRatio::from_pixels(1600, 900).unwrap();
//! assert_eq!(wide.width, 1.0);
//! assert!((wide.height - 0.5625).abs() < 1e-12);
//! assert_eq!(wide.fixed_axis(), FixedAxis::Width);
//! ```

/// Normalized shape of a source image.
///
/// Invariant: `max(width, height) == 1.0` and the other lies in `(0, 1]`
/// (both are 1.0 for a square source).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AspectRatio {
    /// Relative width. Exactly 1.0 when the source is landscape or square.
    pub width: f64,
    /// Relative height. Exactly 1.0 when the source is portrait or square.
    pub height: f64,
}

impl AspectRatio {
    /// The 1:1 ratio of a square source.
    pub const SQUARE: Self = Self {
        width: 1.0,
        height: 1.0,
    };

    /// Normalize native pixel dimensions.
    ///
    /// Width ≥ height maps to `(1, h/w)`, otherwise `(w/h, 1)`. Returns
    /// `None` when either dimension is zero — such a source is undrawable
    /// and callers must reject it before layout.
    pub fn from_pixels(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let w = width as f64;
        let h = height as f64;
        Some(if width >= height {
            Self {
                width: 1.0,
                height: h / w,
            }
        } else {
            Self {
                width: w / h,
                height: 1.0,
            }
        })
    }

    /// Which box dimension is authoritative when this shape is rendered.
    ///
    /// Portrait sources (relative width < 1) pin the box height and derive
    /// their width; everything else pins the box width.
    pub fn fixed_axis(&self) -> FixedAxis {
        if self.width < 1.0 {
            FixedAxis::Height
        } else {
            FixedAxis::Width
        }
    }
}

/// Which of the two box dimensions is pinned when rendering a motif.
///
/// The free dimension follows from the motif's aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FixedAxis {
    /// The box width is authoritative; drawn height is `width * aspect.height`.
    Width,
    /// The box height is authoritative; drawn width is `height * aspect.width`.
    Height,
}

/// Opaque identity of a source image.
///
/// The engine never touches files; callers keep a table of real resources
/// (paths, handles) and hand the engine indices into it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceId(pub usize);

/// A source image as the layout engine sees it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Motif {
    /// Index into the caller's source table.
    pub source: SourceId,
    /// Normalized shape.
    pub aspect: AspectRatio,
}

impl Motif {
    /// Create a motif.
    pub const fn new(source: SourceId, aspect: AspectRatio) -> Self {
        Self { source, aspect }
    }
}

/// One laid-out motif: a top-left anchor in millimeters plus the axis
/// pinned to the sheet's box size.
///
/// Coordinates are measured from the page's top-left corner with y growing
/// downward; the rendering surface converts to its own space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// The motif to draw.
    pub motif: Motif,
    /// Left edge, mm from the page's left edge.
    pub x: f64,
    /// Top edge, mm from the page's top edge.
    pub y: f64,
    /// Which box dimension the renderer pins for this motif.
    pub axis: FixedAxis,
}
