//! Uniform per-motif box sizing.
//!
//! Every motif on a sheet gets the same bounding box, sized so that the
//! requested count fits the content area. The set's widest relative width
//! and tallest relative height are combined into one representative ratio
//! (per-axis maxima, not a single worst item), the content area is divided
//! evenly, and a closed-form box is derived: trimmed by the inter-image
//! padding, then scaled by [`PACKING_FACTOR`] to absorb the waste of
//! forcing heterogeneous shapes into uniform cells.

use log::debug;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::aspect::{FixedAxis, Motif, Placement};
use crate::error::LayoutError;
use crate::sheet::{PADDING_MM, SheetArea};

/// Packing-efficiency factor applied after the padding subtraction.
///
/// The exact constant and the subtract-then-scale order are part of the
/// layout contract; changing either changes every sheet's visual output.
pub const PACKING_FACTOR: f64 = 0.85;

/// Uniform bounding box allocated to every motif on a sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxSize {
    /// Box width in millimeters.
    pub width: f64,
    /// Box height in millimeters.
    pub height: f64,
    /// Boxes per grid row. Meaningful for grid placement only.
    pub per_row: usize,
}

impl BoxSize {
    /// Drawn dimensions for one placement, `(width, height)` in millimeters.
    ///
    /// The placement's fixed axis takes the box dimension; the free axis
    /// follows the motif's aspect ratio.
    pub fn render_size(&self, placement: &Placement) -> (f64, f64) {
        let aspect = placement.motif.aspect;
        match placement.axis {
            FixedAxis::Width => (self.width, self.width * aspect.height),
            FixedAxis::Height => (self.height * aspect.width, self.height),
        }
    }
}

/// Compute the uniform box for `per_sheet` motifs in the sheet's content
/// area.
///
/// Deterministic: identical inputs produce identical boxes. Fails with
/// [`LayoutError::DegenerateBox`] when the padding swallows the box or the
/// box cannot host a single column — both signal an images-per-sheet count
/// far too large (or an area far too small) to lay out.
pub fn compute_box_size(
    items: &[Motif],
    per_sheet: usize,
    area: &SheetArea,
) -> Result<BoxSize, LayoutError> {
    if items.is_empty() {
        return Err(LayoutError::EmptyWorkingList);
    }
    if per_sheet == 0 {
        return Err(LayoutError::ZeroImagesRequested);
    }

    // Representative ratio from per-axis maxima across the whole set.
    let mut max_w = 0.0_f64;
    let mut max_h = 0.0_f64;
    for m in items {
        max_w = max_w.max(m.aspect.width);
        max_h = max_h.max(m.aspect.height);
    }
    let ratio = max_w / max_h;

    let content_w = area.content_width();
    let target_area = content_w * area.content_height() / per_sheet as f64;

    let width = ((target_area * ratio).sqrt() - PADDING_MM) * PACKING_FACTOR;
    let height = ((target_area / ratio).sqrt() - PADDING_MM) * PACKING_FACTOR;
    if !(width > 0.0 && height > 0.0) {
        return Err(LayoutError::DegenerateBox {
            width,
            height,
            content_width: content_w,
        });
    }

    let per_row = (content_w / (width + PADDING_MM)).floor();
    if per_row < 1.0 {
        return Err(LayoutError::DegenerateBox {
            width,
            height,
            content_width: content_w,
        });
    }

    debug!(
        "box {:.2}x{:.2} mm for {} motifs, {} per row (ratio {:.3})",
        width, height, per_sheet, per_row, ratio
    );
    Ok(BoxSize {
        width,
        height,
        per_row: per_row as usize,
    })
}
