//! Deterministic centered-row placement.
//!
//! The working list is split into consecutive rows of `per_row` motifs.
//! Each row is centered horizontally as a whole (the last row may be
//! shorter and centers on its own width), and a portrait motif is centered
//! once more inside its own cell so the thinner drawn image does not hug
//! the cell's left edge. Rows advance by the box height plus padding.
//! Overlap-free by construction.

use alloc::vec::Vec;

use log::debug;

use crate::aspect::{FixedAxis, Motif, Placement};
use crate::boxes::BoxSize;
use crate::sheet::{PADDING_MM, SheetArea};

/// Arrange the working list on a grid.
///
/// `box_size.per_row` must be at least 1, as computed sizes guarantee.
/// The input order is preserved row by row; an empty list yields no
/// placements.
pub fn place_grid(items: &[Motif], box_size: BoxSize, area: &SheetArea) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(items.len());
    let content_w = area.content_width();
    let mut y = area.content_top();

    for row in items.chunks(box_size.per_row) {
        let n = row.len() as f64;
        let row_width = n * box_size.width + (n - 1.0) * PADDING_MM;
        let row_left = area.content_left() + (content_w - row_width) / 2.0;

        for (i, &motif) in row.iter().enumerate() {
            let cell_x = row_left + i as f64 * (box_size.width + PADDING_MM);
            let axis = motif.aspect.fixed_axis();
            let x = match axis {
                // Center the thinner drawn width inside the cell.
                FixedAxis::Height => {
                    cell_x + (box_size.width - box_size.height * motif.aspect.width) / 2.0
                }
                FixedAxis::Width => cell_x,
            };
            placements.push(Placement { motif, x, y, axis });
        }
        y += box_size.height + PADDING_MM;
    }

    debug!(
        "grid: {} motifs in {} rows of up to {}",
        items.len(),
        items.len().div_ceil(box_size.per_row.max(1)),
        box_size.per_row
    );
    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::{AspectRatio, SourceId};
    use crate::boxes::compute_box_size;
    use crate::sheet::{SheetFormat, SheetOrientation};

    fn squares(n: usize) -> Vec<Motif> {
        (0..n)
            .map(|i| Motif::new(SourceId(i), AspectRatio::SQUARE))
            .collect()
    }

    fn a4() -> SheetArea {
        SheetArea::new(SheetFormat::A4, SheetOrientation::Portrait)
    }

    fn drawn_rect(p: &Placement, b: BoxSize) -> (f64, f64, f64, f64) {
        let (w, h) = b.render_size(p);
        (p.x, p.y, w, h)
    }

    fn interiors_overlap(a: (f64, f64, f64, f64), b: (f64, f64, f64, f64)) -> bool {
        a.0 < b.0 + b.2 && b.0 < a.0 + a.2 && a.1 < b.1 + b.3 && b.1 < a.1 + a.3
    }

    // ── Row structure ───────────────────────────────────────────────────

    #[test]
    fn thirty_six_squares_form_six_full_rows() {
        let items = squares(36);
        let b = compute_box_size(&items, 36, &a4()).unwrap();
        let placed = place_grid(&items, b, &a4());
        assert_eq!(placed.len(), 36);

        let mut rows: Vec<f64> = placed.iter().map(|p| p.y).collect();
        rows.dedup();
        assert_eq!(rows.len(), 6);
        // Each row holds exactly per_row items.
        for y in &rows {
            assert_eq!(placed.iter().filter(|p| p.y == *y).count(), 6);
        }
    }

    #[test]
    fn first_row_starts_at_content_top_and_is_centered() {
        let items = squares(36);
        let area = a4();
        let b = compute_box_size(&items, 36, &area).unwrap();
        let placed = place_grid(&items, b, &area);

        assert_eq!(placed[0].y, 70.0);
        // Row of six: width 6*box + 5*padding, centered in 190 mm.
        let row_width = 6.0 * b.width + 5.0 * PADDING_MM;
        let expected_left = 10.0 + (190.0 - row_width) / 2.0;
        assert!((placed[0].x - expected_left).abs() < 1e-9);
        // Symmetric: right edge of the last cell mirrors the left inset.
        let right_inset = 200.0 - (placed[5].x + b.width);
        assert!((right_inset - (expected_left - 10.0)).abs() < 1e-9);
    }

    #[test]
    fn short_last_row_centers_on_its_own_width() {
        // 7 squares pack 2 per row on A4: three full rows plus one leftover.
        let items = squares(7);
        let area = a4();
        let b = compute_box_size(&items, 7, &area).unwrap();
        let placed = place_grid(&items, b, &area);

        assert_eq!(placed.len() % b.per_row, 1);
        let last = &placed[b.per_row * (7 / b.per_row)..];
        assert!(!last.is_empty());
        let n = last.len() as f64;
        let row_width = n * b.width + (n - 1.0) * PADDING_MM;
        let expected_left = 10.0 + (190.0 - row_width) / 2.0;
        assert!((last[0].x - expected_left).abs() < 1e-9);
    }

    #[test]
    fn rows_advance_by_box_height_plus_padding() {
        let items = squares(12);
        let area = a4();
        let b = compute_box_size(&items, 12, &area).unwrap();
        let placed = place_grid(&items, b, &area);

        let mut rows: Vec<f64> = placed.iter().map(|p| p.y).collect();
        rows.dedup();
        for pair in rows.windows(2) {
            assert!((pair[1] - pair[0] - (b.height + PADDING_MM)).abs() < 1e-9);
        }
    }

    // ── Cell centering ──────────────────────────────────────────────────

    #[test]
    fn portrait_motifs_center_inside_their_cells() {
        let mut items = squares(6);
        items[3] = Motif::new(SourceId(3), AspectRatio::from_pixels(500, 1000).unwrap());
        let area = a4();
        let b = compute_box_size(&items, 6, &area).unwrap();
        let placed = place_grid(&items, b, &area);

        assert_eq!(placed[3].axis, FixedAxis::Height);
        // Shifted right of its cell edge by half the spare width.
        let cell_x = placed[2].x + b.width + PADDING_MM;
        let drawn_w = b.height * 0.5;
        assert!((placed[3].x - (cell_x + (b.width - drawn_w) / 2.0)).abs() < 1e-9);
    }

    // ── Disjointness ────────────────────────────────────────────────────

    #[test]
    fn drawn_rectangles_never_overlap() {
        let mut items = squares(24);
        items[5] = Motif::new(SourceId(105), AspectRatio::from_pixels(600, 900).unwrap());
        items[11] = Motif::new(SourceId(111), AspectRatio::from_pixels(900, 600).unwrap());
        let area = a4();
        let b = compute_box_size(&items, 24, &area).unwrap();
        let placed = place_grid(&items, b, &area);

        for i in 0..placed.len() {
            for j in i + 1..placed.len() {
                let (a, c) = (drawn_rect(&placed[i], b), drawn_rect(&placed[j], b));
                assert!(!interiors_overlap(a, c), "{i} and {j} collide");
            }
        }
    }

    #[test]
    fn empty_list_places_nothing() {
        let b = BoxSize {
            width: 20.0,
            height: 20.0,
            per_row: 4,
        };
        assert!(place_grid(&[], b, &a4()).is_empty());
    }
}
