//! Randomized non-overlapping placement.
//!
//! Motifs drop one at a time onto random snapped anchors inside the content
//! area. A candidate is rejected when its collision footprint meets any
//! already accepted one; every rejection consumes from a per-sheet retry
//! budget shared across all motifs, and draining it aborts the whole run.
//! The drawn box is the sizer's box shrunk by [`BREATHING_FACTOR`] while
//! collisions are tested at full sizer size, so accepted neighbors always
//! keep visible air between them.

use alloc::vec::Vec;

use log::debug;
#[cfg(not(feature = "std"))]
use num_traits::Float;
use rand::Rng;

use crate::aspect::{Motif, Placement};
use crate::boxes::BoxSize;
use crate::error::LayoutError;
use crate::sheet::SheetArea;

/// Rejected samples tolerated per sheet before scatter placement aborts.
///
/// The budget is shared across the sheet's motifs and never resets between
/// them, so pressure accumulates as the sheet fills. Draining it signals a
/// configuration problem (too many images for the area), not bad luck.
pub const RETRY_BUDGET: u32 = 10_000;

/// Ratio between the collision footprint and the drawn box.
pub const BREATHING_FACTOR: f64 = 1.2;

/// Snap step for candidate anchors, in millimeters.
///
/// Quantizing anchors speeds convergence and gives sheets their
/// random-but-snapped look.
pub const SNAP_MM: f64 = 4.0;

/// Result of a completed scatter run.
#[derive(Clone, Debug, PartialEq)]
pub struct Scattered {
    /// Accepted placements, in working-list order.
    pub placements: Vec<Placement>,
    /// The box motifs are drawn at: the sizer's box shrunk by
    /// [`BREATHING_FACTOR`].
    pub draw_box: BoxSize,
    /// Samples rejected over the whole sheet.
    pub rejected: u32,
}

/// Axis-aligned collision footprint in sheet millimeters.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Rect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Rect {
    /// Non-strict intersection: footprints sharing only an edge still count
    /// as touching.
    fn touches(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// Scatter the working list across the content area.
///
/// Anchors are drawn uniformly in the span the shrunk box can occupy,
/// floor-snapped to [`SNAP_MM`], and tested at full sizer-box size against
/// every accepted footprint. A single motif trivially succeeds. Fails with
/// [`LayoutError::PlacementExhausted`] once [`RETRY_BUDGET`] rejections
/// accumulate, reporting how many motifs had found a spot by then.
pub fn place_scatter<R: Rng + ?Sized>(
    items: &[Motif],
    box_size: BoxSize,
    area: &SheetArea,
    rng: &mut R,
) -> Result<Scattered, LayoutError> {
    let draw_box = BoxSize {
        width: box_size.width / BREATHING_FACTOR,
        height: box_size.height / BREATHING_FACTOR,
        per_row: box_size.per_row,
    };
    // Sampling spans collapse to the origin when the box outgrows the area.
    let max_x = (area.content_width() - draw_box.width).max(0.0);
    let max_y = (area.content_height() - draw_box.height).max(0.0);

    let mut placed: Vec<Rect> = Vec::with_capacity(items.len());
    let mut placements = Vec::with_capacity(items.len());
    let mut budget = RETRY_BUDGET;

    for (index, &motif) in items.iter().enumerate() {
        loop {
            let x = area.content_left() + snap(rng.random_range(0.0..=max_x));
            let y = area.content_top() + snap(rng.random_range(0.0..=max_y));
            let footprint = Rect {
                x,
                y,
                width: box_size.width,
                height: box_size.height,
            };
            if placed.iter().any(|r| r.touches(&footprint)) {
                budget -= 1;
                if budget == 0 {
                    return Err(LayoutError::PlacementExhausted {
                        placed: index,
                        requested: items.len(),
                    });
                }
                continue;
            }
            placed.push(footprint);
            placements.push(Placement {
                motif,
                x,
                y,
                axis: motif.aspect.fixed_axis(),
            });
            break;
        }
    }

    let rejected = RETRY_BUDGET - budget;
    debug!(
        "scatter: {} motifs placed, {} samples rejected",
        placements.len(),
        rejected
    );
    Ok(Scattered {
        placements,
        draw_box,
        rejected,
    })
}

fn snap(v: f64) -> f64 {
    (v / SNAP_MM).floor() * SNAP_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::{AspectRatio, SourceId};
    use crate::sheet::{SheetFormat, SheetOrientation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn squares(n: usize) -> Vec<Motif> {
        (0..n)
            .map(|i| Motif::new(SourceId(i), AspectRatio::SQUARE))
            .collect()
    }

    fn a4() -> SheetArea {
        SheetArea::new(SheetFormat::A4, SheetOrientation::Portrait)
    }

    fn ample_box() -> BoxSize {
        BoxSize {
            width: 30.0,
            height: 30.0,
            per_row: 5,
        }
    }

    // ── Happy path ──────────────────────────────────────────────────────

    #[test]
    fn five_motifs_in_ample_area_place_cheaply() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = place_scatter(&squares(5), ample_box(), &a4(), &mut rng).unwrap();
        assert_eq!(out.placements.len(), 5);
        // Plenty of room: only a handful of samples should bounce.
        assert!(out.rejected < 100, "rejected {}", out.rejected);
    }

    #[test]
    fn single_motif_never_rejects() {
        let mut rng = StdRng::seed_from_u64(9);
        let out = place_scatter(&squares(1), ample_box(), &a4(), &mut rng).unwrap();
        assert_eq!(out.placements.len(), 1);
        assert_eq!(out.rejected, 0);
    }

    #[test]
    fn draw_box_is_the_sizer_box_shrunk() {
        let mut rng = StdRng::seed_from_u64(1);
        let out = place_scatter(&squares(2), ample_box(), &a4(), &mut rng).unwrap();
        assert!((out.draw_box.width - 25.0).abs() < 1e-9);
        assert!((out.draw_box.height - 25.0).abs() < 1e-9);
    }

    #[test]
    fn anchors_snap_to_the_grid() {
        let area = a4();
        let mut rng = StdRng::seed_from_u64(3);
        let out = place_scatter(&squares(8), ample_box(), &area, &mut rng).unwrap();
        for p in &out.placements {
            let dx = (p.x - area.content_left()) / SNAP_MM;
            let dy = (p.y - area.content_top()) / SNAP_MM;
            assert_eq!(dx.fract(), 0.0);
            assert_eq!(dy.fract(), 0.0);
        }
    }

    #[test]
    fn anchors_stay_inside_the_content_area() {
        let area = a4();
        let mut rng = StdRng::seed_from_u64(4);
        let out = place_scatter(&squares(10), ample_box(), &area, &mut rng).unwrap();
        for p in &out.placements {
            assert!(p.x >= area.content_left());
            assert!(p.x + out.draw_box.width <= area.content_left() + area.content_width() + 1e-9);
            assert!(p.y >= area.content_top());
            assert!(p.y + out.draw_box.height <= area.content_top() + area.content_height() + 1e-9);
        }
    }

    // ── Collision discipline ────────────────────────────────────────────

    #[test]
    fn inflated_footprints_stay_disjoint() {
        let area = a4();
        let b = ample_box();
        let mut rng = StdRng::seed_from_u64(7);
        let out = place_scatter(&squares(12), b, &area, &mut rng).unwrap();

        let rects: Vec<Rect> = out
            .placements
            .iter()
            .map(|p| Rect {
                x: p.x,
                y: p.y,
                width: b.width,
                height: b.height,
            })
            .collect();
        for i in 0..rects.len() {
            for j in i + 1..rects.len() {
                assert!(!rects[i].touches(&rects[j]), "{i} and {j} collide");
            }
        }
    }

    #[test]
    fn touching_edges_count_as_collision() {
        let a = Rect {
            x: 10.0,
            y: 10.0,
            width: 30.0,
            height: 30.0,
        };
        let b = Rect {
            x: 40.0,
            y: 10.0,
            width: 30.0,
            height: 30.0,
        };
        let c = Rect {
            x: 42.0,
            y: 10.0,
            width: 30.0,
            height: 30.0,
        };
        assert!(a.touches(&b));
        assert!(!a.touches(&c));
    }

    // ── Exhaustion ──────────────────────────────────────────────────────

    #[test]
    fn cramped_area_exhausts_the_budget() {
        // 60×60 mm of content fits at most four 30×30 footprints on the
        // 4 mm snap grid; asking for nine must drain the budget regardless
        // of seed.
        let cramped = SheetArea {
            width: 80.0,
            height: 130.0,
            ..a4()
        };
        let mut rng = StdRng::seed_from_u64(12);
        let err = place_scatter(&squares(9), ample_box(), &cramped, &mut rng).unwrap_err();
        match err {
            LayoutError::PlacementExhausted { placed, requested } => {
                assert!(placed <= 4);
                assert_eq!(requested, 9);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn budget_is_per_call() {
        // A fresh call starts from a full budget; earlier pressure does not
        // leak across sheets.
        let area = a4();
        let mut rng = StdRng::seed_from_u64(21);
        let first = place_scatter(&squares(12), ample_box(), &area, &mut rng).unwrap();
        let second = place_scatter(&squares(12), ample_box(), &area, &mut rng).unwrap();
        assert_eq!(first.placements.len(), 12);
        assert_eq!(second.placements.len(), 12);
    }
}
