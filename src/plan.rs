//! Per-sheet orchestration.
//!
//! [`SheetPlanner`] runs the full pipeline for one sheet: pick (or accept)
//! a target, build the shuffled working list, size the uniform box, and
//! place every motif in the requested mode. A single RNG drives every
//! random decision — target draw, distractor draws, shuffle, scatter
//! sampling — so a seeded planner reproduces a sheet exactly.

use alloc::vec::Vec;

use log::info;
use rand::Rng;

use crate::aspect::{Motif, Placement};
use crate::boxes::{BoxSize, compute_box_size};
use crate::error::LayoutError;
use crate::grid::place_grid;
use crate::scatter::place_scatter;
use crate::select::{TargetShare, build_working_list, choose_target};
use crate::sheet::SheetArea;

/// How the body motifs are arranged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaceMode {
    /// Deterministic centered rows.
    #[default]
    Grid,
    /// Randomized non-overlapping scatter.
    Scatter,
}

/// A fully laid-out sheet, ready for a rendering surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SheetPlan {
    /// The motif players must find; shown in the header, repeated in the body.
    pub target: Motif,
    /// The box every body placement is drawn at. For scatter sheets this is
    /// the shrunk drawing box, not the sizer's collision box.
    pub box_size: BoxSize,
    /// Body placements in draw order.
    pub placements: Vec<Placement>,
    /// The geometry the plan was computed for.
    pub area: SheetArea,
}

/// Builder for one sheet's layout.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use zenseek::{
///     AspectRatio, Motif, PlaceMode, SheetArea, SheetFormat, SheetOrientation, SheetPlanner,
///     SourceId,
/// };
///
/// let pool: Vec<Motif> = (0..10)
///     .map(|i| Motif::new(SourceId(i), AspectRatio::SQUARE))
///     .collect();
/// let area = SheetArea::new(SheetFormat::A4, SheetOrientation::Portrait);
/// let mut rng = StdRng::seed_from_u64(99);
///
/// let plan = SheetPlanner::new(area)
///     .images_per_sheet(36)
///     .mode(PlaceMode::Grid)
///     .plan(&pool, &mut rng)
///     .unwrap();
/// assert_eq!(plan.placements.len(), 36);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SheetPlanner {
    area: SheetArea,
    images_per_sheet: usize,
    mode: PlaceMode,
    share: TargetShare,
    target: Option<Motif>,
}

impl SheetPlanner {
    /// Planner with the defaults: 36 images per sheet, grid mode, 20%
    /// target share, target drawn from the pool.
    pub fn new(area: SheetArea) -> Self {
        Self {
            area,
            images_per_sheet: 36,
            mode: PlaceMode::Grid,
            share: TargetShare::default(),
            target: None,
        }
    }

    /// Set how many motifs the sheet body holds.
    pub fn images_per_sheet(mut self, count: usize) -> Self {
        self.images_per_sheet = count;
        self
    }

    /// Set the placement mode.
    pub fn mode(mut self, mode: PlaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target frequency.
    pub fn target_share(mut self, share: TargetShare) -> Self {
        self.share = share;
        self
    }

    /// Pin the target instead of drawing one from the pool.
    pub fn target(mut self, motif: Motif) -> Self {
        self.target = Some(motif);
        self
    }

    /// Lay out one sheet from the pool.
    ///
    /// Validation is self-contained: an empty or too-small pool, a zero
    /// image count, or an unplaceable configuration fail here regardless
    /// of what the caller checked beforehand.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        pool: &[Motif],
        rng: &mut R,
    ) -> Result<SheetPlan, LayoutError> {
        let target = match self.target {
            Some(t) => t,
            None => choose_target(pool, rng)?,
        };
        let list = build_working_list(pool, self.images_per_sheet, target, self.share, rng)?;
        let sized = compute_box_size(&list, self.images_per_sheet, &self.area)?;
        let (box_size, placements) = match self.mode {
            PlaceMode::Grid => (sized, place_grid(&list, sized, &self.area)),
            PlaceMode::Scatter => {
                let out = place_scatter(&list, sized, &self.area, rng)?;
                (out.draw_box, out.placements)
            }
        };

        info!(
            "sheet planned: {} motifs in {:?} mode, target {:?}, box {:.1}x{:.1} mm",
            placements.len(),
            self.mode,
            target.source,
            box_size.width,
            box_size.height
        );
        Ok(SheetPlan {
            target,
            box_size,
            placements,
            area: self.area,
        })
    }
}
