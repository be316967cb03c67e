//! Sheet layout for seek-and-find game pages: target seeding, uniform box
//! sizing, grid packing, and randomized non-overlapping scatter.
//!
//! Pure geometry and selection — no file I/O, no drawing, `no_std` compatible
//! (alloc required). Rendering, probing, and discovery live behind the `pdf`
//! and `cli` features.
//!
//! # Modules
//!
//! - [`aspect`] — normalized aspect ratios, motifs, fixed-axis rendering rules
//! - [`sheet`] — page formats, margins, header bands, content-area arithmetic
//! - [`select`] — target choice and working-list construction
//! - [`boxes`] — uniform per-motif box sizing for N images in a fixed area
//! - [`grid`] — deterministic centered-row placement
//! - [`scatter`] — randomized placement with collision rejection and a retry budget
//! - [`plan`] — per-sheet orchestration of the above
//! - [`error`] — layout failure taxonomy

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod aspect;
pub mod boxes;
pub mod error;
pub mod grid;
pub mod plan;
pub mod scatter;
pub mod select;
pub mod sheet;

#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "pdf")]
pub mod source;

// Re-exports: the one-stop surface for planning a sheet
pub use aspect::{AspectRatio, FixedAxis, Motif, Placement, SourceId};
pub use boxes::{BoxSize, compute_box_size};
pub use error::LayoutError;
pub use grid::place_grid;
pub use plan::{PlaceMode, SheetPlan, SheetPlanner};
pub use scatter::{RETRY_BUDGET, Scattered, place_scatter};
pub use select::{TargetShare, build_working_list, choose_target};
pub use sheet::{PADDING_MM, SheetArea, SheetFormat, SheetOrientation};
