//! Target choice and working-list construction.
//!
//! A sheet starts from a pool of candidate motifs. One becomes the target;
//! the working list is then filled to the requested size with the target
//! repeated at a controlled frequency plus uniform draws of distractors,
//! and shuffled so the target carries no positional bias.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::aspect::Motif;
use crate::error::LayoutError;

/// Requested target frequency as a percentage of the working list.
///
/// Clamped to `0..=100` at construction. The occurrence count derived from
/// it is additionally clamped to at least 1 (the target must be findable)
/// and at most 100 (a bound against absurd list sizes, not a business rule).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TargetShare(u8);

impl TargetShare {
    /// Create a share, clamping `percent` into `0..=100`.
    pub const fn new(percent: u8) -> Self {
        Self(if percent > 100 { 100 } else { percent })
    }

    /// The percentage value.
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl Default for TargetShare {
    /// One slot in five.
    fn default() -> Self {
        Self(20)
    }
}

/// Pick a target uniformly from the pool.
///
/// Callers with a fixed target skip this and pass their motif straight to
/// [`build_working_list`].
pub fn choose_target<R: Rng + ?Sized>(
    pool: &[Motif],
    rng: &mut R,
) -> Result<Motif, LayoutError> {
    match pool.choose(rng) {
        Some(&target) => {
            debug!("target {:?} drawn from pool of {}", target.source, pool.len());
            Ok(target)
        }
        None => Err(LayoutError::EmptyPool),
    }
}

/// Build the shuffled per-sheet working list.
///
/// The list has exactly `size` entries: the target repeated
/// `max(1, min(100, size * share / 100))` times (integer floor division),
/// the rest uniform draws from `pool` with replacement, never equal to the
/// target. The pool must offer at least two images and at least one motif
/// with a source different from the target's.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use zenseek::{AspectRatio, Motif, SourceId, TargetShare, build_working_list};
///
/// let pool: Vec<Motif> = (0..8)
///     .map(|i| Motif::new(SourceId(i), AspectRatio::SQUARE))
///     .collect();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let list = build_working_list(&pool, 20, pool[0], TargetShare::new(20), &mut rng).unwrap();
/// assert_eq!(list.len(), 20);
/// // 20 * 20 / 100 = 4 target occurrences.
/// assert_eq!(list.iter().filter(|m| m.source == SourceId(0)).count(), 4);
/// ```
pub fn build_working_list<R: Rng + ?Sized>(
    pool: &[Motif],
    size: usize,
    target: Motif,
    share: TargetShare,
    rng: &mut R,
) -> Result<Vec<Motif>, LayoutError> {
    if size == 0 {
        return Err(LayoutError::ZeroImagesRequested);
    }
    if pool.len() < 2 || !pool.iter().any(|m| m.source != target.source) {
        return Err(LayoutError::InsufficientPool {
            available: pool.len(),
        });
    }

    let occurrences = target_occurrences(size, share);
    let mut list = vec![target; occurrences];
    while list.len() < size {
        // The pool holds a non-target motif, so this loop always makes progress.
        if let Some(&pick) = pool.choose(rng)
            && pick.source != target.source
        {
            list.push(pick);
        }
    }
    list.shuffle(rng);

    debug!(
        "working list of {} built: target {:?} x{}, {} distractor slots",
        size,
        target.source,
        occurrences,
        size - occurrences
    );
    Ok(list)
}

/// `max(1, min(100, size * share / 100))` with integer floor division.
fn target_occurrences(size: usize, share: TargetShare) -> usize {
    (size * share.percent() as usize / 100).clamp(1, 100)
}
