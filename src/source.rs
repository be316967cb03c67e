//! Source-image access for the rendering surface.
//!
//! The engine only ever sees [`Motif`](crate::aspect::Motif)s; this module
//! is where real files enter the picture. Probing reads pixel dimensions
//! from the image header without decoding pixel data, so pools of any size
//! stay cheap to validate up front.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;

use crate::aspect::AspectRatio;

/// Why a source file could not be used.
#[derive(Debug)]
pub enum SourceError {
    /// The file is missing, corrupt, or not a supported image format.
    Unreadable {
        /// The offending file.
        path: PathBuf,
        /// The decoder's reason.
        source: image::ImageError,
    },
    /// The file decoded to a zero-pixel dimension and cannot be drawn.
    ZeroPixels {
        /// The offending file.
        path: PathBuf,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable { path, source } => {
                write!(f, "cannot read image {}: {source}", path.display())
            }
            Self::ZeroPixels { path } => {
                write!(f, "image {} has a zero pixel dimension", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::ZeroPixels { .. } => None,
        }
    }
}

/// Read a source's pixel dimensions and normalize them.
///
/// Probing the same unmodified file twice returns the identical ratio.
pub fn probe_aspect(path: &Path) -> Result<AspectRatio, SourceError> {
    let (w, h) = image::image_dimensions(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("probed {}: {w}x{h} px", path.display());
    AspectRatio::from_pixels(w, h).ok_or_else(|| SourceError::ZeroPixels {
        path: path.to_path_buf(),
    })
}

/// Decode a source to RGB pixels, bounding the longer edge to `max_edge`.
///
/// Sheets repeat the same motif many times, so oversized sources are cut
/// down before embedding. Sources already within the bound keep their
/// native pixels; `thumbnail` alone would scale them up to the bound.
pub fn load_rgb(path: &Path, max_edge: u32) -> Result<image::RgbImage, SourceError> {
    let img = image::open(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if img.width().max(img.height()) <= max_edge {
        return Ok(img.to_rgb8());
    }
    Ok(img.thumbnail(max_edge, max_edge).to_rgb8())
}
