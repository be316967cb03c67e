//! Printable output for planned sheets.
//!
//! One document, one page per [`SheetPlan`]. Page space is millimeters with
//! y growing downward from the top-left corner, the same convention the
//! planner emits; PDF space grows upward from the bottom-left, so every
//! draw flips through the page height.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use log::{debug, info};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfLayerReference, Px,
};

use crate::aspect::{AspectRatio, SourceId};
use crate::plan::SheetPlan;
use crate::source::{SourceError, load_rgb};

/// Millimeters to PostScript points.
const MM_TO_PT: f64 = 72.0 / 25.4;

/// Longest pixel edge kept when decoding a source.
const MAX_DECODE_EDGE: u32 = 1024;

/// Pixels embedded per drawn millimeter (300 dpi).
const EMBED_PX_PER_MM: f64 = 300.0 / 25.4;

/// Header text size.
const HEADER_FONT_PT: f32 = 24.0;

/// Clearance between the header motif and its band edges, in mm.
const HEADER_MOTIF_INSET_MM: f64 = 2.0;

/// Why the document could not be written.
#[derive(Debug)]
pub enum RenderError {
    /// There are no sheets to put in the document.
    NoSheets,
    /// A plan references a source index outside the path table.
    UnmappedSource {
        /// The out-of-range index.
        id: usize,
    },
    /// A referenced file failed to decode.
    Source(SourceError),
    /// The PDF backend rejected an operation.
    Backend(String),
    /// The output file could not be created or written.
    Io {
        /// The output path.
        path: PathBuf,
        /// The underlying failure.
        source: std::io::Error,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSheets => write!(f, "document has no sheets to render"),
            Self::UnmappedSource { id } => {
                write!(f, "plan references source {id} with no known path")
            }
            Self::Source(e) => write!(f, "{e}"),
            Self::Backend(msg) => write!(f, "pdf backend: {msg}"),
            Self::Io { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SourceError> for RenderError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

/// Render every plan into a single PDF at `out_path`.
///
/// `sources` maps [`SourceId`] indices to files; each distinct file is
/// decoded once and re-embedded per occurrence at the occurrence's drawn
/// size. Header bands get `header_text` on the text band and the plan's
/// own target on the motif band, so multi-page documents can seek a
/// different target per page.
pub fn render_document(
    plans: &[SheetPlan],
    sources: &[PathBuf],
    header_text: &str,
    out_path: &Path,
) -> Result<(), RenderError> {
    let first = plans.first().ok_or(RenderError::NoSheets)?;

    let (doc, page1, layer1) = PdfDocument::new(
        "zenseek",
        Mm(first.area.width as f32),
        Mm(first.area.height as f32),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Backend(e.to_string()))?;

    let pixels = decode_referenced(plans, sources)?;

    for (i, plan) in plans.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (p, l) = doc.add_page(
                Mm(plan.area.width as f32),
                Mm(plan.area.height as f32),
                "Layer 1",
            );
            doc.get_page(p).get_layer(l)
        };
        render_sheet(&layer, plan, &pixels, header_text, &font)?;
        debug!("rendered sheet {} of {}", i + 1, plans.len());
    }

    let file = File::create(out_path).map_err(|source| RenderError::Io {
        path: out_path.to_path_buf(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| RenderError::Backend(e.to_string()))?;
    info!("wrote {} sheet(s) to {}", plans.len(), out_path.display());
    Ok(())
}

/// Decode each source any plan references, exactly once.
fn decode_referenced(
    plans: &[SheetPlan],
    sources: &[PathBuf],
) -> Result<HashMap<SourceId, image::RgbImage>, RenderError> {
    let mut pixels = HashMap::new();
    for plan in plans {
        let ids = plan
            .placements
            .iter()
            .map(|p| p.motif.source)
            .chain([plan.target.source]);
        for id in ids {
            if pixels.contains_key(&id) {
                continue;
            }
            let path = sources
                .get(id.0)
                .ok_or(RenderError::UnmappedSource { id: id.0 })?;
            pixels.insert(id, load_rgb(path, MAX_DECODE_EDGE)?);
        }
    }
    Ok(pixels)
}

fn render_sheet(
    layer: &PdfLayerReference,
    plan: &SheetPlan,
    pixels: &HashMap<SourceId, image::RgbImage>,
    header_text: &str,
    font: &IndirectFontRef,
) -> Result<(), RenderError> {
    let area = &plan.area;

    if !header_text.is_empty() {
        // Baseline a little above the text band's bottom edge.
        let baseline = area.margin_top + area.header_text - 5.0;
        layer.use_text(
            header_text,
            HEADER_FONT_PT,
            Mm(area.content_left() as f32),
            Mm((area.height - baseline) as f32),
            font,
        );
    }

    // The target sits centered on the motif band, pinned to the band
    // height unless it is too wide to fit the content width.
    let band_h = area.header_motif - 2.0 * HEADER_MOTIF_INSET_MM;
    let (tw, th) = fit_band(plan.target.aspect, area.content_width(), band_h);
    let tx = area.content_left() + (area.content_width() - tw) / 2.0;
    let ty = area.margin_top + area.header_text + (area.header_motif - th) / 2.0;
    let target_rgb = pixels
        .get(&plan.target.source)
        .ok_or(RenderError::UnmappedSource {
            id: plan.target.source.0,
        })?;
    draw_image_mm(layer, target_rgb, tx, ty, tw, th, area.height);

    for p in &plan.placements {
        let (w, h) = plan.box_size.render_size(p);
        let rgb = pixels
            .get(&p.motif.source)
            .ok_or(RenderError::UnmappedSource { id: p.motif.source.0 })?;
        draw_image_mm(layer, rgb, p.x, p.y, w, h, area.height);
    }
    Ok(())
}

/// Scale an aspect to the band height, falling back to the band width
/// when a very wide ratio would overflow it.
fn fit_band(aspect: AspectRatio, max_w: f64, max_h: f64) -> (f64, f64) {
    let w = max_h * aspect.width / aspect.height;
    if w <= max_w {
        (w, max_h)
    } else {
        (max_w, max_w * aspect.height / aspect.width)
    }
}

/// Place decoded pixels with their top-left corner at `(x, y)` sheet
/// millimeters, scaled to `w` by `h`. At 72 dpi one pixel renders as one
/// point, so the scale factor is just target points over source pixels.
///
/// Every placement embeds its own copy of the pixels, so masters larger
/// than the drawn box are resampled down to [`EMBED_PX_PER_MM`] first.
/// Smaller masters embed as they are.
fn draw_image_mm(
    layer: &PdfLayerReference,
    rgb: &image::RgbImage,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    page_h: f64,
) {
    let want_w = ((w * EMBED_PX_PER_MM).round() as u32).max(1);
    let want_h = ((h * EMBED_PX_PER_MM).round() as u32).max(1);
    let scaled;
    let rgb = if want_w < rgb.width() && want_h < rgb.height() {
        scaled = image::imageops::thumbnail(rgb, want_w, want_h);
        &scaled
    } else {
        rgb
    };
    let (px_w, px_h) = rgb.dimensions();
    let xobj = ImageXObject {
        width: Px(px_w as usize),
        height: Px(px_h as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.as_raw().clone(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    };
    printpdf::Image::from(xobj).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x as f32)),
            translate_y: Some(Mm((page_h - y - h) as f32)),
            scale_x: Some(((w * MM_TO_PT) / f64::from(px_w)) as f32),
            scale_y: Some(((h * MM_TO_PT) / f64::from(px_h)) as f32),
            dpi: Some(72.0),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspect::Motif;
    use crate::plan::SheetPlanner;
    use crate::sheet::{SheetArea, SheetFormat, SheetOrientation};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn a4() -> SheetArea {
        SheetArea::new(SheetFormat::A4, SheetOrientation::Portrait)
    }

    fn temp_png(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        image::RgbImage::new(w, h).save(&path).unwrap();
        path
    }

    // ── fit_band ──

    #[test]
    fn band_pins_height_for_ordinary_ratios() {
        let (w, h) = fit_band(AspectRatio { width: 1.0, height: 0.5 }, 190.0, 36.0);
        assert_eq!(h, 36.0);
        assert_eq!(w, 72.0);
    }

    #[test]
    fn band_pins_width_for_extreme_banners() {
        // 20:1 pinned to 36 mm tall would be 720 mm wide.
        let (w, h) = fit_band(AspectRatio { width: 1.0, height: 0.05 }, 190.0, 36.0);
        assert_eq!(w, 190.0);
        assert!((h - 9.5).abs() < 1e-9);
    }

    // ── whole documents ──

    #[test]
    fn renders_a_seekable_document() {
        let a = temp_png("zenseek_pdf_a.png", 64, 64);
        let b = temp_png("zenseek_pdf_b.png", 64, 32);
        let sources = vec![a.clone(), b.clone()];
        let pool = vec![
            Motif::new(SourceId(0), AspectRatio::SQUARE),
            Motif::new(SourceId(1), AspectRatio { width: 1.0, height: 0.5 }),
        ];

        let mut rng = StdRng::seed_from_u64(5);
        let planner = SheetPlanner::new(a4()).images_per_sheet(12);
        let plans = vec![
            planner.plan(&pool, &mut rng).unwrap(),
            planner.plan(&pool, &mut rng).unwrap(),
        ];

        let out = std::env::temp_dir().join("zenseek_pdf_doc.pdf");
        render_document(&plans, &sources, "Find every square!", &out).unwrap();

        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // Two pages of embedded pixels is never a trivial file, but two
        // 64 px sources re-embedded 26 times must stay well under a
        // megabyte of raw pixels.
        assert!(bytes.len() > 1_000);
        assert!(bytes.len() < 1_000_000);

        std::fs::remove_file(&out).ok();
        std::fs::remove_file(&a).ok();
        std::fs::remove_file(&b).ok();
    }

    #[test]
    fn oversized_sources_do_not_bloat_the_file() {
        let a = temp_png("zenseek_pdf_big_a.png", 640, 640);
        let b = temp_png("zenseek_pdf_big_b.png", 640, 320);
        let sources = vec![a.clone(), b.clone()];
        let pool = vec![
            Motif::new(SourceId(0), AspectRatio::SQUARE),
            Motif::new(SourceId(1), AspectRatio { width: 1.0, height: 0.5 }),
        ];

        let mut rng = StdRng::seed_from_u64(9);
        let plan = SheetPlanner::new(a4()).plan(&pool, &mut rng).unwrap();

        let out = std::env::temp_dir().join("zenseek_pdf_big.pdf");
        render_document(&[plan], &sources, "", &out).unwrap();

        // 36 boxes of ~21 mm resample to ~250 px each (~7 MB of raw
        // pixels with the header); embedding the 640 px masters as-is
        // would hold over 40 MB.
        let bytes = std::fs::read(&out).unwrap();
        assert!(bytes.len() < 15_000_000);

        std::fs::remove_file(&out).ok();
        std::fs::remove_file(&a).ok();
        std::fs::remove_file(&b).ok();
    }

    #[test]
    fn empty_document_is_refused() {
        let out = std::env::temp_dir().join("zenseek_pdf_none.pdf");
        let err = render_document(&[], &[], "", &out).unwrap_err();
        assert!(matches!(err, RenderError::NoSheets));
    }

    #[test]
    fn unmapped_source_is_reported() {
        let a = temp_png("zenseek_pdf_unmapped.png", 16, 16);
        let pool = vec![
            Motif::new(SourceId(0), AspectRatio::SQUARE),
            Motif::new(SourceId(7), AspectRatio::SQUARE),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let plan = SheetPlanner::new(a4())
            .images_per_sheet(4)
            .plan(&pool, &mut rng)
            .unwrap();

        let out = std::env::temp_dir().join("zenseek_pdf_gap.pdf");
        // Only one path for a pool naming sources 0 and 7.
        let err = render_document(&[plan], &[a.clone()], "", &out).unwrap_err();
        assert!(matches!(err, RenderError::UnmappedSource { .. }));
        std::fs::remove_file(&a).ok();
    }
}
