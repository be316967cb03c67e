//! Command-line sheet generator.
//!
//! Walks the given files and directories for images, probes their aspect
//! ratios, plans the requested number of sheets, and writes one PDF.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use walkdir::WalkDir;

use zenseek::pdf::render_document;
use zenseek::source::probe_aspect;
use zenseek::{
    Motif, PlaceMode, SheetArea, SheetFormat, SheetOrientation, SheetPlanner, SourceId,
    TargetShare,
};

const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

#[derive(Parser, Debug)]
#[command(
    name = "zenseek",
    version,
    about = "Generate seek-and-find sheets from a folder of images"
)]
struct Args {
    /// Image files or directories to draw the pool from.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output PDF path.
    #[arg(short, long)]
    out: PathBuf,

    /// Images per sheet.
    #[arg(long, default_value_t = 36, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    images_per_page: usize,

    /// Sheets to generate; each draws its own target unless one is pinned.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pages: usize,

    /// Body arrangement.
    #[arg(long, value_enum, default_value_t = Mode::Grid)]
    mode: Mode,

    /// Paper format.
    #[arg(long, value_enum, default_value_t = Format::A4)]
    format: Format,

    /// Page orientation.
    #[arg(long, value_enum, default_value_t = Orientation::Portrait)]
    orientation: Orientation,

    /// Share of each sheet occupied by the target, in percent.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(0..=100))]
    target_percent: u8,

    /// Pin this image as the target on every sheet.
    #[arg(long)]
    target: Option<PathBuf>,

    /// Header line printed above the target.
    #[arg(long, default_value = "")]
    text: String,

    /// Seed for reproducible sheets.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// Centered rows on a regular grid.
    Grid,
    /// Scattered at random without overlap.
    Random,
}

impl From<Mode> for PlaceMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Grid => Self::Grid,
            Mode::Random => Self::Scatter,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    A4,
    A3,
}

impl From<Format> for SheetFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::A4 => Self::A4,
            Format::A3 => Self::A3,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Orientation {
    Portrait,
    Landscape,
}

impl From<Orientation> for SheetOrientation {
    fn from(o: Orientation) -> Self {
        match o {
            Orientation::Portrait => Self::Portrait,
            Orientation::Landscape => Self::Landscape,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", "info")).init();
    let args = Args::parse();

    let mut paths = collect_sources(&args.inputs)?;
    if paths.is_empty() {
        bail!("no supported images found under the given inputs");
    }

    // A pinned target joins the path table so plans reference it like any
    // other source; the selector still keeps duplicates of it out of the
    // distractor draws.
    let pinned = match &args.target {
        Some(path) => {
            let aspect = probe_aspect(path)
                .with_context(|| format!("cannot probe target {}", path.display()))?;
            let id = paths.iter().position(|p| p == path).unwrap_or_else(|| {
                paths.push(path.clone());
                paths.len() - 1
            });
            Some(Motif::new(SourceId(id), aspect))
        }
        None => None,
    };
    if paths.len() < 2 {
        bail!(
            "need at least two distinct images to seed a sheet, found {}",
            paths.len()
        );
    }

    let pool = probe_pool(&paths)?;
    info!("pooled {} image(s) from {} input(s)", pool.len(), args.inputs.len());

    let area = SheetArea::new(args.format.into(), args.orientation.into());
    let mut planner = SheetPlanner::new(area)
        .images_per_sheet(args.images_per_page)
        .mode(args.mode.into())
        .target_share(TargetShare::new(args.target_percent));
    if let Some(motif) = pinned {
        planner = planner.target(motif);
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut plans = Vec::with_capacity(args.pages);
    for page in 0..args.pages {
        let plan = planner
            .plan(&pool, &mut rng)
            .with_context(|| format!("cannot plan sheet {}", page + 1))?;
        debug!(
            "sheet {}: target {:?}, {} placement(s)",
            page + 1,
            plan.target.source,
            plan.placements.len()
        );
        plans.push(plan);
    }
    info!(
        "planned {} sheet(s) of {} image(s) each",
        plans.len(),
        args.images_per_page
    );

    render_document(&plans, &paths, &args.text, &args.out)
        .with_context(|| format!("cannot write {}", args.out.display()))?;
    Ok(())
}

/// Gather supported images from files and directories, deduplicated and
/// sorted so source indices are stable across runs.
fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    for input in inputs {
        if input.is_file() {
            if !is_supported_image(input) {
                bail!("{} is not a supported image", input.display());
            }
            found.insert(input.clone());
            continue;
        }
        for entry in WalkDir::new(input).follow_links(false) {
            let entry = entry.with_context(|| format!("cannot walk {}", input.display()))?;
            if entry.file_type().is_file() && is_supported_image(entry.path()) {
                found.insert(entry.into_path());
            }
        }
    }
    Ok(found.into_iter().collect())
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Probe every collected path, keeping indices aligned with the path table.
fn probe_pool(paths: &[PathBuf]) -> Result<Vec<Motif>> {
    let mut pool = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let aspect =
            probe_aspect(path).with_context(|| format!("cannot probe {}", path.display()))?;
        pool.push(Motif::new(SourceId(i), aspect));
    }
    Ok(pool)
}
