//! Thumbnail generation over a directory.
//!
//! Lists the top level of the source directory, and for every regular file
//! decodes it, computes the crop geometry, and writes a derivative of exactly
//! the target size into the output directory.
//!
//! ## Failure model
//!
//! Files the codec does not recognize as images are skipped and reported as
//! [`ProcessEvent::Skipped`]; the run carries on. Every other failure (I/O,
//! encoding, an unreadable directory) aborts the run with a [`ProcessError`].
//!
//! ## Output Structure
//!
//! ```text
//! static/gallery/             static/gallery_thumb/
//! ├── wide.jpg   (800x400)    ├── wide_thumb.jpeg    (400x400)
//! ├── tall.jpg   (400x800) →  ├── tall_thumb.jpeg    (400x400)
//! ├── square.jpg (500x500)    └── square_thumb.jpeg  (400x400)
//! └── notes.txt  (skipped)
//! ```
//!
//! Subdirectories are not entered. Entries are handled one at a time in file
//! name order; each decoded image is dropped before the next file is opened.

use crate::imaging::{
    BackendError, Dimensions, Geometry, ImageBackend, OutputFormat, Quality, ResampleFilter,
    RustBackend, create_thumbnail, plan_thumbnail,
};
use crate::naming::Naming;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot list source directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
}

/// Everything one run needs. Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct TargetSpec {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Exact size of every thumbnail.
    pub size: Dimensions,
    pub format: OutputFormat,
    /// Encoding quality for lossy formats.
    pub quality: Quality,
    pub filter: ResampleFilter,
    pub naming: Naming,
    /// Report skipped files and pause at the end of the run.
    pub verbose: bool,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("static/gallery"),
            output_dir: PathBuf::from("static/gallery_thumb"),
            size: Dimensions::new(400, 400),
            format: OutputFormat::default(),
            quality: Quality::default(),
            filter: ResampleFilter::default(),
            naming: Naming::Default,
            verbose: false,
        }
    }
}

/// Progress events emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started {
        source_dir: PathBuf,
        output_dir: PathBuf,
        entry_count: usize,
    },
    ThumbnailWritten(WrittenThumbnail),
    Skipped(SkippedEntry),
}

/// One derivative on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenThumbnail {
    pub source: String,
    pub output: String,
    pub original: Dimensions,
    pub geometry: Geometry,
}

/// A file that was not turned into a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub source: String,
    pub reason: String,
}

/// Outcome of a full run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub written: Vec<WrittenThumbnail>,
    pub skipped: Vec<SkippedEntry>,
}

/// What `generate` would do for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedEntry {
    Thumbnail {
        source: String,
        output: String,
        original: Dimensions,
        geometry: Geometry,
    },
    Skip(SkippedEntry),
}

/// Top-level regular files of `dir`, sorted by name.
fn list_entries(dir: &Path) -> Result<Vec<(PathBuf, String)>, ProcessError> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            debug!("ignoring non-file entry {}", entry.path().display());
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((entry.into_path(), name));
    }
    Ok(entries)
}

fn emit(progress: &Option<Sender<ProcessEvent>>, event: ProcessEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only means nobody is listening.
        let _ = tx.send(event);
    }
}

impl TargetSpec {
    fn backend(&self) -> RustBackend {
        RustBackend::new(self.filter, self.quality)
    }
}

/// Generate thumbnails with the `image`-crate backend.
pub fn generate(
    spec: &TargetSpec,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<GenerateReport, ProcessError> {
    generate_with_backend(&spec.backend(), spec, progress)
}

/// Generate thumbnails using a specific backend (allows testing with mock).
pub fn generate_with_backend<B: ImageBackend>(
    backend: &B,
    spec: &TargetSpec,
    progress: Option<Sender<ProcessEvent>>,
) -> Result<GenerateReport, ProcessError> {
    if !spec.output_dir.is_dir() {
        info!("creating output directory {}", spec.output_dir.display());
    }
    std::fs::create_dir_all(&spec.output_dir)?;

    let entries = list_entries(&spec.source_dir)?;
    emit(
        &progress,
        ProcessEvent::Started {
            source_dir: spec.source_dir.clone(),
            output_dir: spec.output_dir.clone(),
            entry_count: entries.len(),
        },
    );

    let mut report = GenerateReport::default();

    for (path, name) in entries {
        let output_name = spec.naming.thumbnail_name(&name, &spec.format);
        let output_path = spec.output_dir.join(&output_name);

        match create_thumbnail(backend, &path, &output_path, spec.size, &spec.format) {
            Ok(created) => {
                debug!(
                    "{name}: {} {} → resize {} crop {}",
                    created.original,
                    created.geometry.orientation,
                    created.geometry.resize,
                    created.geometry.crop
                );
                let written = WrittenThumbnail {
                    source: name,
                    output: output_name,
                    original: created.original,
                    geometry: created.geometry,
                };
                emit(&progress, ProcessEvent::ThumbnailWritten(written.clone()));
                report.written.push(written);
            }
            Err(e) if e.is_unrecognized() => {
                info!("skipping {name}: {e}");
                let skipped = SkippedEntry {
                    source: name,
                    reason: e.to_string(),
                };
                emit(&progress, ProcessEvent::Skipped(skipped.clone()));
                report.skipped.push(skipped);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(report)
}

/// Dry run: compute what `generate` would write, without decoding pixels
/// or touching the output directory.
pub fn plan(spec: &TargetSpec) -> Result<Vec<PlannedEntry>, ProcessError> {
    plan_with_backend(&spec.backend(), spec)
}

/// Dry run using a specific backend.
pub fn plan_with_backend<B: ImageBackend>(
    backend: &B,
    spec: &TargetSpec,
) -> Result<Vec<PlannedEntry>, ProcessError> {
    let mut planned = Vec::new();

    for (path, name) in list_entries(&spec.source_dir)? {
        match plan_thumbnail(backend, &path, spec.size) {
            Ok((original, geometry)) => planned.push(PlannedEntry::Thumbnail {
                output: spec.naming.thumbnail_name(&name, &spec.format),
                source: name,
                original,
                geometry,
            }),
            Err(e) if e.is_unrecognized() => planned.push(PlannedEntry::Skip(SkippedEntry {
                source: name,
                reason: e.to_string(),
            })),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(planned)
}
