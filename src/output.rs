//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! static/gallery → static/gallery_thumb (4 files)
//!     square.jpg → square_thumb.jpeg
//!     tall.jpg → tall_thumb.jpeg
//!     wide.jpg → wide_thumb.jpeg
//!
//! Generated 3 thumbnails, skipped 1 file
//! ```
//!
//! Skipped files only show up in verbose mode:
//!
//! ```text
//!     notes.txt: skipped (cannot identify image file static/gallery/notes.txt: ...)
//! ```
//!
//! ## Plan
//!
//! ```text
//! wide.jpg → wide_thumb.jpeg
//!     800x400 landscape
//!     Resize: 800x400
//!     Crop: (200, 0, 600, 400)
//! notes.txt: skip
//!     cannot identify image file ...
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and, where useful, a `print_*` wrapper that writes to stdout.
//! Format functions are pure — no I/O, no side effects.

use crate::process::{GenerateReport, PlannedEntry, ProcessEvent};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 file`, `2 files`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// Generate output
// ============================================================================

/// Format a single progress event as display lines.
///
/// Skip events produce nothing unless `verbose` is set.
pub fn format_process_event(event: &ProcessEvent, verbose: bool) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            source_dir,
            output_dir,
            entry_count,
        } => vec![format!(
            "{} → {} ({})",
            source_dir.display(),
            output_dir.display(),
            plural(*entry_count, "file")
        )],
        ProcessEvent::ThumbnailWritten(written) => vec![format!(
            "{}{} → {}",
            indent(1),
            written.source,
            written.output
        )],
        ProcessEvent::Skipped(skipped) if verbose => vec![format!(
            "{}{}: skipped ({})",
            indent(1),
            skipped.source,
            skipped.reason
        )],
        ProcessEvent::Skipped(_) => Vec::new(),
    }
}

/// One-line run summary.
pub fn format_summary(report: &GenerateReport) -> String {
    format!(
        "Generated {}, skipped {}",
        plural(report.written.len(), "thumbnail"),
        plural(report.skipped.len(), "file")
    )
}

// ============================================================================
// Plan output
// ============================================================================

/// Format a dry-run plan: one header per entry, geometry as context lines.
pub fn format_plan(entries: &[PlannedEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        match entry {
            PlannedEntry::Thumbnail {
                source,
                output,
                original,
                geometry,
            } => {
                lines.push(format!("{} → {}", source, output));
                lines.push(format!("{}{} {}", indent(1), original, geometry.orientation));
                lines.push(format!("{}Resize: {}", indent(1), geometry.resize));
                lines.push(format!("{}Crop: {}", indent(1), geometry.crop));
            }
            PlannedEntry::Skip(skipped) => {
                lines.push(format!("{}: skip", skipped.source));
                lines.push(format!("{}{}", indent(1), skipped.reason));
            }
        }
    }
    lines
}

/// Print plan output to stdout.
pub fn print_plan(entries: &[PlannedEntry]) {
    for line in format_plan(entries) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{CropRect, Dimensions, Geometry, Orientation};
    use crate::process::{SkippedEntry, WrittenThumbnail};
    use std::path::PathBuf;

    fn written(source: &str, output: &str) -> WrittenThumbnail {
        WrittenThumbnail {
            source: source.into(),
            output: output.into(),
            original: Dimensions::new(800, 400),
            geometry: wide_geometry(),
        }
    }

    fn wide_geometry() -> Geometry {
        Geometry {
            orientation: Orientation::Landscape,
            resize: Dimensions::new(800, 400),
            crop: CropRect {
                left: 200,
                top: 0,
                right: 600,
                bottom: 400,
            },
        }
    }

    fn skipped(source: &str) -> SkippedEntry {
        SkippedEntry {
            source: source.into(),
            reason: "unknown format".into(),
        }
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "    ");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(0, "file"), "0 files");
        assert_eq!(plural(1, "file"), "1 file");
        assert_eq!(plural(2, "file"), "2 files");
    }

    #[test]
    fn format_started() {
        let event = ProcessEvent::Started {
            source_dir: PathBuf::from("static/gallery"),
            output_dir: PathBuf::from("static/gallery_thumb"),
            entry_count: 4,
        };
        assert_eq!(
            format_process_event(&event, false),
            vec!["static/gallery → static/gallery_thumb (4 files)"]
        );
    }

    #[test]
    fn format_written() {
        let event = ProcessEvent::ThumbnailWritten(written("wide.jpg", "wide_thumb.jpeg"));
        assert_eq!(
            format_process_event(&event, false),
            vec!["    wide.jpg → wide_thumb.jpeg"]
        );
    }

    #[test]
    fn skipped_hidden_unless_verbose() {
        let event = ProcessEvent::Skipped(skipped("notes.txt"));
        assert!(format_process_event(&event, false).is_empty());
        assert_eq!(
            format_process_event(&event, true),
            vec!["    notes.txt: skipped (unknown format)"]
        );
    }

    #[test]
    fn summary_counts() {
        let report = GenerateReport {
            written: vec![
                written("a.jpg", "a_thumb.jpeg"),
                written("b.jpg", "b_thumb.jpeg"),
            ],
            skipped: vec![skipped("notes.txt")],
        };
        assert_eq!(
            format_summary(&report),
            "Generated 2 thumbnails, skipped 1 file"
        );
    }

    #[test]
    fn plan_lines() {
        let entries = vec![
            PlannedEntry::Thumbnail {
                source: "wide.jpg".into(),
                output: "wide_thumb.jpeg".into(),
                original: Dimensions::new(800, 400),
                geometry: wide_geometry(),
            },
            PlannedEntry::Skip(skipped("notes.txt")),
        ];
        assert_eq!(
            format_plan(&entries),
            vec![
                "wide.jpg → wide_thumb.jpeg",
                "    800x400 landscape",
                "    Resize: 800x400",
                "    Crop: (200, 0, 600, 400)",
                "notes.txt: skip",
                "    unknown format",
            ]
        );
    }
}
