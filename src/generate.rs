//! Top-level generation entry point.
//!
//! Runs the whole pipeline eagerly and synchronously: discovery → sort →
//! numbering → row chunking → per-image normalize-and-place → save. There is
//! no internal parallelism and no cancellation; a host wanting a responsive
//! front-end runs this on a worker thread and discards the worker to cancel.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::output::ReportStats;
use crate::pipeline::{assemble, layout, scan};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Generate a photo report document.
///
/// This is the primary entry point for the library.
///
/// # Arguments
/// * `image_dir`   — directory whose direct children are the input photos
/// * `output_path` — where the `.docx` is written (parent must exist)
/// * `config`      — layout configuration and optional progress callback
///
/// # Returns
/// `Ok(ReportStats)` once the document is on disk. The artifact at
/// `output_path` is the primary success signal.
///
/// # Errors
/// * [`ReportError::DirectoryNotFound`] / [`ReportError::NoImagesFound`] —
///   raised before any output file is created
/// * [`ReportError::ImageDecodeFailed`] — any undecodable photo aborts the
///   whole run; partial documents are not produced
/// * [`ReportError::OutputWriteFailed`] — the final save failed
pub fn generate(
    image_dir: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ReportConfig,
) -> Result<ReportStats, ReportError> {
    let total_start = Instant::now();
    let image_dir = image_dir.as_ref();
    let output_path = output_path.as_ref();
    info!("Generating report from {}", image_dir.display());

    // ── Step 1: Discover and order ───────────────────────────────────────
    let items = scan::scan_directory(image_dir)?;
    let total = items.len();
    info!("Discovered {} images", total);

    if let Some(cb) = &config.progress_callback {
        cb.on_report_start(total);
    }

    // ── Step 2: Number and chunk (pure, no I/O) ──────────────────────────
    let captioned = layout::number_images(&items, config);
    let rows = layout::partition_rows(captioned, config.per_row);
    let total_rows = rows.len();

    // ── Step 3: Normalize, place, finalize ───────────────────────────────
    let assemble_start = Instant::now();
    let document = assemble::build_document(&rows, config, total)?;
    let assemble_duration_ms = assemble_start.elapsed().as_millis() as u64;

    // ── Step 4: Persist ──────────────────────────────────────────────────
    assemble::save_document(document, output_path)?;

    if let Some(cb) = &config.progress_callback {
        cb.on_report_complete(total);
    }

    let stats = ReportStats {
        total_images: total,
        total_rows,
        assemble_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };
    info!(
        "Report complete: {} images in {} rows, {}ms → {}",
        stats.total_images,
        stats.total_rows,
        stats.total_duration_ms,
        output_path.display()
    );
    Ok(stats)
}
