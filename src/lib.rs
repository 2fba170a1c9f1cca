//! # img2docx
//!
//! Lay out a folder of field photos as a captioned, borderless Word table.
//!
//! ## Why this crate?
//!
//! Inspection and measurement reports are tedious to assemble by hand:
//! dozens of photos must be ordered by the mileage encoded in their file
//! names, resized to a uniform cell, and numbered with a fixed caption
//! pattern. Doing that in a word processor takes an afternoon and is wrong
//! by the second revision. This crate does the whole layout in one pass and
//! writes a ready-to-submit `.docx`.
//!
//! ## Pipeline Overview
//!
//! ```text
//! photos/
//!  │
//!  ├─ 1. Scan       enumerate one directory, derive sort keys from names
//!  ├─ 2. Order      ascending (mileage, curve number, text) — total order
//!  ├─ 3. Number     global 1-based counter + repeating 1-2-3 cycle marker
//!  ├─ 4. Normalize  scale-to-fit + centred letterbox on a 220 DPI canvas
//!  ├─ 5. Assemble   two-per-row borderless table, captions beneath images
//!  └─ 6. Output     single .docx at the caller-supplied path
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use img2docx::{generate, ReportConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReportConfig::default();
//!     let stats = generate("./photos", "./图片汇总.docx", &config)?;
//!     eprintln!("{} images in {} rows", stats.total_images, stats.total_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## File-name convention
//!
//! `<mileage>-<curve>.<ext>`, e.g. `K7+250-2.jpg`: the part before the first
//! `-` appears verbatim in the caption and is ranked by its first numeric
//! token; the part after is an integer tiebreaker. Names that don't follow
//! the convention are still laid out — they sort last instead of erroring.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `img2docx` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! img2docx = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ReportConfig, ReportConfigBuilder, DEFAULT_CAPTION_PREFIX, DEFAULT_CAPTION_SUFFIX,
    DEFAULT_HEIGHT_CM, DEFAULT_OUTPUT_NAME, DEFAULT_PER_ROW, DEFAULT_WIDTH_CM,
};
pub use error::ReportError;
pub use generate::generate;
pub use output::ReportStats;
pub use pipeline::scan::{ImageItem, SUPPORTED_EXTENSIONS};
pub use progress::{NoopProgressCallback, ProgressCallback, ReportProgressCallback};
