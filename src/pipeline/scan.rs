//! Directory scan: enumerate photos and derive their sort keys.
//!
//! File names carry the ordering. A name like `K100+200-3.jpg` means
//! "mileage text `K100+200`, curve number 3": the stem splits on the first
//! `-`, the left side is kept verbatim for the caption, and the first numeric
//! token inside it ranks the photo along the alignment.
//!
//! ## Why sentinels instead of errors?
//!
//! Field photos get renamed by hand, and a batch usually contains a few
//! stragglers (`IMG_2041.jpg`, `扫描件.png`). Rejecting them would make the
//! whole folder unusable; ranking them precisely is impossible. So a stem
//! with no numeric token sorts last (`mileage_value = +∞`) and a missing or
//! unparsable curve number becomes `0`. The only hard errors are a missing
//! directory and a directory with nothing to lay out.

use crate::error::ReportError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions (lower-case) the scanner accepts. Matching is
/// case-insensitive; anything else in the directory is ignored.
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff", "webp"];

/// First run of digits, optionally with a decimal part.
static MILEAGE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("static regex"));

/// One input photograph with its derived sort keys.
///
/// Constructed once during the directory scan and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ImageItem {
    /// Filesystem location.
    pub path: PathBuf,
    /// Stem text before the first `-`, trimmed; the whole trimmed stem when
    /// there is no `-`. Used verbatim in the caption.
    pub mileage_text: String,
    /// First numeric token in `mileage_text`, or `+∞` when none exists.
    pub mileage_value: f64,
    /// Integer after the first `-`, or `0` when absent or unparsable.
    pub y_value: i64,
}

impl ImageItem {
    fn from_path(path: PathBuf) -> Self {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let (mileage_text, y_value) = split_stem(stem);
        let mileage_value = parse_mileage(&mileage_text);
        Self {
            path,
            mileage_text,
            mileage_value,
            y_value,
        }
    }
}

/// Split an extension-stripped file name into `(mileage_text, y_value)`.
fn split_stem(stem: &str) -> (String, i64) {
    match stem.split_once('-') {
        Some((mileage, y)) => {
            let y_value = y.trim().parse().unwrap_or(0);
            (mileage.trim().to_string(), y_value)
        }
        None => (stem.trim().to_string(), 0),
    }
}

/// Extract the ranking value from a mileage text.
///
/// `"K100+200.5"` → `100.0`; `"75.4"` → `75.4`; `"abc"` → `+∞`.
pub fn parse_mileage(text: &str) -> f64 {
    MILEAGE_TOKEN
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::INFINITY)
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        })
        .unwrap_or(false)
}

/// Enumerate the direct children of `dir` and return them sorted.
///
/// The order is ascending `(mileage_value, y_value, mileage_text)` — a total
/// order, so any input set (including duplicate or malformed names) comes
/// out in a deterministic, reproducible sequence. Items without a numeric
/// token land at the end via the infinity sentinel.
///
/// # Errors
/// * [`ReportError::DirectoryNotFound`] — `dir` is missing or not a directory.
/// * [`ReportError::NoImagesFound`] — no supported file in the directory.
pub fn scan_directory(dir: &Path) -> Result<Vec<ImageItem>, ReportError> {
    if !dir.is_dir() {
        return Err(ReportError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| ReportError::Internal(format!("read_dir {}: {e}", dir.display())))?;

    let mut items = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| ReportError::Internal(format!("directory entry: {e}")))?;
        let path = entry.path();
        if !path.is_file() || !is_supported(&path) {
            continue;
        }
        items.push(ImageItem::from_path(path));
    }

    if items.is_empty() {
        return Err(ReportError::NoImagesFound {
            path: dir.to_path_buf(),
        });
    }

    // total_cmp: infinity sorts last; NaN is unreachable (the token regex
    // never parses to NaN).
    items.sort_by(|a, b| {
        a.mileage_value
            .total_cmp(&b.mileage_value)
            .then_with(|| a.y_value.cmp(&b.y_value))
            .then_with(|| a.mileage_text.cmp(&b.mileage_text))
    });

    debug!("Scanned {}: {} images", dir.display(), items.len());
    Ok(items)
}
