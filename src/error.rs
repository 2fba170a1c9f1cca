//! Error types for the img2docx library.
//!
//! Everything here is **fatal**: the pipeline either produces a complete
//! document or nothing. A photo that fails to decode aborts the whole run
//! rather than being skipped — a report with silently missing images is
//! worse than no report.
//!
//! Malformed *file names* are deliberately not errors. A name the mileage
//! parser cannot rank still produces an item — it just sorts last via the
//! infinity sentinel (see [`crate::pipeline::scan`]). "Cannot rank precisely"
//! and "invalid input" are different things.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the img2docx library.
#[derive(Debug, Error)]
pub enum ReportError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The image directory does not exist (or is not a directory).
    #[error("Image directory not found: '{path}'\nCheck the path exists and is a directory.")]
    DirectoryNotFound { path: PathBuf },

    /// The directory exists but holds no file with a supported extension.
    #[error("No supported image files were found in '{path}'\nSupported extensions: jpg, jpeg, png, bmp, gif, tif, tiff, webp.")]
    NoImagesFound { path: PathBuf },

    // ── Image errors ──────────────────────────────────────────────────────
    /// A file matched a supported extension but could not be decoded.
    #[error("Failed to decode image '{path}': {detail}")]
    ImageDecodeFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {detail}")]
    OutputWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_not_found_display() {
        let e = ReportError::DirectoryNotFound {
            path: PathBuf::from("/tmp/missing"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/missing"), "got: {msg}");
        assert!(msg.contains("not found"), "got: {msg}");
    }

    #[test]
    fn no_images_found_lists_extensions() {
        let e = ReportError::NoImagesFound {
            path: PathBuf::from("/tmp/empty"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/empty"));
        assert!(msg.contains("webp"), "extension list should be shown: {msg}");
    }

    #[test]
    fn decode_failure_carries_detail() {
        let e = ReportError::ImageDecodeFailed {
            path: PathBuf::from("10-1.jpg"),
            detail: "unexpected EOF".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("10-1.jpg"));
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn output_write_failure_carries_cause() {
        let e = ReportError::OutputWriteFailed {
            path: PathBuf::from("out.docx"),
            detail: "permission denied".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("out.docx"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn invalid_config_display() {
        let e = ReportError::InvalidConfig("per_row must be >= 1".into());
        assert!(e.to_string().contains("per_row"));
    }
}
