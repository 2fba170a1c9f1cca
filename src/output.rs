//! Result types returned by a successful generation run.

use serde::{Deserialize, Serialize};

/// Summary statistics for one generation run.
///
/// The written `.docx` is the primary output; these numbers exist for the
/// CLI summary line and for hosts that log runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Images discovered and embedded (always equal — a decode failure
    /// aborts the run instead of shrinking this count).
    pub total_images: usize,
    /// Logical table rows produced (`ceil(total_images / per_row)`).
    pub total_rows: usize,
    /// Wall-clock time spent normalizing images and building the table.
    pub assemble_duration_ms: u64,
    /// Wall-clock time for the whole run including the final save.
    pub total_duration_ms: u64,
}
