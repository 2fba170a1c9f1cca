//! Progress-callback trait for per-image placement events.
//!
//! Inject an [`Arc<dyn ReportProgressCallback>`] via
//! [`crate::config::ReportConfigBuilder::progress_callback`] to receive an
//! event each time an image lands in the output table.
//!
//! The callback approach keeps the library ignorant of how a host
//! communicates: a terminal progress bar, a GUI status line updated from a
//! worker thread, or a plain counter all plug in the same way. The trait is
//! `Send + Sync` so a host may run the whole pipeline on a background worker
//! and forward events to its foreground context — marshalling onto that
//! context is entirely the host's responsibility; the library calls the
//! methods synchronously on whatever thread runs the pipeline.
//!
//! # Example
//!
//! ```rust
//! use img2docx::{ReportConfig, ReportProgressCallback};
//! use std::sync::Arc;
//!
//! struct PrintingCallback;
//!
//! impl ReportProgressCallback for PrintingCallback {
//!     fn on_image_placed(&self, done: usize, total: usize) {
//!         eprintln!("placed {done}/{total}");
//!     }
//! }
//!
//! let config = ReportConfig::builder()
//!     .progress_callback(Arc::new(PrintingCallback))
//!     .build()
//!     .unwrap();
//! # let _ = config;
//! ```

use std::sync::Arc;

/// Called by the pipeline as each image is placed into the document.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
///
/// # Guarantees
///
/// * `on_image_placed(done, total)` fires exactly once per image,
///   synchronously, immediately after that image's canvas **and** caption
///   are committed to the table — never before, never batched.
/// * `done` increases monotonically from 1 to `total`; `total` is fixed for
///   the whole run (the count of discovered images).
pub trait ReportProgressCallback: Send + Sync {
    /// Called once after discovery, before any image is processed.
    fn on_report_start(&self, total_images: usize) {
        let _ = total_images;
    }

    /// Called once per image, after its canvas and caption are committed.
    fn on_image_placed(&self, done: usize, total: usize) {
        let _ = (done, total);
    }

    /// Called once after the document has been written to disk.
    fn on_report_complete(&self, total_images: usize) {
        let _ = total_images;
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ReportProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ReportConfig`].
pub type ProgressCallback = Arc<dyn ReportProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct TrackingCallback {
        started_total: AtomicUsize,
        placements: Mutex<Vec<(usize, usize)>>,
        completed_total: AtomicUsize,
    }

    impl ReportProgressCallback for TrackingCallback {
        fn on_report_start(&self, total_images: usize) {
            self.started_total.store(total_images, Ordering::SeqCst);
        }

        fn on_image_placed(&self, done: usize, total: usize) {
            self.placements.lock().unwrap().push((done, total));
        }

        fn on_report_complete(&self, total_images: usize) {
            self.completed_total.store(total_images, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_report_start(5);
        cb.on_image_placed(1, 5);
        cb.on_report_complete(5);
    }

    #[test]
    fn tracking_callback_receives_events_in_order() {
        let tracker = TrackingCallback {
            started_total: AtomicUsize::new(0),
            placements: Mutex::new(vec![]),
            completed_total: AtomicUsize::new(0),
        };

        tracker.on_report_start(3);
        tracker.on_image_placed(1, 3);
        tracker.on_image_placed(2, 3);
        tracker.on_image_placed(3, 3);
        tracker.on_report_complete(3);

        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);
        assert_eq!(
            tracker.placements.lock().unwrap().clone(),
            vec![(1, 3), (2, 3), (3, 3)]
        );
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: Arc<dyn ReportProgressCallback> = Arc::new(NoopProgressCallback);
        cb.on_report_start(10);
        cb.on_image_placed(1, 10);
        cb.on_report_complete(10);
    }

    #[test]
    fn callback_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoopProgressCallback>();
        assert_send_sync::<ProgressCallback>();
    }
}
