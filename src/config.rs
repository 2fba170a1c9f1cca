//! Configuration for report generation.
//!
//! All behaviour is controlled through [`ReportConfig`], built via its
//! [`ReportConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config across threads and to diff two runs when their outputs
//! differ.

use crate::error::ReportError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Default number of images per table row.
pub const DEFAULT_PER_ROW: usize = 2;

/// Default image cell width in centimetres.
pub const DEFAULT_WIDTH_CM: f32 = 7.6;

/// Default image cell height in centimetres.
pub const DEFAULT_HEIGHT_CM: f32 = 4.7;

/// Default caption text placed before the running number.
pub const DEFAULT_CAPTION_PREFIX: &str = "图5.6-";

/// Default caption text placed after the cycle marker.
pub const DEFAULT_CAPTION_SUFFIX: &str = "沉降曲线";

/// Default output file name when the caller does not supply one.
pub const DEFAULT_OUTPUT_NAME: &str = "图片汇总.docx";

/// Configuration for one report generation run.
///
/// Built via [`ReportConfig::builder()`] or [`ReportConfig::default()`].
///
/// # Example
/// ```rust
/// use img2docx::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .per_row(3)
///     .width_cm(5.0)
///     .build()
///     .unwrap();
/// assert_eq!(config.per_row, 3);
/// ```
#[derive(Clone)]
pub struct ReportConfig {
    /// Images per logical table row. Default: 2.
    ///
    /// The table gets `2 * per_row - 1` columns — image columns separated by
    /// gap columns. The last logical row may hold fewer images; its trailing
    /// cells stay empty rather than pulling items forward.
    pub per_row: usize,

    /// Image cell width in centimetres. Default: 7.6.
    pub width_cm: f32,

    /// Image cell height in centimetres. Default: 4.7.
    pub height_cm: f32,

    /// Caption text before the running number. Default: `图5.6-`.
    ///
    /// The full caption pattern is
    /// `{prefix}{n} {mileage_text}S{c}{suffix}` where `n` is the 1-based
    /// global counter and `c = (n - 1) % 3 + 1`.
    pub caption_prefix: String,

    /// Caption text after the cycle marker. Default: `沉降曲线`.
    pub caption_suffix: String,

    /// Optional progress callback, fired once per placed image.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            per_row: DEFAULT_PER_ROW,
            width_cm: DEFAULT_WIDTH_CM,
            height_cm: DEFAULT_HEIGHT_CM,
            caption_prefix: DEFAULT_CAPTION_PREFIX.to_string(),
            caption_suffix: DEFAULT_CAPTION_SUFFIX.to_string(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportConfig")
            .field("per_row", &self.per_row)
            .field("width_cm", &self.width_cm)
            .field("height_cm", &self.height_cm)
            .field("caption_prefix", &self.caption_prefix)
            .field("caption_suffix", &self.caption_suffix)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ReportConfig {
    /// Create a new builder for `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn per_row(mut self, n: usize) -> Self {
        self.config.per_row = n;
        self
    }

    pub fn width_cm(mut self, cm: f32) -> Self {
        self.config.width_cm = cm;
        self
    }

    pub fn height_cm(mut self, cm: f32) -> Self {
        self.config.height_cm = cm;
        self
    }

    pub fn caption_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.caption_prefix = prefix.into();
        self
    }

    pub fn caption_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.config.caption_suffix = suffix.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReportConfig, ReportError> {
        let c = &self.config;
        if c.per_row == 0 {
            return Err(ReportError::InvalidConfig("per_row must be >= 1".into()));
        }
        if !(c.width_cm.is_finite() && c.width_cm > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "width_cm must be a positive number, got {}",
                c.width_cm
            )));
        }
        if !(c.height_cm.is_finite() && c.height_cm > 0.0) {
            return Err(ReportError::InvalidConfig(format!(
                "height_cm must be a positive number, got {}",
                c.height_cm
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = ReportConfig::default();
        assert_eq!(c.per_row, 2);
        assert_eq!(c.width_cm, 7.6);
        assert_eq!(c.height_cm, 4.7);
        assert_eq!(c.caption_prefix, "图5.6-");
        assert_eq!(c.caption_suffix, "沉降曲线");
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn builder_round_trips_fields() {
        let c = ReportConfig::builder()
            .per_row(4)
            .width_cm(5.0)
            .height_cm(3.5)
            .caption_prefix("图1-")
            .caption_suffix("断面")
            .build()
            .expect("valid config");
        assert_eq!(c.per_row, 4);
        assert_eq!(c.width_cm, 5.0);
        assert_eq!(c.caption_prefix, "图1-");
        assert_eq!(c.caption_suffix, "断面");
    }

    #[test]
    fn zero_per_row_is_rejected() {
        let err = ReportConfig::builder().per_row(0).build().unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        assert!(ReportConfig::builder().width_cm(0.0).build().is_err());
        assert!(ReportConfig::builder().height_cm(-1.0).build().is_err());
        assert!(ReportConfig::builder().width_cm(f32::NAN).build().is_err());
    }
}
