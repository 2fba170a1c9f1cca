//! Canvas normalization: one photo → one fixed-size letterboxed PNG.
//!
//! Every cell in the output table embeds a canvas of exactly the same pixel
//! size, computed from the configured centimetre dimensions at 220 DPI.
//! The source photo is scaled down (never up) to fit, resampled with
//! Lanczos3, and pasted centred on a white background. Uniform canvases are
//! what keep the grid visually aligned regardless of what aspect ratios the
//! camera produced.
//!
//! ## Why the `png` crate and not `image`'s encoder?
//!
//! Word reads the embedded stream's density tag when deciding how to map
//! pixels to physical size. The `image` crate cannot write a pHYs chunk, so
//! the canvas is encoded with the `png` crate directly and tagged 220 DPI on
//! both axes.

use crate::error::ReportError;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use std::path::Path;
use tracing::debug;

/// Rendering density of every canvas, in dots per inch.
pub const CANVAS_DPI: u32 = 220;

const CM_PER_INCH: f64 = 2.54;

/// 220 DPI expressed as pixels per metre, for the PNG pHYs chunk.
const PIXELS_PER_METRE: u32 = 8661;

/// A finished canvas: exact-size PNG bytes ready for embedding.
///
/// Owned by the producing call; the assembler consumes it and the buffer is
/// dropped once embedded.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// PNG-encoded RGB pixels, tagged 220 DPI on both axes.
    pub png: Vec<u8>,
    /// Canvas width in pixels.
    pub width_px: u32,
    /// Canvas height in pixels.
    pub height_px: u32,
}

/// Convert a physical length to canvas pixels at 220 DPI.
///
/// `7.6` cm → `658` px; `4.7` cm → `407` px.
pub fn cm_to_px(cm: f32) -> u32 {
    let px = (f64::from(cm) / CM_PER_INCH * f64::from(CANVAS_DPI)).round() as u32;
    px.max(1)
}

/// Fit a source rectangle into a destination box without upscaling.
///
/// Returns `(width, height, x_offset, y_offset)` of the pasted region:
/// dimensions are the source scaled by `min(dst_w/src_w, dst_h/src_h, 1.0)`
/// and rounded (floor 1 px per axis); offsets centre the region with integer
/// floor division.
pub fn fit_rect(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, i64, i64) {
    let scale = (f64::from(dst_w) / f64::from(src_w))
        .min(f64::from(dst_h) / f64::from(src_h))
        .min(1.0);
    let w = ((f64::from(src_w) * scale).round() as u32).max(1);
    let h = ((f64::from(src_h) * scale).round() as u32).max(1);
    let x = i64::from((dst_w - w) / 2);
    let y = i64::from((dst_h - h) / 2);
    (w, h, x, y)
}

/// Load `path` and produce its normalized canvas.
///
/// # Errors
/// [`ReportError::ImageDecodeFailed`] when the file cannot be decoded —
/// fatal for the whole run, a partial document is not acceptable output.
pub fn render_canvas(path: &Path, width_cm: f32, height_cm: f32) -> Result<Canvas, ReportError> {
    let decoded = image::open(path).map_err(|e| ReportError::ImageDecodeFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let src = decoded.to_rgb8();

    let dst_w = cm_to_px(width_cm);
    let dst_h = cm_to_px(height_cm);
    let (new_w, new_h, off_x, off_y) = fit_rect(src.width(), src.height(), dst_w, dst_h);

    let resized = imageops::resize(&src, new_w, new_h, FilterType::Lanczos3);
    let mut canvas = RgbImage::from_pixel(dst_w, dst_h, Rgb([255, 255, 255]));
    imageops::replace(&mut canvas, &resized, off_x, off_y);

    debug!(
        "Normalized {} ({}x{} → {}x{} on {}x{})",
        path.display(),
        src.width(),
        src.height(),
        new_w,
        new_h,
        dst_w,
        dst_h
    );

    let png = encode_png(&canvas)?;
    Ok(Canvas {
        png,
        width_px: dst_w,
        height_px: dst_h,
    })
}

/// Encode the canvas as a single-frame PNG tagged 220 DPI on both axes.
fn encode_png(canvas: &RgbImage) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: PIXELS_PER_METRE,
            yppu: PIXELS_PER_METRE,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder
            .write_header()
            .map_err(|e| ReportError::Internal(format!("PNG header: {e}")))?;
        writer
            .write_image_data(canvas.as_raw())
            .map_err(|e| ReportError::Internal(format!("PNG encode: {e}")))?;
    }
    Ok(buf)
}
