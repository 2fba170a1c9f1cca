//! Document assembly: description list → borderless `docx-rs` table → disk.
//!
//! This is the only stage that touches persistent storage (the normalizer
//! reads source files; the save here writes the artifact). It consumes the
//! immutable row descriptions from [`crate::pipeline::layout`] in a single
//! finalization pass: per logical row it emits two physical table rows — one
//! carrying the embedded canvases, one carrying the captions — then
//! suppresses every table border and zeroes every cell margin so the grid
//! reads as free-floating images.
//!
//! The progress callback fires here, once per image, immediately after that
//! image's canvas cell and caption cell are both built — the table is the
//! unit of commitment, so this is the earliest point at which the image is
//! definitely in the document.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::pipeline::layout::LogicalRow;
use crate::pipeline::normalize::{self, Canvas};
use docx_rs::{
    AlignmentType, Docx, LineSpacing, PageMargin, Paragraph, Pic, Run, RunFonts, Table,
    TableAlignmentType, TableCell, TableCellMargins, TableLayoutType, TableRow, WidthType,
};
use std::fs::File;
use std::path::Path;
use tracing::debug;

// ── Page geometry ────────────────────────────────────────────────────────
// Fixed section margins and the assumed usable span the gap column is
// derived from. Values carried over from the report template this layout
// reproduces; the gap floor keeps the column valid even when the configured
// image width nearly fills the page.

const SIDE_MARGIN_CM: f32 = 2.76;
const PAGE_SPAN_CM: f32 = 11.70;
const MIN_GAP_CM: f32 = 0.1;

const TWIPS_PER_CM: f64 = 567.0;
const EMU_PER_CM: f64 = 360_000.0;

/// Caption font size in half-points (10.5 pt).
const CAPTION_SIZE_HALF_PT: usize = 21;
/// Spacing after an image paragraph, in twentieths of a point (2 pt).
const IMAGE_SPACE_AFTER: u32 = 40;

pub(crate) fn cm_to_twips(cm: f32) -> usize {
    (f64::from(cm) * TWIPS_PER_CM).round() as usize
}

fn cm_to_emu(cm: f32) -> u32 {
    (f64::from(cm) * EMU_PER_CM).round() as u32
}

/// Width of each gap column in centimetres.
pub(crate) fn gap_width_cm(width_cm: f32) -> f32 {
    (PAGE_SPAN_CM - SIDE_MARGIN_CM - width_cm).max(MIN_GAP_CM)
}

/// Column widths in centimetres: `per_row` image columns separated by gap
/// columns, `2 * per_row - 1` entries total.
pub(crate) fn column_widths_cm(config: &ReportConfig) -> Vec<f32> {
    let gap = gap_width_cm(config.width_cm);
    let mut widths = Vec::with_capacity(2 * config.per_row - 1);
    for col in 0..config.per_row {
        if col > 0 {
            widths.push(gap);
        }
        widths.push(config.width_cm);
    }
    widths
}

/// Build the complete in-memory document from the row descriptions.
///
/// Drives the normalizer per image cell and fires the progress callback
/// after each placement; `total` is the full discovered-image count so
/// `done` runs 1..=total across all rows.
pub fn build_document(
    rows: &[LogicalRow],
    config: &ReportConfig,
    total: usize,
) -> Result<Docx, ReportError> {
    let widths: Vec<usize> = column_widths_cm(config)
        .iter()
        .map(|&cm| cm_to_twips(cm))
        .collect();
    let pic_w = cm_to_emu(config.width_cm);
    let pic_h = cm_to_emu(config.height_cm);

    let mut table_rows = Vec::with_capacity(rows.len() * 2);
    let mut done = 0usize;

    for row in rows {
        let mut image_cells = Vec::with_capacity(widths.len());
        let mut caption_cells = Vec::with_capacity(widths.len());

        for (col, &width) in widths.iter().enumerate() {
            if col % 2 == 1 {
                image_cells.push(empty_cell(width));
                caption_cells.push(empty_cell(width));
                continue;
            }
            match row.images.get(col / 2) {
                Some(placed) => {
                    let canvas = normalize::render_canvas(
                        &placed.item.path,
                        config.width_cm,
                        config.height_cm,
                    )?;
                    image_cells.push(image_cell(width, &canvas, pic_w, pic_h));
                    caption_cells.push(caption_cell(width, &placed.caption));
                    done += 1;
                    debug!("Placed {} as #{}", placed.item.path.display(), placed.number);
                    if let Some(cb) = &config.progress_callback {
                        cb.on_image_placed(done, total);
                    }
                }
                None => {
                    image_cells.push(empty_cell(width));
                    caption_cells.push(empty_cell(width));
                }
            }
        }

        table_rows.push(TableRow::new(image_cells));
        table_rows.push(TableRow::new(caption_cells));
    }

    let table = Table::new(table_rows)
        .set_grid(widths)
        .layout(TableLayoutType::Fixed)
        .align(TableAlignmentType::Left)
        .margins(TableCellMargins::new().margin(0, 0, 0, 0))
        .clear_all_border();

    let margin = cm_to_twips(SIDE_MARGIN_CM) as i32;
    Ok(Docx::new()
        .page_margin(PageMargin::new().left(margin).right(margin))
        .add_table(table))
}

/// Write the finished document to `output_path`.
///
/// Creating missing parent directories is the caller's responsibility.
pub fn save_document(docx: Docx, output_path: &Path) -> Result<(), ReportError> {
    let file = File::create(output_path).map_err(|e| ReportError::OutputWriteFailed {
        path: output_path.to_path_buf(),
        detail: e.to_string(),
    })?;
    docx.build()
        .pack(file)
        .map_err(|e| ReportError::OutputWriteFailed {
            path: output_path.to_path_buf(),
            detail: e.to_string(),
        })?;
    debug!("Wrote {}", output_path.display());
    Ok(())
}

// ── Cell constructors ────────────────────────────────────────────────────

fn empty_cell(width: usize) -> TableCell {
    TableCell::new()
        .width(width, WidthType::Dxa)
        .add_paragraph(Paragraph::new())
}

fn image_cell(width: usize, canvas: &Canvas, pic_w: u32, pic_h: u32) -> TableCell {
    let run = Run::new().add_image(Pic::new(canvas.png.as_slice()).size(pic_w, pic_h));
    let paragraph = Paragraph::new()
        .align(AlignmentType::Center)
        .line_spacing(LineSpacing::new().before(0).after(IMAGE_SPACE_AFTER))
        .add_run(run);
    TableCell::new()
        .width(width, WidthType::Dxa)
        .add_paragraph(paragraph)
}

fn caption_cell(width: usize, caption: &str) -> TableCell {
    let run = Run::new()
        .add_text(caption)
        .size(CAPTION_SIZE_HALF_PT)
        .fonts(
            RunFonts::new()
                .ascii("Times New Roman")
                .hi_ansi("Times New Roman")
                .east_asia("宋体"),
        );
    let paragraph = Paragraph::new()
        .align(AlignmentType::Center)
        .line_spacing(LineSpacing::new().before(0).after(0))
        .add_run(run);
    TableCell::new()
        .width(width, WidthType::Dxa)
        .add_paragraph(paragraph)
}
