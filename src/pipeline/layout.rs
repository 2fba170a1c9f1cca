//! Layout: caption numbering and row partitioning.
//!
//! This stage is pure data — no I/O, no table objects. The sorted item
//! sequence goes through a flattening pass that assigns each image its
//! global number, cycle marker, and caption string, then gets chunked into
//! logical rows. Keeping the numbering math out of the table emission means
//! both can be tested on plain vectors.

use crate::config::ReportConfig;
use crate::pipeline::scan::ImageItem;

/// One image with its assigned caption, ready for placement.
#[derive(Debug, Clone)]
pub struct CaptionedImage {
    /// The scanned source item.
    pub item: ImageItem,
    /// 1-based position in final output order. A single global counter —
    /// independent of row or column.
    pub number: usize,
    /// Repeating 1-2-3 marker derived from `number`.
    pub cycle: usize,
    /// Full caption text placed beneath the image.
    pub caption: String,
}

/// One logical table row: up to `per_row` images in sequence order.
#[derive(Debug, Clone)]
pub struct LogicalRow {
    pub images: Vec<CaptionedImage>,
}

/// The 1-2-3 cycle marker for a 1-based image number.
pub fn cycle_marker(number: usize) -> usize {
    (number - 1) % 3 + 1
}

/// Format the caption for one image.
///
/// Pattern: `{prefix}{n} {mileage_text}S{c}{suffix}`, e.g.
/// `图5.6-1 100S1沉降曲线` with the default prefix and suffix.
pub fn format_caption(config: &ReportConfig, number: usize, mileage_text: &str) -> String {
    format!(
        "{}{} {}S{}{}",
        config.caption_prefix,
        number,
        mileage_text,
        cycle_marker(number),
        config.caption_suffix
    )
}

/// Flattening pass: assign `(number, cycle, caption)` to every item in
/// sequence order, before any table structure exists.
pub fn number_images(items: &[ImageItem], config: &ReportConfig) -> Vec<CaptionedImage> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let number = idx + 1;
            CaptionedImage {
                item: item.clone(),
                number,
                cycle: cycle_marker(number),
                caption: format_caption(config, number, &item.mileage_text),
            }
        })
        .collect()
}

/// Chunk the numbered sequence into logical rows of `per_row` images.
///
/// The final row may be shorter; its remaining cells stay empty — items are
/// never reflowed forward to fill a gap.
pub fn partition_rows(images: Vec<CaptionedImage>, per_row: usize) -> Vec<LogicalRow> {
    images
        .chunks(per_row.max(1))
        .map(|chunk| LogicalRow {
            images: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn items(n: usize) -> Vec<ImageItem> {
        (0..n)
            .map(|i| ImageItem {
                path: PathBuf::from(format!("{i}.jpg")),
                mileage_text: format!("{}", 100 + i),
                mileage_value: (100 + i) as f64,
                y_value: 0,
            })
            .collect()
    }

    #[test]
    fn numbering_is_contiguous_in_input_order() {
        let config = ReportConfig::default();
        let numbered = number_images(&items(7), &config);
        let ns: Vec<usize> = numbered.iter().map(|c| c.number).collect();
        assert_eq!(ns, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn cycle_repeats_one_two_three() {
        let config = ReportConfig::default();
        let numbered = number_images(&items(7), &config);
        let cs: Vec<usize> = numbered.iter().map(|c| c.cycle).collect();
        assert_eq!(cs, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[test]
    fn caption_matches_fixed_pattern() {
        let config = ReportConfig::default();
        assert_eq!(format_caption(&config, 1, "100"), "图5.6-1 100S1沉降曲线");
        assert_eq!(format_caption(&config, 5, "K7+250"), "图5.6-5 K7+250S2沉降曲线");
    }

    #[test]
    fn caption_uses_configured_prefix_and_suffix() {
        let config = ReportConfig::builder()
            .caption_prefix("图2-")
            .caption_suffix("断面图")
            .build()
            .unwrap();
        assert_eq!(format_caption(&config, 3, "55"), "图2-3 55S3断面图");
    }

    #[test]
    fn five_images_partition_as_2_2_1() {
        let config = ReportConfig::default();
        let rows = partition_rows(number_images(&items(5), &config), 2);
        let sizes: Vec<usize> = rows.iter().map(|r| r.images.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        // Row membership [1,2],[3,4],[5] — never reflowed.
        assert_eq!(rows[2].images[0].number, 5);
    }

    #[test]
    fn exact_multiple_has_no_partial_row() {
        let config = ReportConfig::default();
        let rows = partition_rows(number_images(&items(4), &config), 2);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.images.len() == 2));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let rows = partition_rows(Vec::new(), 2);
        assert!(rows.is_empty());
    }

    #[test]
    fn numbering_is_independent_of_partitioning() {
        let config = ReportConfig::default();
        let numbered = number_images(&items(6), &config);
        let rows = partition_rows(numbered, 3);
        let flat: Vec<usize> = rows
            .iter()
            .flat_map(|r| r.images.iter().map(|c| c.number))
            .collect();
        assert_eq!(flat, vec![1, 2, 3, 4, 5, 6]);
    }
}
