//! The in-memory report: an ordered list of styled blocks.
//!
//! Built once by the composer, serialized once by the renderer, then dropped.

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Components scaled to 0.0–1.0 for PDF colour operators.
    pub fn components(self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

/// One styled unit of the output document.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Vertical gap in points.
    Spacer { height: f32 },
    /// Centred multi-line document title.
    Title { lines: Vec<String> },
    /// Centred single line under the title (recipient, date).
    Caption { text: String, size: f32, color: Rgb },
    Heading { text: String },
    SubHeading { text: String },
    /// Justified body paragraph.
    Paragraph { text: String },
    /// Two-column label/value table.
    KeyValueTable { rows: Vec<(String, String)> },
    PageBreak,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Written into the PDF info dictionary.
    pub title: String,
    pub blocks: Vec<Block>,
    /// Index of the first block produced from the completion text.
    analysis_start: usize,
}

impl ReportDocument {
    pub fn new(title: String, blocks: Vec<Block>, analysis_start: usize) -> Self {
        let analysis_start = analysis_start.min(blocks.len());
        Self {
            title,
            blocks,
            analysis_start,
        }
    }

    /// Blocks generated from the completion text, after the analysis heading.
    pub fn analysis(&self) -> &[Block] {
        &self.blocks[self.analysis_start..]
    }

    /// Blocks before the analysis section: title page and profile sections.
    pub fn front_matter(&self) -> &[Block] {
        &self.blocks[..self.analysis_start]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_components_scale_to_unit_range() {
        assert_eq!(Rgb(255, 0, 0).components(), [1.0, 0.0, 0.0]);
        let [r, g, b] = Rgb(0x02, 0x88, 0xD1).components();
        assert!((r - 2.0 / 255.0).abs() < 1e-6);
        assert!((g - 136.0 / 255.0).abs() < 1e-6);
        assert!((b - 209.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_analysis_split_is_clamped() {
        let doc = ReportDocument::new("t".to_string(), vec![Block::PageBreak], 5);
        assert!(doc.analysis().is_empty());
        assert_eq!(doc.front_matter().len(), 1);
    }
}
