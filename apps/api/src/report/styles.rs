use crate::report::document::Rgb;

/// Page geometry and typography for the rendered report.
///
/// All measurements are in PDF points (1/72 inch).
#[derive(Debug, Clone)]
pub struct ReportStyles {
    pub page_width: f32,
    pub page_height: f32,
    /// Applied uniformly on all four sides.
    pub margin: f32,

    /// Title, headings, and sub-headings.
    pub accent: Rgb,
    pub body_color: Rgb,

    pub title_size: f32,
    pub title_space_after: f32,
    pub heading_size: f32,
    pub heading_space_before: f32,
    pub heading_space_after: f32,
    pub subheading_size: f32,
    pub subheading_space_before: f32,
    pub subheading_space_after: f32,

    pub body_size: f32,
    pub body_leading: f32,
    pub body_space_after: f32,

    pub table_label_width: f32,
    pub table_value_width: f32,
    pub table_font_size: f32,
    pub table_padding_x: f32,
    pub table_padding_y: f32,
    pub table_label_fill: Rgb,
    pub table_grid: Rgb,
    pub table_grid_width: f32,
}

impl ReportStyles {
    /// Usable width between the left and right margins.
    pub fn frame_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline-to-baseline distance for single-line text at `size`.
    pub fn leading_for(&self, size: f32) -> f32 {
        size * 1.2
    }
}

impl Default for ReportStyles {
    /// A4 with 50pt margins, accent #0288D1.
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin: 50.0,

            accent: Rgb(0x02, 0x88, 0xD1),
            body_color: Rgb(0, 0, 0),

            title_size: 24.0,
            title_space_after: 30.0,
            heading_size: 14.0,
            heading_space_before: 12.0,
            heading_space_after: 12.0,
            subheading_size: 12.0,
            subheading_space_before: 12.0,
            subheading_space_after: 8.0,

            body_size: 10.0,
            body_leading: 14.0,
            body_space_after: 10.0,

            table_label_width: 144.0,
            table_value_width: 288.0,
            table_font_size: 10.0,
            table_padding_x: 6.0,
            table_padding_y: 8.0,
            table_label_fill: Rgb(0xE3, 0xF2, 0xFD),
            table_grid: Rgb(0xB3, 0xE5, 0xFC),
            table_grid_width: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_a4_with_50pt_margins() {
        let styles = ReportStyles::default();
        assert!((styles.page_width - 595.28).abs() < 0.01);
        assert!((styles.page_height - 841.89).abs() < 0.01);
        assert_eq!(styles.margin, 50.0);
        assert!((styles.frame_width() - 495.28).abs() < 0.01);
    }

    #[test]
    fn test_heading_sizes_decrease() {
        let styles = ReportStyles::default();
        assert!(styles.title_size > styles.heading_size);
        assert!(styles.heading_size > styles.subheading_size);
        assert!(styles.subheading_size > styles.body_size);
    }

    #[test]
    fn test_table_fits_inside_frame() {
        let styles = ReportStyles::default();
        assert!(styles.table_label_width + styles.table_value_width <= styles.frame_width());
    }
}
