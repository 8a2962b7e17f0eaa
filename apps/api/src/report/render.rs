//! PDF serialization of a [`ReportDocument`].
//!
//! # Layout model
//! - Blocks flow top-to-bottom inside the margin frame, one page at a time.
//! - Paragraphs and headings wrap with the static metrics in `layout` and may
//!   split across pages between lines. Table rows never split.
//! - Space before a heading is dropped at the top of a page; a gap that does
//!   not fit ends the page instead.
//! - Fonts are the standard Helvetica faces, referenced not embedded, with
//!   WinAnsiEncoding. The output carries no timestamps or random IDs, so equal
//!   documents serialize to equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, StringFormat, Stream};
use thiserror::Error;
use tracing::debug;

use crate::layout::{encode_win_ansi, get_metrics, wrap_text, Font, WrappedLine};
use crate::report::document::{Block, ReportDocument, Rgb};
use crate::report::styles::ReportStyles;

const PRODUCER: &str = "bizreport";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("content stream encoding failed: {0}")]
    Content(String),

    #[error("PDF serialization failed: {0}")]
    Serialize(String),

    #[error("table row '{label}' is {height:.1}pt tall but a page holds {available:.1}pt")]
    RowTooTall {
        label: String,
        height: f32,
        available: f32,
    },
}

/// Lays out and serializes the document into PDF bytes.
pub fn render_pdf(doc: &ReportDocument, styles: &ReportStyles) -> Result<Vec<u8>, RenderError> {
    let mut writer = PageWriter::new(styles);
    for block in &doc.blocks {
        writer.block(block)?;
    }
    let pages = writer.finish();
    debug!(pages = pages.len(), blocks = doc.blocks.len(), "Report laid out");

    assemble(pages, styles, &doc.title)
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
enum Align {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    font: Font,
    size: f32,
    leading: f32,
    color: Rgb,
    align: Align,
}

/// Accumulates content-stream operations page by page.
struct PageWriter<'a> {
    styles: &'a ReportStyles,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    /// Top of the remaining free space on the current page.
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(styles: &'a ReportStyles) -> Self {
        Self {
            styles,
            pages: Vec::new(),
            ops: Vec::new(),
            y: styles.page_height - styles.margin,
        }
    }

    fn top(&self) -> f32 {
        self.styles.page_height - self.styles.margin
    }

    fn bottom(&self) -> f32 {
        self.styles.margin
    }

    /// Nothing has been drawn on the current page yet.
    fn is_blank(&self) -> bool {
        self.ops.is_empty()
    }

    fn new_page(&mut self) {
        if self.is_blank() {
            self.y = self.top();
            return;
        }
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.y = self.top();
    }

    /// Starts a new page unless `height` still fits on this one.
    fn ensure(&mut self, height: f32) {
        if self.y - height < self.bottom() {
            self.new_page();
        }
    }

    fn skip(&mut self, gap: f32) {
        if self.y - gap < self.bottom() {
            self.new_page();
        } else {
            self.y -= gap;
        }
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        if !self.is_blank() || self.pages.is_empty() {
            let ops = std::mem::take(&mut self.ops);
            self.pages.push(ops);
        }
        self.pages
    }

    fn block(&mut self, block: &Block) -> Result<(), RenderError> {
        let s = self.styles;
        match block {
            Block::Spacer { height } => self.skip(*height),
            Block::PageBreak => self.new_page(),
            Block::Title { lines } => {
                let style = TextStyle {
                    font: Font::HelveticaBold,
                    size: s.title_size,
                    leading: s.leading_for(s.title_size),
                    color: s.accent,
                    align: Align::Center,
                };
                for line in lines {
                    self.flow(line, &style);
                }
                self.skip(s.title_space_after);
            }
            Block::Caption { text, size, color } => {
                let style = TextStyle {
                    font: Font::Helvetica,
                    size: *size,
                    leading: s.leading_for(*size),
                    color: *color,
                    align: Align::Center,
                };
                self.flow(text, &style);
            }
            Block::Heading { text } => {
                let style = TextStyle {
                    font: Font::HelveticaBold,
                    size: s.heading_size,
                    leading: s.leading_for(s.heading_size),
                    color: s.accent,
                    align: Align::Left,
                };
                self.heading(text, &style, s.heading_space_before, s.heading_space_after);
            }
            Block::SubHeading { text } => {
                let style = TextStyle {
                    font: Font::HelveticaBold,
                    size: s.subheading_size,
                    leading: s.leading_for(s.subheading_size),
                    color: s.accent,
                    align: Align::Left,
                };
                self.heading(
                    text,
                    &style,
                    s.subheading_space_before,
                    s.subheading_space_after,
                );
            }
            Block::Paragraph { text } => {
                let style = TextStyle {
                    font: Font::Helvetica,
                    size: s.body_size,
                    leading: s.body_leading,
                    color: s.body_color,
                    align: Align::Justify,
                };
                self.flow(text, &style);
                self.skip(s.body_space_after);
            }
            Block::KeyValueTable { rows } => self.table(rows)?,
        }
        Ok(())
    }

    fn heading(&mut self, text: &str, style: &TextStyle, before: f32, after: f32) {
        if !self.is_blank() {
            self.skip(before);
        }
        self.flow(text, style);
        self.skip(after);
    }

    /// Wraps `text` across the frame width, breaking pages between lines.
    fn flow(&mut self, text: &str, style: &TextStyle) {
        let x = self.styles.margin;
        let width = self.styles.frame_width();
        for line in wrap_text(text, get_metrics(&style.font), style.size, width) {
            self.ensure(style.leading);
            let baseline = self.y - style.size;
            self.place_line(&line, style, x, width, baseline);
            self.y -= style.leading;
        }
    }

    /// Rows never split, so a row taller than the frame is an error.
    fn table(&mut self, rows: &[(String, String)]) -> Result<(), RenderError> {
        let s = self.styles;
        let label_w = s.table_label_width;
        let value_w = s.table_value_width;
        let x0 = s.margin + (s.frame_width() - label_w - value_w) / 2.0;
        let size = s.table_font_size;
        let label_style = TextStyle {
            font: Font::HelveticaBold,
            size,
            leading: s.leading_for(size),
            color: s.body_color,
            align: Align::Right,
        };
        let value_style = TextStyle {
            font: Font::Helvetica,
            align: Align::Left,
            ..label_style
        };
        let label_inner = label_w - 2.0 * s.table_padding_x;
        let value_inner = value_w - 2.0 * s.table_padding_x;

        for (label, value) in rows {
            let label_lines = wrap_text(label, get_metrics(&label_style.font), size, label_inner);
            let value_lines = wrap_text(value, get_metrics(&value_style.font), size, value_inner);
            let line_count = label_lines.len().max(value_lines.len()).max(1);
            let row_h = line_count as f32 * label_style.leading + 2.0 * s.table_padding_y;
            let available = self.top() - self.bottom();
            if row_h > available {
                return Err(RenderError::RowTooTall {
                    label: label.clone(),
                    height: row_h,
                    available,
                });
            }

            self.ensure(row_h);
            let top = self.y;
            let bottom = top - row_h;

            self.fill_rect(x0, bottom, label_w, row_h, s.table_label_fill);

            let first_baseline = top - s.table_padding_y - size;
            for (i, line) in label_lines.iter().enumerate() {
                let baseline = first_baseline - i as f32 * label_style.leading;
                self.place_line(line, &label_style, x0 + s.table_padding_x, label_inner, baseline);
            }
            for (i, line) in value_lines.iter().enumerate() {
                let baseline = first_baseline - i as f32 * value_style.leading;
                self.place_line(
                    line,
                    &value_style,
                    x0 + label_w + s.table_padding_x,
                    value_inner,
                    baseline,
                );
            }

            self.stroke_rect(x0, bottom, label_w, row_h);
            self.stroke_rect(x0 + label_w, bottom, value_w, row_h);
            self.y = bottom;
        }
        Ok(())
    }

    /// Draws one wrapped line inside a box of `width` starting at `x`.
    fn place_line(&mut self, line: &WrappedLine, style: &TextStyle, x: f32, width: f32, baseline: f32) {
        let (offset, word_spacing) = match style.align {
            Align::Left => (0.0, 0.0),
            Align::Center => (((width - line.width) / 2.0).max(0.0), 0.0),
            Align::Right => ((width - line.width).max(0.0), 0.0),
            Align::Justify => (0.0, line.justify_word_spacing(width)),
        };
        let [r, g, b] = style.color.components();

        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(style.font.resource_name().as_bytes().to_vec()),
                    style.size.into(),
                ],
            ),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            // Word spacing is part of the graphics state, so it is reset on every line.
            Operation::new("Tw", vec![word_spacing.into()]),
            Operation::new("Td", vec![(x + offset).into(), baseline.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(&line.text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        let [r, g, b] = color.components();
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let [r, g, b] = self.styles.table_grid.components();
        self.ops.extend([
            Operation::new("q", vec![]),
            Operation::new("w", vec![self.styles.table_grid_width.into()]),
            Operation::new("RG", vec![r.into(), g.into(), b.into()]),
            Operation::new("re", vec![x.into(), y.into(), w.into(), h.into()]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Serialization
// ────────────────────────────────────────────────────────────────────────────

fn assemble(
    pages: Vec<Vec<Operation>>,
    styles: &ReportStyles,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Helvetica));
    let bold_id = doc.add_object(font_dictionary(Font::HelveticaBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Helvetica.resource_name() => regular_id,
            Font::HelveticaBold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let encoded = Content { operations }
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.0_f32.into(),
                0.0_f32.into(),
                styles.page_width.into(),
                styles.page_height.into(),
            ],
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Serialize(e.to_string()))?;
    Ok(buf)
}

fn font_dictionary(font: Font) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}
