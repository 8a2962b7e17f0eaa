//! Report Composer: turns a submission plus completion text into blocks.
//!
//! Pure: no I/O, no clock. The generation date is passed in so that the same
//! inputs always produce the same document.

use chrono::NaiveDate;

use crate::report::classify::{classify_analysis, LineKind};
use crate::report::document::{Block, ReportDocument, Rgb};
use crate::report::submission::FormSubmission;

pub const DOCUMENT_TITLE: &str = "Business Idea Generation & Validation Report";
pub const TITLE_LINES: [&str; 3] = ["BUSINESS IDEA GENERATION", "&", "VALIDATION REPORT"];

pub const CONTACT_HEADING: &str = "CONTACT INFORMATION";
pub const OVERVIEW_HEADING: &str = "BUSINESS OVERVIEW";
pub const GOALS_HEADING: &str = "BUSINESS GOALS & PREFERENCES";
pub const ADDITIONAL_HEADING: &str = "ADDITIONAL DETAILS";
pub const ANALYSIS_HEADING: &str = "AI-GENERATED BUSINESS ANALYSIS";

/// Height of the spacer emitted for a blank completion line.
pub const BLANK_LINE_SPACER: f32 = 6.0;
const SECTION_GAP: f32 = 20.0;
const INCH: f32 = 72.0;

const BULLET_GLYPH: &str = "\u{2022}";
const SUBTITLE_GREY: Rgb = Rgb(0x55, 0x55, 0x55);
const DATE_GREY: Rgb = Rgb(0x77, 0x77, 0x77);

/// Assembles the full report for a validated submission and a successful
/// completion.
pub fn compose_report(
    submission: &FormSubmission,
    analysis: &str,
    generated_on: NaiveDate,
) -> ReportDocument {
    let mut blocks = Vec::new();

    // Title page
    blocks.push(Block::Spacer { height: 2.0 * INCH });
    blocks.push(Block::Title {
        lines: TITLE_LINES.iter().map(|l| l.to_string()).collect(),
    });
    blocks.push(Block::Spacer { height: 0.5 * INCH });
    blocks.push(Block::Caption {
        text: format!("Prepared for: {}", submission.full_name),
        size: 12.0,
        color: SUBTITLE_GREY,
    });
    blocks.push(Block::Spacer { height: 0.3 * INCH });
    blocks.push(Block::Caption {
        text: format!("Date: {}", generated_on.format("%B %d, %Y")),
        size: 10.0,
        color: DATE_GREY,
    });
    blocks.push(Block::PageBreak);

    push_section(&mut blocks, CONTACT_HEADING, Block::KeyValueTable { rows: contact_rows(submission) });
    push_section(&mut blocks, OVERVIEW_HEADING, Block::KeyValueTable { rows: overview_rows(submission) });

    if !submission.business_goals.trim().is_empty() {
        push_section(
            &mut blocks,
            GOALS_HEADING,
            Block::Paragraph {
                text: submission.business_goals.clone(),
            },
        );
    }

    if let Some(info) = submission.additional_info() {
        push_section(
            &mut blocks,
            ADDITIONAL_HEADING,
            Block::Paragraph {
                text: info.to_string(),
            },
        );
    }

    blocks.push(Block::PageBreak);
    blocks.push(heading(ANALYSIS_HEADING));
    blocks.push(Block::Spacer { height: 12.0 });

    let analysis_start = blocks.len();
    blocks.extend(analysis_blocks(analysis));

    ReportDocument::new(DOCUMENT_TITLE.to_string(), blocks, analysis_start)
}

/// Maps each classified completion line onto a block.
pub fn analysis_blocks(analysis: &str) -> Vec<Block> {
    classify_analysis(analysis)
        .into_iter()
        .map(|kind| match kind {
            LineKind::Blank => Block::Spacer {
                height: BLANK_LINE_SPACER,
            },
            LineKind::SubHeading(text) => Block::SubHeading {
                text: text.to_string(),
            },
            LineKind::Heading(text) => heading(text),
            LineKind::Bullet(text) => Block::Paragraph {
                text: format!("{BULLET_GLYPH} {text}"),
            },
            LineKind::Numbered(line) | LineKind::Text(line) => Block::Paragraph {
                text: line.to_string(),
            },
        })
        .collect()
}

/// Full name, email, phone, then business name and registration number
/// when present.
pub fn contact_rows(submission: &FormSubmission) -> Vec<(String, String)> {
    let mut rows = vec![
        row("Full Name:", &submission.full_name),
        row("Email:", &submission.email),
        row("Phone:", &submission.phone),
    ];
    if let Some(name) = submission.business_name() {
        rows.push(row("Business Name:", name));
    }
    if let Some(number) = submission.registration_number() {
        rows.push(row("Udyam Registration:", number));
    }
    rows
}

pub fn overview_rows(submission: &FormSubmission) -> Vec<(String, String)> {
    vec![
        row("Industry:", &submission.industry),
        row("State of Operation:", &submission.state),
        row(
            "Pitch Deck Included:",
            if submission.include_pitch_deck { "Yes" } else { "No" },
        ),
    ]
}

fn push_section(blocks: &mut Vec<Block>, title: &str, body: Block) {
    blocks.push(heading(title));
    blocks.push(body);
    blocks.push(Block::Spacer {
        height: SECTION_GAP,
    });
}

fn heading(text: &str) -> Block {
    Block::Heading {
        text: text.to_string(),
    }
}

fn row(label: &str, value: &str) -> (String, String) {
    (label.to_string(), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> FormSubmission {
        FormSubmission {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98450 00000".to_string(),
            industry: "Food & Beverage".to_string(),
            state: "Karnataka".to_string(),
            business_goals: "Open a sourdough bakery".to_string(),
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    /// Returns the block that follows the heading with the given text.
    fn section_body<'a>(doc: &'a ReportDocument, title: &str) -> Option<&'a Block> {
        let idx = doc
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Heading { text } if text == title))?;
        doc.blocks.get(idx + 1)
    }

    fn table_rows<'a>(doc: &'a ReportDocument, title: &str) -> &'a [(String, String)] {
        match section_body(doc, title) {
            Some(Block::KeyValueTable { rows }) => rows,
            other => panic!("expected table after {title}, got {other:?}"),
        }
    }

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
        }
    }

    #[test]
    fn test_title_page_comes_first() {
        let doc = compose_report(&submission(), "", date());
        assert_eq!(doc.blocks[0], Block::Spacer { height: 144.0 });
        assert_eq!(
            doc.blocks[1],
            Block::Title {
                lines: vec![
                    "BUSINESS IDEA GENERATION".to_string(),
                    "&".to_string(),
                    "VALIDATION REPORT".to_string()
                ]
            }
        );
        assert!(doc.blocks.iter().any(|b| matches!(
            b,
            Block::Caption { text, .. } if text == "Prepared for: Asha Rao"
        )));
        assert!(doc.blocks.iter().any(|b| matches!(
            b,
            Block::Caption { text, .. } if text == "Date: March 07, 2026"
        )));
        assert_eq!(doc.blocks[6], Block::PageBreak);
    }

    #[test]
    fn test_contact_table_has_three_rows_without_business_identity() {
        let doc = compose_report(&submission(), "", date());
        let rows = table_rows(&doc, CONTACT_HEADING);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Full Name:", "Email:", "Phone:"]);
        assert_eq!(rows[0].1, "Asha Rao");
    }

    #[test]
    fn test_contact_table_has_five_rows_with_business_identity() {
        let mut s = submission();
        s.business_name = Some("Crumb & Co".to_string());
        s.registration_number = Some("UDYAM-KR-03-0012345".to_string());
        let doc = compose_report(&s, "", date());
        let rows = table_rows(&doc, CONTACT_HEADING);
        let labels: Vec<&str> = rows.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Full Name:", "Email:", "Phone:", "Business Name:", "Udyam Registration:"]
        );
        assert_eq!(rows[4].1, "UDYAM-KR-03-0012345");
    }

    #[test]
    fn test_contact_table_with_only_registration_number() {
        let mut s = submission();
        s.registration_number = Some("UDYAM-KR-03-0012345".to_string());
        let rows = contact_rows(&s);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3].0, "Udyam Registration:");
    }

    #[test]
    fn test_overview_pitch_deck_yes_no() {
        let mut s = submission();
        assert_eq!(overview_rows(&s)[2], ("Pitch Deck Included:".to_string(), "No".to_string()));
        s.include_pitch_deck = true;
        assert_eq!(overview_rows(&s)[2].1, "Yes");

        let doc = compose_report(&s, "", date());
        let rows = table_rows(&doc, OVERVIEW_HEADING);
        assert_eq!(rows[0].1, "Food & Beverage");
        assert_eq!(rows[1].1, "Karnataka");
    }

    #[test]
    fn test_goals_section_is_raw_text() {
        let doc = compose_report(&submission(), "", date());
        assert_eq!(
            section_body(&doc, GOALS_HEADING),
            Some(&paragraph("Open a sourdough bakery"))
        );
    }

    #[test]
    fn test_additional_details_only_when_present() {
        let doc = compose_report(&submission(), "", date());
        assert!(section_body(&doc, ADDITIONAL_HEADING).is_none());

        let mut s = submission();
        s.additional_info = Some("Seeking seed funding".to_string());
        let doc = compose_report(&s, "", date());
        assert_eq!(
            section_body(&doc, ADDITIONAL_HEADING),
            Some(&paragraph("Seeking seed funding"))
        );
    }

    #[test]
    fn test_analysis_follows_page_break_and_heading() {
        let doc = compose_report(&submission(), "Hello", date());
        let front = doc.front_matter();
        let n = front.len();
        assert_eq!(front[n - 3], Block::PageBreak);
        assert_eq!(front[n - 2], heading(ANALYSIS_HEADING));
        assert_eq!(front[n - 1], Block::Spacer { height: 12.0 });
        assert_eq!(doc.analysis(), &[paragraph("Hello")]);
    }

    #[test]
    fn test_blank_completion_yields_only_spacers() {
        let doc = compose_report(&submission(), "\n\n   \n", date());
        assert_eq!(doc.analysis().len(), 4);
        assert!(doc
            .analysis()
            .iter()
            .all(|b| *b == Block::Spacer { height: BLANK_LINE_SPACER }));
    }

    #[test]
    fn test_mixed_completion_blocks() {
        let blocks = analysis_blocks("## Summary\nThis is fine.\n- point one\n1. first step");
        assert_eq!(
            blocks,
            vec![
                heading("Summary"),
                paragraph("This is fine."),
                paragraph("\u{2022} point one"),
                paragraph("1. first step"),
            ]
        );
    }

    #[test]
    fn test_heading_levels_map_to_blocks() {
        let blocks = analysis_blocks("### Sub\n## Sub2\n# Sub3");
        assert_eq!(
            blocks,
            vec![
                Block::SubHeading {
                    text: "Sub".to_string()
                },
                heading("Sub2"),
                heading("Sub3"),
            ]
        );
    }

    #[test]
    fn test_composition_is_deterministic() {
        let text = "# Plan\n- a\n\n2. b";
        let a = compose_report(&submission(), text, date());
        let b = compose_report(&submission(), text, date());
        assert_eq!(a, b);
    }
}
