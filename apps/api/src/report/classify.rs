//! Line classification for the analysis section.
//!
//! An ordered rule list, first match wins. Not a Markdown parser:
//! no nesting, no inline emphasis, no tables.
//!
//! | Trimmed line starts with    | Kind         | Text kept                 |
//! |-----------------------------|--------------|---------------------------|
//! | (empty)                     | `Blank`      | nothing                   |
//! | `###`                       | `SubHeading` | marker stripped           |
//! | `##`                        | `Heading`    | marker stripped           |
//! | `#`                         | `Heading`    | marker stripped           |
//! | `- ` / `* ` / `• `          | `Bullet`     | marker stripped           |
//! | `1.` … `9.`                 | `Numbered`   | whole line, unmodified    |
//! | anything else               | `Text`       | whole line                |

/// Classification of one completion line. Borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    SubHeading(&'a str),
    Heading(&'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Text(&'a str),
}

const BULLET_MARKERS: [&str; 3] = ["- ", "* ", "\u{2022} "];

/// Classifies a single line. Surrounding whitespace is ignored.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    // Longest heading marker first: "###" also starts with "#".
    if let Some(rest) = line.strip_prefix("###") {
        return LineKind::SubHeading(rest.trim());
    }
    if let Some(rest) = line.strip_prefix("##") {
        return LineKind::Heading(rest.trim());
    }
    if let Some(rest) = line.strip_prefix('#') {
        return LineKind::Heading(rest.trim());
    }
    if let Some(rest) = BULLET_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(*marker))
    {
        return LineKind::Bullet(rest.trim());
    }
    if is_numbered(line) {
        return LineKind::Numbered(line);
    }
    LineKind::Text(line)
}

/// Classifies every line of a completion, in order.
pub fn classify_analysis(text: &str) -> Vec<LineKind<'_>> {
    text.split('\n').map(classify_line).collect()
}

/// A digit 1–9 immediately followed by a period.
fn is_numbered(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('1'..='9'), Some('.'))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_completion_classified_in_order() {
        let kinds = classify_analysis("## Summary\nThis is fine.\n- point one\n1. first step");
        assert_eq!(
            kinds,
            vec![
                LineKind::Heading("Summary"),
                LineKind::Text("This is fine."),
                LineKind::Bullet("point one"),
                LineKind::Numbered("1. first step"),
            ]
        );
    }

    #[test]
    fn test_heading_marker_precedence() {
        let kinds = classify_analysis("### Sub\n## Sub2\n# Sub3");
        assert_eq!(
            kinds,
            vec![
                LineKind::SubHeading("Sub"),
                LineKind::Heading("Sub2"),
                LineKind::Heading("Sub3"),
            ]
        );
    }

    #[test]
    fn test_blank_and_whitespace_lines() {
        assert_eq!(
            classify_analysis("\n   \n\t"),
            vec![LineKind::Blank, LineKind::Blank, LineKind::Blank]
        );
    }

    #[test]
    fn test_crlf_line_endings_are_trimmed() {
        assert_eq!(
            classify_analysis("## Risks\r\n- Cash flow\r\n"),
            vec![
                LineKind::Heading("Risks"),
                LineKind::Bullet("Cash flow"),
                LineKind::Blank,
            ]
        );
    }

    #[test]
    fn test_all_bullet_markers() {
        assert_eq!(classify_line("- dash"), LineKind::Bullet("dash"));
        assert_eq!(classify_line("* star"), LineKind::Bullet("star"));
        assert_eq!(classify_line("\u{2022} dot"), LineKind::Bullet("dot"));
    }

    #[test]
    fn test_marker_without_space_is_plain_text() {
        assert_eq!(classify_line("-dash"), LineKind::Text("-dash"));
        assert_eq!(classify_line("**Bold** lead"), LineKind::Text("**Bold** lead"));
    }

    #[test]
    fn test_indented_lines_are_trimmed_before_matching() {
        assert_eq!(classify_line("   - nested"), LineKind::Bullet("nested"));
        assert_eq!(classify_line("  ### Deep  "), LineKind::SubHeading("Deep"));
    }

    #[test]
    fn test_numbered_lines_kept_verbatim() {
        assert_eq!(classify_line("9. Scale up"), LineKind::Numbered("9. Scale up"));
        // "0." and "10." fall through to plain text, which renders the same way.
        assert_eq!(classify_line("0. zero"), LineKind::Text("0. zero"));
        assert_eq!(classify_line("10. ten"), LineKind::Text("10. ten"));
        assert_eq!(classify_line("3) three"), LineKind::Text("3) three"));
    }

    #[test]
    fn test_heading_marker_only() {
        assert_eq!(classify_line("###"), LineKind::SubHeading(""));
        assert_eq!(classify_line("#"), LineKind::Heading(""));
    }

    #[test]
    fn test_four_hashes_is_subheading_with_residual_hash() {
        assert_eq!(classify_line("#### Deeper"), LineKind::SubHeading("# Deeper"));
    }
}
