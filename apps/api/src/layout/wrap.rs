//! Greedy word-wrap and justification against the static font metrics.

use crate::layout::font_metrics::FontMetricTable;

/// One printed line produced by [`wrap_text`].
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    /// Natural width in points, before any justification.
    pub width: f32,
    /// Number of inter-word spaces on the line.
    pub spaces: usize,
    /// True for the final line of a paragraph, which is never stretched.
    pub is_last: bool,
}

impl WrappedLine {
    /// Extra spacing to add to every inter-word space so the line reaches
    /// `max_width`. Zero for the last line and for single-word lines.
    pub fn justify_word_spacing(&self, max_width: f32) -> f32 {
        if self.is_last || self.spaces == 0 || self.width >= max_width {
            return 0.0;
        }
        (max_width - self.width) / self.spaces as f32
    }
}

/// Greedy word-wrap of `text` into lines no wider than `max_width` points.
///
/// Runs of whitespace (including newlines) collapse to single spaces. A word
/// wider than the whole line is broken between characters. Empty or
/// whitespace-only input returns no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let space_w = metrics.space_width * size_pt;
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, metrics, size_pt, max_width) {
            let word_w = metrics.width_pt(&piece, size_pt);
            let added = if words.is_empty() { word_w } else { space_w + word_w };

            if !words.is_empty() && current_width + added > max_width {
                // Current line is full; push it and start a new one.
                lines.push(finish_line(&mut words, current_width, false));
                current_width = word_w;
            } else {
                current_width += added;
            }
            words.push(piece);
        }
    }

    if !words.is_empty() {
        lines.push(finish_line(&mut words, current_width, true));
    }
    lines
}

fn finish_line(words: &mut Vec<String>, width: f32, is_last: bool) -> WrappedLine {
    let spaces = words.len().saturating_sub(1);
    let text = words.join(" ");
    words.clear();
    WrappedLine {
        text,
        width,
        spaces,
        is_last,
    }
}

/// Splits a single word into chunks that each fit on a line.
fn split_oversized(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width: f32,
) -> Vec<String> {
    if metrics.width_pt(word, size_pt) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_width(c) * size_pt;
        if !current.is_empty() && current_width + w > max_width {
            pieces.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(c);
        current_width += w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, Font};

    fn regular() -> &'static FontMetricTable {
        get_metrics(&Font::Helvetica)
    }

    #[test]
    fn test_empty_text_has_no_lines() {
        assert!(wrap_text("   \n ", regular(), 10.0, 400.0).is_empty());
    }

    #[test]
    fn test_short_text_is_single_last_line() {
        let lines = wrap_text("Launch a bakery", regular(), 10.0, 400.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Launch a bakery");
        assert_eq!(lines[0].spaces, 2);
        assert!(lines[0].is_last);
        assert_eq!(lines[0].justify_word_spacing(400.0), 0.0);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let lines = wrap_text("one\n\ntwo   three", regular(), 10.0, 400.0);
        assert_eq!(lines[0].text, "one two three");
    }

    #[test]
    fn test_long_text_wraps_and_lines_fit() {
        let text = "Target customers are young professionals in Bengaluru who want fresh \
                    sourdough delivered before work, with a subscription model and weekend \
                    pop-up stalls to build the brand locally before expanding.";
        let max = 200.0;
        let lines = wrap_text(text, regular(), 10.0, max);
        assert!(lines.len() >= 3, "expected wrapping, got {} lines", lines.len());
        for line in &lines {
            assert!(line.width <= max + 1e-3, "line too wide: {line:?}");
        }
        assert!(lines.last().unwrap().is_last);
        assert!(lines[..lines.len() - 1].iter().all(|l| !l.is_last));

        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            rejoined.join(" "),
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        );
    }

    #[test]
    fn test_justified_line_reaches_full_width() {
        let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda mu";
        let max = 150.0;
        let lines = wrap_text(text, regular(), 10.0, max);
        let first = &lines[0];
        assert!(!first.is_last);
        let stretched = first.width + first.justify_word_spacing(max) * first.spaces as f32;
        assert!((stretched - max).abs() < 1e-3);
    }

    #[test]
    fn test_oversized_word_is_broken() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, regular(), 10.0, 100.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width <= 100.0 + 1e-3));
        let total: usize = lines.iter().map(|l| l.text.len()).sum();
        assert_eq!(total, 200);
    }
}
