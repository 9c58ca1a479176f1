//! Heading hierarchy rewriting: the second pipeline stage.
//!
//! Text embedded in a page usually sits below the page's own headings. A
//! hierarchy offset of 2 turns `# Title` into `### Title`, so the biggest
//! heading of the embedded text renders as `<h3>`.

use crate::fence::FenceTracker;

/// Deepest heading level Markdown renders.
const MAX_HEADING_LEVEL: usize = 6;

/// Add `offset` levels to every heading marker.
///
/// A line is a heading candidate when, after optional spaces or tabs, it starts
/// with a `#` run. Escaped runs (`\#`), `#` in the middle of a line and lines
/// inside backtick or tilde code fences are left alone. Leading whitespace and
/// the rest of the line are preserved, except that a run directly followed by
/// text (`#Title`) gets a separating space, as CommonMark needs one to read the
/// line as a heading. With an offset of 0 the text is returned unchanged.
///
/// # Examples
///
/// ```
/// use markdownizer_core::shift_headings;
///
/// assert_eq!(shift_headings("# A\ntext #tag\n", 2), "### A\ntext #tag\n");
/// assert_eq!(shift_headings("\\# A", 2), "\\# A");
/// ```
#[must_use]
pub fn shift_headings(text: &str, offset: usize) -> String {
    if offset == 0 {
        return text.to_owned();
    }

    let marker = "#".repeat(offset);
    let mut output = String::with_capacity(text.len() + offset * 8);
    let mut fence = FenceTracker::new();

    for line in text.split_inclusive('\n') {
        if fence.update(line) || fence.in_fence() {
            output.push_str(line);
            continue;
        }

        let content = line.trim_start_matches([' ', '\t']);
        if !content.starts_with('#') {
            output.push_str(line);
            continue;
        }

        let run = content.bytes().take_while(|&b| b == b'#').count();
        let depth = run + offset;
        if depth > MAX_HEADING_LEVEL {
            tracing::debug!(depth, "Shifted heading is deeper than h6");
        }

        let indent = &line[..line.len() - content.len()];
        let (hashes, rest) = content.split_at(run);
        output.push_str(indent);
        output.push_str(&marker);
        output.push_str(hashes);
        if !rest.is_empty() && !rest.starts_with([' ', '\t', '\r', '\n']) {
            output.push(' ');
        }
        output.push_str(rest);
    }

    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_offset_zero_is_identity() {
        let text = "# A\n## B\ncode # x\n";
        assert_eq!(shift_headings(text, 0), text);
    }

    #[test]
    fn test_shift_levels() {
        let text = "#This is an H1\n##This is an H2\n###This is an H3\n";
        assert_eq!(
            shift_headings(text, 2),
            "### This is an H1\n#### This is an H2\n##### This is an H3\n"
        );
    }

    #[test]
    fn test_attached_text_separated() {
        assert_eq!(
            shift_headings("#Title\r\n##  Sub\n#\n#", 1),
            "## Title\r\n###  Sub\n##\n##"
        );
    }

    #[test]
    fn test_attached_text_unchanged_at_offset_zero() {
        assert_eq!(shift_headings("#Title", 0), "#Title");
    }

    #[test]
    fn test_preserves_leading_whitespace() {
        assert_eq!(shift_headings("    # A\n\t## B", 1), "    ## A\n\t### B");
    }

    #[test]
    fn test_mid_line_markers_untouched() {
        let text = "I am talking about my #method\nissue #42 and C#\n";
        assert_eq!(shift_headings(text, 3), text);
    }

    #[test]
    fn test_escaped_markers_untouched() {
        let text = "\\#My comment\n  \\## other\n";
        assert_eq!(shift_headings(text, 2), text);
    }

    #[test]
    fn test_fragment_lines_untouched() {
        let text = "<div class=\"markdownizer_code\"><pre>\\# c</pre></div>\n# H";
        assert_eq!(
            shift_headings(text, 1),
            "<div class=\"markdownizer_code\"><pre>\\# c</pre></div>\n## H"
        );
    }

    #[test]
    fn test_markdown_fences_skipped() {
        let text = "# A\n```sh\n# comment\n```\n# B\n";
        assert_eq!(
            shift_headings(text, 1),
            "## A\n```sh\n# comment\n```\n## B\n"
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(shift_headings("text\n# Last", 1), "text\n## Last");
    }

    #[test]
    fn test_deep_offset_applied_literally() {
        assert_eq!(shift_headings("#### A", 4), "######## A");
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(shift_headings("# A\r\n# B\r\n", 1), "## A\r\n## B\r\n");
    }
}
