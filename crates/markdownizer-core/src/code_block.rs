//! A single `{% code %}` region and its nested directives.

use crate::directive::{self, DirectiveKind};
use crate::lines::HighlightLines;
use crate::options::{HighlightOptions, RenderOptions};
use crate::util::escape_html;

/// Code region found by the extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language token from the opening fence.
    pub language: String,
    /// Code with directives removed and surrounding whitespace trimmed.
    pub code: String,
    /// Caption from `{% caption '...' %}`.
    pub caption: Option<String>,
    /// Lines from `{% highlight ... %}`.
    pub highlight_lines: Option<HighlightLines>,
    /// Line of the opening fence (1-indexed).
    pub line: usize,
}

impl CodeBlock {
    /// Parse the body of a fence.
    ///
    /// At most one caption and one highlight directive are honoured; further
    /// occurrences are removed from the code and reported. A malformed
    /// highlight expression drops the directive and keeps the block.
    pub(crate) fn parse(
        language: &str,
        body: &str,
        line: usize,
        warnings: &mut Vec<String>,
    ) -> Self {
        let (body, captions) = directive::take(DirectiveKind::Caption, body);
        let (body, highlights) = directive::take(DirectiveKind::Highlight, &body);

        let mut warn = |message: String| {
            tracing::warn!(line, "{message}");
            warnings.push(format!("line {line}: {message}"));
        };

        for (kind, count) in [
            (DirectiveKind::Caption, captions.len()),
            (DirectiveKind::Highlight, highlights.len()),
        ] {
            if count > 1 {
                warn(format!(
                    "duplicate {} in {} ignored",
                    kind.tag(""),
                    DirectiveKind::Code.tag(language)
                ));
            }
        }

        let caption = captions
            .into_iter()
            .next()
            .map(|caption| caption.trim().to_owned())
            .filter(|caption| !caption.is_empty());

        let highlight_lines =
            highlights
                .first()
                .and_then(|expr| match HighlightLines::parse(expr) {
                    Ok(lines) => Some(lines),
                    Err(e) => {
                        warn(format!("ignoring {}: {e}", DirectiveKind::Highlight.tag(expr)));
                        None
                    }
                });

        Self {
            language: language.to_owned(),
            code: body.trim().to_owned(),
            caption,
            highlight_lines,
            line,
        }
    }

    /// Options for highlighting this block.
    #[must_use]
    pub fn options(&self, base: &RenderOptions) -> HighlightOptions {
        base.for_block(self.caption.as_deref(), self.highlight_lines.as_ref())
    }

    /// Wrap a highlighted fragment in the enclosing element.
    ///
    /// A caption adds a `caption` attribute and a leading `<h5>`.
    #[must_use]
    pub fn wrap(&self, fragment: &str, css_class: &str) -> String {
        let class = escape_html(css_class);
        match &self.caption {
            Some(caption) => {
                let caption = escape_html(caption);
                format!(
                    r#"<div class="{class}" caption="{caption}"><h5>{caption}</h5>{fragment}</div>"#
                )
            }
            None => format!(r#"<div class="{class}">{fragment}</div>"#),
        }
    }
}
