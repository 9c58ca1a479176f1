//! Markdown code fence tracking.
//!
//! The heading rewriter walks the document line by line and must leave
//! `#` lines inside backtick or tilde fences alone.

/// Tracks fenced code block state during line-by-line processing.
///
/// Fences use backticks or tildes (three or more). The closing fence must use
/// the same character and be at least as long as the opening fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    /// Character of the open fence.
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Update fence state with the next line.
    ///
    /// Returns `true` if the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
                return true;
            }
            false
        } else if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
            true
        } else {
            false
        }
    }
}

/// Detect an opening fence, returning its character and length.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

/// Check for a closing fence: same character, at least as long, nothing after
/// but whitespace.
fn is_closing_fence(trimmed: &str, expected: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected) {
        return false;
    }

    let count = trimmed.chars().take_while(|&c| c == expected).count();
    count >= min_len && trimmed[count * expected.len_utf8()..].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_fence() {
        let mut tracker = FenceTracker::new();

        assert!(tracker.update("```ruby\n"));
        assert!(tracker.in_fence());

        assert!(!tracker.update("# comment\n"));
        assert!(tracker.in_fence());

        assert!(tracker.update("```\n"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_tilde_fence() {
        let mut tracker = FenceTracker::new();

        assert!(tracker.update("~~~"));
        assert!(tracker.in_fence());
        assert!(tracker.update("~~~"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_shorter_fence_not_closing() {
        let mut tracker = FenceTracker::new();

        assert!(tracker.update("````"));
        assert!(!tracker.update("```"));
        assert!(tracker.in_fence());
        assert!(tracker.update("`````"));
        assert!(!tracker.in_fence());
    }

    #[test]
    fn test_mixed_fence_chars() {
        let mut tracker = FenceTracker::new();

        assert!(tracker.update("```"));
        assert!(!tracker.update("~~~"));
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_closing_fence_with_info_is_content() {
        let mut tracker = FenceTracker::new();

        assert!(tracker.update("```"));
        assert!(!tracker.update("```rust"));
        assert!(tracker.in_fence());
    }

    #[test]
    fn test_two_backticks_not_fence() {
        let mut tracker = FenceTracker::new();

        assert!(!tracker.update("``inline``"));
        assert!(!tracker.in_fence());
    }
}
