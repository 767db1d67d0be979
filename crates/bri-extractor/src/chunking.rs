//! Bounded windows over long source text

/// One window of source text handed to the label oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkWindow {
    /// Absolute byte offset of the window start
    pub start: usize,

    /// Absolute byte offset one past the window end
    pub end: usize,

    /// Whether the window reaches the end of the text
    pub is_final: bool,
}

impl ChunkWindow {
    /// Lay out the window that starts at `start` and spans at most
    /// `chunk_size` bytes of `text`
    ///
    /// The end is pulled back to a character boundary. A window never comes
    /// back empty unless `start` is already at the end of the text.
    pub fn at(text: &str, start: usize, chunk_size: usize) -> Self {
        let total = text.len();
        let start = start.min(total);
        let target = start.saturating_add(chunk_size);

        if target >= total {
            return Self {
                start,
                end: total,
                is_final: true,
            };
        }

        let mut end = target;
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // chunk_size is narrower than the character at `start`
            end = target;
            while end < total && !text.is_char_boundary(end) {
                end += 1;
            }
        }

        Self {
            start,
            end,
            is_final: end >= total,
        }
    }

    /// The window's text
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Window length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the window is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_one_final_window() {
        let window = ChunkWindow::at("Short text here.", 0, 100);
        assert_eq!(window, ChunkWindow { start: 0, end: 16, is_final: true });
    }

    #[test]
    fn test_window_exactly_reaching_end_is_final() {
        let window = ChunkWindow::at("abcdef", 2, 4);
        assert!(window.is_final);
        assert_eq!(window.slice("abcdef"), "cdef");
    }

    #[test]
    fn test_inner_window() {
        let text = "a".repeat(100);
        let window = ChunkWindow::at(&text, 20, 30);
        assert_eq!(window, ChunkWindow { start: 20, end: 50, is_final: false });
        assert_eq!(window.len(), 30);
    }

    #[test]
    fn test_window_end_respects_char_boundary() {
        // 'é' is two bytes, at offsets 3..5
        let text = "abcédef";
        let window = ChunkWindow::at(text, 0, 4);
        assert_eq!(window.end, 3);
        assert_eq!(window.slice(text), "abc");
    }

    #[test]
    fn test_window_narrower_than_a_character_moves_forward() {
        let text = "éé";
        let window = ChunkWindow::at(text, 0, 1);
        assert_eq!(window.end, 2);
        assert!(!window.is_final);
    }

    #[test]
    fn test_start_past_end_is_empty_final() {
        let window = ChunkWindow::at("abc", 10, 5);
        assert!(window.is_empty());
        assert!(window.is_final);
    }

    #[test]
    fn test_empty_text() {
        let window = ChunkWindow::at("", 0, 10);
        assert!(window.is_empty());
        assert!(window.is_final);
    }
}
