//! Display width detection for grapheme clusters.
//!
//! Terminals disagree on how many columns some graphemes occupy, so the
//! whole crate asks this one function and nothing else.

use unicode_width::UnicodeWidthChar;

/// Variation selector 15, which requests text presentation (one column).
pub const VS15: char = '\u{FE0E}';

/// Check whether a grapheme cluster occupies two terminal columns.
///
/// A cluster ending in VS-15 is always narrow. Otherwise it is wide when it
/// is made of several code points (emoji sequences, flags, modifiers) or
/// when its code point is East Asian Wide or Fullwidth.
pub fn is_wide(grapheme: &str) -> bool {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if grapheme.ends_with(VS15) {
        return false;
    }
    chars.next().is_some() || first.width() == Some(2)
}

/// Check whether any grapheme in the iterator is wide.
pub fn has_wide<'a>(graphemes: impl IntoIterator<Item = &'a str>) -> bool {
    graphemes.into_iter().any(is_wide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_narrow() {
        assert!(!is_wide("a"));
        assert!(!is_wide(" "));
        assert!(!is_wide("="));
    }

    #[test]
    fn test_east_asian_wide() {
        assert!(is_wide("😺"));
        assert!(is_wide("中"));
        assert!(is_wide("Ａ"));
    }

    #[test]
    fn test_multi_codepoint_is_wide() {
        // heart with emoji presentation selector
        assert!(is_wide("❤\u{FE0F}"));
        assert!(is_wide("👉🏾"));
    }

    #[test]
    fn test_text_presentation_is_narrow() {
        assert!(!is_wide("❤\u{FE0E}"));
        assert!(!is_wide("😺\u{FE0E}"));
    }

    #[test]
    fn test_box_drawing_is_narrow() {
        assert!(!is_wide("▁"));
        assert!(!is_wide("⠁"));
        assert!(!is_wide("●"));
    }

    #[test]
    fn test_empty_is_narrow() {
        assert!(!is_wide(""));
    }

    #[test]
    fn test_has_wide() {
        assert!(has_wide(["a", "😺"]));
        assert!(!has_wide(["a", "b"]));
    }
}
