use std::borrow::Cow;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns (CJK and emoji take 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Truncate a string to fit within `max_width` terminal columns, appending
/// "..." when text was cut off.
///
/// Unicode-aware: cuts happen on character boundaries measured in display
/// columns, never mid-codepoint. Returns `Cow::Borrowed` when the string
/// already fits. At widths of 3 columns or less there is no room for the
/// ellipsis, so the result is simply as many characters as fit.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(take_width(s, max_width).to_string());
    }

    let kept = take_width(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", kept, ELLIPSIS))
}

/// Longest prefix of `s` whose display width is at most `width`.
fn take_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    &s[..end]
}

/// Strip terminal control characters and escape sequences from manifest text.
///
/// Titles, blurbs, and tags come from a remote JSON file; anything that
/// could manipulate the terminal (ESC sequences, C0 controls other than
/// tab/newline/CR, DEL) is removed before rendering. Returns
/// `Cow::Borrowed` for already-clean text, the common case.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_suspect) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // Escape sequence: swallow CSI (ESC [ ... final byte @-~) and
            // OSC (ESC ] ... BEL or ESC \) forms; drop a bare ESC
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for f in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&f) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(f) = chars.next() {
                        if f == '\u{07}' {
                            break;
                        }
                        if f == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_suspect(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_suspect(c: char) -> bool {
    c == '\u{7f}' || (c.is_control() && c != '\t' && c != '\n' && c != '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_returns_borrowed() {
        assert!(matches!(truncate_to_width("Short", 10), Cow::Borrowed(_)));
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_cjk_truncation() {
        // CJK characters are 2 columns wide
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
        assert_eq!(truncate_to_width("你好", 10), "你好");
    }

    #[test]
    fn test_narrow_widths() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Testing", 1), "T");
        assert_eq!(truncate_to_width("Testing", 3), "Tes");
        // 2-column CJK char does not fit in 1 column
        assert_eq!(truncate_to_width("你好", 1), "");
    }

    #[test]
    fn test_no_panic_on_utf8_boundaries() {
        let mixed = "Hello世界";
        let result = truncate_to_width(mixed, 8);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_sanitize_clean_text_is_borrowed() {
        let input = "Plain title, tabs\tand\nnewlines are fine";
        assert!(matches!(sanitize(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_strips_controls() {
        assert_eq!(sanitize("he\u{0}ll\u{7}o\u{7f}"), "hello");
    }

    #[test]
    fn test_sanitize_strips_csi() {
        assert_eq!(sanitize("\u{1b}[31mRed\u{1b}[0m"), "Red");
    }

    #[test]
    fn test_sanitize_strips_osc() {
        assert_eq!(sanitize("\u{1b}]0;title\u{7}after"), "after");
        assert_eq!(sanitize("\u{1b}]0;title\u{1b}\\after"), "after");
    }

    #[test]
    fn test_sanitize_bare_esc() {
        assert_eq!(sanitize("a\u{1b}b"), "ab");
    }

    #[test]
    fn test_sanitize_preserves_unicode() {
        assert_eq!(sanitize("日本語 \u{1b}[31m赤\u{1b}[0m"), "日本語 赤");
    }
}
