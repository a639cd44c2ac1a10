use std::borrow::Cow;
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// Truncate a string to a certain number of words, appending `...` when
/// anything was cut. Each CJK character counts as one word.
///
/// # Examples
///
/// ```
/// use formattable_content::render::excerpt;
///
/// assert_eq!(excerpt("Lorem ipsum dolor sit amet", 2), "Lorem ipsum...");
/// assert_eq!(excerpt("Lorem ipsum", 2), "Lorem ipsum");
/// assert_eq!(excerpt("Lorem ipsum.", 2), "Lorem ipsum.");
/// ```
pub fn excerpt(value: &str, words: usize) -> Cow<'_, str> {
    let mut word_count = 0;

    for (offset, word) in value.split_word_bound_indices() {
        if word_count >= words {
            let rest = &value[offset..];
            if !rest.split_word_bounds().any(is_word) {
                break;
            }
            return Cow::Owned(format!("{}...", value[..offset].trim_end()));
        }
        if is_word(word) {
            word_count += 1;
        }
    }

    Cow::Borrowed(value)
}

fn is_word(segment: &str) -> bool {
    !segment
        .chars()
        .any(|c| c.is_whitespace() || c.is_ascii_punctuation())
}

/// Byte offset of a UTF-16 offset, `None` past the end or inside a
/// surrogate pair.
pub(super) fn byte_offset(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0;
    for (index, ch) in text.char_indices() {
        if units == utf16_offset {
            return Some(index);
        }
        if units > utf16_offset {
            return None;
        }
        units += ch.len_utf16();
    }
    (units == utf16_offset).then_some(text.len())
}

/// Unicode newline characters.
pub(super) fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Byte range of `text` left after trimming newlines at both ends.
pub(super) fn trimmed_bounds(text: &str) -> Range<usize> {
    let start = text.len() - text.trim_start_matches(is_newline).len();
    let end = text.trim_end_matches(is_newline).len().max(start);
    start..end
}

/// Contents of `"straight"` and `“curly”` quotes, as byte ranges.
/// An unterminated quote is ignored.
pub(super) fn quoted_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = vec![];
    let mut open: Option<(usize, char)> = None;

    for (index, ch) in text.char_indices() {
        match open {
            None if ch == '"' => open = Some((index + ch.len_utf8(), '"')),
            None if ch == '\u{201C}' => open = Some((index + ch.len_utf8(), '\u{201D}')),
            Some((start, close)) if ch == close => {
                if index > start {
                    spans.push(start..index);
                }
                open = None;
            }
            _ => {}
        }
    }
    spans
}
