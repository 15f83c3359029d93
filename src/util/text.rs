/// Splits `text` on `delimiter`, ignoring delimiters nested inside `( … )`,
/// `{ … }` or `[ … ]`. Every piece is trimmed; empty pieces are kept so callers
/// can decide whether they matter.
///
/// # Example
/// ```
/// use snpli::util::text::split_top_level;
///
/// assert_eq!(split_top_level("a{1,2}, (b, c), d", ','),
///            vec!["a{1,2}", "(b, c)", "d"]);
/// ```
#[must_use]
pub fn split_top_level(text: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c == delimiter && depth == 0 => {
                pieces.push(text[start..i].trim());
                start = i + c.len_utf8();
            },
            _ => {},
        }
    }
    pieces.push(text[start..].trim());
    pieces
}

/// Returns the byte index of the bracket closing the one opened at `open`.
///
/// `open` must point at `(`, `{` or `[`. Only brackets of the same kind are
/// counted.
///
/// # Example
/// ```
/// use snpli::util::text::find_matching;
///
/// let text = "f(a(b)c) d";
/// assert_eq!(find_matching(text, 1), Some(7));
/// assert_eq!(find_matching("(open", 0), None);
/// ```
#[must_use]
pub fn find_matching(text: &str, open: usize) -> Option<usize> {
    let opening = text[open..].chars().next()?;
    let closing = match opening {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth = 0usize;
    for (i, c) in text[open..].char_indices() {
        if c == opening {
            depth += 1;
        } else if c == closing {
            depth -= 1;
            if depth == 0 {
                return Some(open + i);
            }
        }
    }
    None
}
