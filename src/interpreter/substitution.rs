use crate::{error::StatementError, interpreter::frame::ParameterFrame};

/// The three-character marker that opens a firing-multiplicity expression.
pub const MULTIPLICITY_MARKER: &str = "a*(";

/// A region on the substitution context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    /// `{ … }`
    Brace,
    /// Everything after a `:`.
    Colon,
    /// `a*( … )`
    Multiplicity,
    /// A nested `( … )` inside a multiplicity.
    Paren,
}

/// Returns `true` for characters that can be part of an identifier run.
///
/// Matches the identifier rule of the expression lexer, so every name the
/// scanners accept can also be evaluated.
#[must_use]
pub const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns `true` if `text` is a whole identifier: an ASCII letter or `_`
/// followed by identifier characters.
///
/// # Example
/// ```
/// use snpli::interpreter::substitution::is_identifier;
///
/// assert!(is_identifier("n_1"));
/// assert!(!is_identifier("5"));
/// assert!(!is_identifier("1n"));
/// assert!(!is_identifier("α"));
/// assert!(!is_identifier(""));
/// ```
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next()
         .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
    && chars.all(is_identifier_char)
}

/// Replaces bound identifiers in `text` with their values.
///
/// Only identifiers inside a substitution region are candidates: a `{ … }`
/// index, the range part after a `:`, or an `a*( … )` multiplicity. Inside a
/// region every maximal identifier run that names a binding in `frame` is
/// replaced by the decimal rendering of its value; all other text, including
/// unbound identifiers that a range may bind later, passes through verbatim.
///
/// # Errors
/// Returns [`StatementError::UnbalancedDelimiter`] when a `}` or `)` closes a
/// region that is not open, or when a `{` or `a*(` region is still open at
/// the end of the text.
///
/// # Example
/// ```
/// use snpli::interpreter::{frame::ParameterFrame, substitution::substitute};
///
/// let frame: ParameterFrame = [("n", 3)].into_iter().collect();
/// assert_eq!(substitute("x = n", &frame, 1).unwrap(), "x = n");
/// assert_eq!(substitute("σ{n}", &frame, 1).unwrap(), "σ{3}");
/// assert_eq!(substitute("@mu = s{i} : 1<=i<n", &frame, 1).unwrap(),
///            "@mu = s{i} : 1<=i<3");
/// ```
pub fn substitute(text: &str, frame: &ParameterFrame, line: usize) -> Result<String, StatementError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut stack: Vec<Region> = Vec::new();
    let mut identifier = String::new();
    let mut i = 0;

    while i < chars.len() {
        if starts_multiplicity(&chars, i) {
            flush(&mut identifier, &mut out, frame);
            out.push_str(MULTIPLICITY_MARKER);
            stack.push(Region::Multiplicity);
            i += MULTIPLICITY_MARKER.len();
            continue;
        }

        let c = chars[i];
        if !stack.is_empty() && is_identifier_char(c) {
            identifier.push(c);
            i += 1;
            continue;
        }

        flush(&mut identifier, &mut out, frame);
        match c {
            '{' => stack.push(Region::Brace),
            '}' => {
                if stack.pop() != Some(Region::Brace) {
                    return Err(StatementError::UnbalancedDelimiter { delimiter: '}',
                                                                     line });
                }
            },
            ':' if !stack.contains(&Region::Colon) => stack.push(Region::Colon),
            '(' if stack.contains(&Region::Multiplicity) => stack.push(Region::Paren),
            ')' => {
                if let Some(Region::Paren | Region::Multiplicity) = stack.last() {
                    stack.pop();
                }
            },
            _ => {},
        }
        out.push(c);
        i += 1;
    }
    flush(&mut identifier, &mut out, frame);

    if stack.contains(&Region::Brace) {
        return Err(StatementError::UnbalancedDelimiter { delimiter: '{',
                                                         line });
    }
    if stack.contains(&Region::Multiplicity) {
        return Err(StatementError::UnbalancedDelimiter { delimiter: '(',
                                                         line });
    }

    Ok(out)
}

/// Checks for the `a*(` marker at `i`, starting on a word boundary.
fn starts_multiplicity(chars: &[char], i: usize) -> bool {
    let boundary = i == 0 || !is_identifier_char(chars[i - 1]);
    boundary && chars[i..].starts_with(&['a', '*', '('])
}

/// Writes the buffered identifier, substituted if it is bound.
fn flush(identifier: &mut String, out: &mut String, frame: &ParameterFrame) {
    if identifier.is_empty() {
        return;
    }
    match frame.get(identifier) {
        Some(value) => out.push_str(&value.to_string()),
        None => out.push_str(identifier),
    }
    identifier.clear();
}
