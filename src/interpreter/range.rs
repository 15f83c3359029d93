use crate::{
    ast::{Bound, ExceptionClause, RangeClause, RangeSpec},
    error::StatementError,
    interpreter::{expression::parse_literal, substitution::is_identifier},
    util::text::split_top_level,
};

/// The marker that turns a range segment into an exception clause.
pub const EXCEPTION_MARKER: &str = "<>";

/// Parses the range part of an element declaration.
///
/// The text is split on top-level commas. A segment containing `<>` is an
/// exception clause; every other segment must read `lower OP name OP upper`
/// with `OP` one of `<=`, `=<` (inclusive) or `<` (exclusive). Bounds that are
/// plain integers become [`Bound::Literal`]; anything else is kept as an
/// expression to be resolved against enclosing bindings.
///
/// # Errors
/// Returns a [`StatementError`] for segments without an operator, segments
/// missing a bound or variable, and exception clauses given without a range.
///
/// # Example
/// ```
/// use snpli::{ast::Bound, interpreter::range::parse_range};
///
/// let spec = parse_range("1<i<=5, i<=j<n, i<>j", 1).unwrap();
/// assert_eq!(spec.clauses.len(), 2);
/// assert_eq!(spec.clauses[0].variable, "i");
/// assert!(!spec.clauses[0].lower_inclusive);
/// assert!(spec.clauses[0].upper_inclusive);
/// assert_eq!(spec.clauses[1].upper, Bound::Symbolic("n".into()));
/// assert_eq!(spec.exceptions.len(), 1);
/// ```
pub fn parse_range(text: &str, line: usize) -> Result<RangeSpec, StatementError> {
    let mut spec = RangeSpec::default();

    for segment in split_top_level(text, ',') {
        if segment.is_empty() {
            continue;
        }
        if let Some((left, right)) = segment.split_once(EXCEPTION_MARKER) {
            let (left, right) = (left.trim(), right.trim());
            if left.is_empty() || right.is_empty() {
                return Err(StatementError::MalformedRange { segment: segment.to_string(),
                                                            line });
            }
            spec.exceptions.push(ExceptionClause { left:  left.to_string(),
                                                   right: right.to_string(), });
            continue;
        }
        spec.clauses.push(parse_clause(segment, line)?);
    }

    if spec.clauses.is_empty() && !spec.exceptions.is_empty() {
        return Err(StatementError::ExceptionWithoutRange { line });
    }

    Ok(spec)
}

/// Parses a single `lower OP name OP upper` segment.
fn parse_clause(segment: &str, line: usize) -> Result<RangeClause, StatementError> {
    let malformed = || StatementError::MalformedRange { segment: segment.to_string(),
                                                        line };

    let (lower, rest, lower_inclusive) =
        split_at_operator(segment).ok_or_else(|| {
                                      StatementError::MissingRangeOperator { segment:
                                                                                 segment.to_string(),
                                                                             line }
                                  })?;
    let (variable, upper, upper_inclusive) = split_at_operator(rest).ok_or_else(malformed)?;

    let (lower, variable, upper) = (lower.trim(), variable.trim(), upper.trim());
    if lower.is_empty()
       || upper.is_empty()
       || !is_identifier(variable)
    {
        return Err(malformed());
    }

    Ok(RangeClause { variable: variable.to_string(),
                     lower: to_bound(lower),
                     lower_inclusive,
                     upper: to_bound(upper),
                     upper_inclusive })
}

/// Splits `text` around its first bound operator.
///
/// At each position the two-character operators `<=` and `=<` are tried
/// before a bare `<`, so an inclusive operator is never split in half.
fn split_at_operator(text: &str) -> Option<(&str, &str, bool)> {
    text.char_indices().find_map(|(i, _)| {
                           let rest = &text[i..];
                           if rest.starts_with("<=") || rest.starts_with("=<") {
                               Some((&text[..i], &text[i + 2..], true))
                           } else if rest.starts_with('<') {
                               Some((&text[..i], &text[i + 1..], false))
                           } else {
                               None
                           }
                       })
}

fn to_bound(text: &str) -> Bound {
    parse_literal(text).map_or_else(|| Bound::Symbolic(text.to_string()), Bound::Literal)
}
