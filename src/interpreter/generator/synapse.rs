use tracing::debug;

use crate::{
    error::StatementError,
    interpreter::{generator::Declaration, label::normalize_indices, substitution::substitute},
    system::SnpSystem,
    util::text::{find_matching, split_top_level},
};

/// Appends the synapses of a `@marcs` statement.
///
/// Every `(from, to)` pair in the template becomes one synapse; with a range,
/// the template is substituted and scanned once per leaf. Nothing is
/// de-duplicated. Pairs are collected before any is added, so a malformed pair
/// leaves the system untouched.
///
/// # Errors
/// Returns a [`StatementError`] when the template has no pair at all or a pair
/// is malformed.
pub fn generate(declaration: &Declaration<'_>, system: &mut SnpSystem) -> Result<(), StatementError> {
    let line = declaration.line;
    if !declaration.template.contains('(') {
        return Err(StatementError::MissingValue { keyword: declaration.section
                                                                     .keyword()
                                                                     .to_string(),
                                                  line });
    }

    let mut pairs = Vec::new();
    match &declaration.tree {
        None => pairs.extend(scan_pairs(&declaration.template, line)?),
        Some(_) => {
            for frame in declaration.leaf_frames() {
                let text = substitute(&declaration.template, &frame, line)?;
                pairs.extend(scan_pairs(&text, line)?);
            }
        },
    }

    debug!(line, count = pairs.len(), "generated synapses");
    for (from, to) in pairs {
        system.add_synapse(from, to);
    }
    Ok(())
}

/// Collects every parenthesized `(from, to)` pair in `text`.
///
/// Endpoints are trimmed and their arithmetic indices evaluated.
///
/// # Errors
/// Returns [`StatementError::UnbalancedDelimiter`] for an unclosed `(` and
/// [`StatementError::MalformedSynapse`] for a pair without exactly two
/// endpoints.
///
/// # Example
/// ```
/// use snpli::interpreter::generator::synapse::scan_pairs;
///
/// let pairs = scan_pairs("= (a, s{1+1}), ( b ,c )", 1).unwrap();
/// assert_eq!(pairs,
///            [("a".to_string(), "s{2}".to_string()), ("b".to_string(), "c".to_string())]);
/// assert!(scan_pairs("(a)", 1).is_err());
/// ```
pub fn scan_pairs(text: &str, line: usize) -> Result<Vec<(String, String)>, StatementError> {
    let mut pairs = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('(') {
        let close = find_matching(rest, open).ok_or(StatementError::UnbalancedDelimiter { delimiter: '(',
                                                                                          line })?;
        let inner = &rest[open + 1..close];
        match split_top_level(inner, ',').as_slice() {
            [from, to] if !from.is_empty() && !to.is_empty() => {
                pairs.push((normalize_indices(from), normalize_indices(to)));
            },
            _ => {
                return Err(StatementError::MalformedSynapse { pair: inner.trim().to_string(),
                                                              line });
            },
        }
        rest = &rest[close + 1..];
    }

    Ok(pairs)
}
