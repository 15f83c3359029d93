use tracing::{debug, trace};

use crate::{
    error::StatementError,
    interpreter::{
        expression::evaluate,
        generator::{Declaration, Mode},
        label::normalize_indices,
        substitution::{MULTIPLICITY_MARKER, substitute},
    },
    system::SnpSystem,
    util::text::find_matching,
};

/// One parsed spike statement: `(label) = a*(count)` or `(label) += a*(count)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpikeAssignment {
    pub label: String,
    pub mode:  Mode,
    pub count: u64,
}

/// Applies a `@ms` statement.
///
/// With a range, the leaf bindings are substituted into the template once per
/// leaf and each result is parsed on its own. All assignments are computed
/// before any is applied, so a failing leaf leaves the system untouched.
/// Assignments to labels that match no neuron do nothing.
///
/// # Errors
/// Returns a [`StatementError`] when any assignment cannot be parsed or
/// evaluated.
pub fn generate(declaration: &Declaration<'_>, system: &mut SnpSystem) -> Result<(), StatementError> {
    let assignments = match &declaration.tree {
        None => vec![parse_assignment(&declaration.template, declaration.line)?],
        Some(_) => declaration.leaf_frames()
                              .iter()
                              .map(|frame| {
                                  let text = substitute(&declaration.template,
                                                        frame,
                                                        declaration.line)?;
                                  parse_assignment(&text, declaration.line)
                              })
                              .collect::<Result<Vec<_>, _>>()?,
    };

    for assignment in &assignments {
        let matched = match assignment.mode {
            Mode::Replace => system.set_spikes(&assignment.label, assignment.count),
            Mode::Append => system.add_spikes(&assignment.label, assignment.count),
        };
        if matched == 0 {
            trace!(label = %assignment.label, "spike assignment matched no neuron");
        }
    }
    debug!(line = declaration.line, count = assignments.len(), "assigned spikes");

    Ok(())
}

/// Parses and evaluates one spike assignment.
///
/// The target is the text inside the first `( … )` before the multiplicity,
/// or the whole text before the `=` when there are no parentheses. The mode is
/// [`Mode::Append`] exactly when `+=` precedes the multiplicity.
///
/// # Errors
/// Returns a [`StatementError`] when the multiplicity or target is missing,
/// unbalanced, does not evaluate, or is negative.
///
/// # Example
/// ```
/// use snpli::interpreter::generator::{Mode, spike::parse_assignment};
///
/// let assignment = parse_assignment("setSpike(s{1}) = a*(2*3)", 1).unwrap();
/// assert_eq!(assignment.label, "s{1}");
/// assert_eq!(assignment.count, 6);
/// assert_eq!(assignment.mode, Mode::Replace);
///
/// let assignment = parse_assignment("(s{1+1}) += a*(1)", 1).unwrap();
/// assert_eq!(assignment.label, "s{2}");
/// assert_eq!(assignment.mode, Mode::Append);
/// ```
pub fn parse_assignment(text: &str, line: usize) -> Result<SpikeAssignment, StatementError> {
    let marker = text.find(MULTIPLICITY_MARKER)
                     .ok_or(StatementError::MissingSpikeExpression { line })?;
    let open = marker + MULTIPLICITY_MARKER.len() - 1;
    let close = find_matching(text, open).ok_or(StatementError::UnbalancedDelimiter { delimiter: '(',
                                                                                       line })?;
    let expression = &text[open + 1..close];

    let head = text[..marker].trim_end();
    let (mode, head) = if let Some(head) = head.strip_suffix("+=") {
        (Mode::Append, head)
    } else if let Some(head) = head.strip_suffix('=') {
        (Mode::Replace, head)
    } else {
        (Mode::Replace, head)
    };

    let target = match head.find('(') {
        Some(open) => {
            let close = find_matching(head, open).ok_or(StatementError::UnbalancedDelimiter { delimiter: '(',
                                                                                              line })?;
            &head[open + 1..close]
        },
        None => head,
    }.trim();
    if target.is_empty() {
        return Err(StatementError::MissingSpikeTarget { line });
    }

    let label = normalize_indices(target);
    let count = evaluate(expression).map_err(|e| StatementError::expression(expression, e, line))?;
    let count = u64::try_from(count).map_err(|_| StatementError::NegativeSpikes { label: label.clone(),
                                                                                   count,
                                                                                   line })?;

    Ok(SpikeAssignment { label,
                         mode,
                         count })
}
