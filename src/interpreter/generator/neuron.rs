use std::collections::HashSet;

use tracing::debug;

use crate::{
    diagnostics::Diagnostics,
    error::StatementError,
    interpreter::{
        frame::ParameterFrame,
        generator::{Declaration, Mode, split_mode},
        label::{has_indices, resolve_indices},
    },
    system::{Neuron, SnpSystem},
    util::text::split_top_level,
};

/// Generates the neurons of a `@mu` statement.
///
/// In replace mode the generated neurons become the whole neuron list, even
/// when none were generated; with `+=` they are appended.
///
/// # Errors
/// Returns a [`StatementError`] when the label list is empty or when a label of
/// a range-less statement has an index that needs a range.
pub fn generate(declaration: &Declaration<'_>,
                system: &mut SnpSystem,
                diagnostics: &mut Diagnostics)
                -> Result<(), StatementError> {
    let (mode, list) = split_mode(&declaration.template);
    let neurons: Vec<Neuron> = expand_labels(list, declaration, diagnostics)?.into_iter()
                                                                            .map(Neuron::new)
                                                                            .collect();
    debug!(line = declaration.line, ?mode, count = neurons.len(), "generated neurons");

    match mode {
        Mode::Replace => system.neurons = neurons,
        Mode::Append => system.neurons.extend(neurons),
    }
    Ok(())
}

/// Expands a comma-separated label list.
///
/// Without a range, each entry is one label; an entry whose `{ … }` index does
/// not evaluate is an error, because only a range could bind it. With a range,
/// plain entries are emitted once, followed by the indexed entries resolved
/// against every leaf in enumeration order. An indexed entry that names no
/// bound variable is reported once and skipped.
///
/// # Errors
/// Returns [`StatementError::MissingValue`] for an empty list and
/// [`StatementError::RangeRequired`] for an unresolvable range-less index.
///
/// # Example
/// ```
/// use snpli::{
///     ast::Section,
///     diagnostics::Diagnostics,
///     interpreter::{frame::ParameterFrame, generator::{Declaration, neuron::expand_labels}},
/// };
///
/// let frame = ParameterFrame::new();
/// let declaration =
///     Declaration::prepare(Section::Neurons, " = s{i}, t{i+1} : 1<=i<3", &frame, 1, "").unwrap();
/// let mut diagnostics = Diagnostics::new();
///
/// let labels = expand_labels("s{i}, t{i+1}", &declaration, &mut diagnostics).unwrap();
/// assert_eq!(labels, ["s{1}", "t{2}", "s{2}", "t{3}"]);
/// ```
pub fn expand_labels(list: &str,
                     declaration: &Declaration<'_>,
                     diagnostics: &mut Diagnostics)
                     -> Result<Vec<String>, StatementError> {
    let line = declaration.line;
    let entries: Vec<&str> = split_top_level(list, ',').into_iter()
                                                       .filter(|entry| !entry.is_empty())
                                                       .collect();
    if entries.is_empty() {
        return Err(StatementError::MissingValue { keyword: declaration.section
                                                                     .keyword()
                                                                     .to_string(),
                                                  line });
    }

    let Some(tree) = &declaration.tree else {
        return entries.into_iter()
                      .map(|entry| {
                          resolve_indices(entry, &ParameterFrame::new()).map_err(|_| {
                              StatementError::RangeRequired { label: entry.to_string(),
                                                              line }
                          })
                      })
                      .collect();
    };

    let (indexed, plain): (Vec<&str>, Vec<&str>) =
        entries.into_iter().partition(|entry| has_indices(entry));
    let mut labels: Vec<String> = plain.into_iter().map(str::to_string).collect();
    let mut reported = HashSet::new();

    for &leaf in tree.leaves() {
        let frame = tree.bindings(leaf);
        for entry in &indexed {
            match resolve_indices(entry, &frame) {
                Ok(label) => labels.push(label),
                Err(unresolved) => {
                    if reported.insert(*entry) {
                        let error =
                            StatementError::UnresolvedQualifier { qualifier: unresolved.component,
                                                                  line };
                        diagnostics.statement(&error, declaration.source);
                    }
                },
            }
        }
    }

    Ok(labels)
}
