use tracing::debug;

use crate::{
    ast::Section,
    diagnostics::Diagnostics,
    error::StatementError,
    interpreter::generator::{Declaration, Mode, neuron::expand_labels, split_mode},
    system::SnpSystem,
};

/// Records the labels of a `@min` or `@mout` statement.
///
/// Templates are expanded exactly like neuron templates.
///
/// # Errors
/// Returns a [`StatementError`] when the label list cannot be expanded.
pub fn generate(declaration: &Declaration<'_>,
                system: &mut SnpSystem,
                diagnostics: &mut Diagnostics)
                -> Result<(), StatementError> {
    let (mode, list) = split_mode(&declaration.template);
    let labels = expand_labels(list, declaration, diagnostics)?;

    let target = if declaration.section == Section::Inputs {
        &mut system.inputs
    } else {
        &mut system.outputs
    };
    debug!(section = %declaration.section, count = labels.len(), "recorded ports");

    match mode {
        Mode::Replace => *target = labels,
        Mode::Append => target.extend(labels),
    }
    Ok(())
}
