use crate::{
    ast::Section,
    error::StatementError,
    interpreter::{expression::evaluate_in, generator::{Declaration, split_mode}},
    system::SnpSystem,
};

/// Records the value of a `@masynch` or `@mseq` statement.
///
/// The value is an expression, so `@masynch = n` works inside a module taking
/// `n`. A range on such a statement has no meaning and is ignored.
///
/// # Errors
/// Returns a [`StatementError`] when the value is missing or does not evaluate.
pub fn generate(declaration: &Declaration<'_>, system: &mut SnpSystem) -> Result<(), StatementError> {
    let line = declaration.line;
    let (_, value) = split_mode(&declaration.template);
    if value.is_empty() {
        return Err(StatementError::MissingValue { keyword: declaration.section
                                                                     .keyword()
                                                                     .to_string(),
                                                  line });
    }

    let value = evaluate_in(value, declaration.frame)
        .map_err(|e| StatementError::expression(value, e, line))?;
    if declaration.section == Section::Asynchronous {
        system.asynchronous = Some(value);
    } else {
        system.sequential = Some(value);
    }
    Ok(())
}
