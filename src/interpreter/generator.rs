use tracing::trace;

use crate::{
    ast::Section,
    diagnostics::Diagnostics,
    error::StatementError,
    interpreter::{
        binding_tree::BindingTree,
        frame::ParameterFrame,
        range::parse_range,
        substitution::substitute,
    },
    system::SnpSystem,
};

/// `@mu`: neuron labels.
///
/// Expands `name{qualifier}` templates over every leaf of the binding tree, or
/// takes a flat label list when the statement has no range.
pub mod neuron;
/// `@min` and `@mout`: input and output neuron labels.
pub mod ports;
/// `@masynch` and `@mseq`: integer mode flags.
pub mod mode;
/// `@ms`: initial spike counts from `a*( … )` multiplicities.
pub mod spike;
/// `@marcs`: synapses from `(from, to)` pairs.
pub mod synapse;

/// Whether a statement replaces or extends what is already in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `=` or no marker at all.
    Replace,
    /// `+=`
    Append,
}

/// Strips a leading `+=` or `=` from `template`.
///
/// # Example
/// ```
/// use snpli::interpreter::generator::{Mode, split_mode};
///
/// assert_eq!(split_mode(" += a, b"), (Mode::Append, "a, b"));
/// assert_eq!(split_mode(" = a"), (Mode::Replace, "a"));
/// assert_eq!(split_mode(" a"), (Mode::Replace, "a"));
/// ```
#[must_use]
pub fn split_mode(template: &str) -> (Mode, &str) {
    let template = template.trim();
    if let Some(rest) = template.strip_prefix("+=") {
        (Mode::Append, rest.trim())
    } else if let Some(rest) = template.strip_prefix('=') {
        (Mode::Replace, rest.trim())
    } else {
        (Mode::Replace, template)
    }
}

/// An element declaration, ready for a generator.
#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    /// The section selected by the statement keyword.
    pub section:  Section,
    /// The parameter-substituted text between the keyword and the `:`.
    pub template: String,
    /// The expanded range; `None` when the statement declares no range clause.
    pub tree:     Option<BindingTree>,
    /// Line number in the source code.
    pub line:     usize,
    /// The original statement text, for diagnostics.
    pub source:   &'a str,
    /// The frame of the invocation the statement runs in.
    pub frame:    &'a ParameterFrame,
}

impl<'a> Declaration<'a> {
    /// Substitutes the active frame into `body`, splits off the range part and
    /// expands it.
    ///
    /// # Errors
    /// Returns a [`StatementError`] when substitution, range parsing or range
    /// expansion fails.
    pub fn prepare(section: Section,
                   body: &str,
                   frame: &'a ParameterFrame,
                   line: usize,
                   source: &'a str)
                   -> Result<Self, StatementError> {
        let body = substitute(body, frame, line)?;
        let (template, range) = match body.split_once(':') {
            Some((template, range)) => (template, Some(range)),
            None => (body.as_str(), None),
        };

        let tree = match range {
            Some(range) => {
                let spec = parse_range(range, line)?;
                if spec.clauses.is_empty() {
                    None
                } else {
                    let tree = BindingTree::expand(&spec, line)?;
                    trace!(line,
                           nodes = tree.len(),
                           leaves = tree.leaves().len(),
                           "expanded range");
                    Some(tree)
                }
            },
            None => None,
        };

        Ok(Self { section,
                  template: template.trim().to_string(),
                  tree,
                  line,
                  source,
                  frame })
    }

    /// Returns the bindings of every leaf, in enumeration order.
    ///
    /// Without a range this is a single empty frame.
    #[must_use]
    pub fn leaf_frames(&self) -> Vec<ParameterFrame> {
        self.tree.as_ref().map_or_else(|| vec![ParameterFrame::new()], |tree| {
                              tree.leaves()
                                  .iter()
                                  .map(|&leaf| tree.bindings(leaf))
                                  .collect()
                          })
    }
}

/// Runs the generator for `section` on one statement.
///
/// Problems that only affect part of a statement are reported to
/// `diagnostics` directly.
///
/// # Errors
/// Returns a [`StatementError`] when the whole statement must be skipped; the
/// system is left untouched in that case.
pub fn generate(section: Section,
                body: &str,
                frame: &ParameterFrame,
                line: usize,
                source: &str,
                system: &mut SnpSystem,
                diagnostics: &mut Diagnostics)
                -> Result<(), StatementError> {
    let declaration = Declaration::prepare(section, body, frame, line, source)?;

    match section {
        Section::Neurons => neuron::generate(&declaration, system, diagnostics),
        Section::Spikes => spike::generate(&declaration, system),
        Section::Synapses => synapse::generate(&declaration, system),
        Section::Inputs | Section::Outputs => ports::generate(&declaration, system, diagnostics),
        Section::Asynchronous | Section::Sequential => mode::generate(&declaration, system),
    }
}
