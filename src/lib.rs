//! # snpli
//!
//! snpli is an interpreter for parameterized Spiking Neural P-system
//! descriptions written in Rust.
//! It loads a program of modules, invokes `main`, expands range-quantified
//! declarations and builds the resulting neurons, spike counts and synapses.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    diagnostics::Diagnostics,
    interpreter::{invocation::Context, loader::load},
    system::SnpSystem,
};

/// Defines the structure of loaded programs.
///
/// This module declares modules, raw statements, statement kinds and the parsed
/// form of range and exception clauses. Every node keeps the source line it
/// came from for error reporting.
///
/// # Responsibilities
/// - Defines the program, statement and range types shared by all phases.
/// - Maps section keywords to sections and back.
pub mod ast;
/// Collects non-fatal problems found while loading and interpreting.
///
/// # Responsibilities
/// - Records warnings and skipped statements in report order.
/// - Emits every report as a `tracing` event.
pub mod diagnostics;
/// Provides unified error types for loading, interpretation and evaluation.
///
/// This module defines all errors that can be raised while loading a program,
/// invoking its modules, executing a single statement or evaluating an
/// expression. Every error carries the source line it belongs to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (loader, invocation, statement,
///   expression).
/// - Separates fatal errors from errors that only skip one statement.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together loading, statement classification, parameter
/// substitution, range expansion, expression evaluation and element
/// generation.
///
/// # Responsibilities
/// - Coordinates all core components from the loader to the generators.
/// - Provides the invocation context that owns the state of a run.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The generated Spiking Neural P-system model.
///
/// # Responsibilities
/// - Stores neurons, synapses, ports and mode flags in generation order.
/// - Renders the model in the keyword syntax of the input language.
pub mod system;
/// General utilities for scanning statement text.
pub mod util;

/// The outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Interpretation {
    /// The model built by `main`.
    pub system:      SnpSystem,
    /// Warnings and skipped statements, in report order.
    pub diagnostics: Diagnostics,
}

/// Loads `source` and runs its `main` module.
///
/// Malformed statements do not stop the run; they are skipped and listed in
/// [`Interpretation::diagnostics`].
///
/// # Errors
/// Returns an error if the program cannot be loaded, if a called module does
/// not exist or if a module is called with the wrong number of arguments.
///
/// # Examples
/// ```
/// use snpli::interpret;
///
/// let source = "@model<spiking_psystems>
/// def main() {
///     @mu = s{i} : 1<=i<4;
///     @ms(s{i}) = a*(2*i) : 1<=i<4;
/// }";
/// let result = interpret(source).unwrap();
/// let spikes: Vec<u64> = result.system.neurons.iter().map(|n| n.spikes).collect();
/// assert_eq!(spikes, [2, 4, 6]);
///
/// // Example with an intentional error (unknown module).
/// let source = "def main() { call missing(); }";
/// assert!(interpret(source).is_err());
/// ```
pub fn interpret(source: &str) -> Result<Interpretation, Box<dyn std::error::Error>> {
    let mut diagnostics = Diagnostics::new();
    let modules = load(source, &mut diagnostics)?;

    let mut context = Context::new(modules, diagnostics);
    context.run()?;

    Ok(Interpretation { system:      context.system,
                        diagnostics: context.diagnostics, })
}
