use tracing::debug;

use crate::{
    ast::{Module, Statement, StatementKind},
    diagnostics::Diagnostics,
    error::{RuntimeError, StatementError},
    interpreter::{
        expression::evaluate_in,
        frame::ParameterFrame,
        generator,
        loader::{ENTRY_MODULE, ModuleTable},
        statement::classify,
    },
    system::SnpSystem,
};

/// Result type used by the invocation engine.
///
/// Only fatal problems surface here; malformed statements end up in
/// [`Context::diagnostics`].
pub type RunResult<T> = Result<T, RuntimeError>;

/// Caller name reported for the entry invocation.
const ENTRY_CALLER: &str = "<entry>";

/// Stores the state of one run.
///
/// The module table is read-only once loaded. The system model and the
/// diagnostics grow as statements execute, and are the output of the run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Every module of the program, keyed by name.
    pub modules:     ModuleTable,
    /// The model built so far.
    pub system:      SnpSystem,
    /// Non-fatal problems reported so far.
    pub diagnostics: Diagnostics,
}

impl Context {
    /// Creates a context with an empty system model.
    ///
    /// `diagnostics` usually carries what the loader reported.
    #[must_use]
    pub fn new(modules: ModuleTable, diagnostics: Diagnostics) -> Self {
        Self { modules,
               system: SnpSystem::new(),
               diagnostics }
    }

    /// Invokes `main` without arguments.
    ///
    /// # Errors
    /// Returns a [`RuntimeError`] when any invocation of the run fails.
    ///
    /// # Example
    /// ```
    /// use snpli::{
    ///     diagnostics::Diagnostics,
    ///     interpreter::{invocation::Context, loader::load},
    /// };
    ///
    /// let source = "@model<spiking_psystems>
    /// def main() {
    ///     @mu = a, b;
    ///     @marcs = (a, b);
    /// }";
    /// let mut diagnostics = Diagnostics::new();
    /// let modules = load(source, &mut diagnostics).unwrap();
    ///
    /// let mut context = Context::new(modules, diagnostics);
    /// context.run().unwrap();
    /// assert_eq!(context.system.labels(), ["a", "b"]);
    /// assert_eq!(context.system.synapses.len(), 1);
    /// ```
    pub fn run(&mut self) -> RunResult<()> {
        self.invoke(ENTRY_MODULE, &[], ENTRY_CALLER, 0)
    }

    /// Invokes a module with already evaluated arguments.
    ///
    /// The arguments are bound to the declared parameters in order, and the
    /// body runs with that frame only; the caller's bindings are not visible.
    ///
    /// # Parameters
    /// - `name`: The module to invoke.
    /// - `arguments`: One value per declared parameter.
    /// - `caller`: The invoking module, for error messages.
    /// - `line`: The line of the `call`.
    ///
    /// # Errors
    /// Returns [`RuntimeError::UnknownModule`] when `name` is not defined and
    /// [`RuntimeError::ArgumentCountMismatch`] when the argument count differs
    /// from the parameter count. Errors of nested invocations are propagated.
    pub fn invoke(&mut self, name: &str, arguments: &[i64], caller: &str, line: usize) -> RunResult<()> {
        let module = self.modules
                         .get(name)
                         .cloned()
                         .ok_or_else(|| RuntimeError::UnknownModule { name: name.to_string(),
                                                                      caller: caller.to_string(),
                                                                      line })?;
        let frame = ParameterFrame::bind(&module.parameters, arguments).ok_or_else(|| {
                        RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                              expected: module.parameters.len(),
                                                              found: arguments.len(),
                                                              line }
                    })?;

        debug!(module = name, ?arguments, "entering module");
        for statement in &module.statements {
            self.execute(&module, statement, &frame)?;
        }
        debug!(module = name, "leaving module");
        Ok(())
    }

    /// Executes one statement of `module`.
    fn execute(&mut self, module: &Module, statement: &Statement, frame: &ParameterFrame) -> RunResult<()> {
        let kind = match classify(statement) {
            Ok(kind) => kind,
            Err(e) => {
                self.diagnostics.statement(&e, &statement.text);
                return Ok(());
            },
        };

        match kind {
            StatementKind::Call { target, arguments } => {
                let mut values = Vec::with_capacity(arguments.len());
                for argument in &arguments {
                    match evaluate_in(argument, frame) {
                        Ok(value) => values.push(value),
                        Err(e) => {
                            let error = StatementError::expression(argument, e, statement.line);
                            self.diagnostics.statement(&error, &statement.text);
                            return Ok(());
                        },
                    }
                }
                self.invoke(&target, &values, &module.name, statement.line)
            },
            StatementKind::Section { section, body } => {
                if let Err(e) = generator::generate(section,
                                                    &body,
                                                    frame,
                                                    statement.line,
                                                    &statement.text,
                                                    &mut self.system,
                                                    &mut self.diagnostics)
                {
                    self.diagnostics.statement(&e, &statement.text);
                }
                debug!(line = statement.line,
                       %section,
                       neurons = self.system.neurons.len(),
                       synapses = self.system.synapses.len(),
                       "executed statement");
                Ok(())
            },
            StatementKind::Ignored => {
                debug!(line = statement.line, text = %statement.text, "ignored statement");
                Ok(())
            },
        }
    }
}
