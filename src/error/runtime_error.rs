#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents the errors that halt a run.
///
/// Only module resolution and parameter binding are fatal. Everything a single
/// statement can get wrong is a [`StatementError`](super::StatementError)
/// instead.
pub enum RuntimeError {
    /// Called a module that is not in the module table.
    UnknownModule {
        /// The name of the module.
        name:   String,
        /// The module that issued the call.
        caller: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The wrong number of arguments was supplied to a module.
    ArgumentCountMismatch {
        /// The name of the module.
        name:     String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownModule { name, caller, line } => write!(f,
                                                                 "Error on line {line}: Unknown module '{name}' called from '{caller}'."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: Module '{name}' expects {expected} argument(s), but {found} were given."),
        }
    }
}

impl std::error::Error for RuntimeError {}
