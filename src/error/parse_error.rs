#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all fatal errors that can occur while loading a program into a
/// module table.
pub enum ParseError {
    /// A `def` line did not follow `def name(params) {`.
    InvalidModuleDefinition {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A module body was still open at the end of the input.
    UnterminatedModule {
        /// The module name.
        name: String,
        /// The line of the module's `def`.
        line: usize,
    },
    /// Two modules share a name.
    DuplicateModule {
        /// The module name.
        name: String,
        /// The line of the second definition.
        line: usize,
    },
    /// The program has no `main` module.
    MissingMain,
    /// `main` was declared with parameters.
    MainWithParameters {
        /// The line of the `def main` header.
        line: usize,
    },
    /// A `/*` comment was never closed.
    UnterminatedComment {
        /// The source line where the comment starts.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModuleDefinition { line } => write!(f,
                                                             "Error on line {line}: Invalid module definition syntax. Example: def name(a, b) {{"),
            Self::UnterminatedModule { name, line } => write!(f,
                                                              "Error on line {line}: Module '{name}' is never closed with '}}'."),
            Self::DuplicateModule { name, line } => {
                write!(f, "Error on line {line}: Module '{name}' is already defined.")
            },
            Self::MissingMain => write!(f, "Error: Program has no 'main' module."),
            Self::MainWithParameters { line } => {
                write!(f, "Error on line {line}: Module 'main' cannot take parameters.")
            },
            Self::UnterminatedComment { line } => {
                write!(f, "Error on line {line}: Comment is never closed with '*/'.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
