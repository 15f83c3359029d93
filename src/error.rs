/// Expression errors.
///
/// Raised by the arithmetic evaluator: unexpected tokens, unbalanced
/// parentheses, unbound identifiers, division by zero and overflow.
pub mod expr_error;
/// Loading errors.
///
/// Defines the fatal errors that can occur while splitting the source text
/// into modules, such as an unclosed module body or a missing `main`.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the errors that halt an interpretation run: calls to unknown
/// modules and argument count mismatches.
pub mod runtime_error;
/// Statement errors.
///
/// Malformed statements are reported and skipped; this module defines the
/// kinds of malformation the interpreter recognizes.
pub mod statement_error;

pub use expr_error::ExprError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use statement_error::StatementError;
