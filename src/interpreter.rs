/// The binding tree enumerates every assignment of a statement's quantifier
/// variables.
///
/// Nodes live in an arena and refer to their parent by index, so ancestor
/// lookups are plain index walks. A tree is built for one statement and
/// dropped once its generators have run.
///
/// # Responsibilities
/// - Grows one tree level per range clause, first clause outermost.
/// - Resolves symbolic bounds against the bindings of enclosing levels.
/// - Applies exception clauses to the innermost level.
pub mod binding_tree;
/// The expression module evaluates integer arithmetic.
///
/// Expressions are tokenized with the lexer and evaluated with an explicit
/// operator stack and output stack (shunting-yard).
///
/// # Responsibilities
/// - Implements precedence and associativity for `+ - * / % ^` and unary `-`.
/// - Resolves identifiers from a parameter frame when one is given.
/// - Reports division by zero, overflow and malformed input as errors.
pub mod expression;
/// Parameter frames bind names to integers for one invocation.
pub mod frame;
/// Element generators turn declarations into neurons, spikes and synapses.
///
/// A declaration is prepared once (substitution, range parsing, tree
/// expansion) and then handed to the generator of its section.
///
/// # Responsibilities
/// - Implements `=` replace and `+=` append semantics per section.
/// - Realizes templates once per binding-tree leaf.
/// - Keeps partially failing statements from touching the system model.
pub mod generator;
/// Drives module invocation and statement dispatch.
///
/// # Responsibilities
/// - Binds call arguments to module parameters, checking the count.
/// - Executes statements in source order and recurses into calls.
/// - Separates fatal errors from diagnostics that only skip a statement.
pub mod invocation;
/// Evaluation of the `{…}` index groups inside labels.
pub mod label;
/// The lexer module tokenizes arithmetic expressions.
///
/// # Responsibilities
/// - Converts expression text into integer, identifier, operator and
///   parenthesis tokens.
/// - Skips whitespace.
pub mod lexer;
/// The loader splits a program into its modules.
///
/// # Responsibilities
/// - Strips comments while keeping line numbers.
/// - Parses `def` headers and finds each body by brace depth.
/// - Splits bodies into statements by line and `;`.
pub mod loader;
/// The range module parses the text after a declaration's `:`.
///
/// # Responsibilities
/// - Splits range and exception clauses.
/// - Finds the bound operators and their inclusivity.
pub mod range;
/// Classification of raw statements into calls, declarations and the rest.
pub mod statement;
/// Context-sensitive replacement of bound parameter names by their values.
///
/// Names are only replaced inside `{…}`, after a `:` and inside an `a*( … )`
/// multiplicity. Everywhere else the text passes through untouched.
pub mod substitution;
