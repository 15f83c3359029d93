use std::fmt;

/// A named, parameterized procedure of a program.
///
/// Modules are created once by the loader and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// The module name, unique within a program.
    pub name:       String,
    /// Declared parameter names, in declaration order.
    pub parameters: Vec<String>,
    /// The body statements, in source order.
    pub statements: Vec<Statement>,
    /// Line of the `def` header.
    pub line:       usize,
}

/// One raw statement of a module body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// The statement text, trimmed and without its `;`.
    pub text: String,
    /// Line number in the source code.
    pub line: usize,
}

impl Statement {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self { text: text.into(),
               line }
    }
}

/// Element-declaration sections, selected by their `@` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `@mu`: neuron labels.
    Neurons,
    /// `@ms`: initial spike counts.
    Spikes,
    /// `@marcs`: synapses.
    Synapses,
    /// `@min`: input neurons.
    Inputs,
    /// `@mout`: output neurons.
    Outputs,
    /// `@masynch`: asynchronous mode flag.
    Asynchronous,
    /// `@mseq`: sequential mode flag.
    Sequential,
}

impl Section {
    /// All sections, in the order the exporter writes them.
    pub const ALL: [Self; 7] = [Self::Neurons,
                                Self::Spikes,
                                Self::Synapses,
                                Self::Inputs,
                                Self::Outputs,
                                Self::Asynchronous,
                                Self::Sequential];

    /// Returns the section keyword, including its `@`.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Neurons => "@mu",
            Self::Spikes => "@ms",
            Self::Synapses => "@marcs",
            Self::Inputs => "@min",
            Self::Outputs => "@mout",
            Self::Asynchronous => "@masynch",
            Self::Sequential => "@mseq",
        }
    }

    /// Looks up a section by its exact keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.keyword() == keyword)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A classified statement.
///
/// Every statement is classified exactly once, before it is executed, so the
/// invocation engine can match exhaustively on its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// `call NAME(ARG, …)`. Arguments are still unevaluated expressions.
    Call {
        /// Name of the module being called.
        target:    String,
        /// Argument expressions.
        arguments: Vec<String>,
    },
    /// An element declaration such as `@mu = s{i} : 1<=i<4`.
    Section {
        /// The section selected by the keyword.
        section: Section,
        /// Everything after the keyword.
        body:    String,
    },
    /// Blank lines, stray `def` headers and anything unrecognized.
    Ignored,
}

/// One side of a range clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// A literal integer.
    Literal(i64),
    /// An expression over enclosing quantifier variables.
    Symbolic(String),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Symbolic(expr) => f.write_str(expr),
        }
    }
}

/// The domain of one quantifier variable: `lower OP variable OP upper`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeClause {
    /// The quantifier variable.
    pub variable:        String,
    /// Lower bound.
    pub lower:           Bound,
    /// Whether `lower` itself belongs to the range (`<=` or `=<`).
    pub lower_inclusive: bool,
    /// Upper bound.
    pub upper:           Bound,
    /// Whether `upper` itself belongs to the range.
    pub upper_inclusive: bool,
}

impl fmt::Display for RangeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = |inclusive: bool| if inclusive { "<=" } else { "<" };
        write!(f,
               "{}{}{}{}{}",
               self.lower,
               op(self.lower_inclusive),
               self.variable,
               op(self.upper_inclusive),
               self.upper)
    }
}

/// A pairwise exclusion `left <> right` on the innermost range clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionClause {
    pub left:  String,
    pub right: String,
}

/// Everything after the `:` of an element declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSpec {
    /// Range clauses in declaration order; the first is the outermost.
    pub clauses:    Vec<RangeClause>,
    /// Exception clauses, all attached to the last range clause.
    pub exceptions: Vec<ExceptionClause>,
}
