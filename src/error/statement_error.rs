use crate::error::ExprError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a malformed statement.
///
/// These errors never halt a run. The interpreter reports them to the
/// diagnostics sink together with the offending source text, skips the effect
/// of the statement and continues with the next one.
pub enum StatementError {
    /// A `{`, `}`, `(`, `)` or `a*(` region was not closed or not opened.
    UnbalancedDelimiter {
        /// The delimiter that could not be matched.
        delimiter: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A range segment did not contain any of `<=`, `=<` or `<`.
    MissingRangeOperator {
        /// The range segment.
        segment: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A range segment had an operator but no bound or no variable name.
    MalformedRange {
        /// The range segment.
        segment: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An exception clause `a <> b` appeared without any range clause.
    ExceptionWithoutRange {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A label used `{}` qualifiers but the statement declares no range.
    RangeRequired {
        /// The label that needs a range.
        label: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A neuron qualifier did not name a bound variable and did not evaluate.
    UnresolvedQualifier {
        /// The qualifier text.
        qualifier: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A spike statement did not contain an `a*( … )` multiplicity.
    MissingSpikeExpression {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A spike statement did not name a target neuron.
    MissingSpikeTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A computed spike count was negative.
    NegativeSpikes {
        /// The target neuron label.
        label: String,
        /// The computed count.
        count: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A synapse pair did not consist of exactly two endpoints.
    MalformedSynapse {
        /// The text found inside the parentheses.
        pair: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `call` statement did not follow `call NAME(ARG, …)`.
    MalformedCall {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A section statement was missing its value.
    MissingValue {
        /// The section keyword.
        keyword: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An embedded arithmetic expression failed to evaluate.
    Expression {
        /// The expression text.
        expression: String,
        /// The underlying evaluation error.
        source:     ExprError,
        /// The source line where the error occurred.
        line:       usize,
    },
}

impl StatementError {
    /// Returns the source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnbalancedDelimiter { line, .. }
            | Self::MissingRangeOperator { line, .. }
            | Self::MalformedRange { line, .. }
            | Self::ExceptionWithoutRange { line }
            | Self::RangeRequired { line, .. }
            | Self::UnresolvedQualifier { line, .. }
            | Self::MissingSpikeExpression { line }
            | Self::MissingSpikeTarget { line }
            | Self::NegativeSpikes { line, .. }
            | Self::MalformedSynapse { line, .. }
            | Self::MalformedCall { line }
            | Self::MissingValue { line, .. }
            | Self::Expression { line, .. } => *line,
        }
    }

    /// Wraps an expression error raised while evaluating `expression`.
    pub fn expression(expression: &str, source: ExprError, line: usize) -> Self {
        Self::Expression { expression: expression.trim().to_string(),
                           source,
                           line }
    }
}

impl std::fmt::Display for StatementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnbalancedDelimiter { delimiter, line } => {
                write!(f, "Error on line {line}: Unbalanced delimiter '{delimiter}'.")
            },
            Self::MissingRangeOperator { segment, line } => write!(f,
                                                                   "Error on line {line}: Range '{segment}' has no '<=', '=<' or '<' operator."),
            Self::MalformedRange { segment, line } => write!(f,
                                                             "Error on line {line}: Range '{segment}' must look like 'lo <= name < hi'."),
            Self::ExceptionWithoutRange { line } => write!(f,
                                                           "Error on line {line}: Exception clause '<>' given without a range."),
            Self::RangeRequired { label, line } => {
                write!(f, "Error on line {line}: No range given for label '{label}'.")
            },
            Self::UnresolvedQualifier { qualifier, line } => write!(f,
                                                                    "Error on line {line}: Qualifier '{qualifier}' is not a bound variable."),
            Self::MissingSpikeExpression { line } => write!(f,
                                                            "Error on line {line}: Spike statement has no 'a*( … )' multiplicity."),
            Self::MissingSpikeTarget { line } => {
                write!(f, "Error on line {line}: Spike statement names no neuron.")
            },
            Self::NegativeSpikes { label, count, line } => write!(f,
                                                                  "Error on line {line}: Neuron '{label}' cannot hold {count} spikes."),
            Self::MalformedSynapse { pair, line } => write!(f,
                                                            "Error on line {line}: Synapse '({pair})' must have exactly two endpoints."),
            Self::MalformedCall { line } => write!(f,
                                                   "Error on line {line}: Invalid call syntax. Example: call name(1, 2)"),
            Self::MissingValue { keyword, line } => {
                write!(f, "Error on line {line}: '{keyword}' needs a value.")
            },
            Self::Expression { expression,
                               source,
                               line, } => {
                write!(f, "Error on line {line}: Cannot evaluate '{expression}': {source}.")
            },
        }
    }
}

impl std::error::Error for StatementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Expression { source, .. } => Some(source),
            _ => None,
        }
    }
}
