#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while evaluating an arithmetic
/// expression.
///
/// Expressions are evaluated from plain text and carry no line information of
/// their own; the statement that owns the expression attaches it when the
/// error is wrapped in a [`StatementError`](super::StatementError).
pub enum ExprError {
    /// Found a character sequence that is not part of the expression grammar.
    UnexpectedToken {
        /// The offending text.
        token: String,
    },
    /// A `(` without a matching `)`, or the other way around.
    MismatchedParenthesis,
    /// An operator did not have enough operands.
    MissingOperand {
        /// The operator that was short of operands.
        operator: char,
    },
    /// Two operands followed each other without an operator in between.
    MissingOperator,
    /// The expression text contained nothing to evaluate.
    Empty,
    /// An identifier was not bound in the active frame.
    UnboundIdentifier {
        /// The identifier.
        name: String,
    },
    /// Attempted division or modulo by zero.
    DivisionByZero,
    /// Exponentiation with a negative exponent has no integer result.
    NegativeExponent,
    /// Arithmetic operation overflowed.
    Overflow,
    /// An integer literal does not fit into 64 bits.
    LiteralTooLarge {
        /// The literal text.
        literal: String,
    },
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { token } => write!(f, "unexpected token '{token}'"),
            Self::MismatchedParenthesis => write!(f, "mismatched parenthesis"),
            Self::MissingOperand { operator } => {
                write!(f, "operator '{operator}' is missing an operand")
            },
            Self::MissingOperator => write!(f, "missing operator between operands"),
            Self::Empty => write!(f, "empty expression"),
            Self::UnboundIdentifier { name } => write!(f, "unbound identifier '{name}'"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::NegativeExponent => write!(f, "negative exponent"),
            Self::Overflow => write!(f, "integer overflow"),
            Self::LiteralTooLarge { literal } => write!(f, "literal '{literal}' is too large"),
        }
    }
}

impl std::error::Error for ExprError {}
