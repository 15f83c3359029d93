use logos::Logos;

use crate::{
    error::ExprError,
    interpreter::{frame::ParameterFrame, lexer::Token},
};

/// Result type used by the expression evaluator.
pub type ExprResult<T> = Result<T, ExprError>;

/// Arithmetic operators known to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    /// Prefix minus.
    Neg,
}

impl Operator {
    const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Neg => 3,
            Self::Pow => 4,
        }
    }

    const fn is_right_associative(self) -> bool {
        matches!(self, Self::Pow | Self::Neg)
    }

    const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub | Self::Neg => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Rem => '%',
            Self::Pow => '^',
        }
    }

    const fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Plus => Some(Self::Add),
            Token::Minus => Some(Self::Sub),
            Token::Star => Some(Self::Mul),
            Token::Slash => Some(Self::Div),
            Token::Percent => Some(Self::Rem),
            Token::Caret => Some(Self::Pow),
            _ => None,
        }
    }

    /// Pops this operator's operands from `output` and pushes the result.
    fn apply(self, output: &mut Vec<i64>) -> ExprResult<()> {
        let missing = ExprError::MissingOperand { operator: self.symbol() };

        if self == Self::Neg {
            let value = output.pop().ok_or(missing)?;
            output.push(value.checked_neg().ok_or(ExprError::Overflow)?);
            return Ok(());
        }

        let right = output.pop().ok_or_else(|| missing.clone())?;
        let left = output.pop().ok_or(missing)?;

        let result = match self {
            Self::Add => left.checked_add(right),
            Self::Sub => left.checked_sub(right),
            Self::Mul => left.checked_mul(right),
            Self::Div | Self::Rem if right == 0 => return Err(ExprError::DivisionByZero),
            Self::Div => left.checked_div(right),
            Self::Rem => left.checked_rem(right),
            Self::Pow => {
                if right < 0 {
                    return Err(ExprError::NegativeExponent);
                }
                u32::try_from(right).ok().and_then(|exp| left.checked_pow(exp))
            },
            Self::Neg => unreachable!(),
        };

        output.push(result.ok_or(ExprError::Overflow)?);
        Ok(())
    }
}

/// An entry on the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator(Operator),
    LParen,
}

/// Evaluates an integer expression that contains no identifiers.
///
/// # Errors
/// Returns an [`ExprError`] for malformed text, identifiers, division by zero
/// or overflow.
///
/// # Example
/// ```
/// use snpli::interpreter::expression::evaluate;
///
/// assert_eq!(evaluate("2+3*4"), Ok(14));
/// assert_eq!(evaluate("10-3-2"), Ok(5));
/// assert_eq!(evaluate("2^3"), Ok(8));
/// ```
pub fn evaluate(text: &str) -> ExprResult<i64> {
    evaluate_in(text, &ParameterFrame::new())
}

/// Evaluates an integer expression, resolving identifiers from `frame`.
///
/// This is a two-stack shunting-yard evaluator: operators wait on one stack
/// until an operator of lower precedence (or a closing parenthesis) forces
/// them to be applied to the values on the other. `^` and prefix `-` are
/// right-associative; everything else associates to the left. Division
/// truncates toward zero.
///
/// # Errors
/// Returns an [`ExprError`] for malformed text, unbound identifiers, division
/// by zero, negative exponents or overflow.
///
/// # Example
/// ```
/// use snpli::interpreter::{expression::evaluate_in, frame::ParameterFrame};
///
/// let frame: ParameterFrame = [("i", 3), ("n", 10)].into_iter().collect();
/// assert_eq!(evaluate_in("n - 2*i", &frame), Ok(4));
/// assert!(evaluate_in("k + 1", &frame).is_err());
/// ```
pub fn evaluate_in(text: &str, frame: &ParameterFrame) -> ExprResult<i64> {
    let mut output: Vec<i64> = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();
    let mut expect_operand = true;
    let mut seen_token = false;

    let mut lexer = Token::lexer(text);
    while let Some(token) = lexer.next() {
        seen_token = true;
        let Ok(token) = token else {
            let slice = lexer.slice();
            return Err(if slice.chars().all(|c| c.is_ascii_digit()) {
                           ExprError::LiteralTooLarge { literal: slice.to_string() }
                       } else {
                           ExprError::UnexpectedToken { token: slice.to_string() }
                       });
        };

        match token {
            Token::Integer(value) => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator);
                }
                output.push(value);
                expect_operand = false;
            },
            Token::Identifier(name) => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator);
                }
                let value = frame.get(&name)
                                 .ok_or(ExprError::UnboundIdentifier { name })?;
                output.push(value);
                expect_operand = false;
            },
            Token::LParen => {
                if !expect_operand {
                    return Err(ExprError::MissingOperator);
                }
                pending.push(Pending::LParen);
            },
            Token::RParen => {
                if expect_operand {
                    return Err(match pending.last() {
                                   Some(Pending::Operator(op)) => {
                                       ExprError::MissingOperand { operator: op.symbol() }
                                   },
                                   _ => ExprError::Empty,
                               });
                }
                loop {
                    match pending.pop() {
                        Some(Pending::Operator(op)) => op.apply(&mut output)?,
                        Some(Pending::LParen) => break,
                        None => return Err(ExprError::MismatchedParenthesis),
                    }
                }
            },
            Token::Minus if expect_operand => pending.push(Pending::Operator(Operator::Neg)),
            // Unary plus.
            Token::Plus if expect_operand => {},
            other => {
                let Some(op) = Operator::from_token(&other) else {
                    unreachable!("every remaining token is a binary operator")
                };
                if expect_operand {
                    return Err(ExprError::MissingOperand { operator: op.symbol() });
                }
                while let Some(Pending::Operator(top)) = pending.last().copied() {
                    let outranks = top.precedence() > op.precedence()
                                   || (top.precedence() == op.precedence()
                                       && !op.is_right_associative());
                    if !outranks {
                        break;
                    }
                    pending.pop();
                    top.apply(&mut output)?;
                }
                pending.push(Pending::Operator(op));
                expect_operand = true;
            },
        }
    }

    if !seen_token {
        return Err(ExprError::Empty);
    }
    if expect_operand {
        return Err(match pending.last() {
                       Some(Pending::Operator(op)) => {
                           ExprError::MissingOperand { operator: op.symbol() }
                       },
                       _ => ExprError::MismatchedParenthesis,
                   });
    }

    while let Some(entry) = pending.pop() {
        match entry {
            Pending::Operator(op) => op.apply(&mut output)?,
            Pending::LParen => return Err(ExprError::MismatchedParenthesis),
        }
    }

    match output.as_slice() {
        [value] => Ok(*value),
        [] => Err(ExprError::Empty),
        _ => Err(ExprError::MissingOperator),
    }
}

/// Returns `true` if `text` is a plain, optionally signed, integer literal.
///
/// # Example
/// ```
/// use snpli::interpreter::expression::parse_literal;
///
/// assert_eq!(parse_literal(" 12 "), Some(12));
/// assert_eq!(parse_literal("-3"), Some(-3));
/// assert_eq!(parse_literal("n"), None);
/// ```
#[must_use]
pub fn parse_literal(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
