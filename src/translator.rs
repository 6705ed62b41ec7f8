use crate::error::HfindError;
use crate::expr::{Expression, Operand};
use crate::fs::FileSystem;
use crate::primary::Primary;

// ---------------------------------------------------------------------------
// ExprToken
// ---------------------------------------------------------------------------

/// One token of the expression part of the command line, in argv order.
///
/// The sequence is position-sensitive: the same primaries in a different
/// order are a different expression. The CLI scanner preserves order; the
/// translator consumes it left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprToken {
    Primary { name: String, arg: Option<String> },
    And,
    Or,
}

impl ExprToken {
    pub fn primary(name: &str, arg: Option<&str>) -> Self {
        Self::Primary {
            name: name.to_string(),
            arg: arg.map(str::to_string),
        }
    }
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

/// Build the right-associative expression tree from the ordered token
/// sequence.
///
/// Two consecutive primaries with no operator between them are joined with
/// an implicit AND. The final primary is paired with an always-true terminal
/// so it still evaluates meaningfully; an operator with nothing after it is
/// an invalid expression. An empty sequence builds a bare always-true
/// expression (the walk runs, nothing prints).
///
/// `fs` is consulted only to freeze `-newer` reference times at build time.
pub fn build(tokens: &[ExprToken], fs: &dyn FileSystem) -> Result<Expression, HfindError> {
    if tokens.is_empty() {
        return Ok(Expression::terminal(Primary::AlwaysMatch));
    }
    build_from(tokens, 0, fs)
}

fn build_from(
    tokens: &[ExprToken],
    index: usize,
    fs: &dyn FileSystem,
) -> Result<Expression, HfindError> {
    let left = match &tokens[index] {
        ExprToken::Primary { name, arg } => Primary::parse(name, arg.as_deref(), fs)?,
        ExprToken::And | ExprToken::Or => return Err(HfindError::InvalidExpression),
    };
    let mut index = index + 1;

    if index >= tokens.len() {
        return Ok(Expression::new(
            left,
            Operand::And,
            Expression::terminal(Primary::AlwaysMatch),
        ));
    }

    let operand = match tokens[index] {
        ExprToken::Or => {
            index += 1;
            Operand::Or
        }
        ExprToken::And => {
            index += 1;
            Operand::And
        }
        ExprToken::Primary { .. } => Operand::And,
    };

    // An operator must be followed by another primary.
    if index >= tokens.len() {
        return Err(HfindError::InvalidExpression);
    }

    Ok(Expression::new(left, operand, build_from(tokens, index, fs)?))
}
