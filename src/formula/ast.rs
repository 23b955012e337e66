use std::fmt;

use super::error::FormulaError;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed arithmetic expression. Only number literals, negation and the four
/// basic operators are representable.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Number(f64),
    Neg(Box<Formula>),
    Binary {
        op: ArithOp,
        lhs: Box<Formula>,
        rhs: Box<Formula>,
    },
}

impl Formula {
    pub(crate) fn binary(op: ArithOp, lhs: Formula, rhs: Formula) -> Self {
        Formula::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluate the expression.
    ///
    /// # Errors
    ///
    /// Returns [`FormulaError::DivisionByZero`] for any division by zero and
    /// [`FormulaError::NonFinite`] if an intermediate result overflows.
    pub fn eval(&self) -> Result<f64, FormulaError> {
        let n = match self {
            Formula::Number(n) => *n,
            Formula::Neg(inner) => -inner.eval()?,
            Formula::Binary { op, lhs, rhs } => {
                let a = lhs.eval()?;
                let b = rhs.eval()?;
                match op {
                    ArithOp::Add => a + b,
                    ArithOp::Sub => a - b,
                    ArithOp::Mul => a * b,
                    ArithOp::Div => {
                        if b == 0.0 {
                            return Err(FormulaError::DivisionByZero);
                        }
                        a / b
                    }
                }
            }
        };
        if n.is_finite() {
            Ok(n)
        } else {
            Err(FormulaError::NonFinite)
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Number(n) => write!(f, "{n}"),
            Formula::Neg(inner) => write!(f, "(-{inner})"),
            Formula::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
        }
    }
}
