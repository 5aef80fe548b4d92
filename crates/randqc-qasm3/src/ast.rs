//! Syntax tree produced by the parser, before any name resolution.

use serde::{Deserialize, Serialize};
use std::f64::consts::{E, PI, TAU};

/// A parsed source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Version from the `OPENQASM` line, normalized to `major.minor`.
    pub version: String,
    pub statements: Vec<Statement>,
}

/// Which register file a declaration adds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireKind {
    /// `qubit[n] q;` or `qreg q[n];`
    Qubit,
    /// `bit[n] c;` or `creg c[n];`
    Bit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    Include(String),

    /// A register declaration. A missing size declares a single wire.
    Declare {
        kind: WireKind,
        name: String,
        size: Option<u32>,
    },

    Gate(GateCall),

    /// `c = measure q;`, `c[i] = measure q[j];` or `measure q -> c;`.
    /// `bits` is empty for a bare `measure q;`.
    Measure {
        qubits: Vec<Operand>,
        bits: Vec<Operand>,
    },

    Reset {
        qubits: Vec<Operand>,
    },

    /// An empty operand list means every qubit.
    Barrier {
        qubits: Vec<Operand>,
    },

    If {
        condition: Expression,
        then_body: Vec<Statement>,
        else_body: Option<Vec<Statement>>,
    },

    For {
        variable: String,
        range: LoopRange,
        body: Vec<Statement>,
    },

    GateDef {
        name: String,
        params: Vec<String>,
        qubits: Vec<String>,
        body: Vec<Statement>,
    },

    /// Classical assignment of anything other than a measurement.
    Assignment {
        target: String,
        index: Option<u32>,
        value: Expression,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateCall {
    pub name: String,
    pub params: Vec<Expression>,
    pub qubits: Vec<Operand>,
}

/// A whole register (`q`) or one of its elements (`q[i]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    pub register: String,
    pub index: Option<u32>,
}

impl Operand {
    pub fn element(register: impl Into<String>, index: u32) -> Self {
        Self {
            register: register.into(),
            index: Some(index),
        }
    }

    pub fn whole(register: impl Into<String>) -> Self {
        Self {
            register: register.into(),
            index: None,
        }
    }
}

/// `[start:end]` or `[start:step:end]` in a `for` header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopRange {
    pub start: Expression,
    pub step: Option<Expression>,
    pub end: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Int(i64),
    Float(f64),
    Identifier(String),
    Pi,
    /// 2π
    Tau,
    /// Euler's number
    Euler,
    Neg(Box<Expression>),
    BinOp {
        left: Box<Expression>,
        op: BinOp,
        right: Box<Expression>,
    },
    FnCall {
        name: String,
        args: Vec<Expression>,
    },
    Paren(Box<Expression>),
}

impl Expression {
    /// Evaluate a constant expression.
    ///
    /// `None` when an identifier, a non-arithmetic operator or an unknown
    /// function is involved.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Expression::Int(v) => Some(*v as f64),
            Expression::Float(v) => Some(*v),
            Expression::Pi => Some(PI),
            Expression::Tau => Some(TAU),
            Expression::Euler => Some(E),
            Expression::Identifier(_) => None,
            Expression::Neg(inner) => inner.as_f64().map(|v| -v),
            Expression::Paren(inner) => inner.as_f64(),
            Expression::BinOp { left, op, right } => op.fold(left.as_f64()?, right.as_f64()?),
            Expression::FnCall { name, args } => match args.as_slice() {
                [arg] => fold_call(name, arg.as_f64()?),
                _ => None,
            },
        }
    }

    /// Strip any number of enclosing parentheses.
    pub fn unparen(&self) -> &Expression {
        match self {
            Expression::Paren(inner) => inner.unparen(),
            other => other,
        }
    }
}

fn fold_call(name: &str, x: f64) -> Option<f64> {
    let f: fn(f64) -> f64 = match name {
        "sin" => f64::sin,
        "cos" => f64::cos,
        "tan" => f64::tan,
        "arcsin" => f64::asin,
        "arccos" => f64::acos,
        "arctan" => f64::atan,
        "exp" => f64::exp,
        "ln" => f64::ln,
        "sqrt" => f64::sqrt,
        _ => return None,
    };
    Some(f(x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Or => 1,
            BinOp::And => 2,
            BinOp::BitOr => 3,
            BinOp::BitXor => 4,
            BinOp::BitAnd => 5,
            BinOp::Eq | BinOp::NotEq => 6,
            BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => 7,
            BinOp::LShift | BinOp::RShift => 8,
            BinOp::Add | BinOp::Sub => 9,
            BinOp::Mul | BinOp::Div | BinOp::Mod => 10,
            BinOp::Pow => 11,
        }
    }

    pub fn is_right_associative(self) -> bool {
        self == BinOp::Pow
    }

    /// Apply an arithmetic operator to two constants.
    pub fn fold(self, l: f64, r: f64) -> Option<f64> {
        Some(match self {
            BinOp::Add => l + r,
            BinOp::Sub => l - r,
            BinOp::Mul => l * r,
            BinOp::Div => l / r,
            BinOp::Mod => l % r,
            BinOp::Pow => l.powf(r),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(left: Expression, op: BinOp, right: Expression) -> Expression {
        Expression::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_constant_folding() {
        let half_pi = bin(Expression::Pi, BinOp::Div, Expression::Int(2));
        assert!((half_pi.as_f64().unwrap() - PI / 2.0).abs() < 1e-10);

        let cube = bin(Expression::Int(2), BinOp::Pow, Expression::Int(3));
        assert_eq!(cube.as_f64(), Some(8.0));

        let symbolic = bin(Expression::Identifier("theta".into()), BinOp::Mul, Expression::Int(2));
        assert_eq!(symbolic.as_f64(), None);
    }

    #[test]
    fn test_comparison_does_not_fold() {
        let cmp = bin(Expression::Int(1), BinOp::Eq, Expression::Int(1));
        assert_eq!(cmp.as_f64(), None);
    }

    #[test]
    fn test_function_eval() {
        let cos_pi = Expression::FnCall {
            name: "cos".into(),
            args: vec![Expression::Pi],
        };
        assert!((cos_pi.as_f64().unwrap() + 1.0).abs() < 1e-12);

        let unknown = Expression::FnCall {
            name: "mystery".into(),
            args: vec![Expression::Int(1)],
        };
        assert_eq!(unknown.as_f64(), None);

        let two_args = Expression::FnCall {
            name: "sin".into(),
            args: vec![Expression::Int(1), Expression::Int(2)],
        };
        assert_eq!(two_args.as_f64(), None);
    }

    #[test]
    fn test_precedence_order() {
        assert!(BinOp::Pow.precedence() > BinOp::Mul.precedence());
        assert!(BinOp::Mul.precedence() > BinOp::Add.precedence());
        assert!(BinOp::Add.precedence() > BinOp::Eq.precedence());
        assert!(BinOp::Pow.is_right_associative());
        assert!(!BinOp::Sub.is_right_associative());
    }

    #[test]
    fn test_unparen() {
        let expr = Expression::Paren(Box::new(Expression::Paren(Box::new(Expression::Int(3)))));
        assert_eq!(expr.unparen(), &Expression::Int(3));
    }

    #[test]
    fn test_operands() {
        assert_eq!(Operand::element("q", 0).index, Some(0));
        assert_eq!(Operand::whole("c").index, None);
    }
}
