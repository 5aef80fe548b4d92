//! Gate angles.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops;

/// A gate angle.
///
/// Sampled circuits only ever carry [`ParameterExpression::Constant`]. The
/// other variants let parsed QASM such as `rx(theta/2) q[0];` survive
/// lowering without being evaluated. Build compound angles with the
/// arithmetic operators:
///
/// ```
/// use randqc_ir::ParameterExpression as P;
///
/// let quarter = P::pi() / P::constant(4.0);
/// assert_eq!(quarter.to_string(), "(pi / 4)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    Constant(f64),
    Symbol(String),
    Pi,
    Neg(Box<ParameterExpression>),
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    pub fn constant(value: f64) -> Self {
        Self::Constant(value)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn pi() -> Self {
        Self::Pi
    }

    /// Whether any free symbol occurs in the expression.
    pub fn is_symbolic(&self) -> bool {
        match self {
            Self::Symbol(_) => true,
            Self::Constant(_) | Self::Pi => false,
            Self::Neg(inner) => inner.is_symbolic(),
            Self::Add(l, r) | Self::Sub(l, r) | Self::Mul(l, r) | Self::Div(l, r) => {
                l.is_symbolic() || r.is_symbolic()
            }
        }
    }

    /// Fold the expression to a number.
    ///
    /// `None` if a symbol is left over or a divisor folds to zero.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Constant(v) => *v,
            Self::Pi => PI,
            Self::Symbol(_) => return None,
            Self::Neg(inner) => -inner.as_f64()?,
            Self::Add(l, r) => l.as_f64()? + r.as_f64()?,
            Self::Sub(l, r) => l.as_f64()? - r.as_f64()?,
            Self::Mul(l, r) => l.as_f64()? * r.as_f64()?,
            Self::Div(l, r) => match r.as_f64()? {
                d if d == 0.0 => return None,
                d => l.as_f64()? / d,
            },
        };
        Some(value)
    }

    fn operator(&self) -> &'static str {
        match self {
            Self::Add(..) => "+",
            Self::Sub(..) | Self::Neg(_) => "-",
            Self::Mul(..) => "*",
            Self::Div(..) => "/",
            Self::Constant(_) | Self::Symbol(_) | Self::Pi => "",
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(v) => write!(f, "{v}"),
            Self::Symbol(name) => f.write_str(name),
            Self::Pi => f.write_str("pi"),
            Self::Neg(inner) => write!(f, "-({inner})"),
            Self::Add(l, r) | Self::Sub(l, r) | Self::Mul(l, r) | Self::Div(l, r) => {
                write!(f, "({l} {} {r})", self.operator())
            }
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self {
        Self::Neg(Box::new(self))
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $variant:ident) => {
        impl ops::$trait for ParameterExpression {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self::$variant(Box::new(self), Box::new(rhs))
            }
        }
    };
}

impl_binary_op!(Add, add, Add);
impl_binary_op!(Sub, sub, Sub);
impl_binary_op!(Mul, mul, Mul);
impl_binary_op!(Div, div, Div);
