//! Expression tree nodes
//!
//! Nodes are built bottom-up by the parser and never mutated afterwards.
//! Children are boxed so the tree owns its subtrees exclusively.

use crate::tokens::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, one per non-literal node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Operator denoted by an `AddOp` or `MulOp` token
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Times => Some(Self::Mul),
            TokenKind::Div => Some(Self::Div),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mul",
            Self::Div => "Div",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn literal(value: f64) -> Self {
        Self::Literal(value)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let (left, right) = (Box::new(left), Box::new(right));
        match op {
            BinaryOp::Add => Self::Add(left, right),
            BinaryOp::Sub => Self::Sub(left, right),
            BinaryOp::Mul => Self::Mul(left, right),
            BinaryOp::Div => Self::Div(left, right),
        }
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Mul, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Self::binary(BinaryOp::Div, left, right)
    }

    /// Operator and operands of a binary node; `None` for literals
    pub fn as_binary(&self) -> Option<(BinaryOp, &Expr, &Expr)> {
        match self {
            Self::Literal(_) => None,
            Self::Add(l, r) => Some((BinaryOp::Add, l, r)),
            Self::Sub(l, r) => Some((BinaryOp::Sub, l, r)),
            Self::Mul(l, r) => Some((BinaryOp::Mul, l, r)),
            Self::Div(l, r) => Some((BinaryOp::Div, l, r)),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Evaluate with IEEE-754 semantics; division by zero yields an
    /// infinity or NaN rather than an error.
    pub fn evaluate(&self) -> f64 {
        match self {
            Self::Literal(value) => *value,
            Self::Add(l, r) => l.evaluate() + r.evaluate(),
            Self::Sub(l, r) => l.evaluate() - r.evaluate(),
            Self::Mul(l, r) => l.evaluate() * r.evaluate(),
            Self::Div(l, r) => l.evaluate() / r.evaluate(),
        }
    }

    /// Height of the tree; a literal has depth 1
    pub fn depth(&self) -> usize {
        match self.as_binary() {
            None => 1,
            Some((_, l, r)) => 1 + l.depth().max(r.depth()),
        }
    }

    pub fn node_count(&self) -> usize {
        match self.as_binary() {
            None => 1,
            Some((_, l, r)) => 1 + l.node_count() + r.node_count(),
        }
    }

    /// Conventional infix rendering with every binary node parenthesized
    pub fn to_infix(&self) -> String {
        match self.as_binary() {
            None => self.to_string(),
            Some((op, l, r)) => format!("({} {} {})", l.to_infix(), op.symbol(), r.to_infix()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Add(l, r) | Self::Sub(l, r) | Self::Mul(l, r) | Self::Div(l, r) => {
                let op = self
                    .as_binary()
                    .map(|(op, _, _)| op.as_str())
                    .unwrap_or_default();
                write!(f, "{}({}, {})", op, l, r)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn lit(value: f64) -> Expr {
        Expr::literal(value)
    }

    #[test]
    fn test_display_prefix_form() {
        let expr = Expr::sub(lit(1.0), Expr::sub(lit(2.0), lit(3.0)));
        assert_eq!(expr.to_string(), "Sub(1, Sub(2, 3))");
        assert_eq!(lit(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_evaluate() {
        let expr = Expr::sub(lit(1.0), Expr::sub(lit(2.0), lit(3.0)));
        assert_eq!(expr.evaluate(), 2.0);

        let expr = Expr::add(lit(2.0), Expr::mul(lit(3.0), lit(4.0)));
        assert_eq!(expr.evaluate(), 14.0);
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        assert_eq!(Expr::div(lit(1.0), lit(0.0)).evaluate(), f64::INFINITY);
        assert!(Expr::div(lit(0.0), lit(0.0)).evaluate().is_nan());
    }

    #[test]
    fn test_depth_and_node_count() {
        let expr = Expr::mul(Expr::add(lit(1.0), lit(2.0)), lit(3.0));
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.node_count(), 5);
        assert_eq!(lit(7.0).depth(), 1);
    }

    #[test]
    fn test_binary_op_from_token_kind() {
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Div), Some(BinaryOp::Div));
        assert_eq!(BinaryOp::from_token_kind(TokenKind::LParen), None);
        assert_matches!(
            Expr::binary(BinaryOp::Mul, lit(1.0), lit(2.0)),
            Expr::Mul(_, _)
        );
    }

    #[test]
    fn test_infix_rendering() {
        let expr = Expr::mul(Expr::add(lit(1.0), lit(2.0)), lit(3.0));
        assert_eq!(expr.to_infix(), "((1 + 2) * 3)");
    }

    #[test]
    fn test_serde_shape() {
        let expr = Expr::add(lit(1.0), lit(2.0));
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json, serde_json::json!({"Add": [{"Literal": 1.0}, {"Literal": 2.0}]}));

        let back: Expr = serde_json::from_value(json).unwrap();
        assert_eq!(back, expr);
    }
}
