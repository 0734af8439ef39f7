//! Grammar for arithmetic expressions
//!
//! ```text
//! T     -> F AddOp T | F
//! F     -> Lit MulOp F | Lit
//! Lit   -> NUMBER | ( T )
//! AddOp -> PLUS | MINUS
//! MulOp -> TIMES | DIV
//! ```
//!
//! Both operator levels are right-recursive, so `1-2-3` groups as `1-(2-3)`.

pub mod ast;

pub use ast::{BinaryOp, Expr};
