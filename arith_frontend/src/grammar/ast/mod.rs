//! Expression tree produced by the parser

pub mod nodes;

pub use nodes::{BinaryOp, Expr};
