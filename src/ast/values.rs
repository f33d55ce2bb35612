use crate::ast::projections::{FuncCall, VarRef};

/// Literal constant appearing in a constraint.
///
/// Numeric literal text is classified with an integer-then-float parse
/// fallback, so `5` is an [`Const::Int`] while `5.0` and `1e3` are
/// [`Const::Float`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Const {
    /// Integer literal
    Int(i64),

    /// Floating-point literal
    Float(f64),

    /// Quoted string literal
    Str(String),
}

/// A value usable as a function argument or clause operand.
///
/// # Examples
/// ```text
/// 5.0              constant
/// station.temp[2]  variable path
/// grep(site)       function call
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Literal constant
    Constant(Const),

    /// Dotted variable path
    Var(VarRef),

    /// Server-function call, arguments may themselves be any value
    Call(FuncCall),
}
