use std::fmt;

/// Relational operators usable in selection clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    /// Equal (`=`)
    Eq,
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Not equal (`!=`)
    Ne,
    /// Greater than or equal (`>=`)
    Ge,
    /// Less than or equal (`<=`)
    Le,
    /// Regular-expression match (`~=`)
    RegexMatch,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RelOp::Eq => "=",
            RelOp::Gt => ">",
            RelOp::Lt => "<",
            RelOp::Ne => "!=",
            RelOp::Ge => ">=",
            RelOp::Le => "<=",
            RelOp::RegexMatch => "~=",
        };
        write!(f, "{}", text)
    }
}
