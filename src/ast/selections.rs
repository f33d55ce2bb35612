use crate::ast::operators::RelOp;
use crate::ast::projections::FuncCall;
use crate::ast::values::Value;

/// One selection clause (`&`-prefixed in the constraint text).
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Relational comparison
    ///
    /// `rhs` always holds at least one value: one element is a scalar
    /// comparison, several (written `{a,b,c}`) mean "lhs relates to one of".
    ///
    /// # Examples
    /// ```text
    /// &Temperature>5.0
    /// &site={"a","b","c"}
    /// ```
    Compare {
        lhs: Value,
        op: RelOp,
        rhs: Vec<Value>,
    },

    /// Boolean server-function call with no relational operator
    ///
    /// # Example
    /// ```text
    /// &inside(lat,lon)
    /// ```
    Call(FuncCall),
}
