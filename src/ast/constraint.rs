use crate::ast::{Projection, Selection};

/// A complete parsed constraint expression.
///
/// `projections: None` means no projection list was given, which resolves to
/// "project every top-level variable in full". `selections: None` means no
/// filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub projections: Option<Vec<Projection>>,
    pub selections: Option<Vec<Selection>>,
}
