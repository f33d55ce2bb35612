use std::fmt;

use crate::ast::Slice;

/// Opaque handle to one variable in a schema view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Errors a schema view raises when a dimension restriction cannot apply.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceError {
    /// The slice addressed a dimension the variable does not have
    NoSuchDimension { dim: usize, rank: usize },

    /// The slice runs past the end of the dimension
    OutOfBounds { dim: usize, stop: i64, len: usize },
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceError::NoSuchDimension { dim, rank } => {
                write!(f, "no dimension {} (variable has rank {})", dim, rank)
            }
            SliceError::OutOfBounds { dim, stop, len } => {
                write!(
                    f,
                    "slice stop {} exceeds dimension {} of length {}",
                    stop, dim, len
                )
            }
        }
    }
}

impl std::error::Error for SliceError {}

/// The dataset description a constraint is resolved against.
///
/// The resolver is the only mutator: it sets projection flags and applies
/// per-dimension restrictions. Everything else about the variables (types,
/// attributes, storage) stays behind this trait with the owning system.
///
/// A view must not be shared between concurrent resolutions; the `&mut`
/// methods make that the natural Rust contract. Typical deployments open one
/// fresh view per request.
pub trait SchemaView {
    /// Handles of the dataset's top-level variables, in declaration order.
    fn top_level(&self) -> Vec<NodeId>;

    /// Find a child by name among a node's addressable children, or among
    /// the top-level variables when `parent` is `None`.
    fn find_child(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId>;

    /// Whether the node is a grid: a primary array plus one 1-D coordinate
    /// map per array dimension.
    fn is_grid(&self, node: NodeId) -> bool;

    /// Array rank of the node (the primary array's rank for grids, zero for
    /// scalars and containers).
    fn dimension_count(&self, node: NodeId) -> usize;

    /// The grid's coordinate-map variable for one array dimension.
    fn grid_coordinate(&self, node: NodeId, dim: usize) -> Option<NodeId>;

    /// Mark the node projected. With `imply_subtree` the node's entire
    /// subtree is included; without it, children must be projected
    /// explicitly (serialization still descends into the node).
    fn mark_projected(&mut self, node: NodeId, imply_subtree: bool);

    /// Restrict one dimension of an array-bearing node to a slice. For a
    /// grid this restricts the primary array's dimension.
    fn restrict_dimension(&mut self, node: NodeId, dim: usize, slice: &Slice)
    -> Result<(), SliceError>;
}
