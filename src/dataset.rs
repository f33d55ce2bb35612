//! In-memory dataset description implementing [`SchemaView`].
//!
//! Servers with a real catalog implement [`SchemaView`] over their own
//! variable tree; this module is the batteries-included version for tests
//! and for consumers whose dataset description already lives in memory.
//!
//! # Examples
//!
//! ```
//! use cexpr_lang::dataset::Dataset;
//! use cexpr_lang::schema::SchemaView;
//!
//! let mut ds = Dataset::new();
//! let temp = ds.add_array(None, "Temperature", &[10, 20]);
//! let station = ds.add_container(None, "station");
//! ds.add_scalar(Some(station), "id");
//!
//! assert_eq!(ds.find_child(None, "Temperature"), Some(temp));
//! assert_eq!(ds.dimension_count(temp), 2);
//! assert_eq!(ds.find_child(Some(station), "id").is_some(), true);
//! ```

use crate::ast::Slice;
use crate::schema::{NodeId, SchemaView, SliceError};

#[derive(Debug, Clone)]
struct Dim {
    len: usize,
    window: Option<Slice>,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Scalar,
    Array { dims: Vec<Dim> },
    Container { children: Vec<NodeId> },
    Grid { array: NodeId, maps: Vec<NodeId> },
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    kind: NodeKind,
    projected: bool,
}

/// A mutable, in-memory tree of scalar, array, container, and grid
/// variables.
///
/// Nodes live in an arena indexed by [`NodeId`]; handles stay valid for the
/// dataset's lifetime. Projection flags and dimension restrictions are the
/// state the resolver mutates; [`Dataset::is_projected`] and
/// [`Dataset::restriction`] expose them to whatever serializes the response.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset::default()
    }

    fn push(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match parent {
            None => self.roots.push(id),
            Some(parent) => match &mut self.nodes[parent.0].kind {
                NodeKind::Container { children } => children.push(id),
                _ => panic!("parent {:?} is not a container", parent),
            },
        }
        id
    }

    /// Add a scalar variable under `parent` (the root when `None`).
    pub fn add_scalar(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        self.push(
            parent,
            Node {
                name: name.to_string(),
                kind: NodeKind::Scalar,
                projected: false,
            },
        )
    }

    /// Add an array variable with the given dimension lengths.
    pub fn add_array(&mut self, parent: Option<NodeId>, name: &str, dims: &[usize]) -> NodeId {
        let dims = dims.iter().map(|&len| Dim { len, window: None }).collect();
        self.push(
            parent,
            Node {
                name: name.to_string(),
                kind: NodeKind::Array { dims },
                projected: false,
            },
        )
    }

    /// Add a container (struct-like) variable. Children are added with the
    /// container's id as `parent` and are independently projectable.
    pub fn add_container(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        self.push(
            parent,
            Node {
                name: name.to_string(),
                kind: NodeKind::Container { children: vec![] },
                projected: false,
            },
        )
    }

    /// Add a grid: one primary array named `array_name` plus one 1-D
    /// coordinate map per dimension, built from `(map_name, length)` pairs.
    /// The array and the maps are addressable children of the grid.
    pub fn add_grid(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        array_name: &str,
        dims: &[(&str, usize)],
    ) -> NodeId {
        let array = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: array_name.to_string(),
            kind: NodeKind::Array {
                dims: dims.iter().map(|&(_, len)| Dim { len, window: None }).collect(),
            },
            projected: false,
        });

        let maps: Vec<NodeId> = dims
            .iter()
            .map(|&(map_name, len)| {
                let id = NodeId(self.nodes.len());
                self.nodes.push(Node {
                    name: map_name.to_string(),
                    kind: NodeKind::Array {
                        dims: vec![Dim { len, window: None }],
                    },
                    projected: false,
                });
                id
            })
            .collect();

        self.push(
            parent,
            Node {
                name: name.to_string(),
                kind: NodeKind::Grid { array, maps },
                projected: false,
            },
        )
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    /// Whether the node has been marked projected.
    pub fn is_projected(&self, node: NodeId) -> bool {
        self.nodes[node.0].projected
    }

    /// The restriction applied to one dimension, if any. For a grid this
    /// reads the primary array's dimension.
    pub fn restriction(&self, node: NodeId, dim: usize) -> Option<Slice> {
        let node = self.array_of(node);
        match &self.nodes[node.0].kind {
            NodeKind::Array { dims } => dims.get(dim).and_then(|d| d.window),
            _ => None,
        }
    }

    /// Resolve a dotted path from the root, for tests and callers that know
    /// names rather than handles. No projection side effects.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut current = None;
        for name in path.split('.') {
            current = Some(self.find_child(current, name)?);
        }
        current
    }

    /// Whether no projection flag or dimension restriction has been applied
    /// yet, for callers that want to detect whether a resolution touched the
    /// view.
    pub fn is_pristine(&self) -> bool {
        self.nodes.iter().all(|n| !n.projected)
            && self.nodes.iter().all(|n| match &n.kind {
                NodeKind::Array { dims } => dims.iter().all(|d| d.window.is_none()),
                _ => true,
            })
    }

    fn array_of(&self, node: NodeId) -> NodeId {
        match &self.nodes[node.0].kind {
            NodeKind::Grid { array, .. } => *array,
            _ => node,
        }
    }

    fn addressable_children(&self, node: NodeId) -> &[NodeId] {
        match &self.nodes[node.0].kind {
            NodeKind::Container { children } => children,
            _ => &[],
        }
    }
}

impl SchemaView for Dataset {
    fn top_level(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn find_child(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        let candidates: Vec<NodeId> = match parent {
            None => self.roots.clone(),
            Some(parent) => match &self.nodes[parent.0].kind {
                NodeKind::Grid { array, maps } => {
                    let mut all = vec![*array];
                    all.extend_from_slice(maps);
                    all
                }
                _ => self.addressable_children(parent).to_vec(),
            },
        };
        candidates
            .into_iter()
            .find(|&id| self.nodes[id.0].name == name)
    }

    fn is_grid(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Grid { .. })
    }

    fn dimension_count(&self, node: NodeId) -> usize {
        match &self.nodes[self.array_of(node).0].kind {
            NodeKind::Array { dims } => dims.len(),
            _ => 0,
        }
    }

    fn grid_coordinate(&self, node: NodeId, dim: usize) -> Option<NodeId> {
        match &self.nodes[node.0].kind {
            NodeKind::Grid { maps, .. } => maps.get(dim).copied(),
            _ => None,
        }
    }

    fn mark_projected(&mut self, node: NodeId, imply_subtree: bool) {
        self.nodes[node.0].projected = true;
        if !imply_subtree {
            return;
        }
        let mut pending = match &self.nodes[node.0].kind {
            NodeKind::Container { children } => children.clone(),
            NodeKind::Grid { array, maps } => {
                let mut all = vec![*array];
                all.extend_from_slice(maps);
                all
            }
            _ => vec![],
        };
        while let Some(id) = pending.pop() {
            self.nodes[id.0].projected = true;
            match &self.nodes[id.0].kind {
                NodeKind::Container { children } => pending.extend_from_slice(children),
                NodeKind::Grid { array, maps } => {
                    pending.push(*array);
                    pending.extend_from_slice(maps);
                }
                _ => {}
            }
        }
    }

    fn restrict_dimension(
        &mut self,
        node: NodeId,
        dim: usize,
        slice: &Slice,
    ) -> Result<(), SliceError> {
        let node = self.array_of(node);
        match &mut self.nodes[node.0].kind {
            NodeKind::Array { dims } => {
                let rank = dims.len();
                let Some(entry) = dims.get_mut(dim) else {
                    return Err(SliceError::NoSuchDimension { dim, rank });
                };
                if slice.stop() >= entry.len as i64 {
                    return Err(SliceError::OutOfBounds {
                        dim,
                        stop: slice.stop(),
                        len: entry.len,
                    });
                }
                entry.window = Some(*slice);
                Ok(())
            }
            _ => Err(SliceError::NoSuchDimension { dim, rank: 0 }),
        }
    }
}
