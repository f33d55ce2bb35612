//! Resolution of a parsed constraint against a schema view.
//!
//! [`resolve`] walks the immutable AST once: the projection pass marks
//! variables and applies array restrictions on the [`SchemaView`], and the
//! selection pass translates clause sub-trees through a [`ClauseFactory`].
//! The engine performs no retries and no logging; malformed references come
//! back as [`ResolveError`] values and the caller decides what to do with
//! the (possibly partially-mutated) view.

use std::fmt;

use crate::ast::{Constraint, FuncCall, Projection, Segment, Selection, Value, VarRef};
use crate::clauses::ClauseFactory;
use crate::schema::{NodeId, SchemaView, SliceError};

/// Errors raised while resolving a constraint against a schema.
///
/// Any error aborts resolution of the whole constraint: no further schema
/// mutations are issued after the failing one, and mutations already applied
/// are not rolled back — treat the view as unusable and open a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// A path segment named no child of the node being searched
    NoSuchVariable(String),

    /// A function name the clause factory does not recognize
    NoSuchFunction(String),

    /// A slice was applied to a variable that is neither array nor grid
    NotAnArray(String),

    /// A slice the schema rejected (bad dimension index or out of bounds)
    Slice { name: String, source: SliceError },

    /// A `~=` pattern the clause factory's regex engine rejected
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::NoSuchVariable(name) => write!(f, "no such variable: {}", name),
            ResolveError::NoSuchFunction(name) => write!(f, "no such function: {}", name),
            ResolveError::NotAnArray(name) => {
                write!(f, "variable {} is not an array and cannot be sliced", name)
            }
            ResolveError::Slice { name, source } => {
                write!(f, "cannot slice {}: {}", name, source)
            }
            ResolveError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid match pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Resolve a parsed constraint.
///
/// Marks projections and applies restrictions on `schema`, and returns the
/// clauses `factory` built — selection clauses and projection-function
/// clauses, in source order.
///
/// # Examples
///
/// ```
/// use cexpr_lang::clauses::BasicClauseFactory;
/// use cexpr_lang::dataset::Dataset;
/// use cexpr_lang::parser::parse;
/// use cexpr_lang::resolver::resolve;
///
/// let mut ds = Dataset::new();
/// let temp = ds.add_array(None, "Temperature", &[30]);
/// ds.add_scalar(None, "Lat");
///
/// let ast = parse("Temperature[0:2:10]&Temperature>5.0").unwrap();
/// let mut factory = BasicClauseFactory::new();
/// let clauses = resolve(&ast, &mut ds, &mut factory).unwrap();
///
/// assert!(ds.is_projected(temp));
/// assert_eq!(clauses.len(), 1);
/// ```
pub fn resolve<S, F>(
    ast: &Constraint,
    schema: &mut S,
    factory: &mut F,
) -> Result<Vec<F::Clause>, ResolveError>
where
    S: SchemaView,
    F: ClauseFactory,
{
    let mut clauses = vec![];

    match &ast.projections {
        None => {
            for node in schema.top_level() {
                schema.mark_projected(node, true);
            }
        }
        Some(projections) => {
            for projection in projections {
                match projection {
                    Projection::Var(var) => project_var(var, schema)?,
                    Projection::Call(call) => {
                        let args = translate_args(&call.args, schema, factory)?;
                        clauses.push(factory.function_projection(&call.name, args)?);
                    }
                }
            }
        }
    }

    if let Some(selections) = &ast.selections {
        for selection in selections {
            match selection {
                Selection::Compare { lhs, op, rhs } => {
                    let lhs = translate_value(lhs, schema, factory)?;
                    let rhs = translate_args(rhs, schema, factory)?;
                    clauses.push(factory.relational(*op, lhs, rhs)?);
                }
                Selection::Call(call) => {
                    let args = translate_args(&call.args, schema, factory)?;
                    clauses.push(factory.boolean_function(&call.name, args)?);
                }
            }
        }
    }

    Ok(clauses)
}

/// Resolve a dotted path to concrete nodes, outermost first. Read-only:
/// a path that fails to resolve leaves the schema untouched.
fn resolve_path<S: SchemaView>(var: &VarRef, schema: &S) -> Result<Vec<NodeId>, ResolveError> {
    let mut chain = Vec::with_capacity(var.segments.len());
    let mut parent = None;
    for segment in &var.segments {
        let node = schema
            .find_child(parent, &segment.name)
            .ok_or_else(|| ResolveError::NoSuchVariable(segment.name.clone()))?;
        chain.push(node);
        parent = Some(node);
    }
    Ok(chain)
}

/// Project one variable path: mark every node on the chain, then apply the
/// slices each segment carries.
///
/// Interior nodes are marked without implying their subtrees, so a later,
/// more specific projection can add only the children it needs while
/// serialization still descends into the container; the innermost node gets
/// its entire subtree.
fn project_var<S: SchemaView>(var: &VarRef, schema: &mut S) -> Result<(), ResolveError> {
    let chain = resolve_path(var, schema)?;

    let last = chain.len() - 1;
    for (i, &node) in chain.iter().enumerate() {
        schema.mark_projected(node, i == last);
    }

    for (segment, &node) in var.segments.iter().zip(&chain) {
        apply_slices(segment, node, schema)?;
    }
    Ok(())
}

/// Apply a segment's slices to its resolved node.
///
/// For a grid, each slice restricts the corresponding dimension of the
/// primary array *and* the matching 1-D coordinate map — the map is sliced
/// with the same range the data array uses on that axis.
fn apply_slices<S: SchemaView>(
    segment: &Segment,
    node: NodeId,
    schema: &mut S,
) -> Result<(), ResolveError> {
    if segment.slices.is_empty() {
        return Ok(());
    }

    let slice_err = |source: SliceError| ResolveError::Slice {
        name: segment.name.clone(),
        source,
    };

    if schema.is_grid(node) {
        for (dim, slice) in segment.slices.iter().enumerate() {
            schema.restrict_dimension(node, dim, slice).map_err(slice_err)?;
            let map = schema
                .grid_coordinate(node, dim)
                .ok_or_else(|| slice_err(SliceError::NoSuchDimension {
                    dim,
                    rank: schema.dimension_count(node),
                }))?;
            schema.restrict_dimension(map, 0, slice).map_err(slice_err)?;
        }
    } else if schema.dimension_count(node) > 0 {
        for (dim, slice) in segment.slices.iter().enumerate() {
            schema.restrict_dimension(node, dim, slice).map_err(slice_err)?;
        }
    } else {
        return Err(ResolveError::NotAnArray(segment.name.clone()));
    }
    Ok(())
}

/// Translate a clause operand. Variable paths resolve read-only — a
/// selection never changes what is projected.
fn translate_value<S, F>(
    value: &Value,
    schema: &mut S,
    factory: &mut F,
) -> Result<F::Operand, ResolveError>
where
    S: SchemaView,
    F: ClauseFactory,
{
    match value {
        Value::Constant(constant) => Ok(factory.constant(constant)),
        Value::Var(var) => {
            let chain = resolve_path(var, schema)?;
            // chain is non-empty: the grammar guarantees a segment
            Ok(factory.variable(chain[chain.len() - 1]))
        }
        Value::Call(FuncCall { name, args }) => {
            let args = translate_args(args, schema, factory)?;
            factory.function(name, args)
        }
    }
}

fn translate_args<S, F>(
    values: &[Value],
    schema: &mut S,
    factory: &mut F,
) -> Result<Vec<F::Operand>, ResolveError>
where
    S: SchemaView,
    F: ClauseFactory,
{
    values
        .iter()
        .map(|value| translate_value(value, schema, factory))
        .collect()
}
