//! Selection-clause construction.
//!
//! The resolver does not evaluate predicates; it translates the selection
//! sub-trees of a constraint into clause objects through a [`ClauseFactory`]
//! and hands the resulting list back to the caller. A downstream evaluator
//! applies the clauses to actual data records.
//!
//! [`BasicClauseFactory`] is the default factory: it builds inert
//! [`Operand`]/[`Clause`] trees, checks function names against a registered
//! table, and validates `~=` patterns eagerly so a bad regex fails at
//! resolution time instead of deep inside data iteration.

use std::collections::HashSet;

use regex::Regex;

use crate::ast::{Const, RelOp};
use crate::resolver::ResolveError;
use crate::schema::NodeId;

/// Builds clause operands and clauses on the resolver's behalf.
///
/// Implementations choose their own operand and clause representations; a
/// server with a function registry and typed comparators plugs it in here.
/// Fallible methods report unknown function names as
/// [`ResolveError::NoSuchFunction`].
pub trait ClauseFactory {
    type Operand;
    type Clause;

    /// Operand carrying a literal constant.
    fn constant(&mut self, value: &Const) -> Self::Operand;

    /// Operand referencing a resolved schema variable.
    fn variable(&mut self, node: NodeId) -> Self::Operand;

    /// Operand computed by a server function.
    fn function(&mut self, name: &str, args: Vec<Self::Operand>)
    -> Result<Self::Operand, ResolveError>;

    /// Relational clause `lhs op rhs`; more than one rhs operand means
    /// "lhs relates to one of".
    fn relational(
        &mut self,
        op: RelOp,
        lhs: Self::Operand,
        rhs: Vec<Self::Operand>,
    ) -> Result<Self::Clause, ResolveError>;

    /// Boolean server-function clause (`&func(...)`).
    fn boolean_function(
        &mut self,
        name: &str,
        args: Vec<Self::Operand>,
    ) -> Result<Self::Clause, ResolveError>;

    /// Projection-function clause (`func(...)` in the projection list).
    fn function_projection(
        &mut self,
        name: &str,
        args: Vec<Self::Operand>,
    ) -> Result<Self::Clause, ResolveError>;
}

/// Operand built by [`BasicClauseFactory`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Constant(Const),
    Variable(NodeId),
    Function { name: String, args: Vec<Operand> },
}

/// Clause built by [`BasicClauseFactory`].
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Relational {
        op: RelOp,
        lhs: Operand,
        rhs: Vec<Operand>,
    },
    BoolFunction {
        name: String,
        args: Vec<Operand>,
    },
    FunctionProjection {
        name: String,
        args: Vec<Operand>,
    },
}

/// Default clause factory with a registered function-name table.
///
/// # Examples
///
/// ```
/// use cexpr_lang::clauses::BasicClauseFactory;
///
/// let factory = BasicClauseFactory::with_functions(["grep", "inside"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicClauseFactory {
    functions: HashSet<String>,
}

impl BasicClauseFactory {
    /// A factory that knows no server functions; every function reference
    /// resolves to `NoSuchFunction`.
    pub fn new() -> Self {
        BasicClauseFactory::default()
    }

    pub fn with_functions<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BasicClauseFactory {
            functions: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn register(&mut self, name: &str) {
        self.functions.insert(name.to_string());
    }

    fn lookup(&self, name: &str) -> Result<(), ResolveError> {
        if self.functions.contains(name) {
            Ok(())
        } else {
            Err(ResolveError::NoSuchFunction(name.to_string()))
        }
    }
}

impl ClauseFactory for BasicClauseFactory {
    type Operand = Operand;
    type Clause = Clause;

    fn constant(&mut self, value: &Const) -> Operand {
        Operand::Constant(value.clone())
    }

    fn variable(&mut self, node: NodeId) -> Operand {
        Operand::Variable(node)
    }

    fn function(&mut self, name: &str, args: Vec<Operand>) -> Result<Operand, ResolveError> {
        self.lookup(name)?;
        Ok(Operand::Function {
            name: name.to_string(),
            args,
        })
    }

    fn relational(
        &mut self,
        op: RelOp,
        lhs: Operand,
        rhs: Vec<Operand>,
    ) -> Result<Clause, ResolveError> {
        if op == RelOp::RegexMatch {
            // Validate constant patterns now; matching happens downstream.
            for operand in &rhs {
                if let Operand::Constant(Const::Str(pattern)) = operand {
                    Regex::new(pattern).map_err(|e| ResolveError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                }
            }
        }
        Ok(Clause::Relational { op, lhs, rhs })
    }

    fn boolean_function(&mut self, name: &str, args: Vec<Operand>) -> Result<Clause, ResolveError> {
        self.lookup(name)?;
        Ok(Clause::BoolFunction {
            name: name.to_string(),
            args,
        })
    }

    fn function_projection(
        &mut self,
        name: &str,
        args: Vec<Operand>,
    ) -> Result<Clause, ResolveError> {
        self.lookup(name)?;
        Ok(Clause::FunctionProjection {
            name: name.to_string(),
            args,
        })
    }
}
