pub mod ast;
pub mod clauses;
pub mod dataset;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod schema;

pub use ast::{Const, Constraint, FuncCall, Projection, RelOp, Segment, Selection, Slice, Token, Value, VarRef};
pub use clauses::{BasicClauseFactory, Clause, ClauseFactory, Operand};
pub use dataset::Dataset;
pub use lexer::{LexError, Lexer};
pub use output::{to_json, to_json_pretty, to_json_string};
pub use parser::{ParseError, Parser, parse};
pub use resolver::{ResolveError, resolve};
pub use schema::{NodeId, SchemaView, SliceError};
