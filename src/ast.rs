//! # Constraint-Expression Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for constraint
//! expressions: the textual queries that subset a tree-shaped dataset into a
//! *projection* (which variables, and which index-ranges of their arrays, to
//! return) and a list of *selections* (boolean predicates applied before data
//! is returned).
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[values]** - Constants and the value forms usable as clause operands
//! - **[projections]** - Variable paths, per-dimension slices, function calls
//! - **[operators]** - Relational operators for selection clauses
//! - **[selections]** - Selection clauses (`&lhs op rhs`, `&func(...)`)
//! - **[constraint]** - The root node tying projections and selections
//!
//! ## Quick Start
//!
//! ```text
//! Temperature[0:2:10],Lat&Temperature>5.0
//! ```
//!
//! This constraint projects every second element of indices 0 through 10 of
//! `Temperature`'s first dimension along with `Lat`, and keeps only records
//! where `Temperature` exceeds 5.0.
//!
//! ## Core Concepts
//!
//! ### Constraint Structure
//!
//! Every constraint is an optional comma-separated projection list followed
//! by zero or more `&`-prefixed selection clauses:
//!
//! ```text
//! ?proj,proj,...&clause&clause...
//! ```
//!
//! The leading `?` is accepted and ignored. An absent projection list means
//! "project everything".
//!
//! ### Variable Paths and Slices
//!
//! Variables are addressed by dotted paths from the dataset root, and each
//! path segment may carry per-dimension slices:
//!
//! ```text
//! station.profile.temp[0:9][2]
//! ```
//!
//! A slice is `[n]`, `[start:stop]`, or `[start:stride:stop]`; all bounds are
//! inclusive and validated at parse time.
//!
//! ### Selections
//!
//! A selection clause compares a value against one value or a brace-enclosed
//! set, or invokes a boolean server function:
//!
//! ```text
//! &depth<=100&site~="st.*n"&inside(lat,lon)
//! ```
//!
//! The AST is immutable once built: parsing produces it, resolution walks it
//! without modification, so a parsed constraint can be reused against any
//! number of schema instances.
pub mod tokens;
pub mod values;
pub mod operators;
pub mod projections;
pub mod selections;
pub mod constraint;

pub use tokens::Token;
pub use values::{Const, Value};
pub use operators::RelOp;
pub use projections::{FuncCall, Projection, Segment, Slice, VarRef};
pub use selections::Selection;
pub use constraint::Constraint;
