//! JSON rendering of a parsed constraint.
//!
//! Produces a deterministic [`serde_json::Value`] mirror of the AST, used by
//! the `cexpr` binary and handy for debugging or golden tests. The rendering
//! is one-way: it is a dump of the tree, not a wire format.
//!
//! # Examples
//!
//! ```
//! use cexpr_lang::output::to_json;
//! use cexpr_lang::parser::parse;
//!
//! let ast = parse("Lat&Temp>5.0").unwrap();
//! let json = to_json(&ast);
//! assert_eq!(json["projections"][0]["var"][0]["name"], "Lat");
//! ```

use serde_json::{Value as Json, json};

use crate::ast::{Const, Constraint, FuncCall, Projection, Selection, Slice, Value, VarRef};

/// Render a constraint AST as JSON.
pub fn to_json(constraint: &Constraint) -> Json {
    json!({
        "projections": match &constraint.projections {
            None => Json::Null,
            Some(list) => Json::Array(list.iter().map(projection_json).collect()),
        },
        "selections": match &constraint.selections {
            None => Json::Null,
            Some(list) => Json::Array(list.iter().map(selection_json).collect()),
        },
    })
}

/// Render a constraint AST as a compact JSON string.
pub fn to_json_string(constraint: &Constraint) -> String {
    to_json(constraint).to_string()
}

/// Render a constraint AST as a pretty-printed JSON string.
pub fn to_json_pretty(constraint: &Constraint) -> String {
    serde_json::to_string_pretty(&to_json(constraint)).unwrap_or_default()
}

fn projection_json(projection: &Projection) -> Json {
    match projection {
        Projection::Var(var) => json!({ "var": var_json(var) }),
        Projection::Call(call) => json!({ "call": call_json(call) }),
    }
}

fn var_json(var: &VarRef) -> Json {
    Json::Array(
        var.segments
            .iter()
            .map(|segment| {
                json!({
                    "name": segment.name,
                    "slices": Json::Array(segment.slices.iter().map(slice_json).collect()),
                })
            })
            .collect(),
    )
}

fn slice_json(slice: &Slice) -> Json {
    json!({
        "start": slice.start(),
        "stride": slice.stride(),
        "stop": slice.stop(),
    })
}

fn call_json(call: &FuncCall) -> Json {
    json!({
        "name": call.name,
        "args": Json::Array(call.args.iter().map(value_json).collect()),
    })
}

fn value_json(value: &Value) -> Json {
    match value {
        Value::Constant(Const::Int(n)) => json!(n),
        Value::Constant(Const::Float(n)) => json!(n),
        Value::Constant(Const::Str(s)) => json!(s),
        Value::Var(var) => json!({ "var": var_json(var) }),
        Value::Call(call) => json!({ "call": call_json(call) }),
    }
}

fn selection_json(selection: &Selection) -> Json {
    match selection {
        Selection::Compare { lhs, op, rhs } => json!({
            "compare": {
                "lhs": value_json(lhs),
                "op": op.to_string(),
                "rhs": Json::Array(rhs.iter().map(value_json).collect()),
            }
        }),
        Selection::Call(call) => json!({ "call": call_json(call) }),
    }
}
