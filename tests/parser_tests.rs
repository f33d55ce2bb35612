// tests/parser_tests.rs

use cexpr_lang::ast::{Const, Projection, RelOp, Selection, Slice, Value};
use cexpr_lang::parser::{ParseError, parse};

fn slice(start: i64, stride: i64, stop: i64) -> Slice {
    Slice::new(start, stride, stop).unwrap()
}

// ============================================================================
// Projections
// ============================================================================

#[test]
fn test_single_variable() {
    let constraint = parse("Temperature").unwrap();
    let projections = constraint.projections.unwrap();
    assert_eq!(projections.len(), 1);
    match &projections[0] {
        Projection::Var(var) => {
            assert_eq!(var.segments.len(), 1);
            assert_eq!(var.segments[0].name, "Temperature");
            assert!(var.segments[0].slices.is_empty());
        }
        _ => panic!("Expected a variable projection"),
    }
    assert!(constraint.selections.is_none());
}

#[test]
fn test_projection_list() {
    let constraint = parse("Temperature,Lat,Lon").unwrap();
    let projections = constraint.projections.unwrap();
    assert_eq!(projections.len(), 3);
}

#[test]
fn test_dotted_path() {
    let constraint = parse("station.profile.temp").unwrap();
    let projections = constraint.projections.unwrap();
    match &projections[0] {
        Projection::Var(var) => {
            let names: Vec<&str> = var.segments.iter().map(|s| s.name.as_str()).collect();
            assert_eq!(names, vec!["station", "profile", "temp"]);
        }
        _ => panic!("Expected a variable projection"),
    }
}

#[test]
fn test_leading_question_mark_ignored() {
    assert_eq!(parse("?Lat").unwrap(), parse("Lat").unwrap());
}

#[test]
fn test_empty_constraint_projects_everything() {
    let constraint = parse("").unwrap();
    assert!(constraint.projections.is_none());
    assert!(constraint.selections.is_none());

    let constraint = parse("?").unwrap();
    assert!(constraint.projections.is_none());
}

#[test]
fn test_selections_only_leaves_projections_none() {
    let constraint = parse("&a=1").unwrap();
    assert!(constraint.projections.is_none());
    assert_eq!(constraint.selections.unwrap().len(), 1);
}

#[test]
fn test_projection_function_call() {
    let constraint = parse("mean(temp,depth)").unwrap();
    let projections = constraint.projections.unwrap();
    match &projections[0] {
        Projection::Call(call) => {
            assert_eq!(call.name, "mean");
            assert_eq!(call.args.len(), 2);
        }
        _ => panic!("Expected a function projection"),
    }
}

// ============================================================================
// Slices
// ============================================================================

#[test]
fn test_slice_forms() {
    let test_cases = vec![
        ("v[5]", slice(5, 1, 5)),
        ("v[2:9]", slice(2, 1, 9)),
        ("v[0:2:10]", slice(0, 2, 10)),
    ];

    for (input, expected) in test_cases {
        let constraint = parse(input).unwrap();
        match &constraint.projections.unwrap()[0] {
            Projection::Var(var) => {
                assert_eq!(var.segments[0].slices, vec![expected], "Failed for {}", input);
            }
            _ => panic!("Expected a variable projection"),
        }
    }
}

#[test]
fn test_plain_index_list_is_single_point_slices() {
    let constraint = parse("g.a[0][2][9]").unwrap();
    match &constraint.projections.unwrap()[0] {
        Projection::Var(var) => {
            assert_eq!(
                var.segments[1].slices,
                vec![slice(0, 1, 0), slice(2, 1, 2), slice(9, 1, 9)]
            );
        }
        _ => panic!("Expected a variable projection"),
    }
}

#[test]
fn test_slices_on_interior_segment() {
    let constraint = parse("st.f3[1:9][0]").unwrap();
    match &constraint.projections.unwrap()[0] {
        Projection::Var(var) => {
            assert!(var.segments[0].slices.is_empty());
            assert_eq!(var.segments[1].slices, vec![slice(1, 1, 9), slice(0, 1, 0)]);
        }
        _ => panic!("Expected a variable projection"),
    }
}

#[test]
fn test_stop_before_start_rejected() {
    assert!(matches!(
        parse("v[5:3]"),
        Err(ParseError::InvalidSlice { start: 5, stop: 3, .. })
    ));
}

#[test]
fn test_zero_stride_rejected() {
    assert!(matches!(
        parse("v[0:0:5]"),
        Err(ParseError::InvalidSlice { stride: 0, .. })
    ));
}

#[test]
fn test_negative_index_rejected() {
    assert!(matches!(
        parse("v[-1]"),
        Err(ParseError::InvalidSlice { start: -1, .. })
    ));
}

#[test]
fn test_float_index_rejected() {
    assert!(matches!(parse("v[1.5]"), Err(ParseError::InvalidIndex(_))));
}

#[test]
fn test_unclosed_slice_rejected() {
    assert!(matches!(parse("v[1:2"), Err(ParseError::Unexpected { .. })));
}

// ============================================================================
// Selections
// ============================================================================

#[test]
fn test_relational_operators() {
    let test_cases = vec![
        ("&a=1", RelOp::Eq),
        ("&a>1", RelOp::Gt),
        ("&a<1", RelOp::Lt),
        ("&a!=1", RelOp::Ne),
        ("&a>=1", RelOp::Ge),
        ("&a<=1", RelOp::Le),
        ("&a~=\"p.*\"", RelOp::RegexMatch),
    ];

    for (input, expected) in test_cases {
        let constraint = parse(input).unwrap();
        match &constraint.selections.unwrap()[0] {
            Selection::Compare { op, .. } => {
                assert_eq!(*op, expected, "Failed for {}", input);
            }
            _ => panic!("Expected a comparison for {}", input),
        }
    }
}

#[test]
fn test_clause_order_preserved() {
    let constraint = parse("&Temp>5&Sal<2").unwrap();
    let selections = constraint.selections.unwrap();
    assert_eq!(selections.len(), 2);
    assert!(matches!(
        selections[0],
        Selection::Compare { op: RelOp::Gt, .. }
    ));
    assert!(matches!(
        selections[1],
        Selection::Compare { op: RelOp::Lt, .. }
    ));
}

#[test]
fn test_value_set_rhs() {
    let constraint = parse("&g.m3[0]={101,102,103}").unwrap();
    match &constraint.selections.unwrap()[0] {
        Selection::Compare { op, rhs, .. } => {
            assert_eq!(*op, RelOp::Eq);
            assert_eq!(
                rhs,
                &vec![
                    Value::Constant(Const::Int(101)),
                    Value::Constant(Const::Int(102)),
                    Value::Constant(Const::Int(103)),
                ]
            );
        }
        _ => panic!("Expected a comparison"),
    }
}

#[test]
fn test_rhs_may_reference_variables() {
    let constraint = parse("&v2[9][0]={101,g.m3,101}").unwrap();
    match &constraint.selections.unwrap()[0] {
        Selection::Compare { lhs, rhs, .. } => {
            assert!(matches!(lhs, Value::Var(_)));
            assert!(matches!(rhs[1], Value::Var(_)));
        }
        _ => panic!("Expected a comparison"),
    }
}

#[test]
fn test_boolean_function_clause() {
    let constraint = parse("&inside(lat,lon)").unwrap();
    match &constraint.selections.unwrap()[0] {
        Selection::Call(call) => {
            assert_eq!(call.name, "inside");
            assert_eq!(call.args.len(), 2);
        }
        _ => panic!("Expected a boolean function clause"),
    }
}

#[test]
fn test_nested_function_values() {
    let constraint = parse("&f(g(1),\"x\")>h()").unwrap();
    match &constraint.selections.unwrap()[0] {
        Selection::Compare { lhs, rhs, .. } => {
            match lhs {
                Value::Call(call) => {
                    assert_eq!(call.name, "f");
                    assert!(matches!(&call.args[0], Value::Call(inner) if inner.name == "g"));
                    assert_eq!(call.args[1], Value::Constant(Const::Str("x".to_string())));
                }
                _ => panic!("Expected a function lhs"),
            }
            assert!(matches!(&rhs[0], Value::Call(call) if call.args.is_empty()));
        }
        _ => panic!("Expected a comparison"),
    }
}

#[test]
fn test_bare_variable_clause_rejected() {
    // only a boolean function call stands alone after '&'
    assert!(matches!(parse("&a"), Err(ParseError::Unexpected { .. })));
}

// ============================================================================
// Constants
// ============================================================================

#[test]
fn test_integer_then_float_fallback() {
    let constraint = parse("&a={5,5.0,1e3}").unwrap();
    match &constraint.selections.unwrap()[0] {
        Selection::Compare { rhs, .. } => {
            assert_eq!(rhs[0], Value::Constant(Const::Int(5)));
            assert_eq!(rhs[1], Value::Constant(Const::Float(5.0)));
            assert_eq!(rhs[2], Value::Constant(Const::Float(1000.0)));
        }
        _ => panic!("Expected a comparison"),
    }
}

#[test]
fn test_percent_escaped_name_resolves_in_segment() {
    let constraint = parse("temp%20max").unwrap();
    match &constraint.projections.unwrap()[0] {
        Projection::Var(var) => assert_eq!(var.segments[0].name, "temp max"),
        _ => panic!("Expected a variable projection"),
    }
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_trailing_garbage_rejected() {
    assert!(matches!(parse("a;b"), Err(ParseError::Unexpected { .. })));
}

#[test]
fn test_lex_errors_propagate() {
    assert!(matches!(parse("&a=\"open"), Err(ParseError::Lex(_))));
}
