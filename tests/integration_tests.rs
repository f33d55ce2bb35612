// tests/integration_tests.rs
//
// End-to-end runs: scan, parse, and resolve whole constraint strings
// against one dataset, the way a server request handler would.

use cexpr_lang::ast::Slice;
use cexpr_lang::clauses::{BasicClauseFactory, Clause};
use cexpr_lang::dataset::Dataset;
use cexpr_lang::output::to_json;
use cexpr_lang::parser::parse;
use cexpr_lang::resolver::resolve;

fn fixture() -> Dataset {
    let mut ds = Dataset::new();
    ds.add_scalar(None, "v0");
    ds.add_array(None, "v1", &[10]);
    ds.add_array(None, "v2", &[10, 10]);
    ds.add_array(None, "v3", &[10, 10, 10]);
    for name in ["st", "sq"] {
        let container = ds.add_container(None, name);
        ds.add_scalar(Some(container), "f0");
        ds.add_array(Some(container), "f1", &[10]);
        ds.add_array(Some(container), "f2", &[10, 10]);
        ds.add_array(Some(container), "f3", &[10, 10, 10]);
    }
    ds.add_grid(None, "g", "a", &[("m1", 10), ("m2", 10), ("m3", 10)]);
    ds
}

fn slice(start: i64, stride: i64, stop: i64) -> Slice {
    Slice::new(start, stride, stop).unwrap()
}

#[test]
fn test_constraint_corpus_resolves() {
    // every one of these must scan, parse, and resolve cleanly
    let corpus = vec![
        "",
        "?",
        "v0",
        "v1,v2,v3",
        "v2[2:2:9][0]",
        "v3[0:9][2:4][1]",
        "st",
        "st.f0,sq.f0",
        "st.f3[1:9][0:2:9][0]",
        "g",
        "g[0:4][1:9][2:2:9]",
        "g.a[2:2:9][1:9][2:2:9]",
        "g.m1[0:4]",
        "&v0=1",
        "&v1>5.0&v2<3",
        "v1&g.a[0][0][2]={37.0,101}&st.f1[0]!=101",
        "?v2[2:2:9][0],g.a&st.f1[0]!=101",
        "&st.f0~=\"^41.*\"",
    ];

    for input in corpus {
        let mut ds = fixture();
        let ast = parse(input).unwrap_or_else(|e| panic!("parse failed for {:?}: {}", input, e));
        resolve(&ast, &mut ds, &mut BasicClauseFactory::new())
            .unwrap_or_else(|e| panic!("resolve failed for {:?}: {}", input, e));
    }
}

#[test]
fn test_mixed_projection_and_selection() {
    let mut ds = fixture();
    let ast = parse("?v2[2:2:9][0],g.a&st.f1[0]!=101").unwrap();
    let clauses = resolve(&ast, &mut ds, &mut BasicClauseFactory::new()).unwrap();

    let v2 = ds.find_path("v2").unwrap();
    let a = ds.find_path("g.a").unwrap();
    let f1 = ds.find_path("st.f1").unwrap();

    assert!(ds.is_projected(v2));
    assert!(ds.is_projected(a));
    assert_eq!(ds.restriction(v2, 0), Some(slice(2, 2, 9)));
    assert_eq!(ds.restriction(v2, 1), Some(slice(0, 1, 0)));
    assert_eq!(ds.restriction(a, 0), None);

    // the selection references st.f1 without projecting it
    assert!(!ds.is_projected(f1));
    assert_eq!(clauses.len(), 1);
    assert!(matches!(clauses[0], Clause::Relational { .. }));
}

#[test]
fn test_selection_mixing_values_and_variables() {
    let mut ds = fixture();
    let ast = parse("v1&g.a[0][0][2]={37.0,101}&st.f1[0]!=101").unwrap();
    let clauses = resolve(&ast, &mut ds, &mut BasicClauseFactory::new()).unwrap();

    assert_eq!(clauses.len(), 2);
    // the selection's slices never touch the projection state
    let a = ds.find_path("g.a").unwrap();
    assert_eq!(ds.restriction(a, 0), None);
    assert!(!ds.is_projected(a));
}

#[test]
fn test_server_function_pipeline() {
    let mut ds = fixture();
    let mut factory = BasicClauseFactory::with_functions(["mean", "bbox"]);
    let ast = parse("mean(g.a,1)&bbox(v1,0,5)").unwrap();
    let clauses = resolve(&ast, &mut ds, &mut factory).unwrap();

    assert_eq!(clauses.len(), 2);
    assert!(matches!(&clauses[0], Clause::FunctionProjection { name, .. } if name == "mean"));
    assert!(matches!(&clauses[1], Clause::BoolFunction { name, .. } if name == "bbox"));
}

#[test]
fn test_json_dump_shape() {
    let ast = parse("v2[0:4],g.a&v0>5.0").unwrap();
    let json = to_json(&ast);

    assert_eq!(json["projections"][0]["var"][0]["name"], "v2");
    assert_eq!(json["projections"][0]["var"][0]["slices"][0]["start"], 0);
    assert_eq!(json["projections"][0]["var"][0]["slices"][0]["stop"], 4);
    assert_eq!(json["projections"][1]["var"][0]["name"], "g");
    assert_eq!(json["projections"][1]["var"][1]["name"], "a");
    assert_eq!(json["selections"][0]["compare"]["op"], ">");
    assert_eq!(json["selections"][0]["compare"]["rhs"][0], 5.0);
}

#[test]
fn test_json_dump_of_empty_constraint() {
    let json = to_json(&parse("").unwrap());
    assert!(json["projections"].is_null());
    assert!(json["selections"].is_null());
}

#[test]
fn test_percent_escaped_names_resolve() {
    let mut ds = Dataset::new();
    let temp = ds.add_array(None, "temp max", &[10]);

    let ast = parse("temp%20max[0:4]").unwrap();
    resolve(&ast, &mut ds, &mut BasicClauseFactory::new()).unwrap();

    assert!(ds.is_projected(temp));
    assert_eq!(ds.restriction(temp, 0), Some(slice(0, 1, 4)));
}
