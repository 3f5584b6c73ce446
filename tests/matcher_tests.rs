use jmatch::{
    Condition, Diagnostic, DiagnosticSink, EvaluationContext, Schema, evaluate, match_schema,
    match_schema_with,
};
use serde_json::{Value, json};
use std::cell::RefCell;

/// Captures diagnostics so tests can assert on them without coupling to a
/// particular output stream.
#[derive(Default)]
struct CollectingSink {
    messages: RefCell<Vec<String>>,
}

impl CollectingSink {
    fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic<'_>) {
        self.messages.borrow_mut().push(diagnostic.to_string());
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_response() -> Value {
    json!({
        "status": "OK",
        "items": [
            { "status": "SUCCESS", "code": 123 },
            { "status": "FAILED", "code": 200 }
        ],
        "results": {
            "list": [
                { "name": "item1", "value": 50 },
                { "name": "item2", "value": 75 }
            ]
        }
    })
}

#[test]
fn matches_basic_schema_in_any_mode() {
    init_logging();
    let schema = json!({
        "match": "any",
        "path": {
            "status": { "equals": "OK" },
            "items[1].code": { "greaterThan": 100 }
        }
    });
    assert!(match_schema(&sample_response(), &schema));
}

#[test]
fn matches_nested_and_array_values_in_all_mode() {
    init_logging();
    let schema = json!({
        "match": "all",
        "path": {
            "status": { "equals": "OK" },
            "items[1].code": { "greaterThan": 100, "lessThan": 300 },
            "results.list[0].name": { "startsWith": "item" }
        }
    });
    assert!(match_schema(&sample_response(), &schema));
}

#[test]
fn matches_in_list_and_compound_numeric_conditions() {
    init_logging();
    let response = json!({ "status": "OK", "role": "admin", "score": 87 });
    let schema = json!({
        "match": "all",
        "path": {
            "role": { "inList": ["admin", "moderator"] },
            "score": { "greaterThan": 80, "notEquals": 100 }
        }
    });
    assert!(match_schema(&response, &schema));
}

#[test]
fn in_list_with_non_array_operand_never_matches() {
    init_logging();
    let response = json!({ "role": "admin" });
    let schema = json!({ "path": { "role": { "inList": { "x": 1 } } } });
    assert!(!match_schema(&response, &schema));
}

#[test]
fn negation_inverts_a_nested_condition() {
    init_logging();
    let response = json!({ "status": "FAILURE", "code": 500 });
    let schema = json!({
        "match": "all",
        "path": {
            "status": { "notCondition": { "equals": "SUCCESS" } },
            "code": { "equals": 500 }
        }
    });
    assert!(match_schema(&response, &schema));
}

#[test]
fn reference_field_compares_two_paths_of_the_document() {
    init_logging();
    let response = json!({ "createdAt": "2022-10-01", "updatedAt": "2022-10-01" });
    let schema = json!({
        "match": "all",
        "path": {
            "createdAt": { "equals": "2022-10-01" },
            "updatedAt": { "referenceField": "createdAt" }
        }
    });
    assert!(match_schema(&response, &schema));

    let drifted = json!({ "createdAt": "2022-10-01", "updatedAt": "2022-10-02" });
    assert!(!match_schema(&drifted, &schema));
}

#[test]
fn default_mode_is_all_and_default_path_set_is_empty() {
    init_logging();
    let response = sample_response();
    assert!(match_schema(&response, &json!({})));
    assert!(match_schema(&response, &json!({ "match": "all", "path": {} })));
    assert!(!match_schema(&response, &json!({ "match": "any", "path": {} })));
}

#[test]
fn missing_path_fails_the_rule_and_reports_a_diagnostic() {
    let sink = CollectingSink::default();
    let schema = Schema::from_value(&json!({
        "match": "all",
        "path": {
            "status": { "equals": "OK" },
            "items[5].code": { "greaterThan": 100 }
        }
    }));
    assert!(!match_schema_with(&sample_response(), &schema, &sink));
    assert_eq!(
        sink.messages(),
        vec!["path 'items[5].code' does not exist in the document"]
    );
}

#[test]
fn missing_path_is_tolerated_in_any_mode_but_still_reported() {
    let sink = CollectingSink::default();
    let schema = Schema::from_value(&json!({
        "match": "any",
        "path": {
            "status": { "equals": "OK" },
            "totally.absent": { "exists": true }
        }
    }));
    assert!(match_schema_with(&sample_response(), &schema, &sink));
    assert_eq!(
        sink.messages(),
        vec!["path 'totally.absent' does not exist in the document"]
    );
}

#[test]
fn unsupported_operator_fails_without_silencing_its_siblings() {
    let sink = CollectingSink::default();
    let schema = Schema::from_value(&json!({
        "path": {
            "status": { "matches": "O.*", "frobnicate": 1 }
        }
    }));
    assert!(!match_schema_with(&sample_response(), &schema, &sink));
    // Both bogus entries report; evaluation does not stop at the first.
    let messages = sink.messages();
    assert!(messages.contains(&"unsupported operator 'frobnicate' used".to_string()));
    assert!(messages.contains(&"unsupported operator 'matches' used".to_string()));
}

#[test]
fn unrecognized_mode_yields_false_with_a_diagnostic() {
    let sink = CollectingSink::default();
    let schema = Schema::from_value(&json!({
        "match": "some",
        "path": { "status": { "equals": "OK" } }
    }));
    assert!(!match_schema_with(&sample_response(), &schema, &sink));
    assert_eq!(sink.messages(), vec!["unrecognized match mode 'some'"]);
}

#[test]
fn deeply_nested_composites_terminate_at_authored_depth() {
    init_logging();
    let response = json!({ "score": 87 });
    let schema = json!({
        "path": {
            "score": {
                "andConditions": [
                    { "orConditions": [
                        { "lessThan": 0 },
                        { "notCondition": { "inList": [0, 100] } }
                    ] },
                    { "greaterThan": 80 }
                ]
            }
        }
    });
    assert!(match_schema(&response, &schema));
}

#[test]
fn absent_value_never_reaches_conditions_through_the_matcher() {
    let sink = CollectingSink::default();
    // Even a condition that would accept absence fails on a missing path.
    let schema = Schema::from_value(&json!({
        "path": { "missing": { "exists": false } }
    }));
    assert!(!match_schema_with(&sample_response(), &schema, &sink));
    assert_eq!(
        sink.messages(),
        vec!["path 'missing' does not exist in the document"]
    );

    // Direct evaluation is the escape hatch for absence-aware checks.
    let document = sample_response();
    let e_ctx = EvaluationContext {
        document: &document,
        diagnostics: &sink,
    };
    let wants_absent = Condition::from_value(&json!({ "exists": false }));
    assert!(evaluate(None, &wants_absent, &e_ctx));
}
