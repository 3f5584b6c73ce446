//! The evaluation engine: path resolution, condition evaluation, and
//! schema aggregation.
use crate::ast::{Check, Condition, MatchMode, PathExpr, PathSegment, Schema};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use serde_json::Value;
use std::cmp::Ordering;

/// A container for the state shared across one evaluation.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// The full document, consulted by `referenceField` checks.
    pub document: &'a Value,
    /// Receives advisory diagnostics (missing paths, unknown operators).
    pub diagnostics: &'a dyn DiagnosticSink,
}

/// Follows a path expression through a document.
///
/// Returns `None` as soon as any segment fails to resolve: a missing key,
/// a key lookup on something that is not an object, an index into
/// something that is not an array, or an index past the end. A `null` leaf
/// is still `Some`, so "present but null" stays distinct from "missing".
pub fn resolve<'a>(document: &'a Value, path: &PathExpr) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.segments() {
        current = match segment {
            PathSegment::Key(key) => current.get(key)?,
            PathSegment::Index(index) => current.get(index)?,
        };
    }
    Some(current)
}

/// Evaluates a condition against a resolved value.
///
/// `actual` is `None` when the value under test is absent. The schema
/// matcher never gets here with an absent value (missing paths fail before
/// any condition runs), but callers composing their own flows can, and
/// `exists` is defined over absence.
///
/// Every check of a condition object is evaluated even after one fails, so
/// a condition with several mistakes reports every diagnostic.
pub fn evaluate(actual: Option<&Value>, condition: &Condition, e_ctx: &EvaluationContext) -> bool {
    match condition {
        Condition::Malformed => false,
        Condition::Checks(checks) => checks
            .iter()
            .fold(true, |all_held, check| {
                check_one(actual, check, e_ctx) && all_held
            }),
    }
}

fn check_one(actual: Option<&Value>, check: &Check, e_ctx: &EvaluationContext) -> bool {
    match check {
        Check::Equals(expected) => actual.is_some_and(|a| values_equal(a, expected)),
        Check::NotEquals(expected) => !actual.is_some_and(|a| values_equal(a, expected)),
        Check::GreaterThan(expected) => {
            actual.is_some_and(|a| compare(a, expected) == Some(Ordering::Greater))
        }
        Check::LessThan(expected) => {
            actual.is_some_and(|a| compare(a, expected) == Some(Ordering::Less))
        }
        Check::Exists(expected) => {
            if is_truthy(expected) {
                actual.is_some()
            } else {
                actual.is_none()
            }
        }
        Check::InList(expected) => expected.as_array().is_some_and(|list| {
            actual.is_some_and(|a| list.iter().any(|item| values_equal(a, item)))
        }),
        Check::NotInList(expected) => expected.as_array().is_some_and(|list| {
            !actual.is_some_and(|a| list.iter().any(|item| values_equal(a, item)))
        }),
        Check::StartsWith(expected) => {
            match (actual.and_then(Value::as_str), expected.as_str()) {
                (Some(a), Some(prefix)) => a.starts_with(prefix),
                _ => false,
            }
        }
        Check::EndsWith(expected) => match (actual.and_then(Value::as_str), expected.as_str()) {
            (Some(a), Some(suffix)) => a.ends_with(suffix),
            _ => false,
        },
        Check::All(conditions) => conditions.iter().all(|c| evaluate(actual, c, e_ctx)),
        Check::Any(conditions) => conditions.iter().any(|c| evaluate(actual, c, e_ctx)),
        Check::Not(inner) => !evaluate(actual, inner, e_ctx),
        Check::Reference(path) => match (actual, resolve(e_ctx.document, path)) {
            (Some(a), Some(referenced)) => values_equal(a, referenced),
            (None, None) => true,
            _ => false,
        },
        Check::Unsupported(name) => {
            e_ctx
                .diagnostics
                .report(Diagnostic::UnsupportedOperator { name });
            false
        }
        Check::Never => false,
    }
}

/// Matches a document against a compiled schema, reporting diagnostics to
/// the given sink.
///
/// Every path rule is evaluated before aggregation, so each missing path
/// emits its warning regardless of mode or of earlier failures.
pub fn match_schema_with(
    document: &Value,
    schema: &Schema,
    diagnostics: &dyn DiagnosticSink,
) -> bool {
    let e_ctx = EvaluationContext {
        document,
        diagnostics,
    };
    let results: Vec<bool> = schema
        .paths
        .iter()
        .map(|rule| match resolve(document, &rule.path) {
            Some(actual) => evaluate(Some(actual), &rule.condition, &e_ctx),
            None => {
                diagnostics.report(Diagnostic::MissingPath { path: &rule.raw });
                false
            }
        })
        .collect();
    match &schema.mode {
        MatchMode::All => results.iter().all(|held| *held),
        MatchMode::Any => results.iter().any(|held| *held),
        MatchMode::Unrecognized(mode) => {
            diagnostics.report(Diagnostic::UnrecognizedMode { mode });
            false
        }
    }
}

/// Deep equality with one carve-out: two JSON numbers compare by numeric
/// value, so an integer `200` in a document equals a `200.0` authored in a
/// schema.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Ordering for `greaterThan`/`lessThan`: numbers compare numerically,
/// strings lexicographically, any other pairing is incomparable.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Truthiness for the `exists` operand.
/// `false`, `null`, `0`, `""`, and empty arrays/objects are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
