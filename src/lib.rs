//! Declarative, path-based schema matching for JSON values.
//!
//! This crate evaluates whether a JSON document satisfies a schema of
//! path-based conditions, without imperative validation code. A schema
//! pairs dotted path expressions (`results.list[0].name`) with condition
//! objects (`{ "greaterThan": 100 }`), and an aggregation mode decides
//! whether every path must match (`all`) or at least one (`any`).
//!
//! ```
//! use serde_json::json;
//!
//! let response = json!({
//!     "status": "OK",
//!     "items": [ { "code": 123 }, { "code": 200 } ]
//! });
//! let schema = json!({
//!     "match": "all",
//!     "path": {
//!         "status": { "equals": "OK" },
//!         "items[1].code": { "greaterThan": 100 }
//!     }
//! });
//! assert!(jmatch::match_schema(&response, &schema));
//! ```
//!
//! Matching never fails: unresolvable paths, unknown operators, and
//! ill-shaped operands all degrade to non-matches with advisory
//! diagnostics, so a broken schema or a surprising response cannot
//! interrupt the caller. Use [`validate_schema`] to surface schema
//! mistakes as errors up front instead.
//!
//! Condition trees are finite literal values, so evaluation always
//! terminates at the authored nesting depth. Conditions built by hand
//! through the [`ast`] types must stay trees as well; that is a caller
//! responsibility, not something the engine detects.

pub mod ast;
pub mod diagnostics;
pub mod engine;
pub mod error;
mod parser;

pub use ast::{Check, Condition, MatchMode, PathExpr, PathRule, PathSegment, Schema};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};
pub use engine::{EvaluationContext, evaluate, match_schema_with, resolve};
pub use error::{SchemaError, validate_schema};
pub use parser::parse_path;

use serde_json::Value;

/// Matches a document against a raw schema value.
///
/// The schema is lowered on every call; callers matching many documents
/// against one schema should compile it once with [`Schema::from_value`]
/// and use [`match_schema_with`]. Diagnostics go to the `log` facade via
/// [`LogSink`].
pub fn match_schema(document: &Value, schema: &Value) -> bool {
    let schema = Schema::from_value(schema);
    engine::match_schema_with(document, &schema, &LogSink)
}

/// Resolves a dotted path expression against a document.
///
/// Returns `None` when the path does not resolve; a `null` leaf resolves
/// to `Some(&Value::Null)`.
pub fn get_value_by_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    engine::resolve(document, &parser::parse_path(path))
}

/// Evaluates a raw condition against a single value.
///
/// `document` supplies the lookup target for `referenceField` checks; pass
/// the value itself when no reference checks are in play.
pub fn match_condition(actual: &Value, condition: &Value, document: &Value) -> bool {
    let condition = Condition::from_value(condition);
    let e_ctx = EvaluationContext {
        document,
        diagnostics: &LogSink,
    };
    engine::evaluate(Some(actual), &condition, &e_ctx)
}
