//! Strict schema validation and its error type.
//!
//! The matching entry points never require validation: malformed schemas
//! degrade to non-matches there. Validation is for schema authors who want
//! mistakes surfaced as errors up front instead.
use crate::ast::mode_label;
use serde_json::Value;
use thiserror::Error;

/// Structural problems found by [`validate_schema`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("schema must be a JSON object")]
    NotAnObject,

    #[error("unrecognized match mode '{0}' (expected \"all\" or \"any\")")]
    UnrecognizedMode(String),

    #[error("schema 'path' must be an object of path/condition pairs")]
    PathTableNotAnObject,

    #[error("condition for '{path}' must be a JSON object")]
    ConditionNotAnObject { path: String },

    #[error("unsupported operator '{operator}' in condition for '{path}'")]
    UnsupportedOperator { path: String, operator: String },

    #[error("operator '{operator}' in condition for '{path}' expects {expected}")]
    OperandShape {
        path: String,
        operator: String,
        expected: &'static str,
    },
}

/// Strictly checks a raw schema's structure, reporting the first problem.
///
/// Accepts exactly the schemas that lower without any `Unsupported`,
/// `Never`, `Malformed`, or `Unrecognized` fallback.
pub fn validate_schema(schema: &Value) -> Result<(), SchemaError> {
    let root = schema.as_object().ok_or(SchemaError::NotAnObject)?;
    match root.get("match") {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) if s == "all" || s == "any" => {}
        Some(other) => return Err(SchemaError::UnrecognizedMode(mode_label(other))),
    }
    let Some(paths) = root.get("path") else {
        return Ok(());
    };
    let table = paths
        .as_object()
        .ok_or(SchemaError::PathTableNotAnObject)?;
    for (path, condition) in table {
        validate_condition(path, condition)?;
    }
    Ok(())
}

fn validate_condition(path: &str, condition: &Value) -> Result<(), SchemaError> {
    let entries = condition
        .as_object()
        .ok_or_else(|| SchemaError::ConditionNotAnObject {
            path: path.to_string(),
        })?;
    for (operator, operand) in entries {
        match operator.as_str() {
            "equals" | "notEquals" | "greaterThan" | "lessThan" | "exists" | "startsWith"
            | "endsWith" => {}
            "inList" | "notInList" => {
                if !operand.is_array() {
                    return Err(operand_shape(path, operator, "an array of values"));
                }
            }
            "andConditions" | "orConditions" => {
                let items = operand
                    .as_array()
                    .ok_or_else(|| operand_shape(path, operator, "an array of conditions"))?;
                for item in items {
                    validate_condition(path, item)?;
                }
            }
            "notCondition" => validate_condition(path, operand)?,
            "referenceField" => {
                if !operand.is_string() {
                    return Err(operand_shape(path, operator, "a path string"));
                }
            }
            other => {
                return Err(SchemaError::UnsupportedOperator {
                    path: path.to_string(),
                    operator: other.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn operand_shape(path: &str, operator: &str, expected: &'static str) -> SchemaError {
    SchemaError::OperandShape {
        path: path.to_string(),
        operator: operator.to_string(),
        expected,
    }
}
