//! Defines the typed representation of paths, conditions, and schemas.
use crate::parser::parse_path;
use serde_json::Value;

/// A segment in a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// An object key (e.g., `.name`).
    Key(String),
    /// An array index (e.g., `[0]`).
    Index(usize),
}

/// A parsed path expression: a sequence of key/index lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr(pub Vec<PathSegment>);

impl PathExpr {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

/// A single operator check inside a condition object.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// `equals`: deep equality; numbers compare by numeric value.
    Equals(Value),
    /// `notEquals`: negation of `equals`.
    NotEquals(Value),
    /// `greaterThan`: numbers and strings order natively, everything else
    /// is incomparable and fails the check.
    GreaterThan(Value),
    /// `lessThan`: counterpart of `greaterThan`.
    LessThan(Value),
    /// `exists`: a truthy operand requires the value to be present, a falsy
    /// operand requires it to be absent. Note that the schema matcher fails
    /// absent paths before any condition runs, so `exists` only sees an
    /// absent value through [`evaluate`](crate::engine::evaluate) directly.
    Exists(Value),
    /// `inList`: the operand must be an array containing the value.
    InList(Value),
    /// `notInList`: the operand must be an array NOT containing the value.
    NotInList(Value),
    /// `startsWith`: both sides must be strings.
    StartsWith(Value),
    /// `endsWith`: both sides must be strings.
    EndsWith(Value),
    /// `andConditions`: every nested condition must hold.
    All(Vec<Condition>),
    /// `orConditions`: at least one nested condition must hold.
    Any(Vec<Condition>),
    /// `notCondition`: the nested condition must not hold.
    Not(Box<Condition>),
    /// `referenceField`: the value at the operand path in the full document
    /// must equal the value under test.
    Reference(PathExpr),
    /// An operator name outside the recognized set. Always fails, with a
    /// diagnostic.
    Unsupported(String),
    /// An operand whose shape ruled the check out at lowering time, such as
    /// a non-array handed to `andConditions`. Always fails, silently.
    Never,
}

impl Check {
    fn from_entry(operator: &str, operand: &Value) -> Check {
        match operator {
            "equals" => Check::Equals(operand.clone()),
            "notEquals" => Check::NotEquals(operand.clone()),
            "greaterThan" => Check::GreaterThan(operand.clone()),
            "lessThan" => Check::LessThan(operand.clone()),
            "exists" => Check::Exists(operand.clone()),
            "inList" => Check::InList(operand.clone()),
            "notInList" => Check::NotInList(operand.clone()),
            "startsWith" => Check::StartsWith(operand.clone()),
            "endsWith" => Check::EndsWith(operand.clone()),
            "andConditions" => match operand.as_array() {
                Some(items) => Check::All(items.iter().map(Condition::from_value).collect()),
                None => Check::Never,
            },
            "orConditions" => match operand.as_array() {
                Some(items) => Check::Any(items.iter().map(Condition::from_value).collect()),
                None => Check::Never,
            },
            "notCondition" => Check::Not(Box::new(Condition::from_value(operand))),
            "referenceField" => match operand.as_str() {
                Some(path) => Check::Reference(parse_path(path)),
                None => Check::Never,
            },
            other => Check::Unsupported(other.to_string()),
        }
    }
}

/// A condition over one resolved value.
///
/// A condition object with several entries is the conjunction of all of
/// them; this is independent of the schema's top-level `match` mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The checks lowered from a condition object's entries. An empty
    /// object holds vacuously.
    Checks(Vec<Check>),
    /// The raw condition was not a JSON object. Never holds.
    Malformed,
}

impl Condition {
    /// Lowers a raw condition value into the typed tree.
    ///
    /// Lowering is total: unknown operators and ill-shaped operands become
    /// checks that fail at evaluation time instead of errors here.
    pub fn from_value(raw: &Value) -> Condition {
        match raw.as_object() {
            Some(entries) => Condition::Checks(
                entries
                    .iter()
                    .map(|(operator, operand)| Check::from_entry(operator, operand))
                    .collect(),
            ),
            None => Condition::Malformed,
        }
    }
}

/// How per-path results aggregate into the final answer.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchMode {
    /// Every path rule must hold. Vacuously true with no rules.
    All,
    /// At least one path rule must hold. Vacuously false with no rules.
    Any,
    /// A `match` value outside the recognized set; the schema never
    /// matches.
    Unrecognized(String),
}

/// One `path: condition` entry of a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRule {
    /// The path exactly as authored, kept for diagnostics.
    pub raw: String,
    pub path: PathExpr,
    pub condition: Condition,
}

/// A compiled schema: an aggregation mode plus path rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub mode: MatchMode,
    pub paths: Vec<PathRule>,
}

impl Schema {
    /// Lowers a raw schema value.
    ///
    /// A missing or null `match` defaults to [`MatchMode::All`]; a missing
    /// or non-object `path` table is treated as empty.
    pub fn from_value(raw: &Value) -> Schema {
        let mode = match raw.get("match") {
            None | Some(Value::Null) => MatchMode::All,
            Some(Value::String(s)) if s == "all" => MatchMode::All,
            Some(Value::String(s)) if s == "any" => MatchMode::Any,
            Some(other) => MatchMode::Unrecognized(mode_label(other)),
        };
        let paths = raw
            .get("path")
            .and_then(Value::as_object)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(path, condition)| PathRule {
                        raw: path.clone(),
                        path: parse_path(path),
                        condition: Condition::from_value(condition),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Schema { mode, paths }
    }
}

pub(crate) fn mode_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
