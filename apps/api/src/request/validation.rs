//! Declarative shape checks for untyped JSON request bodies.
//!
//! A request type lists its fields as [`FieldRule`]s. [`check_fields`] evaluates
//! every rule and collects every violation; it never stops at the first one.

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// The key may be missing. An explicit `null` is still a type violation.
    Optional,
}

/// A single string field of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub presence: Presence,
    /// Minimum length in characters.
    pub min_len: usize,
}

impl FieldRule {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
            min_len: 1,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Optional,
            min_len: 1,
        }
    }
}

/// Implemented by typed request bodies that are checked with [`validate_payload`].
pub trait RequestShape: DeserializeOwned {
    const FIELDS: &'static [FieldRule];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    TooSmall,
}

/// One field-level violation, serialized into the `issues` array of a 400 response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<bool>,
    /// Keys leading to the offending value. Empty for the body itself.
    pub path: Vec<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn missing(field: &str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            expected: Some("string"),
            received: Some("undefined"),
            minimum: None,
            value_type: None,
            inclusive: None,
            exact: None,
            path: vec![field.to_string()],
            message: "Required".to_string(),
        }
    }

    pub fn wrong_type(path: Vec<String>, expected: &'static str, received: &'static str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            expected: Some(expected),
            received: Some(received),
            minimum: None,
            value_type: None,
            inclusive: None,
            exact: None,
            path,
            message: format!("Expected {expected}, received {received}"),
        }
    }

    pub fn too_small(field: &str, minimum: usize) -> Self {
        Self {
            code: IssueCode::TooSmall,
            expected: None,
            received: None,
            minimum: Some(minimum),
            value_type: Some("string"),
            inclusive: Some(true),
            exact: Some(false),
            path: vec![field.to_string()],
            message: format!("String must contain at least {minimum} character(s)"),
        }
    }

    /// The field this issue points at, if any.
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// JSON type names as reported in `expected` / `received`.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Evaluates every rule against `payload` and returns all violations in rule order.
/// An empty result means the payload conforms.
pub fn check_fields(payload: &Value, rules: &[FieldRule]) -> Vec<ValidationIssue> {
    let Some(object) = payload.as_object() else {
        return vec![ValidationIssue::wrong_type(
            Vec::new(),
            "object",
            json_type_name(payload),
        )];
    };

    let mut issues = Vec::new();

    for rule in rules {
        match object.get(rule.name) {
            None => {
                if rule.presence == Presence::Required {
                    issues.push(ValidationIssue::missing(rule.name));
                }
            }
            Some(Value::String(s)) => {
                if s.chars().count() < rule.min_len {
                    issues.push(ValidationIssue::too_small(rule.name, rule.min_len));
                }
            }
            Some(other) => issues.push(ValidationIssue::wrong_type(
                vec![rule.name.to_string()],
                "string",
                json_type_name(other),
            )),
        }
    }

    issues
}

/// Checks `payload` against `T::FIELDS` and narrows it to `T`.
///
/// Returns `AppError::InvalidBody` carrying every violation when the shape does not match.
pub fn validate_payload<T: RequestShape>(payload: Value) -> Result<T, AppError> {
    let issues = check_fields(&payload, T::FIELDS);
    if !issues.is_empty() {
        let fields: Vec<&str> = issues.iter().filter_map(ValidationIssue::field).collect();
        warn!(
            "Request body failed validation with {} issue(s): {fields:?}",
            issues.len()
        );
        return Err(AppError::InvalidBody(issues));
    }

    let data = serde_json::from_value(payload)
        .context("validated payload does not deserialize into its request type")?;
    Ok(data)
}
