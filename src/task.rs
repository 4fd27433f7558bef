//! The task record and field validation.
//!
//! Validation is a pure function of the raw JSON body: it either produces a
//! sanitized field set ready for the store, or an ordered list of field-level
//! errors. Text fields are HTML-escaped before persistence so stored values
//! are safe to render later.
//!
//! The completion-toggle endpoint deliberately bypasses this module: the raw
//! `completed` value from the request goes straight to the store, unchecked.
//! Full edit, by contrast, requires `completed` to be a strict JSON boolean.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

/// One persisted to-do item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Store-assigned identifier; never supplied by the caller.
    pub id: i64,
    pub title: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Sanitized fields for a create operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFields {
    pub title: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
}

/// Sanitized fields for a full edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditFields {
    pub title: String,
    pub priority: String,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
}

/// Escape markup-significant characters so the value is inert when rendered
/// as HTML.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Trim, reject-if-empty, then escape the required `title` field.
fn take_title(body: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get("title").and_then(Value::as_str) {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                errors.push(FieldError::new("title", "title must not be empty"));
                None
            } else {
                Some(escape(trimmed))
            }
        }
        None => {
            errors.push(FieldError::new("title", "title is required"));
            None
        }
    }
}

/// Sanitize the optional `priority` field. An absent, non-text, or
/// whitespace-only value falls back to the default.
fn take_priority(body: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match body.get("priority") {
        None | Some(Value::Null) => Some("Low".to_string()),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Some("Low".to_string())
            } else {
                Some(escape(trimmed))
            }
        }
        Some(_) => {
            errors.push(FieldError::new("priority", "priority must be a string"));
            None
        }
    }
}

/// Parse the optional `due_date` field. Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
fn take_due_date(body: &Value, errors: &mut Vec<FieldError>) -> Option<Option<NaiveDate>> {
    match body.get("due_date") {
        None | Some(Value::Null) => Some(None),
        Some(Value::String(raw)) => {
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"));
            match parsed {
                Ok(date) => Some(Some(date)),
                Err(_) => {
                    errors.push(FieldError::new("due_date", "due_date must be a valid date"));
                    None
                }
            }
        }
        Some(_) => {
            errors.push(FieldError::new("due_date", "due_date must be a valid date"));
            None
        }
    }
}

/// The strict boolean `completed` field required by full edit. No coercion:
/// strings and numbers are rejected.
fn take_completed(body: &Value, errors: &mut Vec<FieldError>) -> Option<bool> {
    match body.get("completed") {
        Some(Value::Bool(b)) => Some(*b),
        _ => {
            errors.push(FieldError::new("completed", "completed must be a boolean"));
            None
        }
    }
}

/// Validate and sanitize a create request body.
///
/// On failure, returns every field error found, in field order.
pub fn validate_create(body: &Value) -> Result<CreateFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = take_title(body, &mut errors);
    let priority = take_priority(body, &mut errors);
    let due_date = take_due_date(body, &mut errors);

    match (title, priority, due_date) {
        (Some(title), Some(priority), Some(due_date)) if errors.is_empty() => Ok(CreateFields {
            title,
            priority,
            due_date,
        }),
        _ => Err(errors),
    }
}

/// Validate and sanitize a full-edit request body.
///
/// Same rules as create, plus `completed` must be a strict JSON boolean.
pub fn validate_full_edit(body: &Value) -> Result<EditFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let title = take_title(body, &mut errors);
    let priority = take_priority(body, &mut errors);
    let due_date = take_due_date(body, &mut errors);
    let completed = take_completed(body, &mut errors);

    match (title, priority, due_date, completed) {
        (Some(title), Some(priority), Some(due_date), Some(completed)) if errors.is_empty() => {
            Ok(EditFields {
                title,
                priority,
                due_date,
                completed,
            })
        }
        _ => Err(errors),
    }
}
