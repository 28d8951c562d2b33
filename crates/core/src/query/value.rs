use serde_json::Value;
use std::borrow::Cow;

/// Anything that can present itself as a JSON record for field-path lookups.
pub trait FieldSource {
    fn field_record(&self) -> Cow<'_, Value>;
}

impl FieldSource for Value {
    fn field_record(&self) -> Cow<'_, Value> {
        Cow::Borrowed(self)
    }
}

/// Text a resolved value contributes to searching and filtering.
///
/// Falsy scalars (`false`, `0`, `""`) contribute nothing, arrays render as
/// comma-joined items, objects are not searchable.
pub fn search_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) | Value::Object(_) => None,
        Value::Bool(true) => Some("true".to_owned()),
        Value::Number(number) => {
            if number.as_f64().is_some_and(|n| n == 0.0) {
                None
            } else {
                Some(number.to_string())
            }
        }
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(items.iter().map(item_text).collect::<Vec<_>>().join(",")),
    }
}

fn item_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Object(_) => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(item_text).collect::<Vec<_>>().join(","),
    }
}

/// Human-readable label for a defined value; strings are shown unquoted.
pub fn label_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
