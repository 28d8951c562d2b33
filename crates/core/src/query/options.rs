use super::field_path::FieldPath;
use super::value::{FieldSource, label_text};
use serde::Serialize;
use serde_json::Value;

/// Selectable value for a column filter drop-down.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldOption {
    pub label: String,
    pub value: Value,
}

/// Distinct defined values of `field`, in first-seen order.
pub fn field_options<T: FieldSource>(rows: &[T], field: &FieldPath) -> Vec<FieldOption> {
    let mut options: Vec<FieldOption> = Vec::new();
    for row in rows {
        let record = row.field_record();
        let Some(value) = field.resolve(&record) else {
            continue;
        };
        if options.iter().any(|option| &option.value == value) {
            continue;
        }
        options.push(FieldOption { label: label_text(value), value: value.clone() });
    }
    options
}
