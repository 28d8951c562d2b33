use super::field_path::FieldPath;
use super::value::{FieldSource, search_text};

/// Keeps rows where at least one column value contains `text`,
/// case-insensitively.
///
/// Blank text or an empty column list matches everything and returns `rows`
/// unchanged.
pub fn search<T: FieldSource>(mut rows: Vec<T>, text: &str, columns: &[FieldPath]) -> Vec<T> {
    if text.trim().is_empty() || columns.is_empty() {
        return rows;
    }

    let needle = text.to_lowercase();
    let before = rows.len();
    rows.retain(|row| matches_row(row, &needle, columns));
    tracing::trace!(before, after = rows.len(), needle = %needle, "search applied");
    rows
}

/// `needle` must already be lower-cased.
pub fn matches_row<T: FieldSource + ?Sized>(row: &T, needle: &str, columns: &[FieldPath]) -> bool {
    let record = row.field_record();
    columns
        .iter()
        .filter_map(|column| column.resolve(&record))
        .filter_map(search_text)
        .any(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn columns(paths: &[&str]) -> Vec<FieldPath> {
        paths.iter().map(|path| FieldPath::parse(path).unwrap()).collect()
    }

    #[fixture]
    fn rows() -> Vec<Value> {
        vec![
            json!({ "name": "phoneNumber", "writeAccess": "clientModify" }),
            json!({ "name": "data" }),
            json!({ "name": "profile", "contact": { "email": "Jane@Example.com" } }),
        ]
    }

    #[rstest]
    #[case("", &["name"])]
    #[case("   ", &["name"])]
    #[case("prof", &[])]
    fn empty_query_is_identity(rows: Vec<Value>, #[case] text: &str, #[case] cols: &[&str]) {
        assert_eq!(search(rows.clone(), text, &columns(cols)), rows);
    }

    #[rstest]
    fn matches_substring_case_insensitively(rows: Vec<Value>) {
        let found = search(rows, "PROF", &columns(&["name"]));
        assert_eq!(found, vec![json!({ "name": "profile", "contact": { "email": "Jane@Example.com" } })]);
    }

    #[rstest]
    fn nested_columns_participate(rows: Vec<Value>) {
        let found = search(rows, "example.com", &columns(&["name", "contact.email"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], json!("profile"));
    }

    #[rstest]
    fn rows_without_requested_columns_never_match(rows: Vec<Value>) {
        let found = search(rows, "client", &columns(&["writeAccess"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], json!("phoneNumber"));
    }

    #[rstest]
    fn untrimmed_text_is_matched_verbatim(rows: Vec<Value>) {
        assert!(search(rows.clone(), " data", &columns(&["name"])).is_empty());
        assert_eq!(search(rows, "data", &columns(&["name"])).len(), 1);
    }
}
