use super::field_path::FieldPath;
use super::filter::FilterRule;
use super::paging::Page;
use super::sort::SortRule;
use serde::{Deserialize, Serialize};

/// Search, filter, sort and paging parameters the host supplies with each
/// fetch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    #[serde(default)]
    search_text: String,
    #[serde(default)]
    search_columns: Vec<FieldPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<Page>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sort_by: Vec<SortRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    filter_by: Vec<FilterRule>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>, columns: Vec<FieldPath>) -> Self {
        self.search_text = text.into();
        self.search_columns = columns;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, rule: SortRule) -> Self {
        self.sort_by.push(rule);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, rule: FilterRule) -> Self {
        self.filter_by.push(rule);
        self
    }

    pub fn set_page(&mut self, page: Option<Page>) {
        self.page = page;
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn search_columns(&self) -> &[FieldPath] {
        &self.search_columns
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn sort_by(&self) -> &[SortRule] {
        &self.sort_by
    }

    pub fn filter_by(&self) -> &[FilterRule] {
        &self.filter_by
    }

    /// True when the search would actually drop rows.
    pub fn has_search(&self) -> bool {
        !self.search_text.trim().is_empty() && !self.search_columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn deserializes_host_state() {
        let state: QueryState = serde_json::from_value(json!({
            "searchText": "prof",
            "searchColumns": ["name", "profile.email"],
            "page": { "currentPage": 2, "pageSize": 5 },
            "sortBy": [{ "field": "name", "direction": "desc" }],
            "filterBy": [{ "field": "writeAccess", "strategy": "equalTo", "value": "clientModify" }]
        }))
        .expect("valid state");

        assert!(state.has_search());
        assert_eq!(state.search_columns()[1].as_str(), "profile.email");
        assert_eq!(state.page().map(Page::current_page), Some(2));
        assert_eq!(state.sort_by().len(), 1);
        assert_eq!(state.filter_by()[0].value(), "clientModify");
    }

    #[rstest]
    #[case("", vec!["name"], false)]
    #[case("  ", vec!["name"], false)]
    #[case("prof", vec![], false)]
    #[case("prof", vec!["name"], true)]
    fn has_search_requires_text_and_columns(
        #[case] text: &str,
        #[case] columns: Vec<&str>,
        #[case] expected: bool,
    ) {
        let columns = columns.into_iter().map(|c| FieldPath::parse(c).unwrap()).collect();
        assert_eq!(QueryState::new().with_search(text, columns).has_search(), expected);
    }
}
