use super::error::QueryError;
use super::field_path::FieldPath;
use super::value::{FieldSource, search_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Case-insensitive comparison applied by a [`FilterRule`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterStrategy {
    #[default]
    Contains,
    EqualTo,
    BeginsWith,
    EndsWith,
}

impl FilterStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterStrategy::Contains => "contains",
            FilterStrategy::EqualTo => "equalTo",
            FilterStrategy::BeginsWith => "beginsWith",
            FilterStrategy::EndsWith => "endsWith",
        }
    }

    /// Both arguments must already be lower-cased.
    fn test(self, haystack: &str, needle: &str) -> bool {
        match self {
            FilterStrategy::Contains => haystack.contains(needle),
            FilterStrategy::EqualTo => haystack == needle,
            FilterStrategy::BeginsWith => haystack.starts_with(needle),
            FilterStrategy::EndsWith => haystack.ends_with(needle),
        }
    }
}

impl FromStr for FilterStrategy {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "contains" => Ok(FilterStrategy::Contains),
            "equalto" | "equals" | "eq" => Ok(FilterStrategy::EqualTo),
            "beginswith" | "startswith" => Ok(FilterStrategy::BeginsWith),
            "endswith" => Ok(FilterStrategy::EndsWith),
            _ => Err(QueryError::UnknownFilterStrategy(s.to_owned())),
        }
    }
}

/// Declarative string filter on one field. Rules combine with AND.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRule {
    field: FieldPath,
    #[serde(default)]
    strategy: FilterStrategy,
    value: String,
    #[serde(default)]
    exclude: bool,
}

impl FilterRule {
    pub fn new(field: FieldPath, strategy: FilterStrategy, value: impl Into<String>) -> Self {
        Self { field, strategy, value: value.into(), exclude: false }
    }

    /// Negates the rule: rows matching it are dropped instead of kept.
    #[must_use]
    pub fn excluding(mut self) -> Self {
        self.exclude = true;
        self
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn strategy(&self) -> FilterStrategy {
        self.strategy
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_exclude(&self) -> bool {
        self.exclude
    }

    /// A record lacking the field fails the rule (and so passes an excluding one).
    pub fn matches(&self, record: &Value) -> bool {
        let needle = self.value.to_lowercase();
        let hit = self
            .field
            .resolve(record)
            .and_then(search_text)
            .is_some_and(|text| self.strategy.test(&text.to_lowercase(), &needle));
        hit != self.exclude
    }
}

/// Parses `field:strategy:value`; a leading `!` marks an excluding rule. The
/// value may itself contain `:`.
impl FromStr for FilterRule {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (exclude, body) = match s.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let mut parts = body.splitn(3, ':');
        let (Some(field), Some(strategy), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(QueryError::MalformedFilter(s.to_owned()));
        };
        let rule = FilterRule::new(FieldPath::parse(field)?, strategy.parse()?, value);
        Ok(if exclude { rule.excluding() } else { rule })
    }
}

pub fn apply_filters<T: FieldSource>(mut rows: Vec<T>, rules: &[FilterRule]) -> Vec<T> {
    if rules.is_empty() {
        return rows;
    }
    rows.retain(|row| {
        let record = row.field_record();
        rules.iter().all(|rule| rule.matches(&record))
    });
    rows
}
