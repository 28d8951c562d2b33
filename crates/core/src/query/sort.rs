use super::error::QueryError;
use super::field_path::FieldPath;
use super::value::{FieldSource, label_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(QueryError::InvalidSortDirection(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    field: FieldPath,
    #[serde(default)]
    direction: SortDirection,
}

impl SortRule {
    pub fn new(field: FieldPath, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: FieldPath) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: FieldPath) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    pub fn field(&self) -> &FieldPath {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

/// Parses `field` or `field:asc|desc`.
impl FromStr for SortRule {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once(':') {
            Some((field, direction)) => Ok(Self::new(FieldPath::parse(field)?, direction.parse()?)),
            None => Ok(Self::asc(FieldPath::parse(s)?)),
        }
    }
}

/// Stable multi-key sort; the first rule that tells two rows apart decides.
pub fn sort_rows<T: FieldSource>(rows: Vec<T>, rules: &[SortRule]) -> Vec<T> {
    if rules.is_empty() || rows.len() < 2 {
        return rows;
    }

    let mut keyed: Vec<(Vec<Option<Value>>, T)> = rows
        .into_iter()
        .map(|row| {
            let record = row.field_record();
            let keys: Vec<Option<Value>> = rules.iter().map(|rule| rule.field.resolve(&record).cloned()).collect();
            drop(record);
            (keys, row)
        })
        .collect();

    keyed.sort_by(|(lhs, _), (rhs, _)| {
        rules
            .iter()
            .zip(lhs.iter().zip(rhs.iter()))
            .map(|(rule, (a, b))| {
                let ordering = compare_values(a.as_ref(), b.as_ref());
                match rule.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    keyed.into_iter().map(|(_, row)| row).collect()
}

/// Missing values order before present ones. Values of different JSON types
/// order by type rank, then by their label text.
pub fn compare_values(lhs: Option<&Value>, rhs: Option<&Value>) -> Ordering {
    match (lhs, rhs) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => {
            type_rank(a).cmp(&type_rank(b)).then_with(|| label_text(a).cmp(&label_text(b)))
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
