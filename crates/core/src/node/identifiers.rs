use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Names from a root node down to a node. Names are unique among siblings,
/// so a path addresses at most one node in a tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub const SEPARATOR: char = '/';
    /// Prefix for a literal separator or escape inside a name.
    pub const ESCAPE: char = '\\';

    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Parses `a/b/c`; empty segments are skipped and `\/` keeps a `/`
    /// inside a name.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            match ch {
                Self::ESCAPE => current.push(chars.next().unwrap_or(Self::ESCAPE)),
                Self::SEPARATOR => push_segment(&mut segments, std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
        push_segment(&mut segments, current);
        Self(segments)
    }

    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Self(segments)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.len() < 2 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Zero for root nodes.
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

fn push_segment(segments: &mut Vec<String>, segment: String) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_owned());
    }
}

/// Escapes names so distinct paths never render to the same text.
impl Display for NodePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            for ch in segment.chars() {
                if ch == Self::SEPARATOR || ch == Self::ESCAPE {
                    write!(f, "{}", Self::ESCAPE)?;
                }
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for NodePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Stable key of a table row. Child caches and host expansion state are keyed
/// by it instead of by row object identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RowKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&NodePath> for RowKey {
    fn from(path: &NodePath) -> Self {
        Self(path.to_string())
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RowKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
