//! Column values and the ordered collections built from them.

use std::fmt;

/// A scalar column value taken from the configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// An explicit YAML `null`.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer that fits in `i64`.
    Integer(i64),
    /// Any other number.
    Real(f64),
    /// A string.
    Text(String),
}

impl FieldValue {
    /// Returns the string content for text values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

/// An ordered bag of column name to value.
///
/// Keeps declaration order. Setting an existing column replaces its value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldValue)>);

impl Fields {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Returns `true` if the column is present.
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Sets a column, replacing any previous value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<FieldValue>) {
        let column = column.into();
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
    }

    /// Iterates over columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Iterates over column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(c, _)| c.as_str())
    }

    /// Returns a copy containing only the columns not present in `other`.
    #[must_use]
    pub fn without(&self, other: &Self) -> Self {
        self.0
            .iter()
            .filter(|(c, _)| !other.contains(c))
            .cloned()
            .collect()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (column, value) in iter {
            fields.set(column, value);
        }
        fields
    }
}

/// An ordered set of IP variants: label to address.
///
/// Labels are the variant names used to suffix expanded monitor names
/// (`v4`, `v6`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpSet(Vec<(String, String)>);

impl IpSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns `true` if there are no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(label, address)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, a)| (l.as_str(), a.as_str()))
    }
}

impl<L: Into<String>, A: Into<String>> FromIterator<(L, A)> for IpSet {
    fn from_iter<I: IntoIterator<Item = (L, A)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, a)| (l.into(), a.into()))
                .collect(),
        )
    }
}
