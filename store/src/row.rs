//! Result rows.

use nestset_core::{Attributes, Value};

/// One result row: column names with their values, in select order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.columns.push((name.into(), value));
    }

    /// Builder-style [`Row::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value.into());
        self
    }

    /// Get a column value by name. The first column with that name wins.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Get a column as an integer. NULL and non-integer values give `None`.
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Get a column by position.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.columns.get(index).map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Consume the row into an attribute map, skipping the named columns.
    pub fn into_attributes_except(self, skip: impl Fn(&str) -> bool) -> Attributes {
        self.columns
            .into_iter()
            .filter(|(name, _)| !skip(name))
            .collect()
    }
}
