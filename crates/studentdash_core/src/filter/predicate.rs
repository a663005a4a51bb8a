use crate::model::record::{Column, Record};

/// Which half of a predicate an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateField {
    Column,
    Value,
}

/// A user-entered `(column, value)` filter condition.
///
/// Half-entered predicates are valid values: they simply do not restrict
/// anything until both halves are set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    pub column: Option<Column>,
    pub value: String,
}

impl FilterPredicate {
    /// The `(unset, "")` predicate appended by "add filter".
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(column: Column, value: impl Into<String>) -> Self {
        Self {
            column: Some(column),
            value: value.into(),
        }
    }

    /// Builds a predicate from raw text input; unknown column keys stay unset.
    pub fn parse(column: &str, value: impl Into<String>) -> Self {
        Self {
            column: Column::from_key(column),
            value: value.into(),
        }
    }

    /// Active predicates have a column and a non-empty value.
    pub fn is_active(&self) -> bool {
        self.column.is_some() && !self.value.is_empty()
    }

    /// Returns whether `record` passes this predicate.
    ///
    /// Inactive predicates accept everything. An absent field never matches
    /// an active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(column) = self.column else {
            return true;
        };
        if self.value.is_empty() {
            return true;
        }
        match record.field_text(column) {
            Some(text) => text.to_lowercase().contains(&self.value.to_lowercase()),
            None => false,
        }
    }

    /// Replaces one half of the predicate from raw text input.
    pub(crate) fn set_field(&mut self, field: PredicateField, input: &str) {
        match field {
            PredicateField::Column => self.column = Column::from_key(input),
            PredicateField::Value => self.value = input.to_string(),
        }
    }
}
