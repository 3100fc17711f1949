//! Positional parameter bookkeeping for dynamically assembled statements.

use csemotors_core::types::SqlValue;

/// An ordered list of bound values.
///
/// Binding a value returns its `$n` placeholder, so a placeholder can only
/// exist once its value has been appended at position `n - 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamList {
    values: Vec<SqlValue>,
}

impl ParamList {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the placeholder that refers to it.
    pub fn bind(&mut self, value: impl Into<SqlValue>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }

    /// Append every value and return their placeholders, comma separated.
    pub fn bind_all<I, V>(&mut self, values: I) -> String
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlValue>,
    {
        values
            .into_iter()
            .map(|value| self.bind(value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<SqlValue> {
        self.values
    }
}

/// Accumulates `AND`-joined predicates together with their parameters.
///
/// Each predicate is produced by a closure that binds its own values and
/// returns the fragment text, so a fragment and the parameters it refers to
/// are always added in the same step.
#[derive(Debug, Clone, Default)]
pub struct WhereBuilder {
    params: ParamList,
    predicates: Vec<String>,
}

impl WhereBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an unconditional predicate.
    pub fn push<F>(&mut self, build: F) -> &mut Self
    where
        F: FnOnce(&mut ParamList) -> String,
    {
        let fragment = build(&mut self.params);
        self.predicates.push(fragment);
        self
    }

    /// Add a predicate only when `value` is present.
    pub fn push_if<T, F>(&mut self, value: Option<T>, build: F) -> &mut Self
    where
        F: FnOnce(&mut ParamList, T) -> String,
    {
        if let Some(value) = value {
            let fragment = build(&mut self.params, value);
            self.predicates.push(fragment);
        }
        self
    }

    /// Number of predicates added so far.
    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    /// The `WHERE ...` clause, or an empty string without predicates.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.predicates.join(" AND "))
        }
    }

    /// Consume the builder, returning the clause and its parameters.
    pub fn into_parts(self) -> (String, ParamList) {
        let clause = self.where_clause();
        (clause, self.params)
    }
}
