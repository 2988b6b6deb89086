//! Collection schemas
//!
//! A schema is a storage key plus an ordered list of named columns. Column
//! order only decides the order default generators run in.

use super::column::Column;
use super::types::Record;

/// Named collection of column descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Storage key the collection is serialized under
    name: String,
    /// Columns in declaration order, names unique
    columns: Vec<(String, Column)>,
}

impl Schema {
    /// Create a schema with no columns
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column, replacing any earlier column of the same name in place
    pub fn column(mut self, field: impl Into<String>, column: Column) -> Self {
        let field = field.into();
        match self.columns.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = column,
            None => self.columns.push((field, column)),
        }
        self
    }

    /// Storage key of this collection
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(name, col)| (name.as_str(), col))
    }

    /// Looks up a column by field name
    pub fn get_column(&self, field: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, col)| col)
    }

    /// Builds the default record.
    ///
    /// Every column with a default generator contributes one freshly
    /// generated value. Columns without one are left out entirely rather
    /// than set to null.
    pub fn compute_default_record(&self) -> Record {
        let mut record = Record::new();
        for (field, column) in &self.columns {
            if let Some(value) = column.generate_default() {
                record.insert(field.clone(), value);
            }
        }
        record
    }
}

/// Creates a schema from a name and `(field, column)` pairs.
///
/// Name uniqueness is not checked here; the engine checks it on registration.
pub fn create_schema<I, K>(name: impl Into<String>, columns: I) -> Schema
where
    I: IntoIterator<Item = (K, Column)>,
    K: Into<String>,
{
    columns
        .into_iter()
        .fold(Schema::new(name), |schema, (field, col)| schema.column(field, col))
}
