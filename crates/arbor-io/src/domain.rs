//! Domain types for arbor-io.

use arbor_id3::{Record, Schema};

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encoded rows of one CSV file and the schema they were encoded against.
///
/// Produced by [`CategoricalReader`](crate::CategoricalReader).
#[derive(Debug, Clone)]
pub struct CategoricalDataset {
    schema: Schema,
    records: Vec<Record>,
}

impl CategoricalDataset {
    pub(crate) fn new(schema: Schema, records: Vec<Record>) -> Self {
        Self { schema, records }
    }

    /// Return the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Return the records in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Return the number of records.
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.records.len()
    }

    /// Split into schema and records.
    #[must_use]
    pub fn into_parts(self) -> (Schema, Vec<Record>) {
        (self.schema, self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experiment_name_valid() {
        let name = ExperimentName::new("mushroom-run_01".to_string());
        assert!(name.is_ok());
        assert_eq!(name.unwrap().as_str(), "mushroom-run_01");
    }

    #[test]
    fn experiment_name_rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn experiment_name_rejects_special_chars() {
        let name = ExperimentName::new("my run!".to_string());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }
}
