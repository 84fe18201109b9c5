/// Errors from schema construction, encoding, tree induction and classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Id3Error {
    /// Returned when a header row has no columns.
    #[error("header row has no attribute columns")]
    EmptyHeader,

    /// Returned when a row or record length differs from the schema attribute count.
    #[error("row {row_index} has {got} values, expected {expected}")]
    SchemaMismatch {
        /// The number of attributes in the schema.
        expected: usize,
        /// The number of values in the offending row.
        got: usize,
        /// The zero-based index of the offending row.
        row_index: usize,
    },

    /// Returned when a single record's length differs from the trained attribute count.
    #[error("record has {got} values, expected {expected}")]
    RecordLengthMismatch {
        /// The number of attributes the tree was trained on.
        expected: usize,
        /// The number of values in the record.
        got: usize,
    },

    /// Returned when a frozen schema is asked to encode a value it has never seen.
    #[error("unknown category \"{value}\" for attribute \"{attribute}\"")]
    UnknownCategory {
        /// Name of the attribute being encoded.
        attribute: String,
        /// The raw value absent from the vocabulary.
        value: String,
    },

    /// Returned when an attribute index is outside the schema.
    #[error("attribute index {index} out of range, schema has {n_attributes} attributes")]
    AttributeOutOfRange {
        /// The invalid attribute index.
        index: usize,
        /// Number of attributes in the schema.
        n_attributes: usize,
    },

    /// Returned when a value id is outside an attribute's vocabulary.
    #[error("value id {value_id} out of range for attribute \"{attribute}\" with {vocabulary_len} values")]
    ValueOutOfRange {
        /// Name of the attribute being decoded.
        attribute: String,
        /// The invalid value id.
        value_id: usize,
        /// Size of the attribute's vocabulary.
        vocabulary_len: usize,
    },

    /// Returned when classification meets a value id with no trained branch.
    #[error("value id {value_id} of attribute {attribute} has no branch, split knows {known_values} values")]
    UnseenSplitValue {
        /// The split attribute index.
        attribute: usize,
        /// The record's value id at the split attribute.
        value_id: usize,
        /// Number of children of the split node.
        known_values: usize,
    },

    /// Returned when training is asked to run on zero records.
    #[error("training dataset has zero records")]
    EmptyDataset,

    /// Returned when the class attribute has an empty vocabulary at training time.
    #[error("class attribute \"{attribute}\" has no values")]
    NoClassValues {
        /// Name of the class attribute.
        attribute: String,
    },

    /// Returned when a signed depth limit is below -1.
    #[error("max_depth must be -1 (unlimited) or non-negative, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: i64,
    },
}
