//! String rows to [`Record`]s against a [`Schema`].

use tracing::{debug, instrument};

use crate::error::Id3Error;
use crate::record::{AttributeIndex, Record};
use crate::schema::Schema;

/// Encodes raw string rows into [`Record`]s, owning the schema it encodes against.
///
/// Built from a header, the encoder learns vocabularies as it goes. Built from
/// an existing schema, it freezes that schema and rejects categories the schema
/// has never seen.
#[derive(Debug, Clone)]
pub struct CategoricalEncoder {
    schema: Schema,
    rows_encoded: usize,
    ignore_class: bool,
}

/// Class id stored for rows whose class cell is not read.
pub const UNLABELED_CLASS: usize = 0;

impl CategoricalEncoder {
    /// Create a learning encoder from a header row.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyHeader`] if `header` is empty.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, Id3Error> {
        Ok(Self {
            schema: Schema::from_header(header)?,
            rows_encoded: 0,
            ignore_class: false,
        })
    }

    /// Create an encoder that re-encodes data against a fixed vocabulary.
    #[must_use]
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema: schema.into_frozen(),
            rows_encoded: 0,
            ignore_class: false,
        }
    }

    /// Skip the class cell of every row and store [`UNLABELED_CLASS`] instead.
    ///
    /// For rows that are only classified, whose class cell may be blank or a
    /// placeholder such as `?`. The class vocabulary is neither consulted nor
    /// grown.
    #[must_use]
    pub fn ignoring_class(mut self) -> Self {
        self.ignore_class = true;
        self
    }

    /// Encode one row.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::SchemaMismatch`] | row length differs from the attribute count |
    /// | [`Id3Error::UnknownCategory`] | frozen schema and a value is not in the vocabulary |
    pub fn encode_row<S: AsRef<str>>(&mut self, raw: &[S]) -> Result<Record, Id3Error> {
        let row_index = self.rows_encoded;
        self.rows_encoded += 1;

        let expected = self.schema.n_attributes();
        if raw.len() != expected {
            return Err(Id3Error::SchemaMismatch {
                expected,
                got: raw.len(),
                row_index,
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (i, value) in raw.iter().enumerate() {
            let attribute = AttributeIndex::new(i);
            let value = value.as_ref();
            let id = if self.ignore_class && attribute == self.schema.class_index() {
                UNLABELED_CLASS
            } else if self.schema.is_frozen() {
                self.schema
                    .vocabulary(attribute)?
                    .id_of(value)
                    .ok_or_else(|| Id3Error::UnknownCategory {
                        attribute: self.schema.attribute_names()[i].clone(),
                        value: value.to_owned(),
                    })?
            } else {
                self.schema.register_value(attribute, value)?
            };
            values.push(id);
        }
        Ok(Record::new(values))
    }

    /// Encode a sequence of rows, stopping at the first failing row.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`CategoricalEncoder::encode_row`].
    #[instrument(skip_all, fields(frozen = self.schema.is_frozen()))]
    pub fn encode_rows<R, S>(
        &mut self,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Vec<Record>, Id3Error>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let records = rows
            .into_iter()
            .map(|row| self.encode_row(row.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(n_records = records.len(), "rows encoded");
        Ok(records)
    }

    /// Return the number of rows this encoder has been asked to encode.
    #[must_use]
    pub fn rows_encoded(&self) -> usize {
        self.rows_encoded
    }

    /// Borrow the schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Consume the encoder and return its schema.
    #[must_use]
    pub fn into_schema(self) -> Schema {
        self.schema
    }
}
