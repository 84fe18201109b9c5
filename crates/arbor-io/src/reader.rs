//! CSV reader that encodes categorical rows into records.

use std::path::{Path, PathBuf};

use arbor_id3::{CategoricalEncoder, Id3Error, Schema};
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::CategoricalDataset;

/// Reads a categorical CSV file and encodes it.
///
/// Expected CSV format:
/// - Header row required; the class column carries the `#` marker (else the
///   first column is the class)
/// - Every cell is a category; surrounding whitespace is trimmed
/// - All rows have as many columns as the header
///
/// Without a schema the reader learns vocabularies from the file. With
/// [`CategoricalReader::with_schema`] it re-encodes the file against that
/// frozen schema, rejecting unseen categories. [`CategoricalReader::unlabeled`]
/// skips the class column, for files that are only classified.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::Encoding`] | Empty header, row length mismatch or unknown category |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
pub struct CategoricalReader {
    path: PathBuf,
    schema: Option<Schema>,
    labeled: bool,
}

impl CategoricalReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            schema: None,
            labeled: true,
        }
    }

    /// Encode against an existing schema instead of learning one.
    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Ignore the class column, storing [`arbor_id3::UNLABELED_CLASS`] in its slot.
    ///
    /// Class cells may then be blank or any placeholder such as `?`. Meant for
    /// use with [`CategoricalReader::with_schema`]; a learning read leaves the
    /// class vocabulary empty.
    #[must_use]
    pub fn unlabeled(mut self) -> Self {
        self.labeled = false;
        self
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    fn encoding_error(&self, row_index: usize, source: Id3Error) -> IoError {
        IoError::Encoding {
            path: self.path.clone(),
            row_index,
            source,
        }
    }

    /// Read and encode the CSV file, returning a [`CategoricalDataset`].
    #[instrument(
        skip(self),
        fields(path = %self.path.display(), frozen = self.schema.is_some(), labeled = self.labeled)
    )]
    pub fn read(self) -> Result<CategoricalDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets the encoder report row length mismatches itself.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header: Vec<String> = rdr
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(String::from)
            .collect();
        debug!(n_columns = header.len(), "read CSV header");

        let mut encoder = match &self.schema {
            Some(schema) => {
                if header.len() != schema.n_attributes() {
                    return Err(self.encoding_error(
                        0,
                        Id3Error::SchemaMismatch {
                            expected: schema.n_attributes(),
                            got: header.len(),
                            row_index: 0,
                        },
                    ));
                }
                CategoricalEncoder::with_schema(schema.clone())
            }
            None => CategoricalEncoder::from_header(&header)
                .map_err(|e| self.encoding_error(0, e))?,
        };
        if !self.labeled {
            encoder = encoder.ignoring_class();
        }

        let mut records = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let row = result.map_err(|e| self.csv_error(e))?;
            let cells: Vec<&str> = row.iter().collect();
            let record = encoder
                .encode_row(&cells)
                .map_err(|e| self.encoding_error(row_index, e))?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let schema = encoder.into_schema();
        info!(
            n_records = records.len(),
            n_attributes = schema.n_attributes(),
            n_classes = schema.class_count(),
            "categorical dataset loaded"
        );
        Ok(CategoricalDataset::new(schema, records))
    }
}
