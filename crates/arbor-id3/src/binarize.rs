//! One-hot expansion of categorical attributes into `false`/`true` attributes.

use tracing::{debug, instrument};

use crate::error::Id3Error;
use crate::record::{AttributeIndex, Record};
use crate::schema::{Schema, Vocabulary};

/// Rewrites records so every non-class attribute value becomes its own
/// two-valued attribute.
///
/// An attribute `A` with values `v0..vn` becomes `A = v0 .. A = vn`, each with
/// the vocabulary `[false, true]`. The class attribute keeps its name, its
/// vocabulary and its relative column position.
#[derive(Debug, Clone)]
pub struct Binarizer {
    /// First output column of each source attribute.
    offsets: Vec<usize>,
    /// Vocabulary size of each source attribute.
    widths: Vec<usize>,
    source_class: AttributeIndex,
    source_names: Vec<String>,
    schema: Schema,
}

impl Binarizer {
    /// Derive the binarized schema from a source schema.
    ///
    /// The vocabularies of `source` are captured as they are now; records
    /// holding ids registered later fail in [`Binarizer::transform`].
    #[must_use]
    pub fn fit(source: &Schema) -> Self {
        let source_class = source.class_index();
        let mut names = Vec::new();
        let mut vocabularies = Vec::new();
        let mut offsets = Vec::with_capacity(source.n_attributes());
        let mut widths = Vec::with_capacity(source.n_attributes());
        let mut class_index = AttributeIndex::new(0);

        let mut flag = Vocabulary::new();
        flag.insert("false");
        flag.insert("true");

        for (a, (name, vocabulary)) in source
            .attribute_names()
            .iter()
            .zip(source.vocabularies())
            .enumerate()
        {
            offsets.push(names.len());
            widths.push(vocabulary.len());
            if a == source_class.index() {
                class_index = AttributeIndex::new(names.len());
                names.push(name.clone());
                vocabularies.push(vocabulary.clone());
            } else {
                for value in vocabulary.values() {
                    names.push(format!("{name} = {value}"));
                    vocabularies.push(flag.clone());
                }
            }
        }

        let schema = Schema::from_parts(names, vocabularies, class_index).into_frozen();

        debug!(
            source_attributes = source.n_attributes(),
            binarized_attributes = schema.n_attributes(),
            "binarized schema derived"
        );
        Self {
            offsets,
            widths,
            source_class,
            source_names: source.attribute_names().to_vec(),
            schema,
        }
    }

    /// Return the frozen binarized schema.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rewrite one source record into the binarized layout.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::SchemaMismatch`] | record length differs from the source attribute count |
    /// | [`Id3Error::ValueOutOfRange`] | a value id was not in the source vocabulary at fit time |
    pub fn transform_record(&self, record: &Record, row_index: usize) -> Result<Record, Id3Error> {
        if record.len() != self.widths.len() {
            return Err(Id3Error::SchemaMismatch {
                expected: self.widths.len(),
                got: record.len(),
                row_index,
            });
        }
        let mut values = vec![0usize; self.schema.n_attributes()];
        for (a, &value_id) in record.values().iter().enumerate() {
            if value_id >= self.widths[a] {
                return Err(Id3Error::ValueOutOfRange {
                    attribute: self.source_names[a].clone(),
                    value_id,
                    vocabulary_len: self.widths[a],
                });
            }
            if a == self.source_class.index() {
                values[self.offsets[a]] = value_id;
            } else {
                values[self.offsets[a] + value_id] = 1;
            }
        }
        Ok(Record::new(values))
    }

    /// Rewrite every record, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Same as [`Binarizer::transform_record`], with the failing row's position.
    #[instrument(skip_all, fields(n_records = records.len()))]
    pub fn transform(&self, records: &[Record]) -> Result<Vec<Record>, Id3Error> {
        records
            .iter()
            .enumerate()
            .map(|(row_index, record)| self.transform_record(record, row_index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CategoricalEncoder;

    fn source() -> (Schema, Vec<Record>) {
        let mut enc = CategoricalEncoder::from_header(&["Weather", "Play#", "Wind"]).unwrap();
        let records = enc
            .encode_rows([
                ["Sunny", "Yes", "Weak"],
                ["Rainy", "No", "Strong"],
                ["Cloudy", "Yes", "Weak"],
            ])
            .unwrap();
        (enc.into_schema(), records)
    }

    #[test]
    fn binarized_schema_layout() {
        let (schema, _) = source();
        let bin = Binarizer::fit(&schema);
        let out = bin.schema();
        assert_eq!(
            out.attribute_names(),
            &[
                "Weather = Sunny",
                "Weather = Rainy",
                "Weather = Cloudy",
                "Play",
                "Wind = Weak",
                "Wind = Strong",
            ]
        );
        assert_eq!(out.class_index(), AttributeIndex::new(3));
        assert!(out.is_frozen());
        assert_eq!(out.vocabulary(AttributeIndex::new(0)).unwrap().values(), &["false", "true"]);
        assert_eq!(out.vocabulary(AttributeIndex::new(3)).unwrap().values(), &["Yes", "No"]);
    }

    #[test]
    fn records_become_one_hot() {
        let (schema, records) = source();
        let bin = Binarizer::fit(&schema);
        let out = bin.transform(&records).unwrap();
        assert_eq!(out[0].values(), &[1, 0, 0, 0, 1, 0]);
        assert_eq!(out[1].values(), &[0, 1, 0, 1, 0, 1]);
        assert_eq!(out[2].values(), &[0, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn value_registered_after_fit_rejected() {
        let (mut schema, _) = source();
        let bin = Binarizer::fit(&schema);
        let foggy = schema.register_value(AttributeIndex::new(0), "Foggy").unwrap();
        let err = bin
            .transform(&[Record::new(vec![foggy, 0, 0])])
            .unwrap_err();
        assert!(matches!(err, Id3Error::ValueOutOfRange { value_id: 3, vocabulary_len: 3, .. }));
    }

    #[test]
    fn length_mismatch_reports_row() {
        let (schema, records) = source();
        let bin = Binarizer::fit(&schema);
        let mut batch = records;
        batch.push(Record::new(vec![0, 0]));
        let err = bin.transform(&batch).unwrap_err();
        assert!(matches!(err, Id3Error::SchemaMismatch { expected: 3, got: 2, row_index: 3 }));
    }
}
