//! Attribute schema: names, class attribute and per-attribute vocabularies.

use std::collections::HashMap;
use std::fmt;

use crate::error::Id3Error;
use crate::record::AttributeIndex;

/// Header marker identifying the class attribute, e.g. `Play#`.
pub const CLASS_MARKER: char = '#';

/// Ordered, append-only set of values observed for one attribute.
///
/// A value's position is its permanent id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    values: Vec<String>,
    ids: HashMap<String, usize>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `value`, appending it first if absent.
    pub fn insert(&mut self, value: &str) -> usize {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = self.values.len();
        self.values.push(value.to_owned());
        self.ids.insert(value.to_owned(), id);
        id
    }

    /// Return the id of `value`, if present.
    #[must_use]
    pub fn id_of(&self, value: &str) -> Option<usize> {
        self.ids.get(value).copied()
    }

    /// Return the value stored under `id`, if any.
    #[must_use]
    pub fn value(&self, id: usize) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    /// Return the values in id order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Return the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` if no value has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Attribute names, the class attribute and one [`Vocabulary`] per attribute.
///
/// A schema built from a header is *learning*: encoding registers unseen
/// values. A frozen schema rejects them, which is how training vocabularies
/// are reused to encode test and prediction data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    vocabularies: Vec<Vocabulary>,
    class_index: AttributeIndex,
    frozen: bool,
}

impl Schema {
    /// Build a learning schema from a header row.
    ///
    /// The class attribute is the first header containing [`CLASS_MARKER`];
    /// index 0 when no header carries it. The marker is stripped from the
    /// stored name.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::EmptyHeader`] if `header` is empty.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self, Id3Error> {
        if header.is_empty() {
            return Err(Id3Error::EmptyHeader);
        }
        let class_position = header
            .iter()
            .position(|h| h.as_ref().contains(CLASS_MARKER))
            .unwrap_or(0);
        let names = header
            .iter()
            .map(|h| h.as_ref().replace(CLASS_MARKER, "").trim().to_owned())
            .collect();
        Ok(Self::with_class_index(names, AttributeIndex::new(class_position)))
    }

    /// Build a learning schema from names with an explicit class attribute.
    pub(crate) fn with_class_index(names: Vec<String>, class_index: AttributeIndex) -> Self {
        let vocabularies = vec![Vocabulary::new(); names.len()];
        Self::from_parts(names, vocabularies, class_index)
    }

    /// Build a learning schema from names and prefilled vocabularies.
    pub(crate) fn from_parts(
        names: Vec<String>,
        vocabularies: Vec<Vocabulary>,
        class_index: AttributeIndex,
    ) -> Self {
        debug_assert_eq!(names.len(), vocabularies.len());
        debug_assert!(class_index.index() < names.len());
        Self {
            names,
            vocabularies,
            class_index,
            frozen: false,
        }
    }

    /// Stop growing vocabularies during encoding.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Consume the schema and return it frozen.
    #[must_use]
    pub fn into_frozen(mut self) -> Self {
        self.freeze();
        self
    }

    /// Return `true` if encoding rejects unseen values.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Return the number of attributes, class attribute included.
    #[must_use]
    pub fn n_attributes(&self) -> usize {
        self.names.len()
    }

    /// Return the class attribute index.
    #[must_use]
    pub fn class_index(&self) -> AttributeIndex {
        self.class_index
    }

    /// Return the number of class values.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.vocabularies[self.class_index.index()].len()
    }

    /// Return the attribute names in column order.
    #[must_use]
    pub fn attribute_names(&self) -> &[String] {
        &self.names
    }

    /// Return every vocabulary in column order.
    #[must_use]
    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    /// Return the name of `attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::AttributeOutOfRange`] if the index is outside the schema.
    pub fn attribute_name(&self, attribute: AttributeIndex) -> Result<&str, Id3Error> {
        self.check_attribute(attribute)?;
        Ok(&self.names[attribute.index()])
    }

    /// Return the vocabulary of `attribute`.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::AttributeOutOfRange`] if the index is outside the schema.
    pub fn vocabulary(&self, attribute: AttributeIndex) -> Result<&Vocabulary, Id3Error> {
        self.check_attribute(attribute)?;
        Ok(&self.vocabularies[attribute.index()])
    }

    /// Register `value` for `attribute` and return its id.
    ///
    /// Idempotent: a value already present keeps its id.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::AttributeOutOfRange`] if the index is outside the schema.
    pub fn register_value(
        &mut self,
        attribute: AttributeIndex,
        value: &str,
    ) -> Result<usize, Id3Error> {
        self.check_attribute(attribute)?;
        Ok(self.vocabularies[attribute.index()].insert(value))
    }

    /// Map a value id of `attribute` back to its string.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::AttributeOutOfRange`] | `attribute` is outside the schema |
    /// | [`Id3Error::ValueOutOfRange`] | `value_id` is outside the vocabulary |
    pub fn decode(&self, attribute: AttributeIndex, value_id: usize) -> Result<&str, Id3Error> {
        let vocabulary = self.vocabulary(attribute)?;
        vocabulary
            .value(value_id)
            .ok_or_else(|| Id3Error::ValueOutOfRange {
                attribute: self.names[attribute.index()].clone(),
                value_id,
                vocabulary_len: vocabulary.len(),
            })
    }

    /// Map a class id back to its label.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::ValueOutOfRange`] if `class_id` is not a known class.
    pub fn decode_class(&self, class_id: usize) -> Result<&str, Id3Error> {
        self.decode(self.class_index, class_id)
    }

    fn check_attribute(&self, attribute: AttributeIndex) -> Result<(), Id3Error> {
        if attribute.index() >= self.names.len() {
            return Err(Id3Error::AttributeOutOfRange {
                index: attribute.index(),
                n_attributes: self.names.len(),
            });
        }
        Ok(())
    }
}

/// Vocabulary listing: each attribute followed by its `id: value` pairs.
impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, vocabulary)) in self.names.iter().zip(&self.vocabularies).enumerate() {
            if i == self.class_index.index() {
                writeln!(f, "{name} (class):")?;
            } else {
                writeln!(f, "{name}:")?;
            }
            for (id, value) in vocabulary.values().iter().enumerate() {
                writeln!(f, "\t{id}: {value}")?;
            }
        }
        Ok(())
    }
}
