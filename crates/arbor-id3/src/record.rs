use std::fmt;

/// Zero-based attribute column index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct AttributeIndex(usize);

impl AttributeIndex {
    /// Create a new attribute index from a zero-based column position.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based column index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AttributeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One encoded row: a value id per attribute.
///
/// Each slot indexes into the vocabulary of the matching attribute in the
/// [`Schema`](crate::Schema) that produced it. Records are immutable; trees
/// partition them by index and never copy their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record(Box<[usize]>);

impl Record {
    /// Create a record from raw value ids.
    #[must_use]
    pub fn new(values: Vec<usize>) -> Self {
        Self(values.into_boxed_slice())
    }

    /// Return the value id stored for `attribute`.
    ///
    /// # Panics
    ///
    /// Panics if `attribute` is outside the record.
    #[must_use]
    pub fn get(&self, attribute: AttributeIndex) -> usize {
        self.0[attribute.index()]
    }

    /// Return the number of attribute slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return `true` if the record has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the value ids as a slice.
    #[must_use]
    pub fn values(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}
