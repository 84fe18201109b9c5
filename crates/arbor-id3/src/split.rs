use std::fmt;

use fixedbitset::FixedBitSet;

use crate::record::{AttributeIndex, Record};

/// Shannon entropy (natural log) of a class distribution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, PartialOrd,
    serde::Serialize, serde::Deserialize,
)]
pub struct Entropy(f64);

impl Entropy {
    /// Compute `-Σ(p_i · ln(p_i))` over the nonzero buckets of `class_counts`.
    ///
    /// Returns zero when `n_samples` is zero.
    #[must_use]
    pub fn from_counts(class_counts: &[usize], n_samples: usize) -> Self {
        if n_samples == 0 {
            return Self(0.0);
        }
        let n = n_samples as f64;
        let value = -class_counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / n;
                p * p.ln()
            })
            .sum::<f64>();
        Self(value)
    }

    /// Return the raw entropy value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Count the class value of each sample into `n_classes` buckets.
pub(crate) fn class_histogram(
    records: &[Record],
    sample_indices: &[usize],
    class_index: AttributeIndex,
    n_classes: usize,
) -> Vec<usize> {
    let mut counts = vec![0usize; n_classes];
    for &si in sample_indices {
        counts[records[si].get(class_index)] += 1;
    }
    counts
}

/// Index of the largest bucket; ties go to the lowest class id.
pub(crate) fn majority_class(class_counts: &[usize]) -> usize {
    let mut best = 0;
    for (class, &count) in class_counts.iter().enumerate() {
        if count > class_counts[best] {
            best = class;
        }
    }
    best
}

/// Bucket sample indices by their value id at `attribute`.
///
/// Returns one bucket per vocabulary entry, empty buckets included.
pub(crate) fn partition(
    records: &[Record],
    sample_indices: &[usize],
    attribute: AttributeIndex,
    n_values: usize,
) -> Vec<Vec<usize>> {
    let mut buckets = vec![Vec::new(); n_values];
    for &si in sample_indices {
        buckets[records[si].get(attribute)].push(si);
    }
    buckets
}

/// Parent entropy minus the size-weighted entropy of the nonempty buckets.
pub(crate) fn information_gain(
    records: &[Record],
    buckets: &[Vec<usize>],
    parent_entropy: Entropy,
    n_samples: usize,
    class_index: AttributeIndex,
    n_classes: usize,
) -> f64 {
    let n = n_samples as f64;
    let weighted: f64 = buckets
        .iter()
        .filter(|b| !b.is_empty())
        .map(|bucket| {
            let counts = class_histogram(records, bucket, class_index, n_classes);
            (bucket.len() as f64 / n) * Entropy::from_counts(&counts, bucket.len()).value()
        })
        .sum();
    parent_entropy.value() - weighted
}

/// The chosen split of one node.
#[derive(Debug, Clone)]
pub(crate) struct SplitResult {
    /// Attribute with the greatest gain.
    pub(crate) attribute: AttributeIndex,
    /// Information gain of the split.
    pub(crate) gain: f64,
    /// Sample indices per value id of `attribute`.
    pub(crate) buckets: Vec<Vec<usize>>,
}

/// Find the unused attribute with the strictly greatest information gain.
///
/// Attributes are scanned in ascending index order, so ties keep the lowest
/// index. `vocabulary_sizes[a]` is the number of value ids of attribute `a`.
/// Returns `None` when every attribute is already used.
pub(crate) fn find_best_split(
    records: &[Record],
    sample_indices: &[usize],
    used: &FixedBitSet,
    vocabulary_sizes: &[usize],
    parent_entropy: Entropy,
    class_index: AttributeIndex,
    n_classes: usize,
) -> Option<SplitResult> {
    let n_samples = sample_indices.len();
    let mut best: Option<SplitResult> = None;

    for (attr, &n_values) in vocabulary_sizes.iter().enumerate() {
        if used.contains(attr) {
            continue;
        }
        let attribute = AttributeIndex::new(attr);
        let buckets = partition(records, sample_indices, attribute, n_values);
        let gain = information_gain(
            records,
            &buckets,
            parent_entropy,
            n_samples,
            class_index,
            n_classes,
        );

        if best.as_ref().is_none_or(|b| gain > b.gain) {
            best = Some(SplitResult {
                attribute,
                gain,
                buckets,
            });
        }
    }

    best
}
