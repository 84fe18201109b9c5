//! Confusion matrix and per-class classification metrics.

use std::fmt;

use crate::error::Id3Error;

/// A confusion matrix for multi-class classification.
///
/// Entry `matrix[actual][predicted]` counts how many samples with actual
/// class id `actual` were predicted as `predicted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

/// Per-class precision, recall, and F1 score.
///
/// Ratios with a zero denominator are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetrics {
    /// The class id.
    pub class: usize,
    /// Precision: TP / (TP + FP).
    pub precision: Option<f64>,
    /// Recall: TP / (TP + FN).
    pub recall: Option<f64>,
    /// F1: 2 * precision * recall / (precision + recall).
    pub f1: Option<f64>,
    /// Number of actual samples in this class.
    pub support: usize,
}

/// `num / den`, or `None` when `den` is zero.
pub(crate) fn ratio(num: usize, den: usize) -> Option<f64> {
    (den != 0).then(|| num as f64 / den as f64)
}

/// Harmonic mean of precision and recall; undefined when either is, or both are zero.
pub(crate) fn f1_score(precision: Option<f64>, recall: Option<f64>) -> Option<f64> {
    let (p, r) = (precision?, recall?);
    (p + r != 0.0).then(|| 2.0 * p * r / (p + r))
}

impl ConfusionMatrix {
    /// Build a confusion matrix from actual and predicted class ids.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`Id3Error::EmptyDataset`] | Zero labels provided |
    /// | [`Id3Error::SchemaMismatch`] | `predicted` and `actual` differ in length; `row_index` is the first unpaired position |
    /// | [`Id3Error::ValueOutOfRange`] | A class id is not below `n_classes` |
    pub fn from_labels(
        actual: &[usize],
        predicted: &[usize],
        n_classes: usize,
    ) -> Result<Self, Id3Error> {
        if actual.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        if predicted.len() != actual.len() {
            return Err(Id3Error::SchemaMismatch {
                expected: actual.len(),
                got: predicted.len(),
                row_index: actual.len().min(predicted.len()),
            });
        }
        let mut matrix = vec![vec![0usize; n_classes]; n_classes];
        for (&a, &p) in actual.iter().zip(predicted) {
            if let Some(&value_id) = [a, p].iter().find(|&&c| c >= n_classes) {
                return Err(Id3Error::ValueOutOfRange {
                    attribute: "class".to_owned(),
                    value_id,
                    vocabulary_len: n_classes,
                });
            }
            matrix[a][p] += 1;
        }
        Ok(Self { matrix, n_classes })
    }

    /// Return the total number of counted samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// Return `matrix[actual][predicted]`.
    #[must_use]
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.matrix[actual][predicted]
    }

    /// Overall accuracy: proportion of correct predictions.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.n_classes).map(|i| self.matrix[i][i]).sum();
        ratio(correct, self.total()).unwrap_or(0.0)
    }

    /// Per-class precision, recall, F1, and support.
    #[must_use]
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        (0..self.n_classes)
            .map(|c| {
                let tp = self.matrix[c][c];
                let predicted_c: usize = (0..self.n_classes).map(|i| self.matrix[i][c]).sum();
                let support: usize = self.matrix[c].iter().sum();
                let precision = ratio(tp, predicted_c);
                let recall = ratio(tp, support);
                ClassMetrics {
                    class: c,
                    precision,
                    recall,
                    f1: f1_score(precision, recall),
                    support,
                }
            })
            .collect()
    }

    /// Return the underlying matrix rows.
    #[must_use]
    pub fn as_rows(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }
}

/// Tab-separated grid headed `H0 .. Hn`, rows actual, columns predicted.
impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "True Class \\ Predicted Class")?;
        write!(f, " \\\t")?;
        for h in 0..self.n_classes {
            write!(f, "H{h}\t")?;
        }
        for (r, row) in self.matrix.iter().enumerate() {
            write!(f, "\nH{r}\t")?;
            for val in row {
                write!(f, "{val}\t")?;
            }
        }
        Ok(())
    }
}
