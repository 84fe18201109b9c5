//! Scoring a fitted tree against labeled records.

use std::fmt;

use tracing::{info, instrument};

use crate::confusion::{ConfusionMatrix, f1_score, ratio};
use crate::error::Id3Error;
use crate::record::Record;
use crate::schema::Schema;
use crate::tree::DecisionTree;

/// Classify every record and tally `matrix[actual][predicted]`.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`Id3Error::EmptyDataset`] | `records` is empty |
/// | [`Id3Error::SchemaMismatch`] | a record length differs from the trained attribute count |
/// | [`Id3Error::UnseenSplitValue`] | the tree rejects an unseen value |
/// | [`Id3Error::ValueOutOfRange`] | a record's class id is unknown to the tree |
#[instrument(skip_all, fields(n_records = records.len()))]
pub fn evaluate(tree: &DecisionTree, records: &[Record]) -> Result<ConfusionMatrix, Id3Error> {
    let predicted = tree.classify_batch(records)?;
    let actual: Vec<usize> = records.iter().map(|r| r.get(tree.class_index())).collect();
    let matrix = ConfusionMatrix::from_labels(&actual, &predicted, tree.n_classes())?;
    info!(accuracy = matrix.accuracy(), "evaluation complete");
    Ok(matrix)
}

/// Derived statistics for a two-class problem, class id 1 being positive.
///
/// Each ratio is `None` when its denominator is zero.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BinaryMetrics {
    /// (M\[0\]\[0\] + M\[1\]\[1\]) / total.
    pub accuracy: Option<f64>,
    /// (M\[0\]\[1\] + M\[1\]\[0\]) / total.
    pub error_rate: Option<f64>,
    /// M\[0\]\[1\] / (M\[0\]\[1\] + M\[0\]\[0\]).
    pub false_alarm_rate: Option<f64>,
    /// M\[1\]\[1\] / (M\[1\]\[1\] + M\[1\]\[0\]).
    pub detection_rate: Option<f64>,
    /// M\[1\]\[1\] / (M\[0\]\[1\] + M\[1\]\[1\]).
    pub precision: Option<f64>,
    /// Same as `detection_rate`.
    pub recall: Option<f64>,
    /// Harmonic mean of precision and recall.
    pub f1: Option<f64>,
}

impl BinaryMetrics {
    /// Compute the metrics, or `None` unless the matrix has exactly two classes.
    #[must_use]
    pub fn from_matrix(matrix: &ConfusionMatrix) -> Option<Self> {
        if matrix.n_classes() != 2 {
            return None;
        }
        let m = |a, p| matrix.get(a, p);
        let total = matrix.total();
        let detection_rate = ratio(m(1, 1), m(1, 1) + m(1, 0));
        let precision = ratio(m(1, 1), m(0, 1) + m(1, 1));
        Some(Self {
            accuracy: ratio(m(0, 0) + m(1, 1), total),
            error_rate: ratio(m(0, 1) + m(1, 0), total),
            false_alarm_rate: ratio(m(0, 1), m(0, 1) + m(0, 0)),
            detection_rate,
            precision,
            recall: detection_rate,
            f1: f1_score(precision, detection_rate),
        })
    }
}

/// `value` as a percentage with three decimals, or `undefined`.
struct Percent(Option<f64>);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{:.3}%", v * 100.0),
            None => write!(f, "undefined"),
        }
    }
}

/// A confusion matrix with its decoded class labels and binary statistics.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    matrix: ConfusionMatrix,
    class_labels: Vec<String>,
    binary: Option<BinaryMetrics>,
}

impl EvaluationReport {
    /// Evaluate `tree` on `records` and decode class labels through `schema`.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate`], plus [`Id3Error::ValueOutOfRange`] if `schema`
    /// knows fewer classes than the tree.
    pub fn build(
        tree: &DecisionTree,
        schema: &Schema,
        records: &[Record],
    ) -> Result<Self, Id3Error> {
        let matrix = evaluate(tree, records)?;
        let class_labels = (0..matrix.n_classes())
            .map(|c| schema.decode_class(c).map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        let binary = BinaryMetrics::from_matrix(&matrix);
        Ok(Self {
            matrix,
            class_labels,
            binary,
        })
    }

    /// Return the confusion matrix.
    #[must_use]
    pub fn matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    /// Return class labels in class-id order.
    #[must_use]
    pub fn class_labels(&self) -> &[String] {
        &self.class_labels
    }

    /// Return the binary statistics, present only for two-class problems.
    #[must_use]
    pub fn binary(&self) -> Option<&BinaryMetrics> {
        self.binary.as_ref()
    }

    /// Return the number of evaluated samples.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        self.matrix.total()
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of samples: {}", self.n_samples())?;
        writeln!(f, "{}", self.matrix)?;
        write!(f, "Classes:")?;
        for (h, label) in self.class_labels.iter().enumerate() {
            write!(f, " H{h} = {label}")?;
            if h + 1 < self.class_labels.len() {
                write!(f, ",")?;
            }
        }
        writeln!(f)?;

        if let Some(b) = &self.binary {
            writeln!(f, "\nAccuracy Statistics:")?;
            writeln!(f, "Accuracy: {}", Percent(b.accuracy))?;
            writeln!(f, "Error Rate: {}", Percent(b.error_rate))?;
            writeln!(f, "False Alarm Rate: {}", Percent(b.false_alarm_rate))?;
            writeln!(f, "Detection Rate: {}", Percent(b.detection_rate))?;
            writeln!(f, "Precision: {}", Percent(b.precision))?;
            writeln!(f, "Recall: {}", Percent(b.recall))?;
            writeln!(f, "F1 score: {}", Percent(b.f1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CategoricalEncoder;
    use crate::tree::Id3Config;

    fn matrix(actual: &[usize], predicted: &[usize]) -> ConfusionMatrix {
        ConfusionMatrix::from_labels(actual, predicted, 2).unwrap()
    }

    #[test]
    fn binary_metrics_known_values() {
        // M = [[3, 1], [2, 4]]
        let cm = matrix(&[0, 0, 0, 0, 1, 1, 1, 1, 1, 1], &[0, 0, 0, 1, 0, 0, 1, 1, 1, 1]);
        let b = BinaryMetrics::from_matrix(&cm).unwrap();
        assert!((b.accuracy.unwrap() - 0.7).abs() < 1e-10);
        assert!((b.error_rate.unwrap() - 0.3).abs() < 1e-10);
        assert!((b.false_alarm_rate.unwrap() - 0.25).abs() < 1e-10);
        assert!((b.detection_rate.unwrap() - 4.0 / 6.0).abs() < 1e-10);
        assert!((b.precision.unwrap() - 0.8).abs() < 1e-10);
        assert_eq!(b.recall, b.detection_rate);
        let expected_f1 = 2.0 * 0.8 * (4.0 / 6.0) / (0.8 + 4.0 / 6.0);
        assert!((b.f1.unwrap() - expected_f1).abs() < 1e-10);
    }

    #[test]
    fn binary_metrics_zero_denominators() {
        // No positive actuals and no positive predictions.
        let b = BinaryMetrics::from_matrix(&matrix(&[0, 0], &[0, 0])).unwrap();
        assert_eq!(b.detection_rate, None);
        assert_eq!(b.precision, None);
        assert_eq!(b.f1, None);
        assert!((b.false_alarm_rate.unwrap() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn binary_metrics_only_for_two_classes() {
        let cm = ConfusionMatrix::from_labels(&[0, 1, 2], &[0, 1, 2], 3).unwrap();
        assert!(BinaryMetrics::from_matrix(&cm).is_none());
    }

    #[test]
    fn percent_rendering() {
        assert_eq!(Percent(Some(0.5)).to_string(), "50.000%");
        assert_eq!(Percent(None).to_string(), "undefined");
    }

    #[test]
    fn weather_report() {
        let mut enc = CategoricalEncoder::from_header(&["Weather", "Wind", "Play#"]).unwrap();
        let records = enc
            .encode_rows([
                ["Sunny", "Weak", "Yes"],
                ["Sunny", "Strong", "No"],
                ["Rainy", "Weak", "Yes"],
                ["Rainy", "Strong", "No"],
            ])
            .unwrap();
        let schema = enc.into_schema();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();

        let report = EvaluationReport::build(&tree, &schema, &records).unwrap();
        assert!((report.matrix().accuracy() - 1.0).abs() < f64::EPSILON);
        assert_eq!(report.class_labels(), &["Yes", "No"]);

        let text = report.to_string();
        assert!(text.starts_with("Number of samples: 4\n"));
        assert!(text.contains("Classes: H0 = Yes, H1 = No\n"));
        assert!(text.contains("Accuracy: 100.000%"));
        assert!(text.contains("False Alarm Rate: 0.000%"));
        assert!(text.contains("F1 score: 100.000%"));
    }

    #[test]
    fn evaluate_empty_is_error() {
        let mut enc = CategoricalEncoder::from_header(&["a", "y#"]).unwrap();
        let records = enc.encode_rows([["x", "1"], ["z", "0"]]).unwrap();
        let tree = Id3Config::new().fit(enc.schema(), &records).unwrap();
        assert!(matches!(evaluate(&tree, &[]), Err(Id3Error::EmptyDataset)));
    }
}
