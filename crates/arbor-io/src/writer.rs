//! Result writer for tree diagrams, evaluation reports and predictions.

use std::fs;
use std::path::{Path, PathBuf};

use arbor_id3::{BinaryMetrics, EvaluationReport};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes run outputs into one directory, prefixed by the experiment name.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are `{experiment}_tree.dot`, `{experiment}_evaluate.txt`,
/// `{experiment}_evaluate.json` and `{experiment}_predictions.txt`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    fn path_for(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{suffix}", self.experiment.as_str()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), IoError> {
        fs::write(path, contents).map_err(|e| IoError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write a Graphviz tree description to `{experiment}_tree.dot`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_diagram(&self, dot: &str) -> Result<PathBuf, IoError> {
        let path = self.path_for("tree.dot");
        self.write(&path, dot)?;
        info!(path = %path.display(), "tree diagram written");
        Ok(path)
    }

    /// Write an evaluation report as text to `{experiment}_evaluate.txt` and
    /// as JSON to `{experiment}_evaluate.json`.
    ///
    /// Returns the two paths in that order.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::WriteFile`] | A file cannot be written |
    /// | [`IoError::Serialize`] | JSON serialization fails |
    #[instrument(skip_all)]
    pub fn write_evaluation(
        &self,
        report: &EvaluationReport,
    ) -> Result<(PathBuf, PathBuf), IoError> {
        let text_path = self.path_for("evaluate.txt");
        self.write(&text_path, &report.to_string())?;

        let json_path = self.path_for("evaluate.json");
        let labels = report.class_labels();
        let class_metrics: Vec<ClassEntry> = report
            .matrix()
            .class_metrics()
            .into_iter()
            .map(|m| ClassEntry {
                class: m.class,
                label: labels[m.class].as_str(),
                precision: m.precision,
                recall: m.recall,
                f1: m.f1,
                support: m.support,
            })
            .collect();
        let artifact = EvaluateArtifact {
            experiment: self.experiment.as_str(),
            n_samples: report.n_samples(),
            accuracy: report.matrix().accuracy(),
            class_labels: labels,
            confusion_matrix: report.matrix().as_rows(),
            binary: report.binary(),
            class_metrics,
        };
        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Serialize {
            path: json_path.clone(),
            source: e,
        })?;
        self.write(&json_path, &json)?;

        info!(
            text = %text_path.display(),
            json = %json_path.display(),
            "evaluation written"
        );
        Ok((text_path, json_path))
    }

    /// Write predicted class labels, one per line, to `{experiment}_predictions.txt`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all, fields(n_predictions = labels.len()))]
    pub fn write_predictions(&self, labels: &[String]) -> Result<PathBuf, IoError> {
        let path = self.path_for("predictions.txt");
        let mut out = String::from("Predicted Classes:\n");
        for label in labels {
            out.push_str(label);
            out.push('\n');
        }
        self.write(&path, &out)?;
        info!(path = %path.display(), "predictions written");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Serialization shadow structs (private)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct EvaluateArtifact<'a> {
    experiment: &'a str,
    n_samples: usize,
    accuracy: f64,
    class_labels: &'a [String],
    confusion_matrix: &'a [Vec<usize>],
    binary: Option<&'a BinaryMetrics>,
    class_metrics: Vec<ClassEntry<'a>>,
}

#[derive(Serialize)]
struct ClassEntry<'a> {
    class: usize,
    label: &'a str,
    precision: Option<f64>,
    recall: Option<f64>,
    f1: Option<f64>,
    support: usize,
}
