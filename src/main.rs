use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use arbor_id3::{
    Binarizer, DecisionTree, EvaluationReport, Record, RunConfig, Schema, render_dot,
};
use arbor_io::{CategoricalReader, ExperimentName, ResultWriter};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "ID3 decision trees for categorical CSV data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

/// Training data and tree options shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct TrainArgs {
    /// Path to the training CSV file (class column marked with '#')
    #[arg(long)]
    train: PathBuf,

    /// Maximum tree depth, root at depth 0 (-1 = unlimited)
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    max_depth: i64,

    /// One-hot encode every non-class attribute before training
    #[arg(long, default_value_t = false)]
    binarize: bool,

    /// Draw edges to zero-sample leaves in the tree diagram
    #[arg(long, default_value_t = false)]
    show_empty_leaves: bool,

    /// Log debug details, including the attribute vocabularies
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: String,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl TrainArgs {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            binarize: self.binarize,
            max_depth: self.max_depth,
            show_empty_leaves: self.show_empty_leaves,
            debug: self.debug,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Train a tree, write its diagram and evaluate it
    Evaluate {
        /// Path to the test CSV file (defaults to the training file)
        #[arg(long)]
        test: Option<PathBuf>,

        #[command(flatten)]
        args: TrainArgs,
    },

    /// Train a tree and predict the class of every row in a data file
    Predict {
        /// Path to the CSV file to classify (same columns as the training file;
        /// class cells are ignored)
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        args: TrainArgs,
    },
}

impl Command {
    fn args(&self) -> &TrainArgs {
        match self {
            Command::Evaluate { args, .. } | Command::Predict { args, .. } => args,
        }
    }
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct EvaluateOutput {
    experiment: String,
    n_train: usize,
    n_test: usize,
    n_attributes: usize,
    n_classes: usize,
    n_nodes: usize,
    n_leaves: usize,
    depth: usize,
    accuracy: f64,
    diagram: PathBuf,
    report: PathBuf,
}

#[derive(Serialize)]
struct PredictOutput {
    experiment: String,
    n_train: usize,
    n_predictions: usize,
    n_nodes: usize,
    predictions: PathBuf,
}

/// A fitted tree and the schemas needed to feed and decode it.
struct Trained {
    /// Schema learned from the training file.
    source_schema: Schema,
    /// Present when attributes were binarized before training.
    binarizer: Option<Binarizer>,
    /// Schema the tree was fitted on.
    tree_schema: Schema,
    tree: DecisionTree,
    n_train: usize,
}

impl Trained {
    /// Read `path` against the training vocabulary and bring it into tree layout.
    ///
    /// Unless `labeled`, the class column is not read.
    fn load(&self, path: &Path, labeled: bool) -> Result<Vec<Record>> {
        let mut reader = CategoricalReader::new(path).with_schema(self.source_schema.clone());
        if !labeled {
            reader = reader.unlabeled();
        }
        let (_, records) = reader
            .read()
            .with_context(|| format!("failed to read {}", path.display()))?
            .into_parts();
        match &self.binarizer {
            Some(b) => b.transform(&records).context("binarization failed"),
            None => Ok(records),
        }
    }
}

fn train(config: &RunConfig, path: &Path) -> Result<Trained> {
    let tree_config = config.tree_config().context("invalid tree configuration")?;

    let (source_schema, records) = CategoricalReader::new(path)
        .read()
        .context("failed to read training CSV")?
        .into_parts();
    debug!(vocabulary = %source_schema, "training vocabulary");

    let (binarizer, tree_schema, records) = if config.binarize {
        let binarizer = Binarizer::fit(&source_schema);
        let records = binarizer
            .transform(&records)
            .context("binarization failed")?;
        let schema = binarizer.schema().clone();
        info!(n_attributes = schema.n_attributes(), "attributes binarized");
        debug!(vocabulary = %schema, "binarized vocabulary");
        (Some(binarizer), schema, records)
    } else {
        (None, source_schema.clone(), records)
    };

    let tree = tree_config
        .fit(&tree_schema, &records)
        .context("tree induction failed")?;

    Ok(Trained {
        source_schema,
        binarizer,
        tree_schema,
        tree,
        n_train: records.len(),
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose || cli.command.args().debug, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Evaluate { test, args } => {
            let experiment_name = ExperimentName::new(args.experiment.clone())?;
            let config = args.run_config();

            // 1. Train
            let trained = train(&config, &args.train)?;

            // 2. Diagram
            let dot = render_dot(&trained.tree, &trained.tree_schema, config.show_empty_leaves)
                .context("failed to render tree diagram")?;
            let writer = ResultWriter::new(&args.output_dir, experiment_name)?;
            let diagram = writer.write_diagram(&dot)?;

            // 3. Evaluate on the test file, or the training file
            let test_path = test.as_deref().unwrap_or(args.train.as_path());
            let test_records = trained.load(test_path, true)?;
            let report =
                EvaluationReport::build(&trained.tree, &trained.tree_schema, &test_records)
                    .context("evaluation failed")?;
            let (report_path, _) = writer.write_evaluation(&report)?;

            // 4. Print summary
            let output = EvaluateOutput {
                experiment: args.experiment,
                n_train: trained.n_train,
                n_test: test_records.len(),
                n_attributes: trained.tree.n_attributes(),
                n_classes: trained.tree.n_classes(),
                n_nodes: trained.tree.n_nodes(),
                n_leaves: trained.tree.n_leaves(),
                depth: trained.tree.depth(),
                accuracy: report.matrix().accuracy(),
                diagram,
                report: report_path,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Predict { data, args } => {
            let experiment_name = ExperimentName::new(args.experiment.clone())?;
            let config = args.run_config();

            // 1. Train
            let trained = train(&config, &args.train)?;

            // 2. Predict
            let records = trained.load(&data, false)?;
            let labels = trained
                .tree
                .predict_labels(&trained.tree_schema, &records)
                .context("prediction failed")?;

            // 3. Write predictions
            let writer = ResultWriter::new(&args.output_dir, experiment_name)?;
            let predictions = writer.write_predictions(&labels)?;

            // 4. Print summary
            let output = PredictOutput {
                experiment: args.experiment,
                n_train: trained.n_train,
                n_predictions: labels.len(),
                n_nodes: trained.tree.n_nodes(),
                predictions,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
