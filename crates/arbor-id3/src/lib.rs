//! ID3 decision trees over categorical data: encode, fit, classify, evaluate.
//!
//! String rows are encoded into integer [`Record`]s against a [`Schema`] of
//! per-attribute vocabularies. [`Id3Config::fit`] grows an arena-based
//! [`DecisionTree`] by information gain, which classifies records and is
//! scored with a [`ConfusionMatrix`].

mod binarize;
mod config;
mod confusion;
mod diagram;
mod encoder;
mod error;
mod eval;
mod node;
mod record;
mod schema;
mod split;
mod tree;

pub use binarize::Binarizer;
pub use config::RunConfig;
pub use confusion::{ClassMetrics, ConfusionMatrix};
pub use diagram::render_dot;
pub use encoder::{CategoricalEncoder, UNLABELED_CLASS};
pub use error::Id3Error;
pub use eval::{BinaryMetrics, EvaluationReport, evaluate};
pub use node::{Node, NodeId};
pub use record::{AttributeIndex, Record};
pub use schema::{CLASS_MARKER, Schema, Vocabulary};
pub use split::Entropy;
pub use tree::{DecisionTree, Id3Config, UnseenValuePolicy};
