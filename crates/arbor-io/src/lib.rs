//! CSV loading and result writing for the arbor pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{CategoricalDataset, ExperimentName};
pub use error::IoError;
pub use reader::CategoricalReader;
pub use writer::ResultWriter;
