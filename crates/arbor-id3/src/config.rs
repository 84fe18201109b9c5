//! Run-level options shared by the command line and library callers.

use crate::error::Id3Error;
use crate::tree::Id3Config;

/// Options for one train/evaluate run.
///
/// # Defaults
///
/// | Parameter           | Default |
/// |---------------------|---------|
/// | `binarize`          | `false` |
/// | `max_depth`         | `-1`    |
/// | `show_empty_leaves` | `false` |
/// | `debug`             | `false` |
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunConfig {
    /// One-hot encode every non-class attribute before training.
    pub binarize: bool,
    /// Depth limit; `-1` means unlimited.
    pub max_depth: i64,
    /// Draw edges to zero-sample leaves in the tree diagram.
    pub show_empty_leaves: bool,
    /// Emit debug-level logs, including the vocabulary dump.
    pub debug: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            binarize: false,
            max_depth: -1,
            show_empty_leaves: false,
            debug: false,
        }
    }
}

impl RunConfig {
    /// Convert into the tree builder configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Id3Error::InvalidMaxDepth`] if `max_depth` is below `-1`.
    pub fn tree_config(&self) -> Result<Id3Config, Id3Error> {
        let max_depth = match self.max_depth {
            -1 => None,
            d if d < -1 => return Err(Id3Error::InvalidMaxDepth { max_depth: d }),
            d => Some(usize::try_from(d).map_err(|_| Id3Error::InvalidMaxDepth { max_depth: d })?),
        };
        Ok(Id3Config::new().with_max_depth(max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let config = RunConfig::default().tree_config().unwrap();
        assert_eq!(config.max_depth(), None);
    }

    #[test]
    fn non_negative_depth_is_kept() {
        let run = RunConfig {
            max_depth: 3,
            ..RunConfig::default()
        };
        assert_eq!(run.tree_config().unwrap().max_depth(), Some(3));

        let run = RunConfig {
            max_depth: 0,
            ..RunConfig::default()
        };
        assert_eq!(run.tree_config().unwrap().max_depth(), Some(0));
    }

    #[test]
    fn depth_below_minus_one_rejected() {
        let run = RunConfig {
            max_depth: -2,
            ..RunConfig::default()
        };
        let err = run.tree_config().unwrap_err();
        assert!(matches!(err, Id3Error::InvalidMaxDepth { max_depth: -2 }));
    }
}
