use std::fmt;

use crate::record::AttributeIndex;
use crate::split::Entropy;

/// Index into a `Vec<Node>` arena, identifying a specific node in a tree.
///
/// Ids are assigned in pre-order during one build, so they double as the
/// node labels of the tree diagram.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new node id from a zero-based arena position.
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Return the zero-based arena index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in an ID3 tree arena.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Node {
    /// A node split on one categorical attribute.
    Internal {
        /// Attribute the node branches on.
        attribute: AttributeIndex,
        /// Entropy reduction achieved by the split.
        information_gain: f64,
        /// One child per value id of `attribute`, in id order.
        children: Vec<NodeId>,
        /// Most common class among the node's samples.
        majority_class: usize,
        /// Samples per class id.
        class_counts: Vec<usize>,
        /// Entropy of the node's samples.
        entropy: Entropy,
        /// Number of training samples that reached this node.
        n_samples: usize,
    },
    /// A terminal node.
    Leaf {
        /// Predicted class. For zero-sample leaves this is the parent's majority.
        majority_class: usize,
        /// Samples per class id; all zero for zero-sample leaves.
        class_counts: Vec<usize>,
        /// Entropy of the leaf's samples.
        entropy: Entropy,
        /// Number of training samples in this leaf.
        n_samples: usize,
    },
}

impl Node {
    /// Return the entropy of the samples at this node.
    #[must_use]
    pub fn entropy(&self) -> Entropy {
        match self {
            Node::Internal { entropy, .. } | Node::Leaf { entropy, .. } => *entropy,
        }
    }

    /// Return the number of training samples that reached this node.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            Node::Internal { n_samples, .. } | Node::Leaf { n_samples, .. } => *n_samples,
        }
    }

    /// Return the class histogram at this node.
    #[must_use]
    pub fn class_counts(&self) -> &[usize] {
        match self {
            Node::Internal { class_counts, .. } | Node::Leaf { class_counts, .. } => class_counts,
        }
    }

    /// Return the majority class at this node.
    #[must_use]
    pub fn majority_class(&self) -> usize {
        match self {
            Node::Internal { majority_class, .. } | Node::Leaf { majority_class, .. } => {
                *majority_class
            }
        }
    }

    /// Return `true` if this node is a leaf.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}
