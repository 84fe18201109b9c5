use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use tracing::{debug, info, instrument};

use crate::{
    Id3Error,
    node::{Node, NodeId},
    record::{AttributeIndex, Record},
    schema::Schema,
    split::{Entropy, class_histogram, find_best_split, majority_class},
};

/// Widest schema (in non-class attributes) still built by plain recursion.
///
/// Recursion depth is bounded by the attribute count; wider schemas switch to
/// an explicit worklist that produces the same arena.
const MAX_RECURSIVE_ATTRIBUTES: usize = 512;

/// What classification does when a record's value has no trained branch.
///
/// This happens when a record was encoded against a vocabulary that grew
/// after training, so the split node never saw that value id.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    serde::Serialize, serde::Deserialize,
)]
pub enum UnseenValuePolicy {
    /// Predict the majority class of the split node that has no branch.
    #[default]
    MajorityFallback,
    /// Fail with [`Id3Error::UnseenSplitValue`].
    Reject,
}

/// Configuration for ID3 tree induction.
///
/// Construct via [`Id3Config::new`], then chain `with_*` methods.
///
/// # Defaults
///
/// | Parameter             | Default              |
/// |-----------------------|----------------------|
/// | `max_depth`           | `None` (unlimited)   |
/// | `unseen_value_policy` | `MajorityFallback`   |
#[derive(Debug, Clone, Default)]
pub struct Id3Config {
    pub(crate) max_depth: Option<usize>,
    pub(crate) unseen_value_policy: UnseenValuePolicy,
}

impl Id3Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum tree depth.
    ///
    /// `None` grows until leaves are pure or attributes run out. `Some(d)`
    /// stops at depth `d`, the root being depth 0, so `Some(0)` yields a
    /// single leaf.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the policy for values without a trained branch.
    #[must_use]
    pub fn with_unseen_value_policy(mut self, policy: UnseenValuePolicy) -> Self {
        self.unseen_value_policy = policy;
        self
    }

    /// Return the maximum depth limit, if any.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Return the unseen value policy.
    #[must_use]
    pub fn unseen_value_policy(&self) -> UnseenValuePolicy {
        self.unseen_value_policy
    }

    /// Induce an ID3 tree from `records` encoded against `schema`.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`Id3Error::EmptyDataset`] | `records` is empty |
    /// | [`Id3Error::NoClassValues`] | the class vocabulary is empty |
    /// | [`Id3Error::SchemaMismatch`] | a record length differs from the attribute count |
    /// | [`Id3Error::ValueOutOfRange`] | a record holds an id outside its attribute's vocabulary |
    #[instrument(skip(self, schema, records), fields(n_records = records.len()))]
    pub fn fit(&self, schema: &Schema, records: &[Record]) -> Result<DecisionTree, Id3Error> {
        let strategy = if schema.n_attributes().saturating_sub(1) <= MAX_RECURSIVE_ATTRIBUTES {
            BuildStrategy::Recursive
        } else {
            BuildStrategy::Worklist
        };
        self.fit_with(schema, records, strategy)
    }

    pub(crate) fn fit_with(
        &self,
        schema: &Schema,
        records: &[Record],
        strategy: BuildStrategy,
    ) -> Result<DecisionTree, Id3Error> {
        validate(schema, records)?;

        let n_attributes = schema.n_attributes();
        let class_index = schema.class_index();
        let n_classes = schema.class_count();
        let vocabulary_sizes: Vec<usize> = (0..n_attributes)
            .map(|a| schema.vocabulary(AttributeIndex::new(a)).map(|v| v.len()))
            .collect::<Result<_, _>>()?;

        debug!(
            n_records = records.len(),
            n_attributes,
            n_classes,
            max_depth = ?self.max_depth,
            ?strategy,
            "fitting ID3 tree"
        );

        let mut used = FixedBitSet::with_capacity(n_attributes);
        used.insert(class_index.index());

        let mut builder = Builder {
            records,
            class_index,
            n_classes,
            vocabulary_sizes,
            max_depth: self.max_depth,
            arena: Vec::new(),
        };
        let root_samples: Vec<usize> = (0..records.len()).collect();
        match strategy {
            BuildStrategy::Recursive => {
                builder.build_recursive(&root_samples, &used, 0, 0);
            }
            BuildStrategy::Worklist => builder.build_worklist(root_samples, used),
        }

        let tree = DecisionTree {
            nodes: builder.arena,
            n_attributes,
            class_index,
            n_classes,
            unseen_value_policy: self.unseen_value_policy,
        };
        info!(
            n_nodes = tree.n_nodes(),
            n_leaves = tree.n_leaves(),
            depth = tree.depth(),
            "ID3 tree built"
        );
        Ok(tree)
    }
}

fn validate(schema: &Schema, records: &[Record]) -> Result<(), Id3Error> {
    if records.is_empty() {
        return Err(Id3Error::EmptyDataset);
    }
    if schema.class_count() == 0 {
        return Err(Id3Error::NoClassValues {
            attribute: schema.attribute_names()[schema.class_index().index()].clone(),
        });
    }
    let n_attributes = schema.n_attributes();
    for (row_index, record) in records.iter().enumerate() {
        if record.len() != n_attributes {
            return Err(Id3Error::SchemaMismatch {
                expected: n_attributes,
                got: record.len(),
                row_index,
            });
        }
        for (a, &value_id) in record.values().iter().enumerate() {
            // decode fails exactly when the id is outside the vocabulary
            schema.decode(AttributeIndex::new(a), value_id)?;
        }
    }
    Ok(())
}

/// How the arena is grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuildStrategy {
    Recursive,
    Worklist,
}

/// Outcome of examining one node's samples.
enum Step {
    Leaf(Node),
    Split(PendingSplit),
}

/// An internal node whose children are not built yet.
struct PendingSplit {
    attribute: AttributeIndex,
    information_gain: f64,
    majority_class: usize,
    class_counts: Vec<usize>,
    entropy: Entropy,
    n_samples: usize,
    buckets: Vec<Vec<usize>>,
    child_used: FixedBitSet,
}

impl PendingSplit {
    fn into_node(self, children: Vec<NodeId>) -> Node {
        Node::Internal {
            attribute: self.attribute,
            information_gain: self.information_gain,
            children,
            majority_class: self.majority_class,
            class_counts: self.class_counts,
            entropy: self.entropy,
            n_samples: self.n_samples,
        }
    }
}

/// A node waiting on the worklist.
struct Task {
    samples: Vec<usize>,
    used: FixedBitSet,
    depth: usize,
    fallback_class: usize,
    /// Parent id and the child slot this node fills.
    parent: Option<(NodeId, usize)>,
}

/// Per-build state; node ids come from `arena` positions.
struct Builder<'a> {
    records: &'a [Record],
    class_index: AttributeIndex,
    n_classes: usize,
    vocabulary_sizes: Vec<usize>,
    max_depth: Option<usize>,
    arena: Vec<Node>,
}

impl Builder<'_> {
    /// Compute statistics and decide between a leaf and a split.
    ///
    /// `fallback_class` is the parent's majority, used when there are no samples.
    fn step(
        &self,
        samples: &[usize],
        used: &FixedBitSet,
        depth: usize,
        fallback_class: usize,
    ) -> Step {
        let n_samples = samples.len();
        if n_samples == 0 {
            return Step::Leaf(Node::Leaf {
                majority_class: fallback_class,
                class_counts: vec![0; self.n_classes],
                entropy: Entropy::default(),
                n_samples: 0,
            });
        }

        let class_counts = class_histogram(self.records, samples, self.class_index, self.n_classes);
        let entropy = Entropy::from_counts(&class_counts, n_samples);
        let majority = majority_class(&class_counts);

        let pure = class_counts.iter().filter(|&&c| c > 0).count() == 1;
        let depth_exhausted = self.max_depth.is_some_and(|max_d| depth >= max_d);

        let split = if pure || depth_exhausted {
            None
        } else {
            find_best_split(
                self.records,
                samples,
                used,
                &self.vocabulary_sizes,
                entropy,
                self.class_index,
                self.n_classes,
            )
        };

        match split {
            Some(split) => {
                let mut child_used = used.clone();
                child_used.insert(split.attribute.index());
                Step::Split(PendingSplit {
                    attribute: split.attribute,
                    information_gain: split.gain,
                    majority_class: majority,
                    class_counts,
                    entropy,
                    n_samples,
                    buckets: split.buckets,
                    child_used,
                })
            }
            None => Step::Leaf(Node::Leaf {
                majority_class: majority,
                class_counts,
                entropy,
                n_samples,
            }),
        }
    }

    fn build_recursive(
        &mut self,
        samples: &[usize],
        used: &FixedBitSet,
        depth: usize,
        fallback_class: usize,
    ) -> NodeId {
        let id = NodeId::new(self.arena.len());
        match self.step(samples, used, depth, fallback_class) {
            Step::Leaf(node) => self.arena.push(node),
            Step::Split(mut pending) => {
                // Reserve the slot so children get later ids, then overwrite.
                self.arena.push(Node::Leaf {
                    majority_class: 0,
                    class_counts: Vec::new(),
                    entropy: Entropy::default(),
                    n_samples: 0,
                });
                let buckets = std::mem::take(&mut pending.buckets);
                let mut children = Vec::with_capacity(buckets.len());
                for bucket in &buckets {
                    children.push(self.build_recursive(
                        bucket,
                        &pending.child_used,
                        depth + 1,
                        pending.majority_class,
                    ));
                }
                self.arena[id.index()] = pending.into_node(children);
            }
        }
        id
    }

    /// Pre-order construction with an explicit stack; ids match `build_recursive`.
    fn build_worklist(&mut self, root_samples: Vec<usize>, root_used: FixedBitSet) {
        let mut stack = vec![Task {
            samples: root_samples,
            used: root_used,
            depth: 0,
            fallback_class: 0,
            parent: None,
        }];

        while let Some(task) = stack.pop() {
            let id = NodeId::new(self.arena.len());
            if let Some((parent, slot)) = task.parent
                && let Node::Internal { children, .. } = &mut self.arena[parent.index()]
            {
                children[slot] = id;
            }

            match self.step(&task.samples, &task.used, task.depth, task.fallback_class) {
                Step::Leaf(node) => self.arena.push(node),
                Step::Split(mut pending) => {
                    let buckets = std::mem::take(&mut pending.buckets);
                    let child_used = pending.child_used.clone();
                    let majority = pending.majority_class;
                    self.arena.push(pending.into_node(vec![id; buckets.len()]));

                    // Reverse so slot 0 is popped first.
                    for (slot, bucket) in buckets.into_iter().enumerate().rev() {
                        stack.push(Task {
                            samples: bucket,
                            used: child_used.clone(),
                            depth: task.depth + 1,
                            fallback_class: majority,
                            parent: Some((id, slot)),
                        });
                    }
                }
            }
        }
    }
}

/// A fitted ID3 tree over categorical records.
///
/// Stored as an arena-based `Vec<Node>`; the root is at index 0.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DecisionTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) n_attributes: usize,
    pub(crate) class_index: AttributeIndex,
    pub(crate) n_classes: usize,
    pub(crate) unseen_value_policy: UnseenValuePolicy,
}

impl DecisionTree {
    /// Predict the class id of one record.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`Id3Error::RecordLengthMismatch`] | the record length differs from the trained attribute count |
    /// | [`Id3Error::UnseenSplitValue`] | a value has no branch and the policy is `Reject` |
    pub fn classify(&self, record: &Record) -> Result<usize, Id3Error> {
        if record.len() != self.n_attributes {
            return Err(Id3Error::RecordLengthMismatch {
                expected: self.n_attributes,
                got: record.len(),
            });
        }
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { majority_class, .. } => return Ok(*majority_class),
                Node::Internal {
                    attribute,
                    children,
                    majority_class,
                    ..
                } => {
                    let value_id = record.get(*attribute);
                    match children.get(value_id) {
                        Some(child) => idx = child.index(),
                        None => {
                            return match self.unseen_value_policy {
                                UnseenValuePolicy::MajorityFallback => Ok(*majority_class),
                                UnseenValuePolicy::Reject => Err(Id3Error::UnseenSplitValue {
                                    attribute: attribute.index(),
                                    value_id,
                                    known_values: children.len(),
                                }),
                            };
                        }
                    }
                }
            }
        }
    }

    /// Predict the class id of every record, in order.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionTree::classify`], except a length mismatch is reported
    /// as [`Id3Error::SchemaMismatch`] carrying the record's position.
    pub fn classify_batch(&self, records: &[Record]) -> Result<Vec<usize>, Id3Error> {
        records
            .iter()
            .enumerate()
            .map(|(row_index, record)| {
                self.classify(record).map_err(|e| match e {
                    Id3Error::RecordLengthMismatch { expected, got } => {
                        Id3Error::SchemaMismatch { expected, got, row_index }
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Predict the decoded class label of every record, in order.
    ///
    /// # Errors
    ///
    /// Same as [`DecisionTree::classify_batch`], plus [`Id3Error::ValueOutOfRange`]
    /// when `schema` is not the one the tree was trained on.
    pub fn predict_labels(
        &self,
        schema: &Schema,
        records: &[Record],
    ) -> Result<Vec<String>, Id3Error> {
        self.classify_batch(records)?
            .into_iter()
            .map(|class| schema.decode_class(class).map(str::to_owned))
            .collect()
    }

    /// Return the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Return the node with the given id, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Return all nodes in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return the total number of nodes.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of leaves, zero-sample leaves included.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Return the number of attributes the tree was trained with.
    #[must_use]
    pub fn n_attributes(&self) -> usize {
        self.n_attributes
    }

    /// Return the class attribute index.
    #[must_use]
    pub fn class_index(&self) -> AttributeIndex {
        self.class_index
    }

    /// Return the number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the unseen value policy used by [`DecisionTree::classify`].
    #[must_use]
    pub fn unseen_value_policy(&self) -> UnseenValuePolicy {
        self.unseen_value_policy
    }

    /// Return the maximum depth of the tree.
    ///
    /// A single-node tree has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0usize;
        let mut queue = VecDeque::new();
        queue.push_back((0usize, 0usize));

        while let Some((node_idx, d)) = queue.pop_front() {
            match &self.nodes[node_idx] {
                Node::Leaf { .. } => max_depth = max_depth.max(d),
                Node::Internal { children, .. } => {
                    queue.extend(children.iter().map(|c| (c.index(), d + 1)));
                }
            }
        }

        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::CategoricalEncoder;

    fn encode(header: &[&str], rows: &[&[&str]]) -> (Schema, Vec<Record>) {
        let mut enc = CategoricalEncoder::from_header(header).unwrap();
        let records = enc.encode_rows(rows.iter().copied()).unwrap();
        (enc.into_schema(), records)
    }

    fn weather() -> (Schema, Vec<Record>) {
        encode(
            &["Weather", "Wind", "Play#"],
            &[
                &["Sunny", "Weak", "Yes"],
                &["Sunny", "Strong", "No"],
                &["Rainy", "Weak", "Yes"],
                &["Rainy", "Strong", "No"],
            ],
        )
    }

    fn xor() -> (Schema, Vec<Record>) {
        encode(
            &["a", "b", "y#"],
            &[
                &["0", "0", "f"],
                &["0", "1", "t"],
                &["1", "0", "t"],
                &["1", "1", "f"],
            ],
        )
    }

    #[test]
    fn empty_dataset_error() {
        let (schema, _) = weather();
        let err = Id3Config::new().fit(&schema, &[]).unwrap_err();
        assert!(matches!(err, Id3Error::EmptyDataset));
    }

    #[test]
    fn record_length_mismatch_error() {
        let (schema, _) = weather();
        let err = Id3Config::new()
            .fit(&schema, &[Record::new(vec![0, 0])])
            .unwrap_err();
        assert!(matches!(err, Id3Error::SchemaMismatch { expected: 3, got: 2, row_index: 0 }));
    }

    #[test]
    fn foreign_value_id_error() {
        let (schema, _) = weather();
        let err = Id3Config::new()
            .fit(&schema, &[Record::new(vec![0, 9, 0])])
            .unwrap_err();
        assert!(matches!(err, Id3Error::ValueOutOfRange { value_id: 9, .. }));
    }

    #[test]
    fn weather_splits_on_wind() {
        let (schema, records) = weather();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();

        match tree.root() {
            Node::Internal {
                attribute,
                information_gain,
                children,
                entropy,
                ..
            } => {
                assert_eq!(*attribute, AttributeIndex::new(1));
                assert!((information_gain - 2.0_f64.ln()).abs() < 1e-10);
                assert!((entropy.value() - 2.0_f64.ln()).abs() < 1e-10);
                assert_eq!(children, &[NodeId::new(1), NodeId::new(2)]);
            }
            Node::Leaf { .. } => panic!("root should split"),
        }
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn pure_dataset_single_leaf() {
        let (schema, records) = encode(&["a", "y#"], &[&["x", "yes"], &["z", "yes"]]);
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.classify(&records[1]).unwrap(), 0);
    }

    #[test]
    fn zero_depth_is_single_majority_leaf() {
        let (schema, records) = encode(
            &["a", "y#"],
            &[&["x", "no"], &["z", "yes"], &["z", "yes"]],
        );
        let tree = Id3Config::new()
            .with_max_depth(Some(0))
            .fit(&schema, &records)
            .unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.root().majority_class(), 1);
    }

    #[test]
    fn xor_needs_depth_two() {
        let (schema, records) = xor();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        assert_eq!(tree.depth(), 2);
        for r in &records {
            assert_eq!(tree.classify(r).unwrap(), r.get(schema.class_index()));
        }
    }

    #[test]
    fn max_depth_limits_tree() {
        let (schema, records) = xor();
        let tree = Id3Config::new()
            .with_max_depth(Some(1))
            .fit(&schema, &records)
            .unwrap();
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn empty_bucket_inherits_parent_majority() {
        // Within a = "p" only b = "u" occurs, so the b = "v" child is empty.
        let (schema, records) = encode(
            &["a", "b", "y#"],
            &[
                &["q", "v", "no"],
                &["p", "u", "yes"],
                &["p", "u", "no"],
                &["p", "u", "no"],
                &["q", "v", "yes"],
                &["q", "u", "yes"],
            ],
        );
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        let empty: Vec<&Node> = tree.nodes().iter().filter(|n| n.n_samples() == 0).collect();
        assert!(!empty.is_empty());
        for node in tree.nodes() {
            if let Node::Internal { children, majority_class, .. } = node {
                for child in children {
                    let child = tree.node(*child).unwrap();
                    if child.n_samples() == 0 {
                        assert!(child.is_leaf());
                        assert_eq!(child.majority_class(), *majority_class);
                        assert_eq!(child.class_counts(), &[0, 0]);
                    }
                }
            }
        }
    }

    /// Follow the single branch below the root, which must end in a leaf.
    fn only_leaf_below_root(tree: &DecisionTree) -> &Node {
        let Node::Internal { children, .. } = tree.root() else {
            panic!("root should split");
        };
        assert_eq!(children.len(), 1);
        let leaf = tree.node(children[0]).unwrap();
        assert!(leaf.is_leaf());
        leaf
    }

    #[test]
    fn exhausted_attributes_leave_impure_majority_leaf() {
        // Identical attributes, conflicting classes.
        let (schema, records) = encode(&["a", "y#"], &[&["x", "yes"], &["x", "no"], &["x", "no"]]);
        let tree = Id3Config::new().fit(&schema, &records).unwrap();

        let leaf = only_leaf_below_root(&tree);
        assert_eq!(leaf.class_counts(), &[1, 2]);
        assert_eq!(leaf.majority_class(), 1);
        assert_eq!(leaf.n_samples(), 3);
        assert!(leaf.entropy().value() > 0.0);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn exhausted_attributes_tie_goes_to_lowest_class() {
        let (schema, records) = encode(&["a", "y#"], &[&["x", "yes"], &["x", "no"]]);
        let tree = Id3Config::new().fit(&schema, &records).unwrap();

        let leaf = only_leaf_below_root(&tree);
        assert_eq!(leaf.class_counts(), &[1, 1]);
        assert_eq!(leaf.majority_class(), 0);
        assert!((leaf.entropy().value() - 2.0_f64.ln()).abs() < 1e-10);
        assert_eq!(tree.classify(&records[1]).unwrap(), 0);
    }

    #[test]
    fn used_attributes_are_per_branch() {
        let (schema, records) = xor();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        // Root uses attribute 0, both children must split on attribute 1.
        let Node::Internal { children, .. } = tree.root() else {
            panic!("root should split");
        };
        for child in children {
            match tree.node(*child).unwrap() {
                Node::Internal { attribute, .. } => assert_eq!(*attribute, AttributeIndex::new(1)),
                Node::Leaf { .. } => panic!("xor children should split"),
            }
        }
    }

    #[test]
    fn worklist_matches_recursive() {
        for (schema, records) in [weather(), xor()] {
            let config = Id3Config::new();
            let a = config.fit_with(&schema, &records, BuildStrategy::Recursive).unwrap();
            let b = config.fit_with(&schema, &records, BuildStrategy::Worklist).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn unseen_value_fallback_and_reject() {
        let (mut schema, records) = weather();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();

        // Grow the Wind vocabulary after training.
        let gale = schema.register_value(AttributeIndex::new(1), "Gale").unwrap();
        let record = Record::new(vec![0, gale, 0]);
        assert_eq!(tree.classify(&record).unwrap(), tree.root().majority_class());

        let strict = Id3Config::new()
            .with_unseen_value_policy(UnseenValuePolicy::Reject)
            .fit(&schema, &records)
            .unwrap();
        // The vocabulary grew before this fit, so the split now has a Gale branch.
        assert!(strict.classify(&record).is_ok());

        let (schema, records) = weather();
        let strict = Id3Config::new()
            .with_unseen_value_policy(UnseenValuePolicy::Reject)
            .fit(&schema, &records)
            .unwrap();
        let err = strict.classify(&record).unwrap_err();
        assert!(matches!(
            err,
            Id3Error::UnseenSplitValue { attribute: 1, value_id: 2, known_values: 2 }
        ));
    }

    #[test]
    fn classify_batch_reports_row() {
        let (schema, records) = weather();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        let batch = vec![records[0].clone(), Record::new(vec![0])];
        let err = tree.classify_batch(&batch).unwrap_err();
        assert!(matches!(err, Id3Error::SchemaMismatch { expected: 3, got: 1, row_index: 1 }));
    }

    #[test]
    fn classify_length_mismatch_has_no_row() {
        let (schema, records) = weather();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        let err = tree.classify(&Record::new(vec![0, 0])).unwrap_err();
        assert_eq!(err, Id3Error::RecordLengthMismatch { expected: 3, got: 2 });
    }

    #[test]
    fn predict_labels_decodes_in_order() {
        let (schema, records) = weather();
        let tree = Id3Config::new().fit(&schema, &records).unwrap();
        let labels = tree.predict_labels(&schema, &records).unwrap();
        assert_eq!(labels, vec!["Yes", "No", "Yes", "No"]);
    }
}
