//! Graphviz rendering of a fitted tree.

use crate::error::Id3Error;
use crate::node::{Node, NodeId};
use crate::schema::Schema;
use crate::tree::DecisionTree;

const NODE_FILL: &str = "#f5f5dc";

/// Escape `"` and `\` for a quoted dot label.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render `tree` as a Graphviz `digraph`, decoding names through `schema`.
///
/// Nodes are labeled with their split attribute and information gain (internal
/// nodes only), entropy, sample count, class histogram and majority class.
/// Edges carry the attribute value. Edges to zero-sample leaves are omitted
/// unless `show_empty_leaves` is set.
///
/// # Errors
///
/// Returns [`Id3Error::AttributeOutOfRange`] or [`Id3Error::ValueOutOfRange`]
/// if `schema` is not the one the tree was trained on.
pub fn render_dot(
    tree: &DecisionTree,
    schema: &Schema,
    show_empty_leaves: bool,
) -> Result<String, Id3Error> {
    let mut out = String::from(
        "digraph Tree {\nnode [shape=box, style=\"filled\", color=\"black\"];\n",
    );

    // (node, incoming edge as (parent, value label))
    let mut stack: Vec<(NodeId, Option<(NodeId, String)>)> = vec![(NodeId::ROOT, None)];
    while let Some((id, edge)) = stack.pop() {
        if let Some((parent, value)) = edge {
            out.push_str(&format!("{parent} -> {id}[label=\"{}\"];\n", escape(&value)));
        }
        let node = &tree.nodes()[id.index()];

        let split = match node {
            Node::Internal {
                attribute,
                information_gain,
                ..
            } => format!(
                "Split on: {}\\nInformation gain = {information_gain:.3}\\n",
                escape(schema.attribute_name(*attribute)?)
            ),
            Node::Leaf { .. } => String::new(),
        };
        let counts = node
            .class_counts()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!(
            "{id} [label=\"{split}Current Entropy = {}\\nSamples: {}\\nClass counts: [{counts}]\\nClass: {}\", fillcolor=\"{NODE_FILL}\"];\n",
            node.entropy(),
            node.n_samples(),
            escape(schema.decode_class(node.majority_class())?),
        ));

        if let Node::Internal {
            attribute,
            children,
            ..
        } = node
        {
            for (value_id, &child) in children.iter().enumerate().rev() {
                if !show_empty_leaves && tree.nodes()[child.index()].n_samples() == 0 {
                    continue;
                }
                let value = schema.decode(*attribute, value_id)?.to_owned();
                stack.push((child, Some((id, value))));
            }
        }
    }

    out.push_str("}\n");
    Ok(out)
}
