//! Display tree assembly from the flat, ordered list of document locations.

use serde::Serialize;

use crate::paths::DELIMITER;

/// One node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Segment name shown in the tree.
    pub name: String,
    /// Full location of the node.
    pub path: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            children: Vec::new(),
        }
    }
}

/// Build the tree from `locations` in their stored order.
///
/// Nodes are created the first time their full prefix is seen and keep the
/// order of first appearance; nothing is re-sorted. A location whose parent
/// never appears on its own still gets the intermediate nodes.
pub fn assemble<I, S>(locations: I) -> Vec<TreeNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut roots: Vec<TreeNode> = Vec::new();

    for location in locations {
        let mut level = &mut roots;
        let mut prefix = String::new();

        for segment in location.as_ref().split(DELIMITER) {
            if segment.is_empty() {
                continue;
            }
            if !prefix.is_empty() {
                prefix.push(DELIMITER);
            }
            prefix.push_str(segment);

            let idx = match level.iter().position(|node| node.path == prefix) {
                Some(idx) => idx,
                None => {
                    level.push(TreeNode::new(segment, prefix.clone()));
                    level.len() - 1
                }
            };
            level = &mut level[idx].children;
        }
    }

    roots
}
