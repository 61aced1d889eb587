//! Transform hierarchy

use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

/// One element of the node tree.
///
/// Children are owned by their parent, so a scene's node hierarchy is always
/// a tree: there is no way to build a cycle or give a node two parents. The
/// parent of a node is recovered by walking down from the root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Transform relative to the parent node
    #[serde(default)]
    pub transform: Mat4,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Indices into [`Scene::meshes`](crate::Scene::meshes)
    #[serde(default)]
    pub meshes: Vec<u32>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to append a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style helper to attach mesh indices
    pub fn with_meshes(mut self, meshes: impl IntoIterator<Item = u32>) -> Self {
        self.meshes.extend(meshes);
        self
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtree_len() {
        let root = Node::new("root")
            .with_child(Node::new("a").with_child(Node::new("a0")))
            .with_child(Node::new("b"));
        assert_eq!(root.subtree_len(), 4);
        assert_eq!(Node::new("leaf").subtree_len(), 1);
    }

    #[test]
    fn test_default_transform_is_identity() {
        assert_eq!(Node::new("n").transform, Mat4::IDENTITY);
    }
}
