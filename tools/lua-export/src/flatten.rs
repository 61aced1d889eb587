//! Node tree flattening
//!
//! Turns the owned node hierarchy into a breadth-first sequence so parents
//! and children can be written as integer indices. The output vector doubles
//! as the work queue: a cursor walks it while children are appended, so the
//! traversal never recurses regardless of tree depth.

use hashbrown::HashMap;
use scene_model::Node;

/// Nodes in breadth-first order with parent links and an identity index
pub struct FlattenedTree<'a> {
    nodes: Vec<&'a Node>,
    parents: Vec<Option<usize>>,
    /// Node address -> position in `nodes`
    index: HashMap<*const Node, usize>,
}

impl<'a> FlattenedTree<'a> {
    pub fn new(root: &'a Node) -> Self {
        let mut nodes = vec![root];
        let mut parents = vec![None];
        let mut index = HashMap::new();

        let mut cursor = 0;
        while cursor < nodes.len() {
            let current = nodes[cursor];
            index.insert(current as *const Node, cursor);
            for child in &current.children {
                nodes.push(child);
                parents.push(Some(cursor));
            }
            cursor += 1;
        }

        tracing::debug!("Flattened {} nodes", nodes.len());
        Self {
            nodes,
            parents,
            index,
        }
    }

    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    pub fn node(&self, i: usize) -> &'a Node {
        self.nodes[i]
    }

    /// Position of the parent, `None` for the root
    pub fn parent(&self, i: usize) -> Option<usize> {
        self.parents[i]
    }

    /// Position of a node from this tree, matched by identity
    pub fn index_of(&self, node: &Node) -> Option<usize> {
        self.index.get(&(node as *const Node)).copied()
    }

    /// Positions of the children of node `i`, in child order
    pub fn children(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[i]
            .children
            .iter()
            .filter_map(|child| self.index_of(child))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is always present
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Node)> + '_ {
        self.nodes.iter().copied().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn names(tree: &FlattenedTree) -> Vec<String> {
        tree.nodes().iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_single_root() {
        let root = Node::new("root");
        let tree = FlattenedTree::new(&root);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.parent(0), None);
        assert_eq!(tree.children(0).count(), 0);
        assert_eq!(tree.index_of(&root), Some(0));
    }

    #[test]
    fn test_root_with_two_children() {
        let root = Node::new("R")
            .with_child(Node::new("A"))
            .with_child(Node::new("B"));
        let tree = FlattenedTree::new(&root);

        assert_eq!(names(&tree), ["R", "A", "B"]);
        assert_eq!(tree.children(0).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(tree.parent(1), Some(0));
        assert_eq!(tree.parent(2), Some(0));
    }

    #[test]
    fn test_breadth_first_order() {
        // R -> (A -> (C, D), B -> (E))
        let root = Node::new("R")
            .with_child(
                Node::new("A")
                    .with_child(Node::new("C"))
                    .with_child(Node::new("D")),
            )
            .with_child(Node::new("B").with_child(Node::new("E")));
        let tree = FlattenedTree::new(&root);

        assert_eq!(names(&tree), ["R", "A", "B", "C", "D", "E"]);
        assert_eq!(tree.children(1).collect::<Vec<_>>(), [3, 4]);
        assert_eq!(tree.children(2).collect::<Vec<_>>(), [5]);
        assert_eq!(tree.parent(5), Some(2));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut node = Node::new("leaf");
        for i in 0..10_000 {
            node = Node::new(format!("n{i}")).with_child(node);
        }
        let tree = FlattenedTree::new(&node);
        assert_eq!(tree.len(), 10_001);
        assert_eq!(tree.parent(10_000), Some(9_999));
        assert_eq!(tree.node(10_000).name, "leaf");

        // Dropping a 10k-deep owned chain recurses; unlink it iteratively
        drop(tree);
        let mut rest = node.children;
        while let Some(mut next) = rest.pop() {
            rest.append(&mut next.children);
        }
    }

    #[test]
    fn test_equal_nodes_are_distinguished_by_identity() {
        let root = Node::new("R")
            .with_child(Node::new("same"))
            .with_child(Node::new("same"));
        let tree = FlattenedTree::new(&root);
        assert_eq!(tree.index_of(&root.children[0]), Some(1));
        assert_eq!(tree.index_of(&root.children[1]), Some(2));

        let stranger = Node::new("same");
        assert_eq!(tree.index_of(&stranger), None);
    }

    fn random_tree(rng: &mut Pcg32, remaining: &mut usize, depth: usize) -> Node {
        let mut node = Node::new(format!("n{}", *remaining));
        let fanout = if depth > 6 { 0 } else { rng.random_range(0..4) };
        for _ in 0..fanout {
            if *remaining == 0 {
                break;
            }
            *remaining -= 1;
            node.children.push(random_tree(rng, remaining, depth + 1));
        }
        node
    }

    #[test]
    fn test_random_trees_flatten_consistently() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let mut remaining = rng.random_range(0..200);
            let root = random_tree(&mut rng, &mut remaining, 0);
            let tree = FlattenedTree::new(&root);

            assert_eq!(tree.len(), root.subtree_len());
            assert_eq!(tree.parent(0), None);
            assert_eq!(tree.index_of(&root), Some(0));

            for (i, node) in tree.iter() {
                assert_eq!(tree.index_of(node), Some(i));
                if let Some(parent) = tree.parent(i) {
                    assert!(parent < i, "parent indexed before child");
                    assert!(tree.children(parent).any(|c| c == i));
                }
                for child in tree.children(i) {
                    assert_eq!(tree.parent(child), Some(i));
                }
            }
        }
    }
}
