//! Aggregate shape statistics.

use std::fmt;

use crate::tree::{Node, Tree};

/// Height, node count and leaf count of a tree, gathered in a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TreeStats {
    /// Number of levels. An empty tree has height 0 and a single node has height 1.
    pub height: usize,
    /// Number of nodes.
    pub count: usize,
    /// Number of nodes without children.
    pub leaves: usize,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "height {}, {} nodes, {} leaves",
            self.height, self.count, self.leaves
        )
    }
}

impl<K> Tree<K> {
    /// Computes [`TreeStats`] level by level.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::{Tree, TreeStats};
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap();
    ///
    /// assert_eq!(
    ///     tree.stats(),
    ///     TreeStats { height: 3, count: 7, leaves: 4 }
    /// );
    /// ```
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut level: Vec<&Node<K>> = self.root().into_iter().collect();
        while !level.is_empty() {
            stats.height += 1;
            stats.count += level.len();

            let mut next = Vec::with_capacity(level.len() * 2);
            for node in level {
                if node.is_leaf() {
                    stats.leaves += 1;
                }
                next.extend(node.left());
                next.extend(node.right());
            }
            level = next;
        }
        stats
    }

    /// Number of nodes on the longest root-to-leaf path. 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K>, usize)> =
            self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }
        height
    }

    /// Number of nodes in the tree.
    pub fn count(&self) -> usize {
        self.preorder().count()
    }

    /// Number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut stack: Vec<&Node<K>> = self.root().into_iter().collect();
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves += 1;
            }
            stack.extend(node.left());
            stack.extend(node.right());
        }
        leaves
    }
}
