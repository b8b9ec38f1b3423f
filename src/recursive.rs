//! Structurally recursive insertion. Each call takes ownership of a subtree and hands back the
//! rebuilt subtree, so the search path is reassembled bottom-up on the way out of the recursion.
//!
//! This produces exactly the same shapes as [`Tree::insert`]. The recursion depth is the height of
//! the tree, which for sorted input is the number of keys, so prefer [`Tree::insert`] for large
//! or adversarial inputs.

use std::cmp;

use crate::error::Result;
use crate::tracing_helpers::trace_log;
use crate::tree::{Link, Node, Tree};

impl<K: cmp::Ord> Tree<K> {
    /// Inserts `key` by structural recursion, returning whether the tree changed. Duplicate keys
    /// leave the tree unchanged.
    ///
    /// # Errors
    ///
    /// [`TreeError::AllocationFailure`][crate::TreeError::AllocationFailure] if the node couldn't
    /// be allocated. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut iterative = Tree::new();
    /// let mut recursive = Tree::new();
    /// for key in [5, 2, 8, 1, 9, 2] {
    ///     iterative.insert(key).unwrap();
    ///     recursive.insert_recursive(key).unwrap();
    /// }
    ///
    /// assert_eq!(iterative, recursive);
    /// ```
    pub fn insert_recursive(&mut self, key: K) -> Result<bool> {
        let (root, inserted) = insert(self.root.take(), key);
        self.root = root;
        if matches!(inserted, Ok(true)) {
            trace_log!("inserted key recursively");
        }
        inserted
    }
}

/// Returns the subtree with `key` inserted alongside the outcome. The subtree always comes back,
/// even when allocation fails, so the caller never loses nodes.
fn insert<K: cmp::Ord>(link: Link<K>, key: K) -> (Link<K>, Result<bool>) {
    let Some(mut node) = link else {
        return match Node::try_boxed(key) {
            Ok(leaf) => (Some(leaf), Ok(true)),
            Err(err) => (None, Err(err)),
        };
    };

    let inserted = match key.cmp(&node.key) {
        cmp::Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), key);
            node.left = left;
            inserted
        }
        cmp::Ordering::Equal => Ok(false),
        cmp::Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), key);
            node.right = right;
            inserted
        }
    };

    (Some(node), inserted)
}
