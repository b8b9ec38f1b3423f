//! Lazy traversals. Every iterator borrows the tree, walks it with an explicit stack or queue and
//! never changes its structure. Calling a traversal method again starts a fresh walk over the
//! tree as it is now.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::tree::{Node, Tree};

impl<K> Tree<K> {
    /// Visits keys in ascending order (left subtree, node, right subtree).
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 20, 40]).unwrap();
    /// let keys: Vec<_> = tree.inorder().copied().collect();
    ///
    /// assert_eq!(keys, [20, 30, 40, 50, 70]);
    /// ```
    pub fn inorder(&self) -> Inorder<'_, K> {
        let mut iter = Inorder { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }

    /// Visits each node before its subtrees (node, left, right). Re-inserting keys in this order
    /// rebuilds the same shape.
    pub fn preorder(&self) -> Preorder<'_, K> {
        Preorder {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Visits each node after its subtrees (left, right, node).
    pub fn postorder(&self) -> Postorder<'_, K> {
        Postorder {
            stack: self.root().map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Visits keys breadth-first, top level first and left to right within a level.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap();
    /// let keys: Vec<_> = tree.level_order().copied().collect();
    ///
    /// assert_eq!(keys, [50, 30, 70, 20, 40, 60, 80]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder {
            queue: self.root().into_iter().collect(),
        }
    }

    /// Preorder including a `None` for every absent child. This is the sequence the codec writes
    /// and it determines the shape of the tree exactly.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([2, 1]).unwrap();
    /// let slots: Vec<_> = tree.preorder_with_sentinels().collect();
    ///
    /// assert_eq!(slots, [Some(&2), Some(&1), None, None, None]);
    /// ```
    pub fn preorder_with_sentinels(&self) -> PreorderWithSentinels<'_, K> {
        PreorderWithSentinels {
            stack: vec![self.root()],
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Inorder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

/// Iterator returned by [`Tree::inorder`].
#[derive(Clone)]
pub struct Inorder<'a, K> {
    /// Nodes whose left subtrees have been pushed but which haven't been yielded yet.
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Inorder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for Inorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for Inorder<'_, K> {}

/// Iterator returned by [`Tree::preorder`].
#[derive(Clone)]
pub struct Preorder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iterator for Preorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right first so the left subtree comes off the stack first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.key())
    }
}

impl<K> FusedIterator for Preorder<'_, K> {}

/// Iterator returned by [`Tree::postorder`].
#[derive(Clone)]
pub struct Postorder<'a, K> {
    /// Each node is paired with whether its children have already been pushed.
    stack: Vec<(&'a Node<K>, bool)>,
}

impl<'a, K> Iterator for Postorder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            if expanded {
                return Some(node.key());
            }
            self.stack.push((node, true));
            if let Some(right) = node.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left, false));
            }
        }
        None
    }
}

impl<K> FusedIterator for Postorder<'_, K> {}

/// Iterator returned by [`Tree::level_order`].
#[derive(Clone)]
pub struct LevelOrder<'a, K> {
    queue: VecDeque<&'a Node<K>>,
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

/// Iterator returned by [`Tree::preorder_with_sentinels`].
#[derive(Clone)]
pub struct PreorderWithSentinels<'a, K> {
    stack: Vec<Option<&'a Node<K>>>,
}

impl<'a, K> Iterator for PreorderWithSentinels<'a, K> {
    type Item = Option<&'a K>;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        Some(slot.map(|node| {
            self.stack.push(node.right());
            self.stack.push(node.left());
            node.key()
        }))
    }
}

impl<K> FusedIterator for PreorderWithSentinels<'_, K> {}
