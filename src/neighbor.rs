//! Predecessor and successor queries. Both work whether or not the queried key is in the tree:
//! they return the nearest strictly smaller (or greater) key, found in a single walk from the root.

use std::cmp::Ordering;

use crate::tree::Tree;

impl<K: Ord> Tree<K> {
    /// The largest key strictly smaller than `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap();
    ///
    /// assert_eq!(tree.predecessor(&60), Some(&50));
    /// // 55 isn't in the tree but 50 is still the closest smaller key.
    /// assert_eq!(tree.predecessor(&55), Some(&50));
    /// assert_eq!(tree.predecessor(&20), None);
    /// ```
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        let mut current = self.root();
        let mut candidate = None;
        while let Some(node) = current {
            match node.key().cmp(key) {
                Ordering::Less => {
                    candidate = Some(node.key());
                    current = node.right();
                }
                Ordering::Greater => current = node.left(),
                Ordering::Equal => {
                    // Anything in the left subtree is closer than the ancestors we've recorded.
                    if let Some(left) = node.left() {
                        candidate = Some(left.max_key());
                    }
                    break;
                }
            }
        }
        candidate
    }

    /// The smallest key strictly greater than `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap();
    ///
    /// assert_eq!(tree.successor(&60), Some(&70));
    /// assert_eq!(tree.successor(&45), Some(&50));
    /// assert_eq!(tree.successor(&80), None);
    /// ```
    pub fn successor(&self, key: &K) -> Option<&K> {
        let mut current = self.root();
        let mut candidate = None;
        while let Some(node) = current {
            match node.key().cmp(key) {
                Ordering::Greater => {
                    candidate = Some(node.key());
                    current = node.left();
                }
                Ordering::Less => current = node.right(),
                Ordering::Equal => {
                    if let Some(right) = node.right() {
                        candidate = Some(right.min_key());
                    }
                    break;
                }
            }
        }
        candidate
    }
}
