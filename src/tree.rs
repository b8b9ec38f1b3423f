//! A plain Binary Search Tree of keys. Nothing here rebalances: the shape of the tree is exactly the
//! shape produced by its insertion and deletion history, so inserting sorted keys builds a tree
//! that is really a linked list. Every walk in this module is iterative so that such degenerate
//! trees cost heap, not call stack.
//!
//! # Examples
//!
//! ```
//! use bst_engine::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! assert_eq!(tree.insert(1).unwrap(), true);
//! assert_eq!(tree.search(&1).map(|n| *n.key()), Some(1));
//!
//! // Inserting an existing key changes nothing.
//! assert_eq!(tree.insert(1).unwrap(), false);
//! assert_eq!(tree.count(), 1);
//!
//! // Deleting a key hands it back.
//! assert_eq!(tree.delete(&1), Some(1));
//! assert!(tree.is_empty());
//! ```

use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use crate::codec::Builder;
use crate::error::{Result, TreeError};
use crate::tracing_helpers::trace_log;

/// An owning edge to a subtree. `None` marks an absent child.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree holding unique keys. The tree exclusively owns every node reachable from
/// its root.
///
/// For every node, all keys in its left subtree are strictly smaller than its key and all keys in
/// its right subtree are strictly greater.
pub struct Tree<K> {
    pub(crate) root: Link<K>,
}

/// A single key and its (possibly absent) children. Nodes are only ever handed out by shared
/// reference so callers can inspect the shape of a tree but never break its ordering.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// Allocates a childless node. Unlike `Box::new` this reports an exhausted allocator instead
    /// of aborting the process.
    pub(crate) fn try_boxed(key: K) -> Result<Box<Self>> {
        let layout = Layout::new::<Self>();
        // SAFETY: `Node` always holds two links so its layout is never zero-sized.
        let raw = unsafe { alloc::alloc(layout) }.cast::<Self>();
        let Some(ptr) = NonNull::new(raw) else {
            return Err(TreeError::AllocationFailure);
        };
        // SAFETY: `ptr` is non-null and was just allocated by the global allocator with the layout
        // of `Node`. Writing a value initializes it, after which `Box` may own it and will free it
        // with that same layout.
        unsafe {
            ptr.as_ptr().write(Self {
                key,
                left: None,
                right: None,
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The smallest key in the subtree rooted here.
    pub(crate) fn min_key(&self) -> &K {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        &node.key
    }

    /// The largest key in the subtree rooted here.
    pub(crate) fn max_key(&self) -> &K {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        &node.key
    }
}

impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty. Useful for inspecting the exact shape of a tree.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Removes every node from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut tree = Tree::from_keys([2, 1, 3]).unwrap();
    /// tree.clear();
    ///
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.to_token_string(), "#");
    /// ```
    pub fn clear(&mut self) {
        free(self.root.take());
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root().map(Node::min_key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        self.root().map(Node::max_key)
    }
}

impl<K: Ord> Tree<K> {
    /// Builds a tree by inserting `keys` in iteration order. Duplicates are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([50, 30, 70, 30]).unwrap();
    /// assert_eq!(tree.count(), 3);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(50));
    /// ```
    pub fn from_keys<I>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut tree = Self::new();
        for key in keys {
            tree.insert(key)?;
        }
        Ok(tree)
    }

    /// Inserts `key` as a new leaf, returning whether the tree changed. Inserting a key that is
    /// already present leaves the tree exactly as it was.
    ///
    /// This walks down from the root remembering the last link it passed through and attaches the
    /// new node there. See [`Tree::insert_recursive`] for the structurally recursive equivalent.
    ///
    /// # Errors
    ///
    /// [`TreeError::AllocationFailure`] if the node couldn't be allocated. The tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1).unwrap());
    /// assert!(!tree.insert(1).unwrap());
    /// assert!(tree.contains(&1));
    /// ```
    pub fn insert(&mut self, key: K) -> Result<bool> {
        match self.vacant_link(&key) {
            Some(link) => {
                *link = Some(Node::try_boxed(key)?);
                trace_log!("inserted key");
                Ok(true)
            }
            None => {
                trace_log!("ignored duplicate key");
                Ok(false)
            }
        }
    }

    /// The absent link where `key` belongs, or `None` if `key` is already present.
    fn vacant_link(&mut self, key: &K) -> Option<&mut Link<K>> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return None,
                Ordering::Greater => &mut node.right,
            };
        }
        Some(link)
    }

    /// Finds the node holding `key`. O(height).
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([2, 1, 3]).unwrap();
    ///
    /// let two = tree.search(&2).unwrap();
    /// assert_eq!(two.left().map(|n| *n.key()), Some(1));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Deletes `key` from the tree and returns it. If the tree doesn't contain `key`, nothing
    /// happens.
    ///
    /// A node with at most one child is replaced by that child. A node with two children takes
    /// over the key of its in-order successor (the smallest key of its right subtree) and that
    /// successor node, which never has a left child, is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut tree = Tree::from_keys([50, 30, 70, 60, 80]).unwrap();
    ///
    /// assert_eq!(tree.delete(&50), Some(50));
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(60));
    /// assert_eq!(tree.delete(&50), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let mut link = &mut self.root;
        loop {
            let ordering = key.cmp(&link.as_deref()?.key);
            link = match ordering {
                Ordering::Less => &mut link.as_mut()?.left,
                Ordering::Equal => break,
                Ordering::Greater => &mut link.as_mut()?.right,
            };
        }

        let target = link.as_mut()?;
        if target.left.is_some() && target.right.is_some() {
            let successor = remove_min(&mut target.right)?;
            trace_log!("deleted key with two children");
            return Some(std::mem::replace(&mut target.key, successor));
        }

        let mut target = link.take()?;
        *link = target.left.take().or_else(|| target.right.take());
        trace_log!("deleted key with at most one child");
        Some(target.key)
    }
}

/// Unlinks the smallest node of the subtree at `link`, splicing its right child into its place,
/// and returns its key.
fn remove_min<K>(mut link: &mut Link<K>) -> Option<K> {
    while link.as_deref()?.left.is_some() {
        link = &mut link.as_mut()?.left;
    }
    let mut min = link.take()?;
    *link = min.right.take();
    Some(min.key)
}

/// Drops a subtree one node at a time.
pub(crate) fn free<K>(link: Link<K>) {
    let mut stack: Vec<Box<Node<K>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<K: Clone> Clone for Tree<K> {
    /// Copies the exact shape of the tree, not just its keys.
    fn clone(&self) -> Self {
        let mut builder = Builder::new();
        for slot in self.preorder_with_sentinels() {
            match slot {
                Some(key) => builder.push_node(Box::new(Node {
                    key: key.clone(),
                    left: None,
                    right: None,
                })),
                None => builder.push_absent(),
            }
        }
        builder.take_tree().unwrap_or_default()
    }
}

/// Two trees are equal when they have the same shape and the same key at every position.
impl<K: PartialEq> PartialEq for Tree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.preorder_with_sentinels()
            .eq(other.preorder_with_sentinels())
    }
}

impl<K: Eq> Eq for Tree<K> {}

impl<K: fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder()).finish()
    }
}
