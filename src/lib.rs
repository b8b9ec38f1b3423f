//! This crate is a plain Binary Search Tree (BST) engine: insertion, search and deletion, the four
//! classic traversals, predecessor/successor queries, shape statistics and a token format that
//! reproduces a tree's exact shape.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree never rebalances, so its height
//! depends entirely on insertion order: inserting sorted keys produces a tree whose height is
//! its node count. That's the accepted worst case. All operations except
//! [`Tree::insert_recursive`] walk the tree with explicit stacks and queues so such trees don't
//! overflow the call stack.
//!
//! BSTs also naturally support sorted iteration by visiting the
//! left subtree, then the subtree root, then the right subtree.
//!
//! # Examples
//!
//! ```
//! use bst_engine::Tree;
//!
//! let mut tree = Tree::from_keys([50, 30, 70, 20, 40, 60, 80]).unwrap();
//!
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [20, 30, 40, 50, 60, 70, 80]);
//! assert_eq!((tree.height(), tree.count(), tree.leaf_count()), (3, 7, 4));
//! assert_eq!(tree.predecessor(&60), Some(&50));
//! assert_eq!(tree.successor(&60), Some(&70));
//!
//! tree.delete(&50);
//! assert_eq!(tree.root().map(|n| *n.key()), Some(60));
//!
//! let saved = tree.to_token_string();
//! let loaded: bst_engine::Tree<i32> = saved.parse().unwrap();
//! assert_eq!(loaded, tree);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events for mutations and for loading trees. Off by default.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod tracing_helpers;

pub mod codec;
mod error;
mod neighbor;
mod recursive;
mod stats;
pub mod traversal;
mod tree;

pub use codec::{TokenReader, TokenSink, TokenSource, TokenWriter, SENTINEL};
pub use error::{Result, TreeError};
pub use stats::TreeStats;
pub use tree::{Node, Tree};
