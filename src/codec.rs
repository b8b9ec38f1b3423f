//! The structural token codec.
//!
//! A tree is written in preorder. Every present node contributes its key, and every absent child
//! contributes the sentinel `#`:
//!
//! ```text
//! tree := node
//! node := "#" | KEY node node
//! ```
//!
//! Tokens are separated by arbitrary whitespace. Because every absent position is recorded, reading
//! the tokens back reproduces the exact shape of the tree and not just its keys. An empty tree is
//! the single token `#`.
//!
//! The codec doesn't know about files. It reads from a [`TokenSource`] and writes to a
//! [`TokenSink`]. [`TokenReader`] and [`TokenWriter`] adapt any `BufRead`/`Write`.
//!
//! # Examples
//!
//! ```
//! use bst_engine::Tree;
//!
//! let tree = Tree::from_keys([50, 30, 70]).unwrap();
//! let tokens = tree.to_token_string();
//! assert_eq!(tokens, "50 30 # # 70 # #");
//!
//! let copy: Tree<i32> = tokens.parse().unwrap();
//! assert_eq!(copy, tree);
//! ```

use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::{FromStr, SplitWhitespace};

use crate::error::{Result, TreeError};
use crate::tracing_helpers::{debug_log, warn_log};
use crate::tree::{free, Link, Node, Tree};

/// The token marking an absent child.
pub const SENTINEL: &str = "#";

/// Something tokens can be read from, one at a time.
pub trait TokenSource {
    /// Returns the next token, or `None` at the end of the stream.
    fn next_token(&mut self) -> Result<Option<String>>;
}

/// Something tokens can be written to, one at a time.
pub trait TokenSink {
    /// Appends `token` to the stream.
    fn write_token(&mut self, token: &str) -> Result<()>;
}

impl TokenSource for SplitWhitespace<'_> {
    fn next_token(&mut self) -> Result<Option<String>> {
        Ok(self.next().map(str::to_owned))
    }
}

impl TokenSink for Vec<String> {
    fn write_token(&mut self, token: &str) -> Result<()> {
        self.push(token.to_owned());
        Ok(())
    }
}

/// Tokens are joined by single spaces.
impl TokenSink for String {
    fn write_token(&mut self, token: &str) -> Result<()> {
        if !self.is_empty() {
            self.push(' ');
        }
        self.push_str(token);
        Ok(())
    }
}

/// Reads whitespace-separated tokens from a [`BufRead`].
///
/// Bytes after a returned token are left in the reader, so several trees can be read back to back
/// from the same stream.
#[derive(Debug)]
pub struct TokenReader<R> {
    inner: R,
}

impl<R: BufRead> TokenReader<R> {
    /// Wraps `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwraps the reader. Anything after the last token read is still in it.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> TokenSource for TokenReader<R> {
    fn next_token(&mut self) -> Result<Option<String>> {
        let mut token = Vec::new();
        loop {
            let buf = match self.inner.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            if buf.is_empty() {
                break;
            }

            let mut used = 0;
            let mut complete = false;
            for &byte in buf {
                if byte.is_ascii_whitespace() {
                    if token.is_empty() {
                        used += 1;
                        continue;
                    }
                    complete = true;
                    break;
                }
                token.push(byte);
                used += 1;
            }
            self.inner.consume(used);
            if complete {
                break;
            }
        }

        if token.is_empty() {
            return Ok(None);
        }
        match String::from_utf8(token) {
            Ok(token) => Ok(Some(token)),
            Err(err) => Err(TreeError::InvalidToken {
                token: String::from_utf8_lossy(err.as_bytes()).into_owned(),
            }),
        }
    }
}

/// Writes each token to a [`Write`] followed by a single space.
#[derive(Debug)]
pub struct TokenWriter<W: Write> {
    inner: W,
}

impl<W: Write> TokenWriter<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Unwraps the writer without flushing it.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TokenSink for TokenWriter<W> {
    fn write_token(&mut self, token: &str) -> Result<()> {
        self.inner.write_all(token.as_bytes())?;
        self.inner.write_all(b" ")?;
        Ok(())
    }
}

impl<K: fmt::Display> Tree<K> {
    /// Writes the tree to `sink` in preorder with a [`SENTINEL`] for every absent child.
    ///
    /// # Errors
    ///
    /// Whatever error `sink` reports. Writing stops at the first failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let tree = Tree::from_keys([2, 1, 3]).unwrap();
    /// let mut tokens = Vec::new();
    /// tree.serialize(&mut tokens).unwrap();
    ///
    /// assert_eq!(tokens, ["2", "1", "#", "#", "3", "#", "#"]);
    /// ```
    pub fn serialize<S>(&self, sink: &mut S) -> Result<()>
    where
        S: TokenSink + ?Sized,
    {
        for slot in self.preorder_with_sentinels() {
            match slot {
                Some(key) => sink.write_token(&key.to_string())?,
                None => sink.write_token(SENTINEL)?,
            }
        }
        Ok(())
    }

    /// The serialized tree as a single string with tokens separated by single spaces.
    pub fn to_token_string(&self) -> String {
        self.to_string()
    }
}

/// Formats the tree in its serialized token form.
impl<K: fmt::Display> fmt::Display for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.preorder_with_sentinels().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match slot {
                Some(key) => write!(f, "{}", key)?,
                None => f.write_str(SENTINEL)?,
            }
        }
        Ok(())
    }
}

impl<K: Ord + FromStr> Tree<K> {
    /// Reads exactly one tree from `source`. Tokens after the tree are left unread.
    ///
    /// # Errors
    ///
    /// - [`TreeError::UnexpectedEndOfStream`] if the stream ends before the tree is complete.
    /// - [`TreeError::InvalidToken`] for a token that is neither `#` nor a key.
    /// - [`TreeError::OrderViolation`] for a key that would break the search ordering.
    /// - Anything `source` itself reports, and [`TreeError::AllocationFailure`].
    ///
    /// Nothing built before the error is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut tokens = "2 1 # # 3 # # 9 # #".split_whitespace();
    /// let tree: Tree<i32> = Tree::deserialize(&mut tokens).unwrap();
    ///
    /// assert_eq!(tree.count(), 3);
    /// // The second tree is still there.
    /// assert_eq!(tokens.next(), Some("9"));
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", skip_all)
    )]
    pub fn deserialize<S>(source: &mut S) -> Result<Self>
    where
        S: TokenSource + ?Sized,
    {
        let mut builder = Builder::new();
        while !builder.is_complete() {
            let token = source
                .next_token()?
                .ok_or(TreeError::UnexpectedEndOfStream)?;
            if token == SENTINEL {
                builder.push_absent();
                continue;
            }

            let key = match token.parse::<K>() {
                Ok(key) => key,
                Err(_) => {
                    warn_log!(token = %token, "rejected token that is neither a key nor `#`");
                    return Err(TreeError::InvalidToken { token });
                }
            };
            if !builder.admits(&key) {
                warn_log!(token = %token, "rejected key outside its ordering bounds");
                return Err(TreeError::OrderViolation { token });
            }
            builder.push_node(Node::try_boxed(key)?);
        }

        let tree = builder.take_tree().unwrap_or_default();
        debug_log!(nodes = tree.count(), "deserialized tree");
        Ok(tree)
    }

    /// Replaces this tree with one read from `source`. The replacement only happens once the whole
    /// tree has been read: on error this tree is left exactly as it was.
    ///
    /// # Errors
    ///
    /// See [`Tree::deserialize`].
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let mut tree = Tree::from_keys([1, 2, 3]).unwrap();
    ///
    /// // Truncated stream - nothing changes.
    /// assert!(tree.load(&mut "5 4 #".split_whitespace()).is_err());
    /// assert_eq!(tree.count(), 3);
    ///
    /// tree.load(&mut "5 4 # # #".split_whitespace()).unwrap();
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [4, 5]);
    /// ```
    pub fn load<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: TokenSource + ?Sized,
    {
        *self = Self::deserialize(source)?;
        Ok(())
    }

    /// Parses a string holding exactly one serialized tree.
    ///
    /// # Errors
    ///
    /// As [`Tree::deserialize`], plus [`TreeError::TrailingTokens`] if anything follows the tree.
    pub fn from_token_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let tree = Self::deserialize(&mut tokens)?;
        match tokens.next() {
            Some(extra) => Err(TreeError::TrailingTokens {
                token: extra.to_owned(),
            }),
            None => Ok(tree),
        }
    }
}

impl<K: Ord + FromStr> FromStr for Tree<K> {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_token_str(s)
    }
}

/// A node waiting for one or both of its subtrees.
struct Pending<K> {
    node: Box<Node<K>>,
    /// Whether the left subtree has been attached, i.e. the next subtree is the right one.
    left_done: bool,
    /// Stack index of the ancestor whose key bounds this node from below.
    lower: Option<usize>,
    /// Stack index of the ancestor whose key bounds this node from above.
    upper: Option<usize>,
}

/// Assembles a tree from its preorder-with-sentinels sequence without recursion.
///
/// The stack always holds the path from the root down to the parent of the next position, so
/// ordering bounds can refer to ancestors by stack index.
pub(crate) struct Builder<K> {
    pending: Vec<Pending<K>>,
    root: Link<K>,
    complete: bool,
}

impl<K> Drop for Builder<K> {
    fn drop(&mut self) {
        for pending in self.pending.drain(..) {
            free(Some(pending.node));
        }
        free(self.root.take());
    }
}

impl<K> Builder<K> {
    pub(crate) fn new() -> Self {
        Self {
            pending: Vec::new(),
            root: None,
            complete: false,
        }
    }

    /// Whether a whole tree has been read.
    pub(crate) fn is_complete(&self) -> bool {
        self.complete
    }

    /// Bounds for the next position, as stack indices.
    fn next_bounds(&self) -> (Option<usize>, Option<usize>) {
        match self.pending.last() {
            None => (None, None),
            Some(parent) if parent.left_done => (Some(self.pending.len() - 1), parent.upper),
            Some(parent) => (parent.lower, Some(self.pending.len() - 1)),
        }
    }

    /// Places `node` at the next position. Its children come next.
    pub(crate) fn push_node(&mut self, node: Box<Node<K>>) {
        if self.complete {
            return;
        }
        let (lower, upper) = self.next_bounds();
        self.pending.push(Pending {
            node,
            left_done: false,
            lower,
            upper,
        });
    }

    /// Marks the next position as absent.
    pub(crate) fn push_absent(&mut self) {
        if !self.complete {
            self.attach(None);
        }
    }

    /// Hangs a finished subtree at the next position, completing every ancestor whose right
    /// subtree that was.
    fn attach(&mut self, mut finished: Link<K>) {
        loop {
            let Some(parent) = self.pending.last_mut() else {
                self.root = finished;
                self.complete = true;
                return;
            };
            if !parent.left_done {
                parent.node.left = finished;
                parent.left_done = true;
                return;
            }

            let Some(mut parent) = self.pending.pop() else {
                return;
            };
            parent.node.right = finished;
            finished = Some(parent.node);
        }
    }

    /// The finished tree, once [`Builder::is_complete`].
    pub(crate) fn take_tree(&mut self) -> Option<Tree<K>> {
        if !self.complete {
            return None;
        }
        Some(Tree {
            root: self.root.take(),
        })
    }
}

impl<K: Ord> Builder<K> {
    /// Whether `key` fits strictly between the bounds of the next position.
    pub(crate) fn admits(&self, key: &K) -> bool {
        let (lower, upper) = self.next_bounds();
        let above_lower = lower.map_or(true, |i| self.pending[i].node.key < *key);
        let below_upper = upper.map_or(true, |i| *key < self.pending[i].node.key);
        above_lower && below_upper
    }
}
