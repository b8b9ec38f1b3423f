//! Errors surfaced by the tree engine.
//!
//! Looking up, deleting or finding neighbors of a key that isn't in the tree is never an error.
//! Those operations return an `Option` instead. The only failures are running out of memory while
//! creating a node and reading a token stream that doesn't describe a valid tree.

use thiserror::Error;

/// Shorthand for results carrying a [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;

/// Everything that can go wrong while mutating or loading a [`Tree`][crate::Tree].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TreeError {
    /// The global allocator couldn't provide memory for a new node.
    #[error("failed to allocate a tree node")]
    AllocationFailure,

    /// The stream ended before the tree was complete.
    #[error("token stream ended before the tree was complete")]
    UnexpectedEndOfStream,

    /// A token was neither the sentinel nor a parseable key.
    #[error("invalid token `{token}`: expected `#` or a key")]
    InvalidToken {
        /// The offending token.
        token: String,
    },

    /// A key token would break the binary search ordering at its position (this includes
    /// duplicate keys).
    #[error("key `{token}` violates the search tree ordering at its position")]
    OrderViolation {
        /// The offending token.
        token: String,
    },

    /// A string held more than one tree's worth of tokens.
    #[error("unexpected trailing token `{token}` after a complete tree")]
    TrailingTokens {
        /// The first token after the complete tree.
        token: String,
    },

    /// Reading or writing the underlying stream failed.
    #[error("token stream I/O failed")]
    Io(#[from] std::io::Error),
}

impl TreeError {
    /// Returns `true` if the error came from a token stream that doesn't describe a valid tree.
    /// I/O failures and allocation failures are not malformed streams.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_engine::Tree;
    ///
    /// let err = Tree::<i32>::from_token_str("50 30 #").unwrap_err();
    /// assert!(err.is_malformed());
    /// ```
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEndOfStream
                | Self::InvalidToken { .. }
                | Self::OrderViolation { .. }
                | Self::TrailingTokens { .. }
        )
    }
}
