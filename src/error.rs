/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Error kinds surfaced by the fallible operations of every container. The
//! library never overloads a single error channel: each kind below
//! fires for exactly one family of precondition violation, and the only
//! automatic retry anywhere in the crate is the CAS loop in
//! [`crate::atomic_update`], which never retries on a user-facing fault.

use thiserror::Error;

/// The error type returned by every fallible operation in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An indexed accessor or bounded operation was given an index outside
    /// `[0, len]` (inclusive upper bound for insertion points) or `[0, len)`
    /// (exclusive upper bound for reads).
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A map `add` found the key already present with an unequal value, or a
    /// comparator/hasher replacement would merge two keys that disagree on
    /// their value.
    #[error("key already present with a different value")]
    KeyConflict,

    /// `replace(old, new)` was called on a sequence that does not contain
    /// `old`.
    #[error("value to replace was not found")]
    NotFound,

    /// `peek`/`pop` was called on an empty stack, or `peek`/`poll` on an
    /// empty queue.
    #[error("operation is not valid on an empty collection")]
    Empty,

    /// A required argument was absent where the API documents it as
    /// mandatory. Rust's type system rejects most such cases at compile
    /// time; this variant exists for the rare `Option`-typed convenience
    /// entry point that still needs a runtime check.
    #[error("required argument `{argument}` was not provided")]
    NullArgument { argument: &'static str },

    /// `Builder::move_to_immutable` was called while `length != capacity`.
    #[error("invalid builder state: {message}")]
    InvalidState { message: &'static str },

    /// A builder-derived iterator observed a mutation to the builder after
    /// the iterator was created. Detecting this is optional; when a
    /// container does detect it, it reports this kind.
    #[error("builder was mutated while an iterator over it was live")]
    ConcurrentModification,
}

pub type Result<T> = core::result::Result<T, Error>;
