/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Persistent, immutable, thread-shareable collections.
//!
//! Every container here hands back a new version of itself on mutation and
//! leaves the receiver untouched, sharing whatever structure didn't change
//! with the new version via [`archery::SharedPointer`]. Pick [`archery::RcK`]
//! (the default) for single-threaded use or [`archery::ArcK`] — via the
//! `*Sync` type aliases — to freely share instances across threads.
//!
//! - [`list::TreeList`] — an AVL-balanced indexable sequence.
//! - [`set::tree_set::TreeSet`] — an AVL-balanced ordered set.
//! - [`map::HashMap`] / [`set::HashSet`] — a hash-keyed AVL tree with
//!   per-hash-bucket collision handling.
//! - [`vector::ArrayList`] — a dense, fixed-length snapshot with a mutable
//!   [`vector::Builder`].
//! - [`stack::LinkedStack`] / [`queue::LinkedQueue`] — cons-list-based LIFO
//!   and FIFO sequences.
//! - [`atomic_update`] — a lock-free compare-and-swap façade for applying
//!   pure transformations to a shared immutable instance.

extern crate alloc;

mod avl;
mod hash_bucket;
mod utils;

pub mod atomic_update;
pub mod error;
pub mod list;
pub mod map;
pub mod queue;
pub mod set;
pub mod stack;
pub mod vector;

pub use error::{Error, Result};
pub use list::{TreeList, TreeListSync};
pub use map::{HashMap, HashMapSync};
pub use queue::{LinkedQueue, LinkedQueueSync};
pub use set::{HashSet, HashSetSync, TreeSet, TreeSetSync};
pub use stack::{LinkedStack, LinkedStackSync};
pub use vector::{ArrayList, ArrayListSync};

pub use archery::{ArcK, RcK, SharedPointerKind};
