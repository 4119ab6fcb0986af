/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A compare-and-swap façade over [`arc_swap::ArcSwap`] for applying pure
//! transformations to a shared immutable instance without a mutex.
//!
//! `update` and the derived helpers below are the only place in this crate
//! that retries automatically — and only on CAS contention, never on a
//! user-facing fault. A transformer that panics unwinds out of the loop
//! untouched; the cell is left at its last successfully installed value.

use crate::error::{Error, Result};
use crate::map::HashMap;
use crate::queue::LinkedQueue;
use crate::stack::LinkedStack;
use arc_swap::ArcSwap;
use archery::SharedPointerKind;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// Applies `transformer` to the value behind `cell`, retrying under
/// contention. Returns `true` if a new value was installed, `false` if
/// `transformer` returned a value pointer-identical to its input — no store
/// occurred, and no ordering is established against other cell operations.
///
/// `transformer` may run more than once per call; it must not assume
/// idempotence or cache intermediate results.
pub fn update<T, F>(cell: &ArcSwap<T>, mut transformer: F) -> bool
where
    F: FnMut(&Arc<T>) -> Arc<T>,
{
    loop {
        let old = cell.load_full();
        let new = transformer(&old);
        if Arc::ptr_eq(&old, &new) {
            return false;
        }
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return true;
        }
    }
}

/// Returns the value already stored under `key`, or inserts `factory()`'s
/// output and returns that. `factory` is invoked at most once per unique
/// key across all contending attempts: membership is checked before the
/// factory runs inside the loop, never memoised afterward.
pub fn get_or_add<K, V, P, H, F>(cell: &ArcSwap<HashMap<K, V, P, H>>, key: K, factory: F) -> V
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
    F: Fn() -> V,
{
    loop {
        let old = cell.load_full();
        if let Some(existing) = old.get(&key) {
            return existing.clone();
        }
        let value = factory();
        let new = Arc::new(old.put(key.clone(), value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return value;
        }
    }
}

/// Applies `add_value` if `key` is absent, `update_factory` if present;
/// returns the value now stored.
pub fn add_or_update<K, V, P, H>(
    cell: &ArcSwap<HashMap<K, V, P, H>>,
    key: K,
    add_value: impl Fn() -> V,
    update_factory: impl Fn(&V) -> V,
) -> V
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    loop {
        let old = cell.load_full();
        let value = match old.get(&key) {
            Some(existing) => update_factory(existing),
            None => add_value(),
        };
        let new = Arc::new(old.put(key.clone(), value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return value;
        }
    }
}

/// Inserts `(key, value)` if `key` is absent; returns `true` if it was
/// inserted.
pub fn try_add<K, V, P, H>(cell: &ArcSwap<HashMap<K, V, P, H>>, key: K, value: V) -> bool
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    loop {
        let old = cell.load_full();
        if old.contains_key(&key) {
            return false;
        }
        let new = Arc::new(old.put(key.clone(), value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return true;
        }
    }
}

/// Replaces the value stored under `key` with `new_value`, but only if it
/// currently equals `expected_old_value`. Returns `true` on success.
pub fn try_update<K, V, P, H>(
    cell: &ArcSwap<HashMap<K, V, P, H>>,
    key: K,
    expected_old_value: V,
    new_value: V,
) -> bool
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    loop {
        let old = cell.load_full();
        if old.get(&key) != Some(&expected_old_value) {
            return false;
        }
        let new = Arc::new(old.put(key.clone(), new_value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return true;
        }
    }
}

/// Removes `key` if present. Returns `true` if it was removed.
pub fn try_remove<K, V, P, H>(cell: &ArcSwap<HashMap<K, V, P, H>>, key: K) -> bool
where
    K: Eq + Hash + Clone,
    V: Clone,
    P: SharedPointerKind,
    H: BuildHasher + Clone,
{
    loop {
        let old = cell.load_full();
        if !old.contains_key(&key) {
            return false;
        }
        let new = Arc::new(old.remove(&key));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return true;
        }
    }
}

/// Pushes `value` onto the stack behind `cell`.
pub fn push<T, P>(cell: &ArcSwap<LinkedStack<T, P>>, value: T)
where
    T: Clone,
    P: SharedPointerKind,
{
    loop {
        let old = cell.load_full();
        let new = Arc::new(old.push(value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return;
        }
    }
}

/// Pops the stack behind `cell`. Fails with [`Error::Empty`] if it was
/// empty at the moment of the successful CAS.
pub fn try_pop<T, P>(cell: &ArcSwap<LinkedStack<T, P>>) -> Result<T>
where
    T: Clone,
    P: SharedPointerKind,
{
    loop {
        let old = cell.load_full();
        let head = old.peek().map(|v| v.clone()).map_err(|_| Error::Empty)?;
        let new = Arc::new(old.pop().expect("peek succeeded so pop must too"));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return Ok(head);
        }
    }
}

/// Enqueues `value` onto the queue behind `cell`.
pub fn add<T, P>(cell: &ArcSwap<LinkedQueue<T, P>>, value: T)
where
    T: Clone,
    P: SharedPointerKind,
{
    loop {
        let old = cell.load_full();
        let new = Arc::new(old.add(value.clone()));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return;
        }
    }
}

/// Dequeues the queue behind `cell`. Fails with [`Error::Empty`] if it was
/// empty at the moment of the successful CAS.
pub fn try_poll<T, P>(cell: &ArcSwap<LinkedQueue<T, P>>) -> Result<T>
where
    T: Clone,
    P: SharedPointerKind,
{
    loop {
        let old = cell.load_full();
        let head = old.peek().map(|v| v.clone()).map_err(|_| Error::Empty)?;
        let new = Arc::new(old.poll().expect("peek succeeded so poll must too"));
        let previous = cell.compare_and_swap(&old, new);
        if Arc::ptr_eq(&old, &previous) {
            return Ok(head);
        }
    }
}

#[cfg(test)]
mod test;
