/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent dense-array sequence. Unlike [`crate::list::TreeList`],
//! every mutation allocates a fresh buffer of the exact new length and
//! copies into it — the right trade when callers want cache-friendly
//! iteration and indexing over an AVL's `O(log n)` descent, at the cost of
//! `O(n)` writes.

use crate::error::{Error, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use std::cmp::Ordering;

/// An immutable, fixed-length, dense sequence.
#[derive(Debug)]
pub struct ArrayList<T, P = RcK>
where
    P: SharedPointerKind,
{
    data: SharedPointer<Vec<T>, P>,
}

pub type ArrayListSync<T> = ArrayList<T, ArcK>;

/// Returns the buffer shared by every empty `ArrayList<T, P>` built on this
/// thread. One slot per `(T, P)` monomorphization — `thread_local!` rather
/// than a process-wide static, since `SharedPointer<Vec<T>, RcK>` isn't
/// `Sync`.
fn empty_data<T, P>() -> SharedPointer<Vec<T>, P>
where
    T: 'static,
    P: SharedPointerKind + 'static,
{
    use std::any::{Any, TypeId};
    use std::cell::RefCell;
    use std::collections::HashMap as StdHashMap;

    thread_local! {
        static CACHE: RefCell<StdHashMap<TypeId, Box<dyn Any>>> = RefCell::new(StdHashMap::new());
    }
    CACHE.with(|cache| {
        cache
            .borrow_mut()
            .entry(TypeId::of::<(T, P)>())
            .or_insert_with(|| Box::new(SharedPointer::<Vec<T>, P>::new(Vec::new())))
            .downcast_ref::<SharedPointer<Vec<T>, P>>()
            .expect("cached empty buffer has the expected type")
            .clone()
    })
}

impl<T, P> ArrayList<T, P>
where
    P: SharedPointerKind,
{
    /// Builds an empty list. Every call on the same thread for the same
    /// `(T, P)` returns a list backed by the same buffer — `ArrayList::new()
    /// == ArrayList::new()` holds by reference equality, not just by value.
    #[must_use]
    pub fn new() -> Self
    where
        T: 'static,
        P: 'static,
    {
        ArrayList { data: empty_data::<T, P>() }
    }

    /// Returns `other` unchanged. The Rust counterpart of `createAll` over
    /// an input that is already an `ArrayList`: no copy, same buffer.
    #[must_use]
    pub fn create_all(other: &Self) -> Self {
        other.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.data.get(index).ok_or(Error::OutOfBounds { index, len: self.len() })
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.data.iter().any(|v| v == value)
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().position(|v| v == value)
    }

    #[must_use]
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.data.iter().rposition(|v| v == value)
    }

    pub fn binary_search_by<F>(&self, f: F) -> std::result::Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.data.binary_search_by(f)
    }

    #[must_use]
    pub fn add(&self, value: T) -> Self
    where
        T: Clone,
    {
        let mut buffer = (*self.data).clone();
        buffer.push(value);
        ArrayList { data: SharedPointer::new(buffer) }
    }

    /// Identity-preserving: appending nothing returns the receiver
    /// unchanged.
    #[must_use]
    pub fn add_all<I: IntoIterator<Item = T>>(&self, values: I) -> Self
    where
        T: Clone,
    {
        let mut iter = values.into_iter().peekable();
        if iter.peek().is_none() {
            return self.clone();
        }
        let mut buffer = (*self.data).clone();
        buffer.extend(iter);
        ArrayList { data: SharedPointer::new(buffer) }
    }

    pub fn insert(&self, index: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        if index > self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        let mut buffer = (*self.data).clone();
        buffer.insert(index, value);
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }

    pub fn insert_all<I: IntoIterator<Item = T>>(&self, index: usize, values: I) -> Result<Self>
    where
        T: Clone,
    {
        if index > self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        let mut iter = values.into_iter().peekable();
        if iter.peek().is_none() {
            return Ok(self.clone());
        }
        let mut buffer = (*self.data).clone();
        let tail = buffer.split_off(index);
        buffer.extend(iter);
        buffer.extend(tail);
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }

    pub fn set(&self, index: usize, value: T) -> Result<Self>
    where
        T: Clone,
    {
        if index >= self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        let mut buffer = (*self.data).clone();
        buffer[index] = value;
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }

    pub fn remove(&self, index: usize) -> Result<Self>
    where
        T: Clone,
    {
        if index >= self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        let mut buffer = (*self.data).clone();
        buffer.remove(index);
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }

    #[must_use]
    pub fn remove_if<F: Fn(&T) -> bool>(&self, predicate: F) -> Self
    where
        T: Clone,
    {
        let buffer: Vec<T> = self.data.iter().filter(|v| !predicate(v)).cloned().collect();
        if buffer.len() == self.len() {
            return self.clone();
        }
        ArrayList { data: SharedPointer::new(buffer) }
    }

    pub fn remove_all(&self, from: usize, to: usize) -> Result<Self>
    where
        T: Clone,
    {
        if from > to || to > self.len() {
            return Err(Error::OutOfBounds { index: to, len: self.len() });
        }
        if from == to {
            return Ok(self.clone());
        }
        let mut buffer = (*self.data).clone();
        buffer.drain(from..to);
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }

    /// Replaces the first occurrence of `old` with `new`.
    pub fn replace(&self, old: &T, new: T) -> Result<Self>
    where
        T: Clone + PartialEq,
    {
        let index = self.index_of(old).ok_or(Error::NotFound)?;
        self.set(index, new)
    }

    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        if self.len() <= 1 {
            return self.clone();
        }
        let mut buffer = (*self.data).clone();
        buffer.reverse();
        ArrayList { data: SharedPointer::new(buffer) }
    }

    /// Identity-preserving: an already-sorted buffer is returned unchanged.
    #[must_use]
    pub fn sort_by<F: Fn(&T, &T) -> Ordering>(&self, cmp: F) -> Self
    where
        T: Clone,
    {
        let already_sorted = self.data.windows(2).all(|w| cmp(&w[0], &w[1]) != Ordering::Greater);
        if already_sorted {
            return self.clone();
        }
        let mut buffer = (*self.data).clone();
        buffer.sort_by(cmp);
        ArrayList { data: SharedPointer::new(buffer) }
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    #[must_use]
    pub fn to_builder(&self) -> Builder<T>
    where
        T: Clone,
    {
        Builder { buffer: (*self.data).clone() }
    }
}

impl<T, P> Clone for ArrayList<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        ArrayList { data: self.data.clone() }
    }
}

impl<T, P> Default for ArrayList<T, P>
where
    T: 'static,
    P: SharedPointerKind + 'static,
{
    fn default() -> Self {
        ArrayList::new()
    }
}

/// Two `ArrayList`s are equal only if they share the same underlying
/// buffer, not merely equal elements — reference equality, not structural
/// equality, matching the builder's `to_immutable`/`move_to_immutable`
/// contract that a snapshot is a specific buffer, not a value class.
impl<T, P> PartialEq for ArrayList<T, P>
where
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        SharedPointer::ptr_eq(&self.data, &other.data)
    }
}

impl<T, P> Eq for ArrayList<T, P> where P: SharedPointerKind {}

impl<T, P> std::ops::Index<usize> for ArrayList<T, P>
where
    P: SharedPointerKind,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T, P> FromIterator<T> for ArrayList<T, P>
where
    T: 'static,
    P: SharedPointerKind + 'static,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        let buffer: Vec<T> = into_iter.into_iter().collect();
        if buffer.is_empty() {
            ArrayList::new()
        } else {
            ArrayList { data: SharedPointer::new(buffer) }
        }
    }
}

impl<T, P> From<Vec<T>> for ArrayList<T, P>
where
    T: 'static,
    P: SharedPointerKind + 'static,
{
    fn from(buffer: Vec<T>) -> Self {
        if buffer.is_empty() {
            ArrayList::new()
        } else {
            ArrayList { data: SharedPointer::new(buffer) }
        }
    }
}

impl<'a, T, P> IntoIterator for &'a ArrayList<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A mutable dense buffer that bridges to an [`ArrayList`] snapshot. Mirrors
/// `std::vec::Vec`'s own length/capacity split; `set_capacity` is
/// best-effort since `Vec` does not guarantee an exact allocation size.
pub struct Builder<T> {
    buffer: Vec<T>,
}

impl<T> Builder<T> {
    #[must_use]
    pub fn new() -> Self {
        Builder { buffer: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Builder { buffer: Vec::with_capacity(capacity) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.buffer.get(index).ok_or(Error::OutOfBounds { index, len: self.len() })
    }

    pub fn push(&mut self, value: T) {
        self.buffer.push(value);
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.buffer.extend(values);
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        self.buffer.insert(index, value);
        Ok(())
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        self.buffer[index] = value;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(Error::OutOfBounds { index, len: self.len() });
        }
        Ok(self.buffer.remove(index))
    }

    pub fn resize(&mut self, new_len: usize, fill: T)
    where
        T: Clone,
    {
        self.buffer.resize(new_len, fill);
    }

    /// `capacity` must be at least the current length.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len() {
            return Err(Error::InvalidState { message: "capacity must be at least the current length" });
        }
        if capacity > self.buffer.capacity() {
            self.buffer.reserve_exact(capacity - self.buffer.capacity());
        } else {
            self.buffer.shrink_to(capacity);
        }
        Ok(())
    }

    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, cmp: F) {
        self.buffer.sort_by(cmp);
    }

    pub fn reverse(&mut self) {
        self.buffer.reverse();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.buffer.iter()
    }

    /// If `length == capacity`, moves the buffer into the new `ArrayList`
    /// without copying and resets the builder to empty. Otherwise copies the
    /// live elements into an exactly-sized buffer and leaves the builder
    /// untouched.
    pub fn to_immutable<P: SharedPointerKind>(&mut self) -> ArrayList<T, P>
    where
        T: Clone,
    {
        if self.buffer.len() == self.buffer.capacity() {
            let buffer = std::mem::take(&mut self.buffer);
            ArrayList { data: SharedPointer::new(buffer) }
        } else {
            ArrayList { data: SharedPointer::new(self.buffer.clone()) }
        }
    }

    /// Succeeds only when `length == capacity`; transfers the buffer without
    /// copying and empties the builder.
    pub fn move_to_immutable<P: SharedPointerKind>(&mut self) -> Result<ArrayList<T, P>> {
        if self.buffer.len() != self.buffer.capacity() {
            return Err(Error::InvalidState { message: "length must equal capacity to move without copying" });
        }
        let buffer = std::mem::take(&mut self.buffer);
        Ok(ArrayList { data: SharedPointer::new(buffer) })
    }
}

impl<T> Default for Builder<T> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<T> FromIterator<T> for Builder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        Builder { buffer: into_iter.into_iter().collect() }
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P> Serialize for ArrayList<T, P>
    where
        T: Serialize,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, P> Deserialize<'de> for ArrayList<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            deserializer.deserialize_seq(ArrayListVisitor { _phantom: PhantomData })
        }
    }

    struct ArrayListVisitor<T, P> {
        _phantom: PhantomData<(T, P)>,
    }

    impl<'de, T, P> Visitor<'de> for ArrayListVisitor<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        type Value = ArrayList<T, P>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<ArrayList<T, P>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut buffer = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element()? {
                buffer.push(value);
            }
            Ok(ArrayList { data: SharedPointer::new(buffer) })
        }
    }
}

#[cfg(test)]
mod test;
