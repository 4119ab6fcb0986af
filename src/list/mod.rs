/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent sequence backed by an AVL tree ordered by insertion index
//! rather than by key, indexed via the subtree `size` augmentation carried
//! on every [`crate::avl::Node`].

use crate::avl::{self, Link};
use crate::error::{Error, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::cmp::Ordering;

/// A persistent, indexable sequence. Every mutating operation returns a new
/// `TreeList` in `O(log n)`, sharing every subtree untouched by the change
/// with the receiver.
///
/// # Complexity
///
/// | Operation | Complexity |
/// |---|---|
/// | `get`, `set`, `insert`, `remove` | `O(log n)` |
/// | `add_all`/`insert_all` of another `TreeList` | `O(log n + log m)` |
/// | `sort`, `reverse` of a range of size `m` | `O(m + log n)` |
#[derive(Debug)]
pub struct TreeList<T, P = RcK>
where
    P: SharedPointerKind,
{
    root: Link<T, P>,
}

pub type TreeListSync<T> = TreeList<T, ArcK>;

impl<T, P> TreeList<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> Self {
        TreeList { root: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        avl::size_of(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        get_at(&self.root, index).map(|ptr| &**ptr).ok_or(Error::OutOfBounds { index, len: self.len() })
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        let len = self.len();
        if len == 0 {
            None
        } else {
            self.get(len - 1).ok()
        }
    }

    #[must_use]
    pub fn add(&self, value: T) -> Self {
        let len = self.len();
        TreeList { root: insert_at(self.root.clone(), len, SharedPointer::new(value)) }
    }

    pub fn insert(&self, index: usize, value: T) -> Result<Self> {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfBounds { index, len });
        }
        Ok(TreeList { root: insert_at(self.root.clone(), index, SharedPointer::new(value)) })
    }

    #[must_use]
    pub fn add_all<I: IntoIterator<Item = T>>(&self, iter: I) -> Self {
        let mut root = self.root.clone();
        let mut len = self.len();
        for value in iter {
            root = insert_at(root, len, SharedPointer::new(value));
            len += 1;
        }
        TreeList { root }
    }

    pub fn add_all_at<I: IntoIterator<Item = T>>(&self, index: usize, iter: I) -> Result<Self> {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfBounds { index, len });
        }
        let mut root = self.root.clone();
        let mut at = index;
        for value in iter {
            root = insert_at(root, at, SharedPointer::new(value));
            at += 1;
        }
        Ok(TreeList { root })
    }

    /// Splices `other` onto the end of `self` in `O(log n + log m)` via the
    /// AVL join algorithm, rather than re-inserting element by element.
    /// Returns `self` reference-identical when `other` is empty.
    #[must_use]
    pub fn append(&self, other: &Self) -> Self {
        if other.is_empty() {
            return TreeList { root: self.root.clone() };
        }
        if self.is_empty() {
            return TreeList { root: other.root.clone() };
        }

        let (min_value, rest) = avl::remove_min(other.root.clone());
        TreeList { root: avl::join(self.root.clone(), min_value, rest) }
    }

    pub fn set(&self, index: usize, value: T) -> Result<Self> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfBounds { index, len });
        }
        Ok(TreeList { root: set_at(self.root.clone(), index, SharedPointer::new(value)) })
    }

    pub fn remove(&self, index: usize) -> Result<Self> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfBounds { index, len });
        }
        Ok(TreeList { root: remove_at(self.root.clone(), index) })
    }

    pub fn remove_all(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::OutOfBounds { index: to, len });
        }
        if from == to {
            return Ok(TreeList { root: self.root.clone() });
        }

        let (prefix, rest) = split_at(self.root.clone(), from);
        let (_, suffix) = split_at(rest, to - from);
        Ok(TreeList { root: avl::concat(prefix, suffix) })
    }

    #[must_use]
    pub fn remove_if<F: Fn(&T) -> bool>(&self, pred: F) -> Self
    where
        T: Clone,
    {
        let mut root = None;
        let mut len = 0usize;
        for value in self.iter() {
            if !pred(value) {
                root = insert_at(root, len, SharedPointer::new(value.clone()));
                len += 1;
            }
        }
        TreeList { root }
    }

    pub fn index_of<F: Fn(&T, &T) -> bool>(
        &self,
        value: &T,
        from: usize,
        to: usize,
        eq: F,
    ) -> Result<Option<usize>> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::OutOfBounds { index: to, len });
        }
        for i in from..to {
            if eq(self.get(i).expect("index within validated range"), value) {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    pub fn last_index_of<F: Fn(&T, &T) -> bool>(
        &self,
        value: &T,
        from: usize,
        to: usize,
        eq: F,
    ) -> Result<Option<usize>> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::OutOfBounds { index: to, len });
        }
        for i in (from..to).rev() {
            if eq(self.get(i).expect("index within validated range"), value) {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Stably sorts `[from, to)` with `cmp`, rebuilding a perfect AVL
    /// subtree from the sorted range in `O(m)` and splicing it back in
    /// `O(log n)`. Returns `self` reference-identical if the range was
    /// already in sorted order.
    pub fn sort<F: Fn(&T, &T) -> Ordering>(&self, from: usize, to: usize, cmp: F) -> Result<Self> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::OutOfBounds { index: to, len });
        }

        let (prefix, middle, suffix) = extract_range(self.root.clone(), from, to);
        let mut values: Vec<SharedPointer<T, P>> = avl::IterPtr::new(&middle).cloned().collect();
        let original = values.clone();
        values.sort_by(|a, b| cmp(a, b));

        if values.iter().zip(original.iter()).all(|(a, b)| SharedPointer::ptr_eq(a, b)) {
            return Ok(TreeList { root: self.root.clone() });
        }

        let new_middle = avl::from_sorted_slice(&values);
        Ok(TreeList { root: avl::concat(avl::concat(prefix, new_middle), suffix) })
    }

    pub fn reverse(&self, from: usize, to: usize) -> Result<Self> {
        let len = self.len();
        if from > to || to > len {
            return Err(Error::OutOfBounds { index: to, len });
        }
        if to - from <= 1 {
            return Ok(TreeList { root: self.root.clone() });
        }

        let (prefix, middle, suffix) = extract_range(self.root.clone(), from, to);
        let mut values: Vec<SharedPointer<T, P>> = avl::IterPtr::new(&middle).cloned().collect();
        values.reverse();
        let new_middle = avl::from_sorted_slice(&values);
        Ok(TreeList { root: avl::concat(avl::concat(prefix, new_middle), suffix) })
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { inner: avl::IterPtr::new(&self.root) }
    }

    #[must_use]
    pub fn to_builder(&self) -> Builder<T, P> {
        Builder { root: self.root.clone() }
    }
}

impl<T, P> Clone for TreeList<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        TreeList { root: self.root.clone() }
    }
}

impl<T, P> Default for TreeList<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        TreeList::new()
    }
}

impl<T: PartialEq, P> PartialEq for TreeList<T, P>
where
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, P> Eq for TreeList<T, P> where P: SharedPointerKind {}

impl<T, P> FromIterator<T> for TreeList<T, P>
where
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        TreeList::new().add_all(into_iter)
    }
}

impl<'a, T, P> IntoIterator for &'a TreeList<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

pub struct Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    inner: avl::IterPtr<'a, T, P>,
}

impl<'a, T, P> Iterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|ptr| &**ptr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T, P> ExactSizeIterator for Iter<'a, T, P> where P: SharedPointerKind {}

/// A mutable overlay over a `TreeList`'s AVL tree. `Builder` applies the
/// same index-splaying insert/remove routines the immutable type uses, so
/// it shares every untouched subtree with the snapshot it was created from;
/// it simply avoids allocating a fresh public `TreeList` wrapper between
/// each step.
pub struct Builder<T, P = RcK>
where
    P: SharedPointerKind,
{
    root: Link<T, P>,
}

impl<T, P> Builder<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> Self {
        Builder { root: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        avl::size_of(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        get_at(&self.root, index).map(|ptr| &**ptr).ok_or(Error::OutOfBounds { index, len: self.len() })
    }

    pub fn push(&mut self, value: T) {
        let len = self.len();
        self.root = insert_at(self.root.take(), len, SharedPointer::new(value));
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::OutOfBounds { index, len });
        }
        self.root = insert_at(self.root.take(), index, SharedPointer::new(value));
        Ok(())
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfBounds { index, len });
        }
        self.root = set_at(self.root.take(), index, SharedPointer::new(value));
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(Error::OutOfBounds { index, len });
        }
        self.root = remove_at(self.root.take(), index);
        Ok(())
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { inner: avl::IterPtr::new(&self.root) }
    }

    #[must_use]
    pub fn to_immutable(&self) -> TreeList<T, P> {
        TreeList { root: self.root.clone() }
    }
}

impl<T, P> Default for Builder<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        Builder::new()
    }
}

fn get_at<T, P: SharedPointerKind>(link: &Link<T, P>, index: usize) -> Option<&SharedPointer<T, P>> {
    let node = link.as_ref()?;
    let left_size = avl::size_of(&node.left);
    match index.cmp(&left_size) {
        Ordering::Less => get_at(&node.left, index),
        Ordering::Equal => Some(&node.value),
        Ordering::Greater => get_at(&node.right, index - left_size - 1),
    }
}

fn insert_at<T, P: SharedPointerKind>(
    link: Link<T, P>,
    index: usize,
    value: SharedPointer<T, P>,
) -> Link<T, P> {
    match link {
        None => Some(avl::leaf(value)),
        Some(node) => {
            let left_size = avl::size_of(&node.left);
            if index <= left_size {
                let new_left = insert_at(node.left.clone(), index, value);
                Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone()))
            } else {
                let new_right = insert_at(node.right.clone(), index - left_size - 1, value);
                Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right))
            }
        }
    }
}

fn set_at<T, P: SharedPointerKind>(
    link: Link<T, P>,
    index: usize,
    value: SharedPointer<T, P>,
) -> Link<T, P> {
    let node = link.expect("set_at called with a validated in-range index");
    let left_size = avl::size_of(&node.left);
    match index.cmp(&left_size) {
        Ordering::Less => {
            let new_left = set_at(node.left.clone(), index, value);
            Some(avl::new_node(new_left, node.value.clone(), node.right.clone()))
        }
        Ordering::Equal => Some(avl::new_node(node.left.clone(), value, node.right.clone())),
        Ordering::Greater => {
            let new_right = set_at(node.right.clone(), index - left_size - 1, value);
            Some(avl::new_node(node.left.clone(), node.value.clone(), new_right))
        }
    }
}

fn remove_at<T, P: SharedPointerKind>(link: Link<T, P>, index: usize) -> Link<T, P> {
    let node = link.expect("remove_at called with a validated in-range index");
    let left_size = avl::size_of(&node.left);
    match index.cmp(&left_size) {
        Ordering::Less => {
            let new_left = remove_at(node.left.clone(), index);
            Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone()))
        }
        Ordering::Equal => avl::concat(node.left.clone(), node.right.clone()),
        Ordering::Greater => {
            let new_right = remove_at(node.right.clone(), index - left_size - 1);
            Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right))
        }
    }
}

/// Splits `link` into the first `index` elements and the remainder, in
/// `O(log n)`.
fn split_at<T, P: SharedPointerKind>(link: Link<T, P>, index: usize) -> (Link<T, P>, Link<T, P>) {
    match link {
        None => (None, None),
        Some(node) => {
            let left_size = avl::size_of(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    let (ll, lr) = split_at(node.left.clone(), index);
                    let right = avl::join(lr, node.value.clone(), node.right.clone());
                    (ll, right)
                }
                Ordering::Equal => {
                    let right = avl::join(None, node.value.clone(), node.right.clone());
                    (node.left.clone(), right)
                }
                Ordering::Greater => {
                    let (rl, rr) = split_at(node.right.clone(), index - left_size - 1);
                    let left = avl::join(node.left.clone(), node.value.clone(), rl);
                    (left, rr)
                }
            }
        }
    }
}

fn extract_range<T, P: SharedPointerKind>(
    root: Link<T, P>,
    from: usize,
    to: usize,
) -> (Link<T, P>, Link<T, P>, Link<T, P>) {
    let (prefix, rest) = split_at(root, from);
    let (middle, suffix) = split_at(rest, to - from);
    (prefix, middle, suffix)
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P> Serialize for TreeList<T, P>
    where
        T: Serialize,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, P> Deserialize<'de> for TreeList<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
            deserializer.deserialize_seq(TreeListVisitor { _phantom: PhantomData })
        }
    }

    struct TreeListVisitor<T, P> {
        _phantom: PhantomData<(T, P)>,
    }

    impl<'de, T, P> Visitor<'de> for TreeListVisitor<T, P>
    where
        T: Deserialize<'de>,
        P: SharedPointerKind,
    {
        type Value = TreeList<T, P>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> core::result::Result<TreeList<T, P>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut list = TreeList::new();
            while let Some(value) = seq.next_element()? {
                list = list.add(value);
            }
            Ok(list)
        }
    }
}

#[cfg(test)]
mod test;
