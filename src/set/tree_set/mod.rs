/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent ordered set, AVL-balanced over the element's total order.

use crate::avl::{self, Link};
use crate::error::{Error, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use core::cmp::Ordering;

/// A persistent set ordered by `T: Ord`. `add` of an already-present
/// element and `remove` of an absent one both return the receiver
/// reference-identical.
#[derive(Debug)]
pub struct TreeSet<T, P = RcK>
where
    P: SharedPointerKind,
{
    root: Link<T, P>,
}

pub type TreeSetSync<T> = TreeSet<T, ArcK>;

impl<T, P> TreeSet<T, P>
where
    T: Ord,
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> Self {
        TreeSet { root: None }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        avl::size_of(&self.root)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        find(&self.root, value).is_some()
    }

    #[must_use]
    pub fn add(&self, value: T) -> Self {
        let (new_root, inserted) = insert_by(self.root.clone(), SharedPointer::new(value), &T::cmp);
        if inserted {
            TreeSet { root: new_root }
        } else {
            TreeSet { root: self.root.clone() }
        }
    }

    #[must_use]
    pub fn remove(&self, value: &T) -> Self {
        let (new_root, removed) = remove_by(self.root.clone(), value, &T::cmp);
        if removed {
            TreeSet { root: new_root }
        } else {
            TreeSet { root: self.root.clone() }
        }
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        nth(&self.root, index).map(|ptr| &**ptr).ok_or(Error::OutOfBounds { index, len: self.len() })
    }

    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize> {
        index_of(&self.root, value)
    }

    #[must_use]
    pub fn get_min(&self) -> Option<&T> {
        let mut link = &self.root;
        let mut last = None;
        while let Some(node) = link {
            last = Some(&node.value);
            link = &node.left;
        }
        last.map(|ptr| &**ptr)
    }

    #[must_use]
    pub fn get_max(&self) -> Option<&T> {
        let mut link = &self.root;
        let mut last = None;
        while let Some(node) = link {
            last = Some(&node.value);
            link = &node.right;
        }
        last.map(|ptr| &**ptr)
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let (larger, smaller) = if self.len() >= other.len() { (self, other) } else { (other, self) };
        let mut result_root = larger.root.clone();
        let mut changed = false;
        for value in smaller.iter() {
            let (new_root, inserted) =
                insert_by(result_root.clone(), SharedPointer::new(value.clone()), &T::cmp);
            if inserted {
                result_root = new_root;
                changed = true;
            }
        }
        if changed {
            TreeSet { root: result_root }
        } else {
            TreeSet { root: larger.root.clone() }
        }
    }

    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut root = None;
        for value in self.iter() {
            if other.contains(value) {
                let (new_root, _) = insert_by(root, SharedPointer::new(value.clone()), &T::cmp);
                root = new_root;
            }
        }
        TreeSet { root }
    }

    #[must_use]
    pub fn except(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        if other.is_empty() {
            return TreeSet { root: self.root.clone() };
        }
        let mut root = self.root.clone();
        let mut changed = false;
        for value in other.iter() {
            let (new_root, removed) = remove_by(root.clone(), value, &T::cmp);
            if removed {
                root = new_root;
                changed = true;
            }
        }
        if changed {
            TreeSet { root }
        } else {
            TreeSet { root: self.root.clone() }
        }
    }

    #[must_use]
    pub fn symmetric_except(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut root = None;
        for value in self.iter() {
            if !other.contains(value) {
                let (new_root, _) = insert_by(root, SharedPointer::new(value.clone()), &T::cmp);
                root = new_root;
            }
        }
        for value in other.iter() {
            if !self.contains(value) {
                let (new_root, _) = insert_by(root, SharedPointer::new(value.clone()), &T::cmp);
                root = new_root;
            }
        }
        TreeSet { root }
    }

    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.iter().all(|v| other.contains(v))
    }

    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    #[must_use]
    pub fn is_proper_subset_of(&self, other: &Self) -> bool {
        self.len() < other.len() && self.is_subset_of(other)
    }

    #[must_use]
    pub fn is_proper_superset_of(&self, other: &Self) -> bool {
        self.len() > other.len() && self.is_superset_of(other)
    }

    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.iter().any(|v| other.contains(v))
    }

    /// Collapses `other` to its distinct elements before comparing, so
    /// `{5}.set_equals([5, 5])` is `true` even though `other` is not itself
    /// a set.
    #[must_use]
    pub fn set_equals<I: IntoIterator<Item = T>>(&self, other: I) -> bool
    where
        T: Clone,
    {
        let other_set: TreeSet<T, P> = other.into_iter().collect();
        self.len() == other_set.len() && self.is_subset_of(&other_set)
    }

    /// Rebuilds the set under a different total order, collapsing elements
    /// that become equal under `cmp`.
    #[must_use]
    pub fn with_comparator<F: Fn(&T, &T) -> Ordering>(&self, cmp: F) -> Self
    where
        T: Clone,
    {
        let mut root = None;
        for value in self.iter() {
            let (new_root, _) = insert_by(root, SharedPointer::new(value.clone()), &cmp);
            root = new_root;
        }
        TreeSet { root }
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { inner: avl::IterPtr::new(&self.root) }
    }

    #[must_use]
    pub fn iter_rev(&self) -> IterRev<'_, T, P> {
        IterRev { inner: avl::IterPtrRev::new(&self.root) }
    }

    #[must_use]
    pub fn to_builder(&self) -> Builder<T, P> {
        Builder { root: self.root.clone() }
    }
}

impl<T, P> Clone for TreeSet<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        TreeSet { root: self.root.clone() }
    }
}

impl<T: Ord, P> Default for TreeSet<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        TreeSet::new()
    }
}

impl<T: Ord, P> PartialEq for TreeSet<T, P>
where
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T: Ord, P> Eq for TreeSet<T, P> where P: SharedPointerKind {}

impl<T: Ord, P> FromIterator<T> for TreeSet<T, P>
where
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        let mut set = TreeSet::new();
        for value in into_iter {
            set = set.add(value);
        }
        set
    }
}

impl<'a, T: Ord, P> IntoIterator for &'a TreeSet<T, P>
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

pub struct IterRev<'a, T, P>
where
    P: SharedPointerKind,
{
    inner: avl::IterPtrRev<'a, T, P>,
}

impl<'a, T, P> Iterator for IterRev<'a, T, P>
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

impl<'a, T, P> ExactSizeIterator for IterRev<'a, T, P> where P: SharedPointerKind {}

/// A mutable overlay over a `TreeSet`, in the same spirit as
/// [`crate::list::Builder`].
pub struct Builder<T, P = RcK>
where
    P: SharedPointerKind,
{
    root: Link<T, P>,
}

impl<T, P> Builder<T, P>
where
    T: Ord,
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
    pub fn contains(&self, value: &T) -> bool {
        find(&self.root, value).is_some()
    }

    pub fn insert(&mut self, value: T) -> bool {
        let (new_root, inserted) = insert_by(self.root.take(), SharedPointer::new(value), &T::cmp);
        self.root = new_root;
        inserted
    }

    pub fn remove(&mut self, value: &T) -> bool {
        let (new_root, removed) = remove_by(self.root.take(), value, &T::cmp);
        self.root = new_root;
        removed
    }

    #[must_use]
    pub fn to_immutable(&self) -> TreeSet<T, P> {
        TreeSet { root: self.root.clone() }
    }
}

impl<T: Ord, P> Default for Builder<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        Builder::new()
    }
}

fn find<'a, T, P: SharedPointerKind>(link: &'a Link<T, P>, value: &T) -> Option<&'a SharedPointer<T, P>>
where
    T: Ord,
{
    let node = link.as_ref()?;
    match value.cmp(&node.value) {
        Ordering::Less => find(&node.left, value),
        Ordering::Equal => Some(&node.value),
        Ordering::Greater => find(&node.right, value),
    }
}

fn insert_by<T, P: SharedPointerKind>(
    link: Link<T, P>,
    value: SharedPointer<T, P>,
    cmp: &dyn Fn(&T, &T) -> Ordering,
) -> (Link<T, P>, bool) {
    match link {
        None => (Some(avl::leaf(value)), true),
        Some(node) => match cmp(&value, &node.value) {
            Ordering::Equal => (Some(node), false),
            Ordering::Less => {
                let (new_left, inserted) = insert_by(node.left.clone(), value, cmp);
                (Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone())), inserted)
            }
            Ordering::Greater => {
                let (new_right, inserted) = insert_by(node.right.clone(), value, cmp);
                (Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right)), inserted)
            }
        },
    }
}

fn remove_by<T, P: SharedPointerKind>(
    link: Link<T, P>,
    value: &T,
    cmp: &dyn Fn(&T, &T) -> Ordering,
) -> (Link<T, P>, bool) {
    match link {
        None => (None, false),
        Some(node) => match cmp(value, &node.value) {
            Ordering::Equal => (avl::concat(node.left.clone(), node.right.clone()), true),
            Ordering::Less => {
                let (new_left, removed) = remove_by(node.left.clone(), value, cmp);
                (Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone())), removed)
            }
            Ordering::Greater => {
                let (new_right, removed) = remove_by(node.right.clone(), value, cmp);
                (Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right)), removed)
            }
        },
    }
}

fn nth<T, P: SharedPointerKind>(link: &Link<T, P>, index: usize) -> Option<&SharedPointer<T, P>> {
    let node = link.as_ref()?;
    let left_size = avl::size_of(&node.left);
    match index.cmp(&left_size) {
        Ordering::Less => nth(&node.left, index),
        Ordering::Equal => Some(&node.value),
        Ordering::Greater => nth(&node.right, index - left_size - 1),
    }
}

fn index_of<T: Ord, P: SharedPointerKind>(link: &Link<T, P>, value: &T) -> Option<usize> {
    let node = link.as_ref()?;
    match value.cmp(&node.value) {
        Ordering::Less => index_of(&node.left, value),
        Ordering::Equal => Some(avl::size_of(&node.left)),
        Ordering::Greater => index_of(&node.right, value).map(|i| avl::size_of(&node.left) + 1 + i),
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P> Serialize for TreeSet<T, P>
    where
        T: Ord + Serialize,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, P> Deserialize<'de> for TreeSet<T, P>
    where
        T: Ord + Deserialize<'de>,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
            deserializer.deserialize_seq(TreeSetVisitor { _phantom: PhantomData })
        }
    }

    struct TreeSetVisitor<T, P> {
        _phantom: PhantomData<(T, P)>,
    }

    impl<'de, T, P> Visitor<'de> for TreeSetVisitor<T, P>
    where
        T: Ord + Deserialize<'de>,
        P: SharedPointerKind,
    {
        type Value = TreeSet<T, P>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> core::result::Result<TreeSet<T, P>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut set = TreeSet::new();
            while let Some(value) = seq.next_element()? {
                set = set.add(value);
            }
            Ok(set)
        }
    }
}
