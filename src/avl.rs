/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The self-balancing AVL substrate shared by [`crate::list::TreeList`],
//! [`crate::set::tree_set::TreeSet`], and the hash-keyed top-level tree
//! backing [`crate::map::HashMap`] / [`crate::set::HashSet`].
//!
//! Every node stores its payload behind a [`SharedPointer`] so that cloning a
//! node's payload when an ancestor is rebuilt (the node itself is shared, so
//! we never mutate it) is a pointer-count bump rather than a deep copy of the
//! caller's value, the same way map entries are wrapped in
//! `SharedPointer<Entry<K, V>, P>`.

use archery::{SharedPointer, SharedPointerKind};

pub(crate) type Link<T, P> = Option<SharedPointer<Node<T, P>, P>>;

#[derive(Debug)]
pub(crate) struct Node<T, P>
where
    P: SharedPointerKind,
{
    pub(crate) left: Link<T, P>,
    pub(crate) right: Link<T, P>,
    pub(crate) height: u8,
    pub(crate) size: usize,
    pub(crate) value: SharedPointer<T, P>,
}

impl<T, P> Node<T, P>
where
    P: SharedPointerKind,
{
    #[inline]
    pub(crate) fn value(&self) -> &T {
        &self.value
    }
}

#[inline]
pub(crate) fn height<T, P: SharedPointerKind>(link: &Link<T, P>) -> u8 {
    link.as_ref().map_or(0, |n| n.height)
}

#[inline]
pub(crate) fn size_of<T, P: SharedPointerKind>(link: &Link<T, P>) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

#[inline]
pub(crate) fn leaf<T, P: SharedPointerKind>(value: SharedPointer<T, P>) -> SharedPointer<Node<T, P>, P> {
    SharedPointer::new(Node { left: None, right: None, height: 1, size: 1, value })
}

/// Builds a fresh node from scratch, with no rebalancing. Used once the
/// caller already knows the heights of `left` and `right` differ by at most
/// one (e.g. perfectly-balanced bulk construction from a sorted slice).
pub(crate) fn new_node<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let height = 1 + core::cmp::max(height(&left), height(&right));
    let size = size_of(&left) + size_of(&right) + 1;
    SharedPointer::new(Node { left, right, height, size, value })
}

/// Single left rotation: promotes the right child to the root. `right` must
/// be non-empty.
fn rotate_left<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let right_node = right.expect("rotate_left requires a non-empty right subtree");
    let new_left = new_node(left, value, right_node.left.clone());
    new_node(Some(new_left), right_node.value.clone(), right_node.right.clone())
}

/// Single right rotation: promotes the left child to the root. `left` must
/// be non-empty.
fn rotate_right<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let left_node = left.expect("rotate_right requires a non-empty left subtree");
    let new_right = new_node(left_node.right.clone(), value, right);
    new_node(left_node.left.clone(), left_node.value.clone(), Some(new_right))
}

/// Double rotation for the left-heavy / left-child-right-heavy case.
fn rotate_left_right<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let left_node = left.expect("rotate_left_right requires a non-empty left subtree");
    let lr = left_node.right.clone().expect("left-heavy node's right child must be heavier");
    let new_left = new_node(left_node.left.clone(), left_node.value.clone(), lr.left.clone());
    let new_right = new_node(lr.right.clone(), value, right);
    new_node(Some(new_left), lr.value.clone(), Some(new_right))
}

/// Double rotation for the right-heavy / right-child-left-heavy case.
fn rotate_right_left<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let right_node = right.expect("rotate_right_left requires a non-empty right subtree");
    let rl = right_node.left.clone().expect("right-heavy node's left child must be heavier");
    let new_left = new_node(left, value, rl.left.clone());
    let new_right = new_node(rl.right.clone(), right_node.value.clone(), right_node.right.clone());
    new_node(Some(new_left), rl.value.clone(), Some(new_right))
}

/// Rebuilds the node `(left, value, right)`, rotating if the heights of
/// `left` and `right` differ by more than one. Never mutates an input; every
/// branch returns a brand-new node, reusing unchanged subtrees by
/// [`SharedPointer`] clone.
pub(crate) fn make_balanced<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> SharedPointer<Node<T, P>, P> {
    let hl = height(&left);
    let hr = height(&right);

    if hl > hr + 1 {
        let left_node = left.as_ref().expect("hl > hr + 1 implies a non-empty left subtree");
        if height(&left_node.left) >= height(&left_node.right) {
            rotate_right(left, value, right)
        } else {
            rotate_left_right(left, value, right)
        }
    } else if hr > hl + 1 {
        let right_node = right.as_ref().expect("hr > hl + 1 implies a non-empty right subtree");
        if height(&right_node.right) >= height(&right_node.left) {
            rotate_left(left, value, right)
        } else {
            rotate_right_left(left, value, right)
        }
    } else {
        new_node(left, value, right)
    }
}

/// AVL join: concatenates `left`, `value`, and `right` into a single
/// balanced tree in `O(|height(left) - height(right)|)`, which is
/// `O(log n)` when one side is a single value. Used for bulk splicing
/// (`TreeList::insert_all`) and for removal (via [`concat`]).
pub(crate) fn join<T, P: SharedPointerKind>(
    left: Link<T, P>,
    value: SharedPointer<T, P>,
    right: Link<T, P>,
) -> Link<T, P> {
    if height(&left) > height(&right) + 1 {
        let l = left.expect("height(left) > height(right) + 1 implies non-empty left");
        let new_right = join(l.right.clone(), value, right);
        Some(make_balanced(l.left.clone(), l.value.clone(), new_right))
    } else if height(&right) > height(&left) + 1 {
        let r = right.expect("height(right) > height(left) + 1 implies non-empty right");
        let new_left = join(left, value, r.left.clone());
        Some(make_balanced(new_left, r.value.clone(), r.right.clone()))
    } else {
        Some(new_node(left, value, right))
    }
}

/// Removes and returns the leftmost value of `link`, rebalancing the
/// remainder bottom-up. Panics if `link` is empty.
pub(crate) fn remove_min<T, P: SharedPointerKind>(
    link: Link<T, P>,
) -> (SharedPointer<T, P>, Link<T, P>) {
    let node = link.expect("remove_min requires a non-empty tree");
    match node.left.clone() {
        None => (node.value.clone(), node.right.clone()),
        Some(_) => {
            let (min_value, new_left) = remove_min(node.left.clone());
            (min_value, Some(make_balanced(new_left, node.value.clone(), node.right.clone())))
        }
    }
}

/// Concatenates two trees with no connecting value, by promoting the
/// leftmost value of `right` to be the new connecting node.
pub(crate) fn concat<T, P: SharedPointerKind>(left: Link<T, P>, right: Link<T, P>) -> Link<T, P> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (left, right) => {
            let (min_value, new_right) = remove_min(right);
            join(left, min_value, new_right)
        }
    }
}

/// `height < log_φ(√5·(n+2)) − 2`, the standard AVL height bound. Used by
/// property tests rather than by production code.
#[cfg(test)]
pub(crate) fn verify_height_is_within_tolerance(size: usize, height: u8) -> bool {
    if size == 0 {
        return height == 0;
    }

    const PHI: f64 = 1.618_033_988_749_895;
    let bound = ((5f64.sqrt() * (size as f64 + 2.0)).ln() / PHI.ln()) - 2.0;
    (height as f64) < bound
}

#[cfg(test)]
pub(crate) fn verify_balanced<T, P: SharedPointerKind>(link: &Link<T, P>) -> bool {
    match link {
        None => true,
        Some(node) => {
            let hl = height(&node.left) as i16;
            let hr = height(&node.right) as i16;
            (hl - hr).abs() <= 1
                && node.size == size_of(&node.left) + size_of(&node.right) + 1
                && verify_balanced(&node.left)
                && verify_balanced(&node.right)
        }
    }
}

/// Explicit-stack in-order iterator. The stack never grows past the tree's
/// height, which the AVL bound caps at roughly 1.44·log2(n); a handful of
/// frames suffice even for billion-element trees.
pub(crate) struct IterPtr<'a, T, P>
where
    P: SharedPointerKind,
{
    stack: Vec<&'a Node<T, P>>,
    remaining: usize,
}

impl<'a, T, P> IterPtr<'a, T, P>
where
    P: SharedPointerKind,
{
    pub(crate) fn new(root: &'a Link<T, P>) -> Self {
        let mut iter = IterPtr { stack: Vec::with_capacity(48), remaining: size_of(root) };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T, P>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, T, P> Iterator for IterPtr<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a SharedPointer<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, P> ExactSizeIterator for IterPtr<'a, T, P> where P: SharedPointerKind {}

/// Explicit-stack reverse in-order iterator, used for `TreeSet`/`TreeList`
/// reverse iteration and `DoubleEndedIterator` impls.
pub(crate) struct IterPtrRev<'a, T, P>
where
    P: SharedPointerKind,
{
    stack: Vec<&'a Node<T, P>>,
    remaining: usize,
}

impl<'a, T, P> IterPtrRev<'a, T, P>
where
    P: SharedPointerKind,
{
    pub(crate) fn new(root: &'a Link<T, P>) -> Self {
        let mut iter = IterPtrRev { stack: Vec::with_capacity(48), remaining: size_of(root) };
        iter.push_right_spine(root);
        iter
    }

    fn push_right_spine(&mut self, mut link: &'a Link<T, P>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.right;
        }
    }
}

impl<'a, T, P> Iterator for IterPtrRev<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a SharedPointer<T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_right_spine(&node.left);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, P> ExactSizeIterator for IterPtrRev<'a, T, P> where P: SharedPointerKind {}

/// Builds a perfectly balanced tree from a sorted slice in `O(n)`, used by
/// `TreeList::sort` to rebuild a range after an out-of-place stable sort.
pub(crate) fn from_sorted_slice<T, P: SharedPointerKind>(values: &[SharedPointer<T, P>]) -> Link<T, P> {
    if values.is_empty() {
        return None;
    }

    let mid = values.len() / 2;
    let left = from_sorted_slice(&values[..mid]);
    let right = from_sorted_slice(&values[mid + 1..]);
    Some(new_node(left, values[mid].clone(), right))
}

#[cfg(test)]
mod test;
