/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent LIFO stack: a cons-list where every push shares its tail
//! with the stack it was pushed onto.

use crate::error::{Error, Result};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};

#[derive(Debug)]
struct Node<T, P>
where
    P: SharedPointerKind,
{
    head: T,
    tail: Link<T, P>,
}

type Link<T, P> = Option<SharedPointer<Node<T, P>, P>>;

/// A persistent stack. `clear()` returns the shared empty singleton rather
/// than allocating.
#[derive(Debug)]
pub struct LinkedStack<T, P = RcK>
where
    P: SharedPointerKind,
{
    top: Link<T, P>,
    size: usize,
}

pub type LinkedStackSync<T> = LinkedStack<T, ArcK>;

impl<T, P> LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> Self {
        LinkedStack { top: None, size: 0 }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    #[must_use]
    pub fn push(&self, value: T) -> Self {
        let node = Node { head: value, tail: self.top.clone() };
        LinkedStack { top: Some(SharedPointer::new(node)), size: self.size + 1 }
    }

    pub fn pop(&self) -> Result<Self> {
        let node = self.top.as_ref().ok_or(Error::Empty)?;
        Ok(LinkedStack { top: node.tail.clone(), size: self.size - 1 })
    }

    pub fn peek(&self) -> Result<&T> {
        self.top.as_ref().map(|node| &node.head).ok_or(Error::Empty)
    }

    #[must_use]
    pub fn clear(&self) -> Self {
        LinkedStack::new()
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter { current: &self.top }
    }
}

impl<T, P> Clone for LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        LinkedStack { top: self.top.clone(), size: self.size }
    }
}

impl<T, P> Default for LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        LinkedStack::new()
    }
}

impl<T: PartialEq, P> PartialEq for LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq, P> Eq for LinkedStack<T, P> where P: SharedPointerKind {}

impl<T, P> FromIterator<T> for LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    /// Pushes in iteration order, so the last item yielded ends up on top.
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        let mut stack = LinkedStack::new();
        for value in into_iter {
            stack = stack.push(value);
        }
        stack
    }
}

impl<'a, T, P> IntoIterator for &'a LinkedStack<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

/// Iterates top to bottom.
pub struct Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    current: &'a Link<T, P>,
}

impl<'a, T, P> Iterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.current.as_ref()?;
        self.current = &node.tail;
        Some(&node.head)
    }
}

#[cfg(test)]
mod test;
