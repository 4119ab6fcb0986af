/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent FIFO queue built from two cons-lists, `forwards` and
//! `backwards`, so that enqueue and (amortized) dequeue are both O(1)
//! without ever mutating a node a caller might still be holding.

use crate::error::{Error, Result};
use crate::stack::LinkedStack;
use archery::{ArcK, RcK, SharedPointerKind};

/// A persistent queue. Two queues holding the same logical sequence can
/// still compare unequal: `equals` is structural over the `forwards` /
/// `backwards` split, not over the flattened sequence, so a dequeue that
/// reshuffles the split without changing the visible contents changes what
/// `==` reports. This is intentional, not a bug to paper over.
#[derive(Debug)]
pub struct LinkedQueue<T, P = RcK>
where
    P: SharedPointerKind,
{
    forwards: LinkedStack<T, P>,
    backwards: LinkedStack<T, P>,
}

pub type LinkedQueueSync<T> = LinkedQueue<T, ArcK>;

impl<T, P> LinkedQueue<T, P>
where
    P: SharedPointerKind,
{
    #[must_use]
    pub fn new() -> Self {
        LinkedQueue { forwards: LinkedStack::new(), backwards: LinkedStack::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forwards.len() + self.backwards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forwards.is_empty() && self.backwards.is_empty()
    }

    /// Enqueues `value`, keeping canonical form ("`forwards` is empty only
    /// if the queue is empty") so the very first enqueue into an empty
    /// queue populates `forwards` directly instead of waiting for the next
    /// dequeue to pay for the reversal.
    #[must_use]
    pub fn add(&self, value: T) -> Self
    where
        T: Clone,
    {
        if self.forwards.is_empty() {
            LinkedQueue { forwards: self.forwards.push(value), backwards: LinkedStack::new() }
        } else {
            LinkedQueue { forwards: self.forwards.clone(), backwards: self.backwards.push(value) }
        }
    }

    /// Dequeues the head, eagerly reversing `backwards` into `forwards`
    /// whenever that reversal is needed to keep canonical form.
    pub fn poll(&self) -> Result<Self>
    where
        T: Clone,
    {
        let new_forwards = self.forwards.pop()?;
        if new_forwards.is_empty() && !self.backwards.is_empty() {
            let reversed: LinkedStack<T, P> = self.backwards.iter().cloned().collect();
            Ok(LinkedQueue { forwards: reversed, backwards: LinkedStack::new() })
        } else {
            Ok(LinkedQueue { forwards: new_forwards, backwards: self.backwards.clone() })
        }
    }

    pub fn peek(&self) -> Result<&T> {
        if let Ok(head) = self.forwards.peek() {
            return Ok(head);
        }
        self.backwards.iter().last().ok_or(Error::Empty)
    }

    #[must_use]
    pub fn clear(&self) -> Self {
        LinkedQueue::new()
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T, P> {
        let mut backwards_rev: Vec<&T> = self.backwards.iter().collect();
        backwards_rev.reverse();
        Iter { forwards: self.forwards.iter(), backwards_rev: backwards_rev.into_iter() }
    }
}

impl<T, P> Clone for LinkedQueue<T, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        LinkedQueue { forwards: self.forwards.clone(), backwards: self.backwards.clone() }
    }
}

impl<T, P> Default for LinkedQueue<T, P>
where
    P: SharedPointerKind,
{
    fn default() -> Self {
        LinkedQueue::new()
    }
}

/// Structural, not sequence, equality — see the type's doc comment.
impl<T: PartialEq, P> PartialEq for LinkedQueue<T, P>
where
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        self.forwards == other.forwards && self.backwards == other.backwards
    }
}

impl<T: Eq, P> Eq for LinkedQueue<T, P> where P: SharedPointerKind {}

impl<T, P> FromIterator<T> for LinkedQueue<T, P>
where
    T: Clone,
    P: SharedPointerKind,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        let mut queue = LinkedQueue::new();
        for value in into_iter {
            queue = queue.add(value);
        }
        queue
    }
}

impl<'a, T, P> IntoIterator for &'a LinkedQueue<T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Iter<'a, T, P> {
        self.iter()
    }
}

/// Iterates in FIFO order: `forwards` top-to-bottom, then `backwards`
/// bottom-to-top.
pub struct Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    forwards: crate::stack::Iter<'a, T, P>,
    backwards_rev: alloc::vec::IntoIter<&'a T>,
}

impl<'a, T, P> Iterator for Iter<'a, T, P>
where
    P: SharedPointerKind,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.forwards.next().or_else(|| self.backwards_rev.next())
    }
}

#[cfg(test)]
mod test;
