/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The small AVL subtree stored at one hash slot of [`crate::map::HashMap`] /
//! [`crate::set::HashSet`], holding every entry that shares a hash.
//!
//! A bucket's entries are keyed by the caller's equality (`K: Eq`), which
//! does not give the nested AVL a total order to descend by. We synthesize
//! one: each entry is tagged with the sequence number it was inserted under,
//! and the bucket's AVL orders on that counter. Lookups and removals still
//! cost `O(bucket size)` (a full scan for equality), the same asymptotic a
//! cons-list of collisions would pay — collisions are expected to be rare
//! enough that the AVL shape only matters for keeping an accidental
//! pathological-hasher bucket (every key hashing the same) from
//! degenerating into an unbounded linear chain.

use crate::avl::{self, Link};
use crate::map::entry::Entry;
use archery::{SharedPointer, SharedPointerKind};

#[derive(Debug)]
struct BucketEntry<K, V> {
    sequence: u64,
    entry: Entry<K, V>,
}

#[derive(Debug)]
pub(crate) struct HashBucket<K, V, P>
where
    P: SharedPointerKind,
{
    root: Link<BucketEntry<K, V>, P>,
    next_sequence: u64,
}

impl<K, V, P> HashBucket<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    pub(crate) fn single(key: K, value: V) -> Self {
        let entry = BucketEntry { sequence: 0, entry: Entry::new(key, value) };
        HashBucket { root: Some(avl::leaf(SharedPointer::new(entry))), next_sequence: 1 }
    }

    pub(crate) fn len(&self) -> usize {
        avl::size_of(&self.root)
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        find(&self.root, key).map(|e| e.entry.value())
    }

    pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        find(&self.root, key).map(|e| (e.entry.key(), e.entry.value()))
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        find(&self.root, key).is_some()
    }

    /// Inserts `(key, value)`, returning the new bucket and the value that
    /// was previously associated with `key`, if any.
    pub(crate) fn insert(&self, key: K, value: V) -> (Self, Option<V>)
    where
        V: Clone,
    {
        match find(&self.root, &key) {
            Some(existing) => {
                let old_value = existing.entry.value().clone();
                let new_root = replace_by_key(&self.root, existing.entry.key(), Entry::new(key, value));
                (HashBucket { root: new_root, next_sequence: self.next_sequence }, Some(old_value))
            }
            None => {
                let bucket_entry =
                    BucketEntry { sequence: self.next_sequence, entry: Entry::new(key, value) };
                let (new_root, _) =
                    insert_by_sequence(self.root.clone(), SharedPointer::new(bucket_entry));
                (HashBucket { root: new_root, next_sequence: self.next_sequence + 1 }, None)
            }
        }
    }

    /// Removes `key`, returning the new bucket (`None` if it becomes empty)
    /// and the removed value, if `key` was present.
    pub(crate) fn remove(&self, key: &K) -> (Option<Self>, Option<V>)
    where
        V: Clone,
    {
        match find(&self.root, key) {
            None => (Some(HashBucket { root: self.root.clone(), next_sequence: self.next_sequence }), None),
            Some(existing) => {
                let removed_value = existing.entry.value().clone();
                let new_root = remove_by_key(self.root.clone(), key);
                if new_root.is_none() {
                    (None, Some(removed_value))
                } else {
                    (Some(HashBucket { root: new_root, next_sequence: self.next_sequence }), Some(removed_value))
                }
            }
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        avl::IterPtr::new(&self.root).map(|e| (e.entry.key(), e.entry.value()))
    }
}

impl<K, V, P> Clone for HashBucket<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        HashBucket { root: self.root.clone(), next_sequence: self.next_sequence }
    }
}

fn find<'a, K: Eq, V, P: SharedPointerKind>(
    link: &'a Link<BucketEntry<K, V>, P>,
    key: &K,
) -> Option<&'a BucketEntry<K, V>> {
    avl::IterPtr::new(link).map(|ptr| &**ptr).find(|entry| entry.entry.key() == key)
}

fn insert_by_sequence<K, V, P: SharedPointerKind>(
    link: Link<BucketEntry<K, V>, P>,
    value: SharedPointer<BucketEntry<K, V>, P>,
) -> (Link<BucketEntry<K, V>, P>, bool) {
    match link {
        None => (Some(avl::leaf(value)), true),
        Some(node) => {
            if value.sequence < node.value.sequence {
                let (new_left, inserted) = insert_by_sequence(node.left.clone(), value);
                (Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone())), inserted)
            } else {
                let (new_right, inserted) = insert_by_sequence(node.right.clone(), value);
                (Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right)), inserted)
            }
        }
    }
}

fn replace_by_key<K: Eq, V, P: SharedPointerKind>(
    link: &Link<BucketEntry<K, V>, P>,
    key: &K,
    new_entry: Entry<K, V>,
) -> Link<BucketEntry<K, V>, P> {
    let node = link.as_ref().expect("replace_by_key requires the key to already be present");
    if node.value.entry.key() == key {
        let replaced = BucketEntry { sequence: node.value.sequence, entry: new_entry };
        Some(avl::new_node(node.left.clone(), SharedPointer::new(replaced), node.right.clone()))
    } else if node.left.as_ref().map_or(false, |_| contains(&node.left, key)) {
        let new_left = replace_by_key(&node.left, key, new_entry);
        Some(avl::new_node(new_left, node.value.clone(), node.right.clone()))
    } else {
        let new_right = replace_by_key(&node.right, key, new_entry);
        Some(avl::new_node(node.left.clone(), node.value.clone(), new_right))
    }
}

fn contains<K: Eq, V, P: SharedPointerKind>(link: &Link<BucketEntry<K, V>, P>, key: &K) -> bool {
    find(link, key).is_some()
}

fn remove_by_key<K: Eq, V, P: SharedPointerKind>(
    link: Link<BucketEntry<K, V>, P>,
    key: &K,
) -> Link<BucketEntry<K, V>, P> {
    let node = link.expect("remove_by_key requires the key to already be present");
    if node.value.entry.key() == key {
        avl::concat(node.left.clone(), node.right.clone())
    } else if contains(&node.left, key) {
        let new_left = remove_by_key(node.left.clone(), key);
        Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone()))
    } else {
        let new_right = remove_by_key(node.right.clone(), key);
        Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right))
    }
}
