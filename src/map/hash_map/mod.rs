/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent hash map: a top-level AVL tree keyed by hash value, with a
//! [`crate::hash_bucket::HashBucket`] at each node absorbing collisions.

use crate::avl::{self, Link};
use crate::error::{Error, Result};
use crate::hash_bucket::HashBucket;
use crate::utils::{self, DefaultBuildHasher};
use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};
use std::hash::{BuildHasher, Hash};

#[derive(Debug)]
struct HashSlot<K, V, P>
where
    P: SharedPointerKind,
{
    hash: u64,
    bucket: HashBucket<K, V, P>,
}

impl<K, V, P> Clone for HashSlot<K, V, P>
where
    P: SharedPointerKind,
{
    fn clone(&self) -> Self {
        HashSlot { hash: self.hash, bucket: self.bucket.clone() }
    }
}

/// A persistent map from `K` to `V`. `add` rejects overwriting a key with a
/// value that compares unequal to what is already stored; `put` always
/// overwrites.
#[derive(Debug)]
pub struct HashMap<K, V, P = RcK, H = DefaultBuildHasher>
where
    P: SharedPointerKind,
{
    root: Link<HashSlot<K, V, P>, P>,
    size: usize,
    hasher_builder: H,
}

pub type HashMapSync<K, V> = HashMap<K, V, ArcK>;

impl<K, V> HashMap<K, V, RcK, DefaultBuildHasher>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        HashMap::new_with_hasher_and_ptr_kind(DefaultBuildHasher::default())
    }
}

impl<K, V> Default for HashMap<K, V, RcK, DefaultBuildHasher>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        HashMap::new()
    }
}

impl<K, V, P, H> HashMap<K, V, P, H>
where
    K: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher,
{
    #[must_use]
    pub fn new_with_hasher_and_ptr_kind(hasher_builder: H) -> Self {
        HashMap { root: None, size: 0, hasher_builder }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn hash_of(&self, key: &K) -> u64 {
        utils::hash_value(key, &self.hasher_builder)
    }

    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        find_slot(&self.root, self.hash_of(key)).and_then(|slot| slot.bucket.get(key))
    }

    /// Returns the canonical stored key for `key`, useful when `K`'s
    /// equality is coarser than its identity.
    #[must_use]
    pub fn get_key(&self, key: &K) -> Option<&K> {
        find_slot(&self.root, self.hash_of(key)).and_then(|slot| slot.bucket.get_key_value(key)).map(|(k, _)| k)
    }

    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Inserts `(key, value)`; fails with [`Error::KeyConflict`] if `key` is
    /// already present with an unequal value.
    pub fn add(&self, key: K, value: V) -> Result<Self>
    where
        V: Clone + PartialEq,
        H: Clone,
    {
        if let Some(existing) = self.get(&key) {
            return if *existing == value {
                Ok(self.clone())
            } else {
                Err(Error::KeyConflict)
            };
        }
        Ok(self.put(key, value))
    }

    /// Inserts `(key, value)`, overwriting any existing value. Returns the
    /// receiver unchanged if the stored value already compares equal.
    #[must_use]
    pub fn put(&self, key: K, value: V) -> Self
    where
        V: Clone + PartialEq,
        H: Clone,
    {
        if let Some(existing) = self.get(&key) {
            if *existing == value {
                return self.clone();
            }
        }

        let hash = self.hash_of(&key);
        let (new_root, grew) = match find_slot(&self.root, hash) {
            Some(_) => {
                let new_root = update_slot(self.root.clone(), hash, |bucket| bucket.insert(key, value).0);
                (new_root, false)
            }
            None => {
                let bucket = HashBucket::single(key, value);
                let (new_root, _) =
                    insert_slot(self.root.clone(), SharedPointer::new(HashSlot { hash, bucket }));
                (new_root, true)
            }
        };

        HashMap {
            root: new_root,
            size: if grew { self.size + 1 } else { self.size },
            hasher_builder: self.hasher_builder.clone(),
        }
    }

    #[must_use]
    pub fn remove(&self, key: &K) -> Self
    where
        V: Clone,
        H: Clone,
    {
        let hash = self.hash_of(key);
        let Some(slot) = find_slot(&self.root, hash) else {
            return self.clone();
        };
        if !slot.bucket.contains_key(key) {
            return self.clone();
        }

        let (new_bucket, _) = slot.bucket.remove(key);
        let new_root = match new_bucket {
            Some(bucket) => update_slot(self.root.clone(), hash, |_| bucket),
            None => remove_slot(self.root.clone(), hash),
        };

        HashMap { root: new_root, size: self.size - 1, hasher_builder: self.hasher_builder.clone() }
    }

    /// Rebuilds the map under a new hasher and key equality, re-inserting
    /// every entry under `key_eq` in place of `K::eq`. Two keys that become
    /// equal under `key_eq` collapse if their values also compare equal,
    /// and fail with [`Error::KeyConflict`] if the values differ.
    pub fn with_hasher<H2, F>(&self, hasher_builder: H2, key_eq: F) -> Result<HashMap<K, V, P, H2>>
    where
        H2: BuildHasher + Clone,
        F: Fn(&K, &K) -> bool,
        K: Clone,
        V: Clone + PartialEq,
    {
        let mut rebuilt: HashMap<K, V, P, H2> = HashMap::new_with_hasher_and_ptr_kind(hasher_builder);
        for (k, v) in self.iter() {
            let hash = rebuilt.hash_of(k);
            let collision =
                find_slot(&rebuilt.root, hash).and_then(|slot| slot.bucket.iter().find(|(ek, _)| key_eq(ek, k)));
            match collision {
                Some((_, existing_value)) if *existing_value == *v => {}
                Some(_) => return Err(Error::KeyConflict),
                None => rebuilt = rebuilt.put(k.clone(), v.clone()),
            }
        }
        Ok(rebuilt)
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter { slots: avl::IterPtr::new(&self.root), current: None }
    }

    #[must_use]
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    #[must_use]
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, P, H> Clone for HashMap<K, V, P, H>
where
    P: SharedPointerKind,
    H: Clone,
{
    fn clone(&self) -> Self {
        HashMap { root: self.root.clone(), size: self.size, hasher_builder: self.hasher_builder.clone() }
    }
}

impl<K, V, P, H> PartialEq for HashMap<K, V, P, H>
where
    K: Eq + Hash,
    V: PartialEq,
    P: SharedPointerKind,
    H: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, P, H> Eq for HashMap<K, V, P, H>
where
    K: Eq + Hash,
    V: Eq,
    P: SharedPointerKind,
    H: BuildHasher,
{
}

impl<K, V> FromIterator<(K, V)> for HashMap<K, V, RcK, DefaultBuildHasher>
where
    K: Eq + Hash,
    V: Clone + PartialEq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(into_iter: I) -> Self {
        let mut map = HashMap::new();
        for (k, v) in into_iter {
            map = map.put(k, v);
        }
        map
    }
}

pub struct Iter<'a, K, V, P>
where
    P: SharedPointerKind,
{
    slots: avl::IterPtr<'a, HashSlot<K, V, P>, P>,
    current: Option<Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>>,
}

impl<'a, K, V, P> Iterator for Iter<'a, K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = self.current.as_mut() {
                if let Some(item) = current.next() {
                    return Some(item);
                }
            }
            let slot = self.slots.next()?;
            self.current = Some(Box::new(slot.bucket.iter()));
        }
    }
}

fn find_slot<K, V, P: SharedPointerKind>(
    link: &Link<HashSlot<K, V, P>, P>,
    hash: u64,
) -> Option<&HashSlot<K, V, P>> {
    let node = link.as_ref()?;
    match hash.cmp(&node.value.hash) {
        std::cmp::Ordering::Less => find_slot(&node.left, hash),
        std::cmp::Ordering::Equal => Some(&node.value),
        std::cmp::Ordering::Greater => find_slot(&node.right, hash),
    }
}

fn insert_slot<K, V, P: SharedPointerKind>(
    link: Link<HashSlot<K, V, P>, P>,
    value: SharedPointer<HashSlot<K, V, P>, P>,
) -> (Link<HashSlot<K, V, P>, P>, bool) {
    match link {
        None => (Some(avl::leaf(value)), true),
        Some(node) => match value.hash.cmp(&node.value.hash) {
            std::cmp::Ordering::Equal => (Some(node), false),
            std::cmp::Ordering::Less => {
                let (new_left, inserted) = insert_slot(node.left.clone(), value);
                (Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone())), inserted)
            }
            std::cmp::Ordering::Greater => {
                let (new_right, inserted) = insert_slot(node.right.clone(), value);
                (Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right)), inserted)
            }
        },
    }
}

fn update_slot<K, V, P: SharedPointerKind>(
    link: Link<HashSlot<K, V, P>, P>,
    hash: u64,
    f: impl FnOnce(&HashBucket<K, V, P>) -> HashBucket<K, V, P>,
) -> Link<HashSlot<K, V, P>, P> {
    let node = link.expect("update_slot requires the hash to already be present");
    match hash.cmp(&node.value.hash) {
        std::cmp::Ordering::Equal => {
            let new_slot = HashSlot { hash, bucket: f(&node.value.bucket) };
            Some(avl::new_node(node.left.clone(), SharedPointer::new(new_slot), node.right.clone()))
        }
        std::cmp::Ordering::Less => {
            let new_left = update_slot(node.left.clone(), hash, f);
            Some(avl::new_node(new_left, node.value.clone(), node.right.clone()))
        }
        std::cmp::Ordering::Greater => {
            let new_right = update_slot(node.right.clone(), hash, f);
            Some(avl::new_node(node.left.clone(), node.value.clone(), new_right))
        }
    }
}

fn remove_slot<K, V, P: SharedPointerKind>(
    link: Link<HashSlot<K, V, P>, P>,
    hash: u64,
) -> Link<HashSlot<K, V, P>, P> {
    let node = link.expect("remove_slot requires the hash to already be present");
    match hash.cmp(&node.value.hash) {
        std::cmp::Ordering::Equal => avl::concat(node.left.clone(), node.right.clone()),
        std::cmp::Ordering::Less => {
            let new_left = remove_slot(node.left.clone(), hash);
            Some(avl::make_balanced(new_left, node.value.clone(), node.right.clone()))
        }
        std::cmp::Ordering::Greater => {
            let new_right = remove_slot(node.right.clone(), hash);
            Some(avl::make_balanced(node.left.clone(), node.value.clone(), new_right))
        }
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<K, V, P, H> Serialize for HashMap<K, V, P, H>
    where
        K: Eq + Hash + Serialize,
        V: Serialize,
        H: BuildHasher,
        P: SharedPointerKind,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.collect_map(self.iter())
        }
    }

    impl<'de, K, V, P, H> Deserialize<'de> for HashMap<K, V, P, H>
    where
        K: Eq + Hash + Deserialize<'de>,
        V: Clone + PartialEq + Deserialize<'de>,
        H: BuildHasher + Clone + Default,
        P: SharedPointerKind,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            deserializer.deserialize_map(HashMapVisitor {
                _phantom_entry: PhantomData,
                _phantom_h: PhantomData,
                _phantom_p: PhantomData,
            })
        }
    }

    struct HashMapVisitor<K, V, P, H>
    where
        P: SharedPointerKind,
    {
        _phantom_entry: PhantomData<(K, V)>,
        _phantom_h: PhantomData<H>,
        _phantom_p: PhantomData<P>,
    }

    impl<'de, K, V, P, H> Visitor<'de> for HashMapVisitor<K, V, P, H>
    where
        K: Eq + Hash + Deserialize<'de>,
        V: Clone + PartialEq + Deserialize<'de>,
        H: BuildHasher + Clone + Default,
        P: SharedPointerKind,
    {
        type Value = HashMap<K, V, P, H>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<HashMap<K, V, P, H>, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut hash_map = HashMap::new_with_hasher_and_ptr_kind(H::default());

            while let Some((k, v)) = map.next_entry()? {
                hash_map = hash_map.put(k, v);
            }

            Ok(hash_map)
        }
    }
}

#[cfg(test)]
mod test;
