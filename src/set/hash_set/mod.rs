/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! A persistent hash set, a thin wrapper over [`crate::map::HashMap<T, ()>`].

use crate::map::hash_map::HashMap;
use crate::utils::DefaultBuildHasher;
use archery::{ArcK, RcK, SharedPointerKind};
use std::hash::{BuildHasher, Hash};

pub struct HashSet<T, P = RcK, H = DefaultBuildHasher>
where
    P: SharedPointerKind,
{
    map: HashMap<T, (), P, H>,
}

pub type HashSetSync<T> = HashSet<T, ArcK>;

impl<T> HashSet<T, RcK, DefaultBuildHasher>
where
    T: Eq + Hash,
{
    #[must_use]
    pub fn new() -> Self {
        HashSet { map: HashMap::new() }
    }
}

impl<T> Default for HashSet<T, RcK, DefaultBuildHasher>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        HashSet::new()
    }
}

impl<T, P, H> HashSet<T, P, H>
where
    T: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher,
{
    #[must_use]
    pub fn new_with_hasher_and_ptr_kind(hasher_builder: H) -> Self {
        HashSet { map: HashMap::new_with_hasher_and_ptr_kind(hasher_builder) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    #[must_use]
    pub fn add(&self, value: T) -> Self
    where
        H: Clone,
    {
        HashSet { map: self.map.put(value, ()) }
    }

    #[must_use]
    pub fn remove(&self, value: &T) -> Self
    where
        H: Clone,
    {
        HashSet { map: self.map.remove(value) }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
        H: Clone,
    {
        let (larger, smaller) = if self.len() >= other.len() { (self, other) } else { (other, self) };
        let mut result = larger.clone();
        for value in smaller.iter() {
            result = result.add(value.clone());
        }
        result
    }

    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self
    where
        T: Clone,
        H: Clone,
    {
        let to_drop: Vec<T> = self.iter().filter(|v| !other.contains(v)).cloned().collect();
        let mut result = self.clone();
        for value in &to_drop {
            result = result.remove(value);
        }
        result
    }

    #[must_use]
    pub fn except(&self, other: &Self) -> Self
    where
        T: Clone,
        H: Clone,
    {
        let mut result = self.clone();
        for value in other.iter() {
            result = result.remove(value);
        }
        result
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
    pub fn overlaps(&self, other: &Self) -> bool {
        self.iter().any(|v| other.contains(v))
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.map.keys()
    }
}

impl<T, P, H> Clone for HashSet<T, P, H>
where
    P: SharedPointerKind,
    H: Clone,
{
    fn clone(&self) -> Self {
        HashSet { map: self.map.clone() }
    }
}

impl<T, P, H> PartialEq for HashSet<T, P, H>
where
    T: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|v| other.contains(v))
    }
}

impl<T, P, H> Eq for HashSet<T, P, H>
where
    T: Eq + Hash,
    P: SharedPointerKind,
    H: BuildHasher,
{
}

impl<T> FromIterator<T> for HashSet<T, RcK, DefaultBuildHasher>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(into_iter: I) -> Self {
        let mut set = HashSet::new();
        for value in into_iter {
            set = set.add(value);
        }
        set
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    use super::*;
    use ::serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
    use ::serde::ser::{Serialize, Serializer};
    use core::fmt;
    use core::marker::PhantomData;

    impl<T, P, H> Serialize for HashSet<T, P, H>
    where
        T: Eq + Hash + Serialize,
        P: SharedPointerKind,
        H: BuildHasher,
    {
        fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
            serializer.collect_seq(self.iter())
        }
    }

    impl<'de, T, P, H> Deserialize<'de> for HashSet<T, P, H>
    where
        T: Eq + Hash + Deserialize<'de>,
        P: SharedPointerKind,
        H: BuildHasher + Clone + Default,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
            deserializer.deserialize_seq(HashSetVisitor { _phantom: PhantomData })
        }
    }

    struct HashSetVisitor<T, P, H> {
        _phantom: PhantomData<(T, P, H)>,
    }

    impl<'de, T, P, H> Visitor<'de> for HashSetVisitor<T, P, H>
    where
        T: Eq + Hash + Deserialize<'de>,
        P: SharedPointerKind,
        H: BuildHasher + Clone + Default,
    {
        type Value = HashSet<T, P, H>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<HashSet<T, P, H>, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut set = HashSet::new_with_hasher_and_ptr_kind(H::default());
            while let Some(value) = seq.next_element()? {
                set = set.add(value);
            }
            Ok(set)
        }
    }
}

#[cfg(test)]
mod test;
