use super::*;
use std::collections::HashSet as StdHashSet;
use std::hash::BuildHasher;

#[derive(Clone, Default)]
struct ConstantHasher;

struct ConstantHasherImpl;

impl std::hash::Hasher for ConstantHasherImpl {
    fn finish(&self) -> u64 {
        1
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for ConstantHasher {
    type Hasher = ConstantHasherImpl;

    fn build_hasher(&self) -> Self::Hasher {
        ConstantHasherImpl
    }
}

#[test]
fn put_then_get_round_trips() {
    let map: HashMap<&str, i32> = HashMap::new();
    let map = map.put("a", 1).put("b", 2);

    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"b"), Some(&2));
    assert_eq!(map.len(), 2);
}

#[test]
fn add_rejects_conflicting_value_but_allows_equal_value() {
    let map: HashMap<&str, i32> = HashMap::new().put("a", 1);

    assert!(map.add("a", 2).is_err());
    assert!(map.add("a", 1).is_ok());
    assert!(map.add("b", 9).is_ok());
}

#[test]
fn put_overwrites_and_is_identity_when_value_is_already_equal() {
    let map: HashMap<&str, i32> = HashMap::new().put("a", 1);
    let same = map.put("a", 1);
    let updated = map.put("a", 2);

    assert_eq!(same.len(), 1);
    assert_eq!(updated.get(&"a"), Some(&2));
}

#[test]
fn remove_drops_the_key_and_is_identity_when_absent() {
    let map: HashMap<&str, i32> = HashMap::new().put("a", 1).put("b", 2);
    let removed = map.remove(&"a");

    assert_eq!(removed.len(), 1);
    assert_eq!(removed.get(&"a"), None);

    let same = removed.remove(&"nonexistent");
    assert_eq!(same.len(), 1);
}

#[test]
fn contains_value_scans_all_entries() {
    let map: HashMap<&str, i32> = HashMap::new().put("a", 1).put("b", 2);
    assert!(map.contains_value(&2));
    assert!(!map.contains_value(&3));
}

#[test]
fn pathological_hasher_still_satisfies_add_remove_contains_contracts() {
    let map: HashMap<i32, i32, RcK, ConstantHasher> =
        HashMap::new_with_hasher_and_ptr_kind(ConstantHasher);
    let mut map = map;
    for i in 0..50 {
        map = map.put(i, i * 10);
    }

    assert_eq!(map.len(), 50);
    for i in 0..50 {
        assert_eq!(map.get(&i), Some(&(i * 10)));
    }

    map = map.remove(&25);
    assert_eq!(map.len(), 49);
    assert_eq!(map.get(&25), None);
    assert_eq!(map.get(&24), Some(&240));
}

#[test]
fn iter_visits_every_entry_exactly_once() {
    let map: HashMap<i32, i32> = (0..100).map(|i| (i, i * 2)).collect();
    let seen: StdHashSet<i32> = map.keys().copied().collect();

    assert_eq!(seen.len(), 100);
    assert_eq!(map.values().map(|v| *v).sum::<i32>(), (0..100).map(|i| i * 2).sum());
}

#[test]
fn with_hasher_rebuilds_under_a_new_hash_function() {
    let map: HashMap<i32, i32> = (0..20).map(|i| (i, i)).collect();
    let rebuilt = map.with_hasher(ConstantHasher, |a, b| a == b).unwrap();

    assert_eq!(rebuilt.len(), map.len());
    for i in 0..20 {
        assert_eq!(rebuilt.get(&i), Some(&i));
    }
}

#[derive(Clone, Default)]
struct CaseFoldingHasher;

struct CaseFoldingHasherImpl(std::collections::hash_map::DefaultHasher);

impl std::hash::Hasher for CaseFoldingHasherImpl {
    fn finish(&self) -> u64 {
        self.0.finish()
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl BuildHasher for CaseFoldingHasher {
    type Hasher = CaseFoldingHasherImpl;

    fn build_hasher(&self) -> Self::Hasher {
        CaseFoldingHasherImpl(std::collections::hash_map::DefaultHasher::new())
    }
}

fn case_insensitive(a: &&str, b: &&str) -> bool {
    a.eq_ignore_ascii_case(b)
}

#[test]
fn with_hasher_collapses_keys_that_become_equal_under_the_new_comparator() {
    let map: HashMap<&str, &str> = HashMap::new().put("a", "1").put("A", "1");
    assert_eq!(map.len(), 2);

    let rebuilt = map.with_hasher(CaseFoldingHasher, case_insensitive).unwrap();
    assert_eq!(rebuilt.len(), 1);
    assert_eq!(rebuilt.get(&"a"), Some(&"1"));
    assert_eq!(rebuilt.get(&"A"), Some(&"1"));
}

#[test]
fn with_hasher_raises_key_conflict_when_collapsed_keys_disagree_on_value() {
    let map: HashMap<&str, &str> = HashMap::new().put("a", "1").put("A", "2");
    assert_eq!(map.len(), 2);

    let err = map.with_hasher(CaseFoldingHasher, case_insensitive).unwrap_err();
    assert_eq!(err, Error::KeyConflict);
}
