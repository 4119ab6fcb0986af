use super::*;

#[test]
fn add_and_contains_round_trip() {
    let set: HashSet<i32> = HashSet::new().add(1).add(2).add(2);
    assert_eq!(set.len(), 2);
    assert!(set.contains(&1));
    assert!(!set.contains(&3));
}

#[test]
fn remove_drops_and_is_identity_when_absent() {
    let set: HashSet<i32> = HashSet::new().add(1).add(2);
    assert_eq!(set.remove(&1).len(), 1);
    assert_eq!(set.remove(&99).len(), 2);
}

#[test]
fn union_intersect_except_follow_set_theory() {
    let a: HashSet<i32> = (0..10).collect();
    let b: HashSet<i32> = (5..15).collect();

    assert_eq!(a.union(&b).len(), 15);
    assert_eq!(a.intersect(&b).len(), 5);
    assert_eq!(a.except(&b).len(), 5);
}

#[test]
fn subset_superset_and_overlap_relations() {
    let small: HashSet<i32> = vec![1, 2].into_iter().collect();
    let big: HashSet<i32> = vec![1, 2, 3].into_iter().collect();

    assert!(small.is_subset_of(&big));
    assert!(big.is_superset_of(&small));
    assert!(big.overlaps(&small));
}
