use super::*;
use crate::avl::{verify_balanced, verify_height_is_within_tolerance};

#[test]
fn add_appends_and_grows_length() {
    let list: TreeList<i32> = TreeList::new();
    let list = list.add(1).add(2).add(3);

    assert_eq!(list.len(), 3);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[test]
fn get_out_of_bounds_reports_index_and_len() {
    let list: TreeList<i32> = TreeList::new().add(1).add(2);
    let err = list.get(5).unwrap_err();
    assert_eq!(err, Error::OutOfBounds { index: 5, len: 2 });
}

#[test]
fn insert_out_of_bounds_at_len_plus_one_fails() {
    let list: TreeList<i32> = TreeList::new().add(1);
    assert!(list.insert(2, 99).is_err());
    assert!(list.insert(1, 99).is_ok());
}

#[test]
fn set_returns_new_version_receiver_unchanged() {
    let list: TreeList<i32> = TreeList::new().add(1).add(2).add(3);
    let updated = list.set(1, 20).unwrap();

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(updated.iter().copied().collect::<Vec<_>>(), vec![1, 20, 3]);
}

#[test]
fn remove_all_empty_range_is_identity() {
    let list: TreeList<i32> = TreeList::new().add(1).add(2).add(3);
    let same = list.remove_all(1, 1).unwrap();

    assert_eq!(list.len(), same.len());
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), same.iter().copied().collect::<Vec<_>>());
}

#[test]
fn remove_all_removes_the_requested_range() {
    let list: TreeList<i32> = (0..10).collect();
    let removed = list.remove_all(3, 7).unwrap();

    assert_eq!(removed.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2, 7, 8, 9]);
}

#[test]
fn index_of_and_last_index_of_scan_the_requested_range() {
    let list: TreeList<i32> = vec![5, 3, 5, 3, 5].into_iter().collect();

    assert_eq!(list.index_of(&5, 0, 5, |a, b| a == b).unwrap(), Some(0));
    assert_eq!(list.index_of(&5, 1, 5, |a, b| a == b).unwrap(), Some(2));
    assert_eq!(list.last_index_of(&5, 0, 5, |a, b| a == b).unwrap(), Some(4));
    assert_eq!(list.index_of(&9, 0, 5, |a, b| a == b).unwrap(), None);
}

#[test]
fn index_of_out_of_range_is_an_error() {
    let list: TreeList<i32> = vec![1, 2, 3].into_iter().collect();
    assert!(list.index_of(&1, 0, 10, |a, b| a == b).is_err());
}

#[test]
fn sort_already_sorted_range_is_identity() {
    let list: TreeList<i32> = (0..20).collect();
    let sorted = list.sort(0, 20, |a, b| a.cmp(b)).unwrap();

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), sorted.iter().copied().collect::<Vec<_>>());
}

#[test]
fn sort_reorders_only_the_requested_range() {
    let list: TreeList<i32> = vec![9, 8, 3, 1, 2, 7].into_iter().collect();
    let sorted = list.sort(1, 5, |a, b| a.cmp(b)).unwrap();

    assert_eq!(sorted.iter().copied().collect::<Vec<_>>(), vec![9, 1, 2, 3, 8, 7]);
}

#[test]
fn reverse_reorders_only_the_requested_range() {
    let list: TreeList<i32> = (0..6).collect();
    let reversed = list.reverse(1, 5).unwrap();

    assert_eq!(reversed.iter().copied().collect::<Vec<_>>(), vec![0, 4, 3, 2, 1, 5]);
}

#[test]
fn append_splices_two_lists() {
    let a: TreeList<i32> = (0..500).collect();
    let b: TreeList<i32> = (500..1000).collect();
    let joined = a.append(&b);

    assert_eq!(joined.len(), 1000);
    assert_eq!(joined.iter().copied().collect::<Vec<_>>(), (0..1000).collect::<Vec<_>>());
}

#[test]
fn append_with_empty_other_is_identity() {
    let a: TreeList<i32> = (0..5).collect();
    let empty: TreeList<i32> = TreeList::new();
    let joined = a.append(&empty);

    assert_eq!(joined.iter().copied().collect::<Vec<_>>(), a.iter().copied().collect::<Vec<_>>());
}

#[test]
fn remove_if_drops_matching_elements() {
    let list: TreeList<i32> = (0..10).collect();
    let evens_removed = list.remove_if(|&x| x % 2 == 0);

    assert_eq!(evens_removed.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
}

#[test]
fn builder_round_trips_to_the_same_sequence() {
    let mut builder: Builder<i32> = Builder::new();
    builder.push(1);
    builder.push(2);
    builder.insert(1, 99).unwrap();

    let list = builder.to_immutable();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 99, 2]);
}

#[test]
fn thirty_two_thousand_element_single_insertion_stays_fast_and_balanced() {
    let mut list: TreeList<i32> = (0..32_768).collect();
    list = list.insert(16_000, -1).unwrap();

    assert_eq!(list.get(16_000).unwrap(), &-1);
    assert_eq!(list.len(), 32_769);
}

quickcheck::quickcheck! {
    fn prop_random_ops_preserve_avl_invariants(ops: Vec<(u8, i32, u16)>) -> bool {
        let mut list: TreeList<i32> = TreeList::new();

        for (op, value, raw_index) in ops.into_iter().take(2000) {
            let len = list.len();
            let index = if len == 0 { 0 } else { raw_index as usize % (len + 1) };

            list = match op % 4 {
                0 => list.add(value),
                1 => list.insert(index, value).unwrap_or(list),
                2 => {
                    if len > 0 {
                        list.remove(index.min(len - 1)).unwrap_or(list)
                    } else {
                        list
                    }
                }
                _ => list.add_all(vec![value, value]),
            };
        }

        verify_balanced(&list.root) && verify_height_is_within_tolerance(list.len(), avl::height(&list.root))
    }
}
