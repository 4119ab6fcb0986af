use super::*;

#[test]
fn add_and_indexing() {
    let list: ArrayList<i32> = ArrayList::new().add(1).add(2).add(3);
    assert_eq!(list.len(), 3);
    assert_eq!(list[1], 2);
    assert_eq!(list.get(5), Err(Error::OutOfBounds { index: 5, len: 3 }));
}

#[test]
fn empty_lists_share_the_same_buffer() {
    let a: ArrayList<i32> = ArrayList::new();
    let b: ArrayList<i32> = ArrayList::new();
    assert_eq!(a, b);
    assert!(SharedPointer::ptr_eq(&a.data, &b.data));

    let from_default: ArrayList<i32> = ArrayList::default();
    let from_empty_collect: ArrayList<i32> = Vec::<i32>::new().into_iter().collect();
    let from_empty_vec: ArrayList<i32> = Vec::<i32>::new().into();
    assert!(SharedPointer::ptr_eq(&a.data, &from_default.data));
    assert!(SharedPointer::ptr_eq(&a.data, &from_empty_collect.data));
    assert!(SharedPointer::ptr_eq(&a.data, &from_empty_vec.data));
}

#[test]
fn two_lists_built_from_the_same_elements_are_not_equal() {
    let a: ArrayList<i32> = vec![1, 2, 3].into();
    let b: ArrayList<i32> = vec![1, 2, 3].into();
    assert_ne!(a, b);
    assert_eq!(a.clone(), a);
}

#[test]
fn create_all_on_an_existing_list_returns_the_same_buffer() {
    let list: ArrayList<i32> = vec![1, 2, 3].into();
    let same = ArrayList::create_all(&list);
    assert!(SharedPointer::ptr_eq(&list.data, &same.data));
}

#[test]
fn add_all_with_empty_iterable_is_identity() {
    let list: ArrayList<i32> = ArrayList::new().add(1);
    let same = list.add_all(Vec::<i32>::new());
    assert!(SharedPointer::ptr_eq(&list.data, &same.data));
}

#[test]
fn insert_and_insert_all_shift_the_tail() {
    let list: ArrayList<i32> = vec![1, 2, 3].into();
    let inserted = list.insert(1, 99).unwrap();
    assert_eq!(inserted.iter().copied().collect::<Vec<_>>(), vec![1, 99, 2, 3]);

    let inserted_all = list.insert_all(1, vec![7, 8]).unwrap();
    assert_eq!(inserted_all.iter().copied().collect::<Vec<_>>(), vec![1, 7, 8, 2, 3]);
}

#[test]
fn set_and_remove() {
    let list: ArrayList<i32> = vec![1, 2, 3].into();
    let updated = list.set(1, 20).unwrap();
    assert_eq!(updated.iter().copied().collect::<Vec<_>>(), vec![1, 20, 3]);

    let removed = list.remove(0).unwrap();
    assert_eq!(removed.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn remove_all_empty_range_is_identity() {
    let list: ArrayList<i32> = vec![1, 2, 3].into();
    let same = list.remove_all(1, 1).unwrap();
    assert!(SharedPointer::ptr_eq(&list.data, &same.data));
}

#[test]
fn remove_if_drops_matches() {
    let list: ArrayList<i32> = (0..10).collect();
    let evens_removed = list.remove_if(|&x| x % 2 == 0);
    assert_eq!(evens_removed.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7, 9]);
}

#[test]
fn replace_swaps_the_first_match() {
    let list: ArrayList<i32> = vec![1, 2, 1].into();
    let replaced = list.replace(&1, 99).unwrap();
    assert_eq!(replaced.iter().copied().collect::<Vec<_>>(), vec![99, 2, 1]);
    assert!(list.replace(&42, 0).is_err());
}

#[test]
fn sort_is_identity_when_already_sorted() {
    let list: ArrayList<i32> = (0..10).collect();
    let sorted = list.sort_by(|a, b| a.cmp(b));
    assert!(SharedPointer::ptr_eq(&list.data, &sorted.data));
}

#[test]
fn sort_and_reverse() {
    let list: ArrayList<i32> = vec![3, 1, 2].into();
    let sorted = list.sort_by(|a, b| a.cmp(b));
    assert_eq!(sorted.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(sorted.reverse().iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
}

#[test]
fn binary_search_and_index_of() {
    let list: ArrayList<i32> = vec![1, 3, 5, 7].into();
    assert_eq!(list.binary_search_by(|v| v.cmp(&5)), Ok(2));
    assert_eq!(list.index_of(&7), Some(3));
    assert_eq!(list.last_index_of(&99), None);
}

#[test]
fn builder_to_immutable_moves_when_full_and_copies_otherwise() {
    let mut builder: Builder<i32> = Builder::with_capacity(3);
    builder.push(1);
    builder.push(2);

    let snapshot: ArrayList<i32> = builder.to_immutable();
    assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(builder.len(), 2, "copy path must retain the builder's buffer");

    builder.push(3);
    assert_eq!(builder.len(), builder.capacity());
    let moved: ArrayList<i32> = builder.move_to_immutable().unwrap();
    assert_eq!(moved.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(builder.len(), 0);
}

#[test]
fn move_to_immutable_fails_when_length_differs_from_capacity() {
    let mut builder: Builder<i32> = Builder::with_capacity(10);
    builder.push(1);
    let result: Result<ArrayList<i32>> = builder.move_to_immutable();
    assert!(result.is_err());
}

#[test]
fn set_capacity_rejects_shrinking_below_length() {
    let mut builder: Builder<i32> = Builder::new();
    builder.push(1);
    builder.push(2);
    assert!(builder.set_capacity(1).is_err());
    assert!(builder.set_capacity(5).is_ok());
}
