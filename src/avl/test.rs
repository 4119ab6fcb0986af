use super::*;
use archery::RcK;

fn push_all(mut link: Link<i32, RcK>, values: &[i32]) -> Link<i32, RcK> {
    for &v in values {
        link = insert_sorted(link, v);
    }
    link
}

/// A minimal BST-order insert used only to exercise `make_balanced` from
/// this module's own tests, independent of any container built on top of it.
fn insert_sorted(link: Link<i32, RcK>, value: i32) -> Link<i32, RcK> {
    match link {
        None => Some(leaf(SharedPointer::new(value))),
        Some(node) => {
            if value < *node.value {
                let new_left = insert_sorted(node.left.clone(), value);
                Some(make_balanced(new_left, node.value.clone(), node.right.clone()))
            } else if value > *node.value {
                let new_right = insert_sorted(node.right.clone(), value);
                Some(make_balanced(node.left.clone(), node.value.clone(), new_right))
            } else {
                Some(node)
            }
        }
    }
}

#[test]
fn balance_and_height_bound_hold_after_many_inserts() {
    let values: Vec<i32> = (0..2000).collect();
    let tree = push_all(None, &values);

    assert!(verify_balanced(&tree));
    assert!(verify_height_is_within_tolerance(size_of(&tree), height(&tree)));
}

#[test]
fn ascending_inserts_do_not_degenerate_into_a_list() {
    let values: Vec<i32> = (0..10_000).collect();
    let tree = push_all(None, &values);

    // A naive unbalanced BST fed ascending input degenerates to height n;
    // AVL must stay within the logarithmic bound.
    assert!((height(&tree) as usize) < 40);
}

#[test]
fn join_produces_a_balanced_tree() {
    let left = push_all(None, &(0..500).collect::<Vec<_>>());
    let right = push_all(None, &(600..900).collect::<Vec<_>>());
    let joined = join(left, SharedPointer::new(550), right);

    assert!(verify_balanced(&joined));
    assert_eq!(size_of(&joined), 500 + 1 + 300);
}

#[test]
fn concat_removes_the_connecting_value_correctly() {
    let left = push_all(None, &(0..50).collect::<Vec<_>>());
    let right = push_all(None, &(50..100).collect::<Vec<_>>());
    let both = concat(left, right);

    assert!(verify_balanced(&both));
    assert_eq!(size_of(&both), 100);

    let collected: Vec<i32> = IterPtr::new(&both).map(|v| **v).collect();
    let expected: Vec<i32> = (0..100).collect();
    assert_eq!(collected, expected);
}

#[test]
fn iter_ptr_visits_in_order() {
    let tree = push_all(None, &[5, 3, 8, 1, 4, 7, 9, 2, 6, 0]);
    let collected: Vec<i32> = IterPtr::new(&tree).map(|v| **v).collect();
    assert_eq!(collected, (0..10).collect::<Vec<_>>());
}

#[test]
fn iter_ptr_rev_visits_in_reverse_order() {
    let tree = push_all(None, &[5, 3, 8, 1, 4, 7, 9, 2, 6, 0]);
    let collected: Vec<i32> = IterPtrRev::new(&tree).map(|v| **v).collect();
    assert_eq!(collected, (0..10).rev().collect::<Vec<_>>());
}

#[test]
fn from_sorted_slice_builds_a_perfectly_balanced_tree() {
    let values: Vec<SharedPointer<i32, RcK>> = (0..255).map(SharedPointer::new).collect();
    let tree = from_sorted_slice(&values);

    assert!(verify_balanced(&tree));
    assert_eq!(size_of(&tree), 255);
    assert_eq!(height(&tree), 8);
}

quickcheck::quickcheck! {
    fn prop_balance_holds_for_any_insert_sequence(values: Vec<i16>) -> bool {
        let tree = push_all(None, &values.into_iter().map(i32::from).collect::<Vec<_>>());
        verify_balanced(&tree) && verify_height_is_within_tolerance(size_of(&tree), height(&tree))
    }
}
