use super::*;
use crate::list::{TreeList, TreeListSync};
use crate::map::HashMap;
use crate::stack::LinkedStack;
use std::sync::Arc;

#[test]
fn update_installs_a_new_value_and_reports_a_store_occurred() {
    let cell = ArcSwap::from_pointee(TreeList::<i32>::new());
    let changed = update(&cell, |old| Arc::new(old.add(1)));

    assert!(changed);
    assert_eq!(cell.load().len(), 1);
}

#[test]
fn update_reports_no_store_when_the_transformer_is_a_no_op() {
    let cell = ArcSwap::from_pointee(LinkedStack::<i32>::new().push(1));
    let changed = update(&cell, |old| old.clone());

    assert!(!changed);
}

#[test]
fn try_add_only_inserts_when_absent() {
    let cell = ArcSwap::from_pointee(HashMap::<&str, i32>::new());
    assert!(try_add(&cell, "a", 1));
    assert!(!try_add(&cell, "a", 2));
    assert_eq!(cell.load().get(&"a"), Some(&1));
}

#[test]
fn get_or_add_calls_the_factory_at_most_once_per_key() {
    let cell = ArcSwap::from_pointee(HashMap::<&str, i32>::new());
    let calls = std::sync::atomic::AtomicUsize::new(0);

    let first = get_or_add(&cell, "a", || {
        calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        42
    });
    let second = get_or_add(&cell, "a", || {
        calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        99
    });

    assert_eq!(first, 42);
    assert_eq!(second, 42);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn try_update_requires_the_expected_old_value() {
    let cell = ArcSwap::from_pointee(HashMap::<&str, i32>::new().put("a", 1));
    assert!(!try_update(&cell, "a", 99, 2));
    assert!(try_update(&cell, "a", 1, 2));
    assert_eq!(cell.load().get(&"a"), Some(&2));
}

#[test]
fn try_remove_only_removes_present_keys() {
    let cell = ArcSwap::from_pointee(HashMap::<&str, i32>::new().put("a", 1));
    assert!(try_remove(&cell, "a"));
    assert!(!try_remove(&cell, "a"));
    assert_eq!(cell.load().len(), 0);
}

#[test]
fn stack_push_and_try_pop_round_trip() {
    let cell = ArcSwap::from_pointee(LinkedStack::<i32>::new());
    push(&cell, 1);
    push(&cell, 2);

    assert_eq!(try_pop(&cell).unwrap(), 2);
    assert_eq!(try_pop(&cell).unwrap(), 1);
    assert_eq!(try_pop(&cell).unwrap_err(), Error::Empty);
}

#[test]
fn queue_add_and_try_poll_round_trip() {
    let cell = ArcSwap::from_pointee(LinkedQueue::<i32>::new());
    add(&cell, 1);
    add(&cell, 2);

    assert_eq!(try_poll(&cell).unwrap(), 1);
    assert_eq!(try_poll(&cell).unwrap(), 2);
    assert_eq!(try_poll(&cell).unwrap_err(), Error::Empty);
}

/// P threads each call `update(ref, l -> l.add(l.size))` 500 times. The
/// final list must have length `P * 500` and iterate in
/// strict ascending order, proving the CAS retry loop never loses or
/// duplicates a write under contention.
#[test]
fn atomic_update_under_high_concurrency_produces_a_strictly_ascending_list() {
    let thread_count = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4);
    let cell = ArcSwap::from_pointee(TreeListSync::<usize>::new());

    std::thread::scope(|scope| {
        for _ in 0..thread_count {
            scope.spawn(|| {
                for _ in 0..500 {
                    update(&cell, |old| Arc::new(old.add(old.len())));
                }
            });
        }
    });

    let result = cell.load();
    assert_eq!(result.len(), thread_count * 500);
    let values: Vec<usize> = result.iter().copied().collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(values, (0..thread_count * 500).collect::<Vec<_>>());
}
