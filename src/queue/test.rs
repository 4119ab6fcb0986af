use super::*;

#[test]
fn add_then_poll_is_fifo() {
    let queue: LinkedQueue<i32> = LinkedQueue::new().add(1).add(2).add(3);
    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);

    let after = queue.poll().unwrap();
    assert_eq!(after.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
}

#[test]
fn poll_and_peek_on_empty_queue_error() {
    let queue: LinkedQueue<i32> = LinkedQueue::new();
    assert_eq!(queue.poll().unwrap_err(), Error::Empty);
    assert_eq!(queue.peek().unwrap_err(), Error::Empty);
}

#[test]
fn peek_prefers_forwards_then_falls_back_to_backwards() {
    let queue: LinkedQueue<i32> = LinkedQueue::new().add(1).add(2);
    assert_eq!(queue.peek().unwrap(), &1);
}

#[test]
fn clear_returns_the_empty_queue() {
    let queue: LinkedQueue<i32> = LinkedQueue::new().add(1).add(2);
    assert!(queue.clear().is_empty());
}

#[test]
fn equality_is_structural_over_the_split_not_the_sequence() {
    // Two queues that reach the same logical sequence [2, 3] through
    // different forwards/backwards splits must still compare unequal.
    let via_three_adds_then_poll = LinkedQueue::new().add(1).add(2).add(3).poll().unwrap();
    let via_two_adds = LinkedQueue::new().add(2).add(3);

    assert_eq!(
        via_three_adds_then_poll.iter().copied().collect::<Vec<_>>(),
        via_two_adds.iter().copied().collect::<Vec<_>>()
    );
    assert_ne!(via_three_adds_then_poll, via_two_adds, "equal contents, unequal split");
}

#[test]
fn many_interleaved_adds_and_polls_preserve_fifo_order() {
    let mut queue: LinkedQueue<i32> = LinkedQueue::new();
    let mut model: std::collections::VecDeque<i32> = std::collections::VecDeque::new();

    for i in 0..200 {
        queue = queue.add(i);
        model.push_back(i);
        if i % 3 == 0 {
            queue = queue.poll().unwrap();
            model.pop_front();
        }
    }

    assert_eq!(queue.iter().copied().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
}
