// Task list tests - ordering invariants under arbitrary edit sequences
//
// The property tests drive the list with random operations and check that
// priorities never go out of order and that refused edits change nothing.

use blockmind_core::tasks::{TaskDescription, TaskError, TaskList};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(Option<i64>),
    AddBack(Option<i64>),
    AddFront(Option<i64>),
    Insert(usize, Option<i64>),
    Remove(usize),
    Complete,
    Revert(usize),
}

fn priority() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-5i64..=5)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        priority().prop_map(Op::Add),
        priority().prop_map(Op::AddBack),
        priority().prop_map(Op::AddFront),
        (0usize..8, priority()).prop_map(|(i, p)| Op::Insert(i, p)),
        (0usize..8).prop_map(Op::Remove),
        Just(Op::Complete),
        (0usize..8).prop_map(Op::Revert),
    ]
}

fn description(n: usize, priority: Option<i64>) -> TaskDescription {
    let description = TaskDescription::new(format!("task {n}"));
    match priority {
        Some(p) => description.with_priority(p),
        None => description,
    }
}

proptest! {
    #[test]
    fn list_stays_sorted(ops in prop::collection::vec(op(), 1..40)) {
        let mut list = TaskList::new();
        for (n, op) in ops.into_iter().enumerate() {
            let before = list.clone();
            let refused = match op {
                Op::Add(p) => {
                    let index = list.add(description(n, p));
                    prop_assert_eq!(list.get(index).map(|t| t.title.clone()), Some(format!("task {n}")));
                    false
                }
                Op::AddBack(p) => list.add_back(description(n, p)).is_err(),
                Op::AddFront(p) => list.add_front(description(n, p)).is_err(),
                Op::Insert(i, p) => list.insert(i, description(n, p)).is_err(),
                Op::Remove(i) => {
                    list.remove(i);
                    false
                }
                Op::Complete => {
                    list.mark_completed();
                    false
                }
                Op::Revert(i) => {
                    list.mark_incomplete(i);
                    false
                }
            };
            prop_assert!(list.is_sorted(), "unsorted: {:?}", list.tasks());
            if refused {
                prop_assert_eq!(&list, &before);
            }
        }
    }

    #[test]
    fn active_task_is_first_incomplete(priorities in prop::collection::vec(-5i64..=5, 1..10), done in 0usize..10) {
        let mut list = TaskList::new();
        for (n, p) in priorities.iter().enumerate() {
            list.add(description(n, Some(*p)));
        }
        for _ in 0..done {
            list.mark_completed();
        }
        let expected = list.tasks().iter().position(|t| !t.completed);
        prop_assert_eq!(list.active_index(), expected);
    }
}

#[test]
fn first_add_is_active() {
    let mut list = TaskList::new();
    assert_eq!(list.add(description(0, Some(100))), 0);
    assert_eq!(list.active_index(), Some(0));
}

#[test]
fn add_places_after_equal_priorities() {
    let mut list = TaskList::new();
    list.add(description(0, Some(3)));
    list.add(description(1, Some(1)));
    assert_eq!(list.add(description(2, Some(3))), 1);
    assert_eq!(list.add(description(3, None)), 3);
    assert_eq!(list.get(3).map(|t| t.priority), Some(1));
}

#[test]
fn insert_checks_neighbours() {
    let mut list = TaskList::new();
    list.add(description(0, Some(5)));
    list.add(description(1, Some(1)));

    assert_eq!(
        list.insert(1, description(2, Some(7))),
        Err(TaskError::PriorityOrder { index: 1, priority: 7 })
    );
    assert_eq!(
        list.insert(3, description(2, None)),
        Err(TaskError::OutOfRange { index: 3, len: 2 })
    );
    assert_eq!(list.insert(1, description(2, None)), Ok(1));
    assert_eq!(list.get(1).map(|t| t.priority), Some(1));
}

#[test]
fn add_front_goes_before_active() {
    let mut list = TaskList::new();
    list.add(description(0, Some(2)));
    list.add(description(1, Some(2)));
    list.mark_completed();

    assert_eq!(list.add_front(description(2, None)), Ok(1));
    assert_eq!(list.active().map(|t| t.title.as_str()), Some("task 2"));
}
