//! Property-based tests for request construction and FIFO dispatch.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated request sequences.

use navstack::{
    Backstack, Completion, CompletionListener, Direction, History, RegisterMode,
    TransitionDescriptor, TransitionHandler,
};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Clone, PartialEq, Debug)]
enum Screen {
    Home,
    List,
    Detail(u8),
}

#[derive(Clone, Debug)]
enum Request {
    GoTo(Screen),
    GoBack,
    SetHistory(Vec<Screen>, Direction),
}

type Committed = Arc<Mutex<Vec<(Vec<Screen>, Direction)>>>;

prop_compose! {
    fn arbitrary_screen()(variant in 0..5u8) -> Screen {
        match variant {
            0 => Screen::Home,
            1 => Screen::List,
            n => Screen::Detail(n),
        }
    }
}

fn arbitrary_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Forward),
        Just(Direction::Backward),
        Just(Direction::Replace),
    ]
}

fn arbitrary_request() -> impl Strategy<Value = Request> {
    prop_oneof![
        arbitrary_screen().prop_map(Request::GoTo),
        Just(Request::GoBack),
        (
            prop::collection::vec(arbitrary_screen(), 1..4),
            arbitrary_direction()
        )
            .prop_map(|(history, direction)| Request::SetHistory(history, direction)),
    ]
}

fn recording_listener(committed: &Committed) -> Arc<dyn CompletionListener<Screen>> {
    let committed = Arc::clone(committed);
    Arc::new(move |descriptor: &TransitionDescriptor<Screen>| {
        committed
            .lock()
            .push((descriptor.new_history().to_vec(), descriptor.direction()));
    })
}

/// Machine whose handler completes every transition before returning.
fn synchronous_machine(initial: Vec<Screen>) -> (Backstack<Screen>, Committed) {
    let committed: Committed = Arc::new(Mutex::new(Vec::new()));
    let backstack = Backstack::builder()
        .initial(initial)
        .listener(recording_listener(&committed))
        .build()
        .unwrap();
    backstack.register_handler(
        |_: TransitionDescriptor<Screen>, completion: Completion<Screen>| {
            completion.complete().unwrap();
        },
        RegisterMode::Initialize,
    );
    (backstack, committed)
}

/// Target and direction `go_to` should produce on top of `base`.
fn expected_go_to(base: &[Screen], location: &Screen) -> (Vec<Screen>, Direction) {
    match base.iter().position(|entry| entry == location) {
        Some(index) => (base[..=index].to_vec(), Direction::Backward),
        None => {
            let mut next = base.to_vec();
            next.push(location.clone());
            (next, Direction::Forward)
        }
    }
}

#[derive(Default)]
struct DeferredHandler {
    parked: Mutex<VecDeque<Completion<Screen>>>,
    overlapping: Mutex<bool>,
}

impl TransitionHandler<Screen> for DeferredHandler {
    fn handle(&self, _: TransitionDescriptor<Screen>, completion: Completion<Screen>) {
        let mut parked = self.parked.lock();
        if !parked.is_empty() {
            *self.overlapping.lock() = true;
        }
        parked.push_back(completion);
    }
}

proptest! {
    #[test]
    fn synchronous_handler_matches_model(
        initial in prop::collection::vec(arbitrary_screen(), 1..4),
        requests in prop::collection::vec(arbitrary_request(), 0..20)
    ) {
        let (backstack, committed) = synchronous_machine(initial.clone());
        let mut model = initial.clone();
        let mut expected = vec![(initial.clone(), Direction::Replace)];

        for request in requests {
            let base = if model.is_empty() { initial.clone() } else { model.clone() };
            match request {
                Request::GoTo(location) => {
                    let (next, direction) = expected_go_to(&base, &location);
                    backstack.go_to(location);
                    model = next.clone();
                    expected.push((next, direction));
                }
                Request::GoBack => {
                    let went_back = backstack.go_back();
                    if base.len() <= 1 {
                        prop_assert!(!went_back);
                        model.clear();
                    } else {
                        prop_assert!(went_back);
                        model = base[..base.len() - 1].to_vec();
                        expected.push((model.clone(), Direction::Backward));
                    }
                }
                Request::SetHistory(history, direction) => {
                    backstack.set_history(history.clone(), direction).unwrap();
                    model = history.clone();
                    expected.push((history, direction));
                }
            }

            prop_assert_eq!(backstack.current_history().to_vec(), model.clone());
            prop_assert!(!backstack.is_change_pending());
        }

        prop_assert_eq!(committed.lock().clone(), expected);
    }

    #[test]
    fn deferred_completions_apply_in_fifo_order(
        initial in prop::collection::vec(arbitrary_screen(), 1..4),
        requests in prop::collection::vec(arbitrary_request(), 0..20)
    ) {
        let committed: Committed = Arc::new(Mutex::new(Vec::new()));
        let backstack = Backstack::new(initial.clone()).unwrap();
        backstack.add_completion_listener(recording_listener(&committed));
        let handler = Arc::new(DeferredHandler::default());
        let shared: Arc<dyn TransitionHandler<Screen>> = handler.clone();
        backstack.register_shared_handler(shared, RegisterMode::Initialize);

        let mut expected = vec![(initial.clone(), Direction::Replace)];
        for request in requests {
            let base = expected.last().map(|(history, _)| history.clone()).unwrap_or_default();
            match request {
                Request::GoTo(location) => {
                    backstack.go_to(location.clone());
                    expected.push(expected_go_to(&base, &location));
                }
                Request::GoBack => {
                    // Something is always queued here, so nothing new is enqueued.
                    prop_assert!(backstack.go_back());
                }
                Request::SetHistory(history, direction) => {
                    backstack.set_history(history.clone(), direction).unwrap();
                    expected.push((history, direction));
                }
            }
            prop_assert_eq!(backstack.effective_history().to_vec(), expected.last().unwrap().0.clone());
        }

        prop_assert_eq!(backstack.pending_count(), expected.len());
        prop_assert!(committed.lock().is_empty());

        loop {
            let next = handler.parked.lock().pop_front();
            match next {
                Some(completion) => completion.complete().unwrap(),
                None => break,
            }
        }

        prop_assert!(!*handler.overlapping.lock());
        prop_assert!(!backstack.is_change_pending());
        prop_assert_eq!(
            backstack.current_history().to_vec(),
            expected.last().unwrap().0.clone()
        );
        prop_assert_eq!(committed.lock().clone(), expected);
    }

    #[test]
    fn go_to_truncates_or_appends(
        history in prop::collection::vec(arbitrary_screen(), 1..6),
        location in arbitrary_screen()
    ) {
        let (backstack, committed) = synchronous_machine(history.clone());

        backstack.go_to(location.clone());

        let (expected_history, expected_direction) = expected_go_to(&history, &location);
        let last = committed.lock().last().cloned().unwrap();
        prop_assert_eq!(last.0, expected_history.clone());
        prop_assert_eq!(last.1, expected_direction);
        if history.contains(&location) {
            prop_assert_eq!(expected_direction, Direction::Backward);
            prop_assert_eq!(expected_history.last(), Some(&location));
        } else {
            prop_assert_eq!(expected_history.len(), history.len() + 1);
        }
    }

    #[test]
    fn current_history_is_stable(
        history in prop::collection::vec(arbitrary_screen(), 1..6)
    ) {
        let (backstack, _) = synchronous_machine(history.clone());
        let first = backstack.current_history();
        let second = backstack.current_history();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, History::from(history));
    }
}
