//! Basic Navigation
//!
//! This example walks a navigation history with a handler that completes
//! every transition immediately.
//!
//! Key concepts:
//! - Initializing a machine and registering a handler
//! - go_to appending or rewinding the history
//! - go_back and the terminal "cleared" state
//! - Completion listeners observing committed transitions
//!
//! Run with: RUST_LOG=navstack=debug cargo run --example basic_navigation

use navstack::{
    history, Backstack, Completion, CompletionListener, Direction, RegisterMode,
    TransitionDescriptor,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug)]
enum Screen {
    Inbox,
    Thread(u32),
    Compose,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Basic Navigation Example ===\n");

    let printer: Arc<dyn CompletionListener<Screen>> =
        Arc::new(|descriptor: &TransitionDescriptor<Screen>| {
            println!(
                "  [{}] {:?} -> {:?}",
                descriptor.direction(),
                descriptor.previous().as_slice(),
                descriptor.new_history().as_slice()
            );
        });

    let backstack = Backstack::builder()
        .initial(vec![Screen::Inbox])
        .listener(printer)
        .build()
        .unwrap();

    // A view layer would swap screens here before completing.
    backstack.register_handler(
        |_: TransitionDescriptor<Screen>, completion: Completion<Screen>| {
            completion.complete().unwrap();
        },
        RegisterMode::Initialize,
    );

    println!("Open a thread, then compose a reply:");
    backstack.go_to(Screen::Thread(7));
    backstack.go_to(Screen::Compose);

    println!("Jump back to the inbox (rewinds instead of appending):");
    backstack.go_to(Screen::Inbox);

    println!("Replace the whole history:");
    backstack
        .set_history(
            history![Screen::Inbox, Screen::Thread(1), Screen::Thread(2)],
            Direction::Replace,
        )
        .unwrap();

    println!("Go back until nothing is left:");
    while backstack.go_back() {}
    println!("  history is now {:?}", backstack.current_history().as_slice());

    println!("\n=== Example Complete ===");
}
