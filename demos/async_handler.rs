//! Asynchronous Handler
//!
//! This example drives transitions from a tokio task, the way a view layer
//! would run an animation before reporting completion.
//!
//! Key concepts:
//! - Handlers can hand the completion token to another task
//! - Requests queue up while a transition is in flight
//! - Forced completion salvages a stalled transition
//!
//! Run with: RUST_LOG=navstack=debug cargo run --example async_handler

use navstack::{Backstack, Completion, RegisterMode, TransitionDescriptor};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

type Step = (TransitionDescriptor<&'static str>, Completion<&'static str>);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Asynchronous Handler Example ===\n");

    let (tx, mut rx) = mpsc::unbounded_channel::<Step>();
    let backstack = Backstack::new(vec!["home"]).unwrap();
    backstack.register_handler(
        move |descriptor: TransitionDescriptor<&'static str>,
              completion: Completion<&'static str>| {
            let _ = tx.send((descriptor, completion));
        },
        RegisterMode::Initialize,
    );

    backstack.go_to("search");
    backstack.go_to("results");
    println!("Queued transitions: {}", backstack.pending_count());

    // Animate the first three transitions.
    for _ in 0..3 {
        let Some((descriptor, completion)) = rx.recv().await else {
            break;
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        println!(
            "  animated {} to {:?}",
            descriptor.direction(),
            descriptor.new_top()
        );
        completion.complete().unwrap();
    }
    println!("History: {:?}", backstack.current_history().as_slice());

    // The next transition stalls; tear-down forces it through.
    backstack.go_to("details");
    let stalled = rx.recv().await;
    println!("Forcing stalled transition...");
    backstack.force_complete_pending();
    if let Some((_, completion)) = stalled {
        // Ignored: the transition was already forced.
        completion.complete().unwrap();
    }
    println!("History: {:?}", backstack.current_history().as_slice());

    println!("\n=== Example Complete ===");
}
