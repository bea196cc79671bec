//! Signup Wizard
//!
//! This example walks a three-step signup flow through the handler while an
//! in-memory navigator plays the part of the browser history.
//!
//! Key concepts:
//! - Hooks that stash and validate fields as the user moves on
//! - Looping-free traversal with boundary errors
//! - Back navigation delivered as a host event
//! - Deep links entered through the `load` hook and the jump contract
//!
//! Run with: RUST_LOG=stepwise=debug cargo run --example wizard

use stepwise::builder::HandlerBuilder;
use stepwise::contract::ContractPolicy;
use stepwise::core::{HookError, Payload, StateDescriptor};
use stepwise::navigation::{HostEvent, MemoryNavigator, Navigator};
use stepwise::HandlerError;
use tracing_subscriber::EnvFilter;

fn steps() -> Vec<StateDescriptor> {
    vec![
        StateDescriptor::named("account")
            .render(|data: Payload| Ok(data.with("screen", "account")))
            .to_next(|data: Payload| Ok(data.with("email", "ada@example.com"))),
        StateDescriptor::named("profile")
            .from_prev(|data: Payload| match data.get("email") {
                Some(_) => Ok(data),
                None => Err(HookError::new("profile needs an email")),
            })
            .render(|data: Payload| Ok(data.with("screen", "profile")))
            .jump_in(|data: Payload| Ok(data.with("resumed", true))),
        StateDescriptor::named("confirm").render(|data: Payload| Ok(data.with("screen", "confirm"))),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Signup Wizard Example ===\n");

    let mut wizard = HandlerBuilder::new()
        .jump_state(Payload::new().with("email", ""))
        .contract_policy(ContractPolicy::Warn)
        .navigator(MemoryNavigator::new())
        .states(steps())
        .build()?;

    wizard.start()?;
    wizard.next()?.next()?;
    println!("Reached: {:?}", wizard.current_state().map(|s| &s.name));
    println!("Payload: {}", serde_json::to_string(wizard.data())?);

    match wizard.next() {
        Err(HandlerError::NoNextState { current }) => {
            println!("Nothing after '{current}', staying put");
        }
        other => println!("Unexpected: {:?}", other.map(|_| ())),
    }

    wizard.navigator_mut().back();
    wizard.dispatch(HostEvent::Navigate)?;
    println!("After back: {:?}", wizard.current_state().map(|s| &s.name));

    println!("\n--- Opening a deep link ---");
    let mut resumed = HandlerBuilder::new()
        .on_load(|data: Payload| Ok(data.with("email", "restored@example.com")))
        .navigator(MemoryNavigator::at("#profile"))
        .states(steps())
        .build()?;
    resumed.load("profile")?;
    println!(
        "Resumed at {:?} via {:?}",
        resumed.current_state().map(|s| &s.name),
        resumed.navigator().current_fragment()
    );

    println!("Path: {:?}", wizard.journal().get_path());
    println!("\n=== Example Complete ===");
    Ok(())
}
