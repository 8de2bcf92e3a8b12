//! Door State Machine
//!
//! This example drives the classic locked/open door through its actions.
//!
//! Key concepts:
//! - Declaring states, transitions and actions with the builder
//! - Predicates that veto an action based on its payload
//! - Handlers and enter/exit listeners observing the pipeline
//! - Illegal actions reported as errors
//!
//! Run with: RUST_LOG=debug cargo run --example door

use actuate::{MachineConfig, StateMachineBuilder};
use tracing_subscriber::EnvFilter;

const SECRET: &str = "brass key";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Door State Machine Example ===\n");

    let machine = StateMachineBuilder::<String>::new()
        .config(MachineConfig::new("front door").with_history_limit(16))
        .states(["locked", "open"])
        .transition("unlocking", "open")
        .transition("locking", "locked")
        .action("open with key", Some("unlocking"), ["locked"])
        .action("lock with key", Some("locking"), ["open"])
        .action("look inside", None, ["open"])
        .initial("locked")
        .build()?;

    let open_with_key = machine.action_named("open with key").ok_or("missing action")?;
    let lock_with_key = machine.action_named("lock with key").ok_or("missing action")?;
    let look_inside = machine.action_named("look inside").ok_or("missing action")?;

    machine.add_predicate_for(&open_with_key, |exec| async move {
        Ok(exec.payload == SECRET)
    });
    machine.add_handler_for(&look_inside, |_| async {
        println!("  It is dark inside.");
        Ok(())
    });
    machine.on_exit(|exec| async move {
        println!("  Leaving '{}'", exec.from);
        Ok(())
    });
    machine.on_enter(|exec| async move {
        println!("  Entered '{}' via '{}'", exec.to, exec.action);
        Ok(())
    });

    println!("Trying the wrong key:");
    let outcome = machine
        .call_action(&open_with_key, "paperclip".to_string())
        .await?;
    println!("  Outcome: {outcome:?}\n");

    println!("Trying the right key:");
    machine
        .call_action(&open_with_key, SECRET.to_string())
        .await?;

    println!("\nLooking inside:");
    machine.call(&look_inside).await?;

    println!("\nLocking up:");
    machine.call(&lock_with_key).await?;

    println!("\nLooking inside a locked door:");
    match machine.call(&look_inside).await {
        Err(err) => println!("  Rejected: {err}"),
        Ok(outcome) => println!("  Unexpected: {outcome:?}"),
    }

    let history = machine.history();
    let path = history
        .get_path()
        .iter()
        .map(|state| state.name())
        .collect::<Vec<_>>();
    println!("\nPath taken: {}", path.join(" -> "));

    machine.dispose();
    println!("\n=== Example Complete ===");
    Ok(())
}
