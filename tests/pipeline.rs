//! Integration tests for the action invocation pipeline.
//!
//! Covers phase ordering, concurrent fan-out inside a phase, veto and
//! failure propagation, and the stale-state check between racing calls.

use actuate::{
    Action, ActionOutcome, IllegalOperation, MachineError, State, StateMachine,
    StateMachineBuilder, Transition,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

type Log = Arc<Mutex<Vec<String>>>;

struct Door {
    machine: StateMachine<u32>,
    locked: State,
    open: State,
    open_with_key: Action,
    lock_with_key: Action,
    look_inside: Action,
}

fn door() -> Door {
    let machine = StateMachine::new();
    let locked = machine.add_state("locked").unwrap();
    let open = machine.add_state("open").unwrap();

    let unlocking = Transition::new("unlocking", &open);
    let locking = Transition::new("locking", &locked);
    let open_with_key = Action::with_transition("open with key", &unlocking);
    let lock_with_key = Action::with_transition("lock with key", &locking);
    let look_inside = Action::new("look inside");

    machine
        .add_action(&[locked.clone()], &open_with_key)
        .unwrap();
    machine.add_action(&[open.clone()], &lock_with_key).unwrap();
    machine.add_action(&[open.clone()], &look_inside).unwrap();

    Door {
        machine,
        locked,
        open,
        open_with_key,
        lock_with_key,
        look_inside,
    }
}

fn push(log: &Log, entry: impl Into<String>) {
    log.lock().push(entry.into());
}

/// Subscribe a logging listener to every category.
fn trace_everything(machine: &StateMachine<u32>, log: &Log) {
    let l = log.clone();
    machine.add_predicate(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("predicate {}", exec.action));
            Ok(true)
        }
    });
    let l = log.clone();
    machine.add_handler(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("handler {}", exec.action));
            Ok(())
        }
    });
    let l = log.clone();
    machine.on_transition(move |intent| {
        let l = l.clone();
        async move {
            push(&l, format!("transition {}", intent.transition));
            Ok(())
        }
    });
    let l = log.clone();
    machine.on_exit(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("exit {}", exec.from));
            Ok(())
        }
    });
    let l = log.clone();
    machine.on_state_changed(move |state| {
        let l = l.clone();
        async move {
            push(&l, format!("changed {state}"));
            Ok(())
        }
    });
    let l = log.clone();
    machine.on_enter(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("enter {}", exec.to));
            Ok(())
        }
    });
}

#[tokio::test]
async fn door_scenario() {
    let door = door();
    door.machine.start(&door.locked).unwrap();

    door.machine
        .call_action(&door.open_with_key, 0)
        .await
        .unwrap();
    assert_eq!(door.machine.current_state().unwrap(), door.open);

    door.machine
        .call_action(&door.lock_with_key, 0)
        .await
        .unwrap();
    assert_eq!(door.machine.current_state().unwrap(), door.locked);

    let err = door
        .machine
        .call_action(&door.look_inside, 0)
        .await
        .unwrap_err();
    assert!(err.is_illegal_action());
    assert_eq!(door.machine.current_state().unwrap(), door.locked);
}

#[test]
fn unknown_transition_target_is_rejected_before_storing() {
    let machine: StateMachine = StateMachine::new();
    let locked = machine.add_state("locked").unwrap();
    let elsewhere: StateMachine = StateMachine::new();
    let attic = elsewhere.add_state("attic").unwrap();
    let climb = Action::with_transition("climb", &Transition::new("climbing", &attic));

    let err = machine.add_action(&[locked.clone()], &climb).unwrap_err();

    assert!(matches!(
        err,
        MachineError::IllegalOperation(IllegalOperation::UnknownTransitionTarget { .. })
    ));
    assert!(machine.allowed_actions(&locked).is_empty());
    assert!(machine.action_named("climb").is_none());
}

#[tokio::test]
async fn phases_run_in_order() {
    let door = door();
    let log: Log = Arc::default();
    trace_everything(&door.machine, &log);
    door.machine.start(&door.locked).unwrap();

    door.machine
        .call_action(&door.open_with_key, 7)
        .await
        .unwrap();

    assert_eq!(
        *log.lock(),
        vec![
            "predicate open with key",
            "handler open with key",
            "transition unlocking",
            "exit locked",
            "changed open",
            "enter open",
        ]
    );
}

#[tokio::test]
async fn action_without_transition_fires_no_state_listeners() {
    let door = door();
    let log: Log = Arc::default();
    trace_everything(&door.machine, &log);
    door.machine.start(&door.open).unwrap();

    let outcome = door
        .machine
        .call_action(&door.look_inside, 1)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ActionOutcome::Completed {
            state: door.open.clone()
        }
    );
    assert_eq!(
        *log.lock(),
        vec!["predicate look inside", "handler look inside"]
    );
}

#[tokio::test]
async fn false_predicate_silently_cancels() {
    let door = door();
    let log: Log = Arc::default();
    trace_everything(&door.machine, &log);
    door.machine
        .add_predicate(|exec| async move { Ok(exec.payload == 1234) });
    door.machine.start(&door.locked).unwrap();

    let outcome = door
        .machine
        .call_action(&door.open_with_key, 1)
        .await
        .unwrap();

    assert!(outcome.is_vetoed());
    assert_eq!(door.machine.current_state().unwrap(), door.locked);
    assert_eq!(*log.lock(), vec!["predicate open with key"]);
    assert!(door.machine.history().is_empty());
}

#[tokio::test]
async fn predicate_failure_propagates_without_side_effects() {
    let door = door();
    let log: Log = Arc::default();
    trace_everything(&door.machine, &log);
    door.machine
        .add_predicate(|_| async { Err("key reader offline".into()) });
    door.machine.start(&door.locked).unwrap();

    let err = door
        .machine
        .call_action(&door.open_with_key, 1)
        .await
        .unwrap_err();

    match err {
        MachineError::Callback(source) => assert_eq!(source.to_string(), "key reader offline"),
        other => panic!("Expected callback error, got {other:?}"),
    }
    assert_eq!(door.machine.current_state().unwrap(), door.locked);
    assert_eq!(*log.lock(), vec!["predicate open with key"]);
}

#[tokio::test]
async fn transition_listener_failure_prevents_commit() {
    let door = door();
    door.machine
        .on_transition(|_| async { Err("alarm tripped".into()) });
    door.machine.start(&door.locked).unwrap();

    let result = door.machine.call_action(&door.open_with_key, 0).await;

    assert!(matches!(result, Err(MachineError::Callback(_))));
    assert_eq!(door.machine.current_state().unwrap(), door.locked);
}

#[tokio::test]
async fn every_handler_sees_the_same_execution() {
    let door = door();
    let seen: Arc<Mutex<Vec<(String, String, u32)>>> = Arc::default();
    for _ in 0..3 {
        let seen = seen.clone();
        door.machine.add_handler(move |exec| {
            let seen = seen.clone();
            async move {
                seen.lock().push((
                    exec.action.name().to_string(),
                    exec.from.name().to_string(),
                    exec.payload,
                ));
                Ok(())
            }
        });
    }
    door.machine.start(&door.locked).unwrap();

    door.machine
        .call_action(&door.open_with_key, 42)
        .await
        .unwrap();

    let seen = seen.lock().clone();
    assert_eq!(seen.len(), 3);
    assert!(seen
        .iter()
        .all(|entry| *entry == ("open with key".to_string(), "locked".to_string(), 42)));
}

#[tokio::test]
async fn handlers_in_one_phase_run_concurrently() {
    let door = door();
    let ready = Arc::new(Notify::new());

    let waiter = ready.clone();
    door.machine.add_handler(move |_| {
        let waiter = waiter.clone();
        async move {
            waiter.notified().await;
            Ok(())
        }
    });
    let signal = ready.clone();
    door.machine.add_handler(move |_| {
        let signal = signal.clone();
        async move {
            signal.notify_one();
            Ok(())
        }
    });
    door.machine.start(&door.locked).unwrap();

    let outcome = tokio::time::timeout(
        Duration::from_secs(5),
        door.machine.call_action(&door.open_with_key, 0),
    )
    .await
    .expect("handlers were awaited one after another")
    .unwrap();

    assert!(outcome.is_transitioned());
}

#[tokio::test]
async fn stale_invocation_is_abandoned() {
    let machine: StateMachine = StateMachineBuilder::new()
        .states(["idle", "heating", "cooling"])
        .transition("heat", "heating")
        .transition("cool", "cooling")
        .action("start heating", Some("heat"), ["idle"])
        .action("start cooling", Some("cool"), ["idle"])
        .initial("idle")
        .build()
        .unwrap();
    let idle = machine.state_named("idle").unwrap();
    let cooling = machine.state_named("cooling").unwrap();
    let heat = machine.action_named("start heating").unwrap();
    let cool = machine.action_named("start cooling").unwrap();

    let gate = Arc::new(Notify::new());
    let exits: Log = Arc::default();

    let waiter = gate.clone();
    let heating = heat.transition().cloned().unwrap();
    machine.on_transition_for(&heating, move |_| {
        let waiter = waiter.clone();
        async move {
            waiter.notified().await;
            Ok(())
        }
    });
    let opener = gate.clone();
    machine.on_enter_state(&cooling, move |_| {
        let opener = opener.clone();
        async move {
            opener.notify_one();
            Ok(())
        }
    });
    let l = exits.clone();
    machine.on_exit(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("{} left {}", exec.action, exec.from));
            Ok(())
        }
    });

    let (heated, cooled) = tokio::join!(machine.call(&heat), machine.call(&cool));

    assert_eq!(
        heated.unwrap(),
        ActionOutcome::Superseded {
            expected: idle.clone(),
            actual: cooling.clone()
        }
    );
    assert_eq!(
        cooled.unwrap(),
        ActionOutcome::Transitioned {
            from: idle,
            to: cooling.clone()
        }
    );
    assert_eq!(machine.current_state().unwrap(), cooling);
    assert_eq!(*exits.lock(), vec!["start cooling left idle"]);
    assert_eq!(machine.history().len(), 1);
}

#[tokio::test]
async fn unsubscribed_listeners_stop_receiving() {
    let door = door();
    let log: Log = Arc::default();
    let l = log.clone();
    let id = door.machine.on_enter(move |exec| {
        let l = l.clone();
        async move {
            push(&l, format!("enter {}", exec.to));
            Ok(())
        }
    });
    door.machine.start(&door.locked).unwrap();

    door.machine
        .call_action(&door.open_with_key, 0)
        .await
        .unwrap();
    assert!(door.machine.unsubscribe(id));
    door.machine
        .call_action(&door.lock_with_key, 0)
        .await
        .unwrap();

    assert_eq!(*log.lock(), vec!["enter open"]);
}
