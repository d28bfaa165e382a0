use std::{cell::RefCell, rc::Rc};

use crate::{
    elevator::{Cause, DEFAULT_HISTORY_LIMIT, Elevator, Status},
    observers::Observer,
    state::ElevatorState,
    transition::{Cabin, Change, Variant},
    trigger::Trigger,
};

/// Shared log of (observer name, status seen, change announced)
type Log = Rc<RefCell<Vec<(&'static str, Status, Change)>>>;

/// Observer that appends what it sees to a shared log
struct Recorder {
    /// Name written into each log entry
    name: &'static str,
    /// Shared log
    log: Log,
}

impl Observer for Recorder {
    fn on_update(&mut self, status: &Status, change: &Change) {
        self.log.borrow_mut().push((self.name, *status, *change));
    }
}

/// Helper to set up an MVC elevator with two recording observers
fn setup_mvc() -> (Elevator, Log) {
    let log: Log = Rc::default();
    let mut elevator = Elevator::new(Variant::Mvc);
    elevator.subscribe(Box::new(Recorder { name: "first", log: Rc::clone(&log) }));
    elevator.subscribe(Box::new(Recorder { name: "second", log: Rc::clone(&log) }));
    (elevator, log)
}

#[test]
fn test_initial_state() {
    let elevator = Elevator::new(Variant::Classic);
    assert_eq!(elevator.state(), ElevatorState::Standing);
    assert_eq!(elevator.floor(), 1);
    assert!(!elevator.is_overloaded());
    assert!(elevator.history().is_empty());
}

#[test]
fn test_call_moves_to_floor() {
    let mut elevator = Elevator::new(Variant::Classic);
    assert_eq!(elevator.call(5), ElevatorState::Moving);
    assert_eq!(elevator.floor(), 5);
    assert_eq!(elevator.state_name(), "Moving");
}

#[test]
fn test_load_and_unload_cycle() {
    let mut elevator = Elevator::new(Variant::Classic);
    assert_eq!(elevator.load(), ElevatorState::Overloaded);
    assert!(elevator.is_overloaded());

    // Calls are refused until the weight is reduced
    assert_eq!(elevator.call(10), ElevatorState::Overloaded);
    assert_eq!(elevator.floor(), 1);

    assert_eq!(elevator.unload(), ElevatorState::Standing);
    assert!(!elevator.is_overloaded());
}

#[test]
fn test_classic_scripted_arrival_and_power_cycle() {
    let mut elevator = Elevator::new(Variant::Classic);
    elevator.call(5);
    elevator.change_state(ElevatorState::Standing);
    assert_eq!(elevator.state(), ElevatorState::Standing);
    assert_eq!(elevator.floor(), 5);

    elevator.change_state(ElevatorState::NoPower);
    assert_eq!(elevator.call(2), ElevatorState::NoPower);
    assert_eq!(elevator.emergency(), ElevatorState::NoPower);
    assert_eq!(elevator.restore_power(), ElevatorState::Standing);
}

#[test]
fn test_malfunction_needs_manual_reset() {
    let mut elevator = Elevator::new(Variant::Classic);
    assert_eq!(elevator.emergency(), ElevatorState::Malfunction);
    assert_eq!(elevator.restore_power(), ElevatorState::Malfunction);
    assert_eq!(elevator.call(3), ElevatorState::Malfunction);
    assert_eq!(elevator.unload(), ElevatorState::Malfunction);
}

#[test]
fn test_classic_rejects_direct_overload() {
    let mut elevator = Elevator::new(Variant::Classic);
    assert!(!elevator.set_overloaded(true));
    assert!(!elevator.is_overloaded());
}

#[test]
fn test_classic_never_notifies() {
    let log: Log = Rc::default();
    let mut elevator = Elevator::new(Variant::Classic);
    elevator.subscribe(Box::new(Recorder { name: "silent", log: Rc::clone(&log) }));
    elevator.call(4);
    elevator.emergency();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_two_observers_notified_in_order_with_fresh_state() {
    let (mut elevator, log) = setup_mvc();
    elevator.call(5);

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    let expected = Status { floor: 5, state: ElevatorState::Moving, overloaded: false };
    let change = Change::State { from: ElevatorState::Standing, to: ElevatorState::Moving };
    assert_eq!(log.first(), Some(&("first", expected, change)));
    assert_eq!(log.get(1), Some(&("second", expected, change)));
}

#[test]
fn test_load_produces_flag_round_then_state_round() {
    let (mut elevator, log) = setup_mvc();
    elevator.load();

    let changes: Vec<Change> =
        log.borrow().iter().filter(|(name, ..)| *name == "first").map(|(_, _, c)| *c).collect();
    assert_eq!(
        changes,
        vec![
            Change::Overload(true),
            Change::State { from: ElevatorState::Standing, to: ElevatorState::Overloaded },
        ]
    );
    assert!(log.borrow().iter().all(|(_, status, _)| status.overloaded));
}

#[test]
fn test_noop_trigger_is_silent() {
    let (mut elevator, log) = setup_mvc();
    elevator.call(1);
    elevator.unload();
    elevator.restore_power();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_mvc_unload_while_moving_arrives() {
    let (mut elevator, log) = setup_mvc();
    elevator.call(7);
    assert_eq!(elevator.unload(), ElevatorState::Standing);
    assert_eq!(elevator.floor(), 7);
    assert_eq!(log.borrow().len(), 4);
}

#[test]
fn test_retarget_while_moving_notifies() {
    let (mut elevator, log) = setup_mvc();
    elevator.call(3);
    log.borrow_mut().clear();

    elevator.call(8);
    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert!(log.iter().all(|(_, status, change)| {
        status.floor == 8 && *change == Change::Target(8)
    }));
}

#[test]
fn test_set_overloaded_notifies_only_on_change() {
    let (mut elevator, log) = setup_mvc();
    assert!(elevator.set_overloaded(true));
    assert!(elevator.set_overloaded(true));
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(elevator.state(), ElevatorState::Standing);
    assert!(elevator.is_overloaded());

    // Flag set outside a transition still blocks calls from Standing
    assert_eq!(elevator.call(6), ElevatorState::Overloaded);
}

#[test]
fn test_duplicate_registration_gets_duplicate_rounds() {
    let log: Log = Rc::default();
    let mut elevator = Elevator::new(Variant::Mvc);
    for _ in 0..2 {
        elevator.subscribe(Box::new(Recorder { name: "dup", log: Rc::clone(&log) }));
    }
    elevator.emergency();
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let log: Log = Rc::default();
    let mut elevator = Elevator::new(Variant::Mvc);
    let first = elevator.subscribe(Box::new(Recorder { name: "first", log: Rc::clone(&log) }));
    elevator.subscribe(Box::new(Recorder { name: "second", log: Rc::clone(&log) }));

    assert!(elevator.unsubscribe(first).is_some());
    assert!(elevator.unsubscribe(first).is_none());
    assert_eq!(elevator.observer_count(), 1);

    elevator.call(2);
    let names: Vec<_> = log.borrow().iter().map(|(name, ..)| *name).collect();
    assert_eq!(names, vec!["second"]);
}

#[test]
fn test_forced_change_notifies_in_mvc() {
    let (mut elevator, log) = setup_mvc();
    elevator.change_state(ElevatorState::NoPower);
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(elevator.restore_power(), ElevatorState::Standing);
    assert_eq!(log.borrow().len(), 4);
}

#[test]
#[allow(clippy::indexing_slicing)]
fn test_history_tracking() {
    let mut elevator = Elevator::new(Variant::Classic);
    elevator.call(5);
    elevator.load();
    elevator.change_state(ElevatorState::Standing);

    let history = elevator.history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].cause, Cause::Trigger(Trigger::Call(5)));
    assert_eq!(history[0].to, ElevatorState::Moving);
    assert_eq!(history[1].from, ElevatorState::Moving);
    assert_eq!(history[1].to, ElevatorState::Moving);
    assert_eq!(history[2].cause, Cause::Forced(ElevatorState::Standing));
}

#[test]
fn test_history_limit_evicts_oldest() {
    let mut elevator = Elevator::new(Variant::Classic).with_history_limit(2);
    elevator.call(2);
    elevator.call(3);
    elevator.call(4);

    let floors: Vec<i32> = elevator.history().iter().map(|r| r.floor).collect();
    assert_eq!(floors, vec![3, 4]);
    assert_eq!(Elevator::default().history().len(), 0);
    assert!(DEFAULT_HISTORY_LIMIT > 2);
}

#[test]
fn test_custom_start_cabin() {
    let cabin = Cabin { floor: -1, overloaded: true };
    let mut elevator = Elevator::with_cabin(Variant::Mvc, ElevatorState::Overloaded, cabin);
    assert_eq!(elevator.floor(), -1);
    assert_eq!(elevator.unload(), ElevatorState::Standing);
    assert!(!elevator.is_overloaded());
}

#[test]
fn test_display_describes_state() {
    let elevator = Elevator::new(Variant::Mvc);
    assert_eq!(elevator.to_string(), "Elevator is standing at a floor (floor 1)");
}

#[test]
fn test_classic_start_clears_stray_overload_flag() {
    let heavy = Cabin { floor: 3, overloaded: true };

    let mut standing = Elevator::with_cabin(Variant::Classic, ElevatorState::Standing, heavy);
    assert!(!standing.is_overloaded());
    assert_eq!(standing.call(6), ElevatorState::Moving);

    let overloaded = Elevator::with_cabin(Variant::Classic, ElevatorState::Overloaded, heavy);
    assert!(overloaded.is_overloaded());

    let mvc = Elevator::with_cabin(Variant::Mvc, ElevatorState::Standing, heavy);
    assert!(mvc.is_overloaded());
}

#[test]
fn test_set_overloaded_is_recorded() {
    let (mut elevator, _log) = setup_mvc();
    assert!(elevator.set_overloaded(true));
    assert!(elevator.set_overloaded(true));

    let history = elevator.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].cause, Cause::Overload(true));
    assert_eq!(history[0].from, ElevatorState::Standing);
    assert_eq!(history[0].to, ElevatorState::Standing);
    assert!(history[0].overloaded);

    let table = crate::visualization::history_table(history);
    assert!(table.contains("| 1 | Standing | SetOverload(true) | Standing | 1 | true |"));
}
