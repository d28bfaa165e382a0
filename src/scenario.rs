//! Scripted demonstrations of the two elevator variants.

use serde::{Deserialize, Serialize};

use crate::{
    elevator::{Cause, Elevator, Status},
    state::ElevatorState,
    trigger::Trigger,
};

/// One captioned step of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Step {
    /// Narrative line printed before the step
    pub caption: String,
    /// What the step does
    pub action: Cause,
}

impl Step {
    /// Step that sends a trigger
    #[must_use]
    pub fn trigger(caption: impl Into<String>, trigger: Trigger) -> Self {
        Self { caption: caption.into(), action: Cause::Trigger(trigger) }
    }

    /// Step that forces a state
    #[must_use]
    pub fn force(caption: impl Into<String>, state: ElevatorState) -> Self {
        Self { caption: caption.into(), action: Cause::Forced(state) }
    }
}

/// Result of running one step: the state it started from and the elevator
/// status (floor, state, overload flag) it left behind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranscriptEntry {
    /// Caption of the step
    pub caption: String,
    /// What was done
    pub action: Cause,
    /// State before the step
    pub from: ElevatorState,
    /// Elevator after the step
    pub after: Status,
    /// Informational message produced by the step
    pub message: String,
}

/// Ordered record of a scenario run
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transcript {
    /// One entry per step
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// State after the last step, if any step ran
    #[must_use]
    pub fn final_state(&self) -> Option<ElevatorState> {
        self.entries.last().map(|entry| entry.after.state)
    }
}

/// Steps of the classic state-machine demonstration
#[must_use]
pub fn classic_scenario() -> Vec<Step> {
    vec![
        Step::trigger("Calling elevator to floor 5", Trigger::Call(5)),
        Step::force("Elevator arrives and stops", ElevatorState::Standing),
        Step::trigger("Loading passengers, causing overload", Trigger::Load),
        Step::trigger("Calling elevator while overloaded", Trigger::Call(10)),
        Step::trigger("Unloading to resolve the overload", Trigger::Unload),
        Step::force("Power outage", ElevatorState::NoPower),
        Step::trigger("Restoring power", Trigger::RestorePower),
        Step::trigger("Emergency triggered", Trigger::Emergency),
        Step::trigger("Calling elevator during malfunction", Trigger::Call(1)),
    ]
}

/// Steps of the MVC demonstration, driven through the controller's events
#[must_use]
pub fn mvc_scenario() -> Vec<Step> {
    vec![
        Step::trigger("User calls the lift to floor 5", Trigger::Call(5)),
        Step::trigger("Lift arrives at the target floor", Trigger::Unload),
        Step::trigger("Load event, extra weight", Trigger::Load),
        Step::trigger("User calls the lift to floor 10", Trigger::Call(10)),
        Step::trigger("Unload event, weight reduced", Trigger::Unload),
        Step::force("Power loss detected", ElevatorState::NoPower),
        Step::trigger("Power restored", Trigger::RestorePower),
        Step::trigger("Emergency button pressed", Trigger::Emergency),
    ]
}

/// Turn a list of triggers into uncaptioned steps
#[must_use]
pub fn script_steps(triggers: &[Trigger]) -> Vec<Step> {
    triggers.iter().map(|trigger| Step::trigger(format!("Trigger {trigger}"), *trigger)).collect()
}

/// Run a single step and describe its outcome
pub fn run_step(elevator: &mut Elevator, step: &Step) -> TranscriptEntry {
    let from = elevator.state();
    let message = match step.action {
        Cause::Trigger(trigger) => elevator.process_trigger(trigger).message,
        Cause::Forced(state) => {
            elevator.change_state(state);
            format!("State set to {state}")
        }
        Cause::Overload(flag) => {
            if elevator.set_overloaded(flag) {
                format!("Overload flag set to {flag}")
            } else {
                "Overload flag cannot be set on this elevator".to_string()
            }
        }
    };
    TranscriptEntry {
        caption: step.caption.clone(),
        action: step.action,
        from,
        after: elevator.status(),
        message,
    }
}

/// Run `steps` against `elevator` and collect the transcript
pub fn run(elevator: &mut Elevator, steps: &[Step]) -> Transcript {
    Transcript { entries: steps.iter().map(|step| run_step(elevator, step)).collect() }
}
