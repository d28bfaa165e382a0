//! Pure transition function of the elevator state machine.
//!
//! [`apply`] maps `(variant, state, trigger, cabin)` to the resulting
//! [`Transition`]. It is total: every trigger in every state yields either a
//! state change or a no-op with an informational message. A rejected request
//! is never an error; callers learn the outcome by inspecting the resulting
//! state.

use serde::{Deserialize, Serialize};

use crate::{state::ElevatorState, trigger::Trigger};

/// Ground floor the car starts on
pub const GROUND_FLOOR: i32 = 1;

/// Which flavour of the machine is running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Variant {
    /// Bare state machine, no notifications
    #[default]
    Classic,
    /// State machine acting as the model of an MVC trio, with observers
    Mvc,
}

impl Variant {
    /// Whether this variant announces changes to observers
    #[must_use]
    pub const fn notifies(self) -> bool {
        matches!(self, Self::Mvc)
    }
}

/// Attributes of the car that transitions read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Cabin {
    /// Current (or, while moving, target) floor
    pub floor: i32,
    /// Overload flag
    pub overloaded: bool,
}

impl Default for Cabin {
    fn default() -> Self {
        Self { floor: GROUND_FLOOR, overloaded: false }
    }
}

/// An observable change announced by the model, one notification round each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Change {
    /// The operational state changed
    State {
        /// State before
        from: ElevatorState,
        /// State after
        to: ElevatorState,
    },
    /// Only the overload flag changed
    Overload(bool),
    /// The target floor changed while moving
    Target(i32),
}

/// Outcome of applying one trigger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transition {
    /// State the trigger was applied in
    pub from: ElevatorState,
    /// Resulting state
    pub to: ElevatorState,
    /// The trigger that was applied
    pub trigger: Trigger,
    /// Resulting cabin attributes
    pub cabin: Cabin,
    /// Informational message
    pub message: String,
    /// Changes to announce, in order
    pub changes: Vec<Change>,
}

impl Transition {
    /// Nothing changed: same state, same cabin, nothing to announce
    fn stay(
        state: ElevatorState,
        trigger: Trigger,
        cabin: Cabin,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from: state,
            to: state,
            trigger,
            cabin,
            message: message.into(),
            changes: Vec::new(),
        }
    }

    /// A state change with the given cabin and extra changes announced first
    fn go(
        from: ElevatorState,
        to: ElevatorState,
        trigger: Trigger,
        cabin: Cabin,
        message: impl Into<String>,
        mut changes: Vec<Change>,
    ) -> Self {
        changes.push(Change::State { from, to });
        Self { from, to, trigger, cabin, message: message.into(), changes }
    }

    /// True if the transition has nothing to announce
    ///
    /// A retarget to the floor the car is already heading for leaves state and
    /// cabin as they were but still announces a `Target` round.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Apply `trigger` to an elevator in `state` with attributes `cabin`
#[must_use]
pub fn apply(variant: Variant, state: ElevatorState, trigger: Trigger, cabin: Cabin) -> Transition {
    use crate::state::ElevatorState::{Malfunction, Moving, NoPower, Overloaded, Standing};

    match (state, trigger) {
        (Standing, Trigger::Call(floor)) if floor == cabin.floor => {
            Transition::stay(state, trigger, cabin, format!("Already on floor {floor}"))
        }
        (Standing, Trigger::Call(_)) if cabin.overloaded => Transition::go(
            state,
            Overloaded,
            trigger,
            cabin,
            "Cannot move, elevator is overloaded",
            Vec::new(),
        ),
        (Standing, Trigger::Call(floor)) => Transition::go(
            state,
            Moving,
            trigger,
            Cabin { floor, ..cabin },
            format!("Moving from floor {} to {floor}", cabin.floor),
            Vec::new(),
        ),
        (Standing, Trigger::Load) => Transition::go(
            state,
            Overloaded,
            trigger,
            Cabin { overloaded: true, ..cabin },
            "Loading passengers, weight limit exceeded",
            if cabin.overloaded { Vec::new() } else { vec![Change::Overload(true)] },
        ),
        (Standing, Trigger::Unload) => {
            Transition::stay(state, trigger, cabin, "Unloading completed, doors closed")
        }
        (Standing, Trigger::RestorePower) => {
            Transition::stay(state, trigger, cabin, "Power is already on, no action")
        }

        (Moving, Trigger::Call(floor)) => Transition {
            from: state,
            to: state,
            trigger,
            cabin: Cabin { floor, ..cabin },
            message: format!("Target floor changed to {floor}, continuing"),
            changes: vec![Change::Target(floor)],
        },
        (Moving, Trigger::Load) => {
            Transition::stay(state, trigger, cabin, "Cannot load while moving")
        }
        (Moving, Trigger::Unload) => match variant {
            Variant::Classic => {
                Transition::stay(state, trigger, cabin, "Cannot unload while moving")
            }
            Variant::Mvc => Transition::go(
                state,
                Standing,
                trigger,
                cabin,
                format!("Reached floor {}, stopping", cabin.floor),
                Vec::new(),
            ),
        },
        (Moving, Trigger::RestorePower) => {
            Transition::stay(state, trigger, cabin, "Power is on, continuing")
        }

        (Overloaded, Trigger::Call(_)) => {
            Transition::stay(state, trigger, cabin, "Cannot move until unloaded, alarm active")
        }
        (Overloaded, Trigger::Load) => {
            Transition::stay(state, trigger, cabin, "Cannot load more weight, alarm active")
        }
        (Overloaded, Trigger::Unload) => Transition::go(
            state,
            Standing,
            trigger,
            Cabin { overloaded: false, ..cabin },
            "Weight reduced, back to standing",
            if cabin.overloaded { vec![Change::Overload(false)] } else { Vec::new() },
        ),
        (Overloaded, Trigger::RestorePower) => {
            Transition::stay(state, trigger, cabin, "Power is on, but the elevator is overloaded")
        }

        (Standing | Moving | Overloaded, Trigger::Emergency) => Transition::go(
            state,
            Malfunction,
            trigger,
            cabin,
            "Emergency stop engaged",
            Vec::new(),
        ),

        (NoPower, Trigger::Call(_)) => {
            Transition::stay(state, trigger, cabin, "Cannot move, waiting for power")
        }
        (NoPower, Trigger::Load | Trigger::Unload) => {
            Transition::stay(state, trigger, cabin, "Doors are locked without power")
        }
        (NoPower, Trigger::RestorePower) => {
            Transition::go(state, Standing, trigger, cabin, "Power restored", Vec::new())
        }
        (NoPower, Trigger::Emergency) => {
            Transition::stay(state, trigger, cabin, "Power is already out, staying without power")
        }

        (Malfunction, Trigger::RestorePower) => Transition::stay(
            state,
            trigger,
            cabin,
            "Power is on, but a manual reset is required",
        ),
        (Malfunction, Trigger::Emergency) => {
            Transition::stay(state, trigger, cabin, "Already in emergency stop")
        }
        (Malfunction, _) => {
            Transition::stay(state, trigger, cabin, "Emergency stop, waiting for maintenance")
        }
    }
}
