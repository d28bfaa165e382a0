use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    observers::{Observer, SubscriptionId},
    state::ElevatorState,
    transition::{self, Cabin, Change, Transition, Variant},
    trigger::Trigger,
};

/// Default number of history entries an elevator keeps
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Read-only snapshot of the elevator handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Status {
    /// Current (or target) floor
    pub floor: i32,
    /// Operational state
    pub state: ElevatorState,
    /// Overload flag
    pub overloaded: bool,
}

/// What caused a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Cause {
    /// A trigger went through the transition function
    Trigger(Trigger),
    /// The state was set directly, bypassing the transition function
    Forced(ElevatorState),
    /// The overload flag was set directly
    Overload(bool),
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger(trigger) => write!(f, "{trigger}"),
            Self::Forced(state) => write!(f, "Force({state})"),
            Self::Overload(flag) => write!(f, "SetOverload({flag})"),
        }
    }
}

/// One processed trigger or forced change
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransitionRecord {
    /// State before
    pub from: ElevatorState,
    /// State after
    pub to: ElevatorState,
    /// What caused it
    pub cause: Cause,
    /// Floor after
    pub floor: i32,
    /// Overload flag after
    pub overloaded: bool,
    /// Informational message
    pub message: String,
}

/// The elevator context: holds the current state and delegates every trigger
/// to [`transition::apply`]
pub struct Elevator {
    /// Active state
    state: ElevatorState,
    /// Floor and overload flag
    cabin: Cabin,
    /// Classic or MVC behaviour
    variant: Variant,
    /// Record of processed triggers, oldest first
    history: VecDeque<TransitionRecord>,
    /// Maximum number of history entries to keep
    max_history_size: usize,
    /// Subscribers in registration order
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
    /// Next subscription handle to hand out
    next_subscription: u64,
}

impl fmt::Debug for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Elevator")
            .field("state", &self.state)
            .field("cabin", &self.cabin)
            .field("variant", &self.variant)
            .field("history", &self.history)
            .field("max_history_size", &self.max_history_size)
            .field("observers_count", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Elevator {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl Elevator {
    /// Create an elevator standing on the ground floor
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::with_cabin(variant, ElevatorState::Standing, Cabin::default())
    }

    /// Create an elevator in an arbitrary state
    ///
    /// The classic machine only carries the overload flag in `Overloaded` (or
    /// in `Malfunction` entered from it); anywhere else the flag is cleared.
    #[must_use]
    pub fn with_cabin(variant: Variant, state: ElevatorState, mut cabin: Cabin) -> Self {
        if !variant.notifies()
            && cabin.overloaded
            && !matches!(state, ElevatorState::Overloaded | ElevatorState::Malfunction)
        {
            debug!(%state, "classic elevator starts without the overload flag");
            cabin.overloaded = false;
        }
        debug!(%state, floor = cabin.floor, ?variant, "elevator initialised");
        Self {
            state,
            cabin,
            variant,
            history: VecDeque::new(),
            max_history_size: DEFAULT_HISTORY_LIMIT,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Limit the number of history entries kept
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.max_history_size = limit;
        self.trim_history();
        self
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> ElevatorState {
        self.state
    }

    /// Name of the current state
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// Current (or, while moving, target) floor
    #[must_use]
    pub fn floor(&self) -> i32 {
        self.cabin.floor
    }

    /// Whether the overload flag is set
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.cabin.overloaded
    }

    /// Classic or MVC behaviour
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Snapshot of floor, state and overload flag
    #[must_use]
    pub fn status(&self) -> Status {
        Status { floor: self.cabin.floor, state: self.state, overloaded: self.cabin.overloaded }
    }

    /// Processed triggers and forced changes, oldest first
    #[must_use]
    pub fn history(&self) -> &VecDeque<TransitionRecord> {
        &self.history
    }

    /// Apply a trigger and return the full transition
    ///
    /// The result is committed before any observer runs, so every
    /// notification round sees the post-transition status.
    pub fn process_trigger(&mut self, trigger: Trigger) -> Transition {
        let transition = transition::apply(self.variant, self.state, trigger, self.cabin);
        debug!(
            from = %transition.from,
            to = %transition.to,
            %trigger,
            floor = transition.cabin.floor,
            "{}",
            transition.message
        );

        self.state = transition.to;
        self.cabin = transition.cabin;
        self.record(transition.from, Cause::Trigger(trigger), &transition.message);

        for change in &transition.changes {
            self.notify(*change);
        }
        transition
    }

    /// Apply a trigger and return the resulting state
    pub fn fire(&mut self, trigger: Trigger) -> ElevatorState {
        self.process_trigger(trigger).to
    }

    /// Call the car to `floor`
    pub fn call(&mut self, floor: i32) -> ElevatorState {
        self.fire(Trigger::Call(floor))
    }

    /// Passengers board
    pub fn load(&mut self) -> ElevatorState {
        self.fire(Trigger::Load)
    }

    /// Passengers leave
    pub fn unload(&mut self) -> ElevatorState {
        self.fire(Trigger::Unload)
    }

    /// Mains power comes back
    pub fn restore_power(&mut self) -> ElevatorState {
        self.fire(Trigger::RestorePower)
    }

    /// Emergency stop button
    pub fn emergency(&mut self) -> ElevatorState {
        self.fire(Trigger::Emergency)
    }

    /// Set the state directly, bypassing the transition rules
    ///
    /// Used by drivers to simulate events the trigger set has no name for,
    /// such as arrival in the classic machine or a power cut.
    pub fn change_state(&mut self, state: ElevatorState) {
        let from = self.state;
        info!(%from, to = %state, "forced state change");
        self.state = state;
        self.record(from, Cause::Forced(state), "State set directly");
        self.notify(Change::State { from, to: state });
    }

    /// Set the overload flag outside a transition
    ///
    /// Only the MVC model exposes the flag; the classic machine keeps it tied
    /// to the `Overloaded` state and refuses. Returns whether the request was
    /// accepted. Only a real change is recorded in history and announced.
    pub fn set_overloaded(&mut self, overloaded: bool) -> bool {
        if !self.variant.notifies() {
            warn!(overloaded, "classic elevator does not accept direct overload changes");
            return false;
        }
        if self.cabin.overloaded != overloaded {
            self.cabin.overloaded = overloaded;
            self.record(self.state, Cause::Overload(overloaded), "Overload flag set directly");
            self.notify(Change::Overload(overloaded));
        }
        true
    }

    /// Register an observer, returning a handle for [`Self::unsubscribe`]
    ///
    /// The same kind of observer may be registered more than once; each
    /// registration is notified independently.
    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.observers.push((id, observer));
        debug!(subscription = id.0, total = self.observers.len(), "observer subscribed");
        id
    }

    /// Remove an observer, handing it back to the caller
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<Box<dyn Observer>> {
        let pos = self.observers.iter().position(|(sub, _)| *sub == id)?;
        debug!(subscription = id.0, "observer unsubscribed");
        Some(self.observers.remove(pos).1)
    }

    /// Number of registered observers
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Run one notification round for `change`
    ///
    /// Observers are called synchronously in registration order. Classic
    /// elevators never notify.
    pub fn notify(&mut self, change: Change) {
        if !self.variant.notifies() {
            return;
        }
        let status = self.status();
        for (_, observer) in &mut self.observers {
            observer.on_update(&status, &change);
        }
    }

    /// Append a history entry and enforce the size limit
    fn record(&mut self, from: ElevatorState, cause: Cause, message: &str) {
        self.history.push_back(TransitionRecord {
            from,
            to: self.state,
            cause,
            floor: self.cabin.floor,
            overloaded: self.cabin.overloaded,
            message: message.to_string(),
        });
        self.trim_history();
    }

    /// Drop the oldest entries beyond the limit
    fn trim_history(&mut self) {
        while self.history.len() > self.max_history_size {
            self.history.pop_front();
        }
    }
}

impl fmt::Display for Elevator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (floor {})", self.state.description(), self.cabin.floor)
    }
}

#[cfg(test)]
mod tests;
