use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{elevator::Status, transition::Change};

/// Trait for elevator change observation
///
/// Observers get a read-only snapshot taken after the change was committed,
/// so they can never see a half-applied transition or mutate the model.
pub trait Observer {
    /// Called once per notification round
    fn on_update(&mut self, status: &Status, change: &Change);
}

/// Handle returned by [`Elevator::subscribe`](crate::Elevator::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct SubscriptionId(pub(crate) u64);

/// Compact one-line view of the elevator
#[derive(Debug, Default)]
pub struct StatusView;

impl StatusView {
    /// Render the status line
    #[must_use]
    pub fn render(status: &Status) -> String {
        format!("[STATUS] Floor: {}, State: {}", status.floor, status.state)
    }
}

impl Observer for StatusView {
    fn on_update(&mut self, status: &Status, _change: &Change) {
        println!("--- VIEW 1 UPDATE (Standard) ---");
        println!("  {}", Self::render(status));
    }
}

/// Multi-line view including the overload alarm
#[derive(Debug, Default)]
pub struct DetailedView;

impl DetailedView {
    /// Render the detailed block
    #[must_use]
    pub fn render(status: &Status) -> String {
        let alarm = if status.overloaded { "ACTIVE" } else { "OFF" };
        let accepting = if status.state.accepts_calls() { "yes" } else { "no" };
        format!(
            "[LIFT INFO] Current Floor: {}\n\
             [LIFT INFO] Operational State: {}\n\
             [LIFT INFO] Overload Alarm: {alarm}\n\
             [LIFT INFO] Accepting Calls: {accepting}",
            status.floor, status.state
        )
    }
}

impl Observer for DetailedView {
    fn on_update(&mut self, status: &Status, _change: &Change) {
        println!("--- VIEW 2 UPDATE (Detailed) ---");
        for line in Self::render(status).lines() {
            println!("  {line}");
        }
    }
}

/// Emits a tracing event for every notification round
#[derive(Debug, Default)]
pub struct TransitionLogger {
    /// Rounds seen so far
    rounds: u64,
}

impl TransitionLogger {
    /// Number of notification rounds this logger has seen
    #[must_use]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }
}

impl Observer for TransitionLogger {
    fn on_update(&mut self, status: &Status, change: &Change) {
        self.rounds = self.rounds.saturating_add(1);
        match change {
            Change::State { from, to } => {
                info!(%from, %to, floor = status.floor, "elevator state changed");
            }
            Change::Overload(active) => {
                info!(active, state = %status.state, "overload flag changed");
            }
            Change::Target(floor) => info!(floor, "target floor changed"),
        }
    }
}
