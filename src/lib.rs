//! Elevator finite-state machine with an observer-driven MVC layer.
//!
//! The machine has five states and five triggers. Transitions are computed by
//! a pure function ([`transition::apply`]) and committed by the [`Elevator`]
//! context, which in the MVC variant notifies its observers synchronously
//! after every observable change.

pub mod controller;
pub mod elevator;
pub mod error;
pub mod observers;
pub mod scenario;
pub mod state;
pub mod transition;
pub mod trigger;
pub mod visualization;

pub use controller::ElevatorController;
pub use elevator::{Elevator, Status};
pub use error::{ElevatorError, Result};
pub use observers::{Observer, SubscriptionId};
pub use state::ElevatorState;
pub use transition::{Cabin, Change, Transition, Variant};
pub use trigger::Trigger;
