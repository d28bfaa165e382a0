use tracing::info;

use crate::{elevator::Elevator, state::ElevatorState};

/// Translates user-facing events into operations on the elevator model
#[derive(Debug)]
pub struct ElevatorController<'a> {
    /// The model being driven
    model: &'a mut Elevator,
}

impl<'a> ElevatorController<'a> {
    /// Wrap a model
    #[must_use]
    pub fn new(model: &'a mut Elevator) -> Self {
        Self { model }
    }

    /// Read access to the model
    #[must_use]
    pub fn model(&self) -> &Elevator {
        self.model
    }

    /// Someone pressed a call button
    pub fn handle_call_button(&mut self, floor: i32) -> ElevatorState {
        info!(floor, "call button pressed");
        self.model.call(floor)
    }

    /// Extra weight detected
    pub fn handle_load(&mut self) -> ElevatorState {
        info!("load event registered");
        self.model.load()
    }

    /// Weight reduced
    pub fn handle_unload(&mut self) -> ElevatorState {
        info!("unload event registered");
        self.model.unload()
    }

    /// Emergency button pressed
    pub fn handle_emergency(&mut self) -> ElevatorState {
        info!("emergency button pressed");
        self.model.emergency()
    }

    /// Mains power lost. There is no trigger for this, the model is forced.
    pub fn handle_power_loss(&mut self) -> ElevatorState {
        info!("power loss detected");
        self.model.change_state(ElevatorState::NoPower);
        self.model.state()
    }

    /// Mains power is back
    pub fn handle_power_restore(&mut self) -> ElevatorState {
        info!("power restore detected");
        self.model.restore_power()
    }

    /// The car reached its target; arrival is modelled as an unload
    pub fn simulate_arrival(&mut self) -> ElevatorState {
        info!(floor = self.model.floor(), "car arrived at target floor");
        self.model.unload()
    }
}
