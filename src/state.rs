use std::fmt;

use serde::{Deserialize, Serialize};

/// Operational state of the elevator. Exactly one is active at a time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
)]
pub enum ElevatorState {
    /// Car is parked at a floor with its doors available
    #[default]
    Standing,
    /// Car is travelling towards its target floor
    Moving,
    /// Load exceeds capacity, the alarm is active
    Overloaded,
    /// Mains power is out
    NoPower,
    /// Emergency stop, needs maintenance
    Malfunction,
}

impl ElevatorState {
    /// Every state, in declaration order
    pub const ALL: [Self; 5] =
        [Self::Standing, Self::Moving, Self::Overloaded, Self::NoPower, Self::Malfunction];

    /// Short name of the state
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standing => "Standing",
            Self::Moving => "Moving",
            Self::Overloaded => "Overloaded",
            Self::NoPower => "NoPower",
            Self::Malfunction => "Malfunction",
        }
    }

    /// Get a human-readable description of the state
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Standing => "Elevator is standing at a floor",
            Self::Moving => "Elevator is moving to its target floor",
            Self::Overloaded => "Elevator is overloaded, alarm active",
            Self::NoPower => "Elevator has no power",
            Self::Malfunction => "Elevator is stopped by a malfunction and needs maintenance",
        }
    }

    /// Whether the car accepts new calls in this state
    #[must_use]
    pub const fn accepts_calls(self) -> bool {
        matches!(self, Self::Standing | Self::Moving)
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
