use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ElevatorError, Result};

/// External requests that can drive an elevator transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Trigger {
    /// Call the car to a floor. Any floor number is accepted.
    Call(i32),
    /// Passengers board
    Load,
    /// Passengers leave; in the MVC model this also marks arrival
    Unload,
    /// Mains power comes back
    RestorePower,
    /// Emergency stop button
    Emergency,
}

impl Trigger {
    /// One trigger of each kind, with a placeholder floor for `Call`
    pub const KINDS: [Self; 5] =
        [Self::Call(0), Self::Load, Self::Unload, Self::RestorePower, Self::Emergency];

    /// Name of the trigger without its argument
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Call(_) => "Call",
            Self::Load => "Load",
            Self::Unload => "Unload",
            Self::RestorePower => "RestorePower",
            Self::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(floor) => write!(f, "Call({floor})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Trigger {
    type Err = ElevatorError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| ElevatorError::InvalidTrigger {
            input: s.trim().to_string(),
            reason: reason.to_string(),
        };

        let normalized = s.trim().to_ascii_lowercase();
        let mut parts =
            normalized.split(|c: char| c.is_whitespace() || c == ':').filter(|p| !p.is_empty());

        let Some(keyword) = parts.next() else {
            return Err(invalid("empty trigger"));
        };

        let trigger = match keyword {
            "call" => {
                let floor = parts.next().ok_or_else(|| invalid("call needs a floor"))?;
                let floor = floor.parse::<i32>().map_err(|e| invalid(&format!("bad floor: {e}")))?;
                Self::Call(floor)
            }
            "load" => Self::Load,
            "unload" => Self::Unload,
            "restore" | "restore-power" | "restorepower" | "power" => Self::RestorePower,
            "emergency" | "stop" => Self::Emergency,
            _ => return Err(invalid("unknown trigger")),
        };

        if parts.next().is_some() {
            return Err(invalid("unexpected trailing input"));
        }
        Ok(trigger)
    }
}

/// Parse a script of triggers separated by commas, semicolons or newlines
///
/// # Errors
///
/// Returns `ElevatorError::InvalidTrigger` for the first entry that does not
/// parse, or `ElevatorError::EmptyScript` if the script holds no triggers.
pub fn parse_script(script: &str) -> Result<Vec<Trigger>> {
    let triggers = script
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse::<Trigger>)
        .collect::<Result<Vec<Trigger>>>()?;

    if triggers.is_empty() {
        return Err(ElevatorError::EmptyScript);
    }
    Ok(triggers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_kind() {
        assert_eq!("call 5".parse::<Trigger>().ok(), Some(Trigger::Call(5)));
        assert_eq!("Call:-2".parse::<Trigger>().ok(), Some(Trigger::Call(-2)));
        assert_eq!("LOAD".parse::<Trigger>().ok(), Some(Trigger::Load));
        assert_eq!(" unload ".parse::<Trigger>().ok(), Some(Trigger::Unload));
        assert_eq!("restore-power".parse::<Trigger>().ok(), Some(Trigger::RestorePower));
        assert_eq!("emergency".parse::<Trigger>().ok(), Some(Trigger::Emergency));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!("call".parse::<Trigger>(), Err(ElevatorError::InvalidTrigger { .. })));
        assert!(matches!(
            "call five".parse::<Trigger>(),
            Err(ElevatorError::InvalidTrigger { .. })
        ));
        assert!(matches!("load 3".parse::<Trigger>(), Err(ElevatorError::InvalidTrigger { .. })));
        assert!(matches!("jump".parse::<Trigger>(), Err(ElevatorError::InvalidTrigger { .. })));
    }

    #[test]
    fn script_splits_on_separators() {
        let triggers = parse_script("call 5; load,\nunload ,emergency").ok();
        assert_eq!(
            triggers,
            Some(vec![Trigger::Call(5), Trigger::Load, Trigger::Unload, Trigger::Emergency])
        );
    }

    #[test]
    fn script_reports_first_bad_entry() {
        let err = parse_script("load, fly, unload");
        assert!(matches!(
            err,
            Err(ElevatorError::InvalidTrigger { ref input, .. }) if input == "fly"
        ));
    }

    #[test]
    fn blank_script_is_rejected() {
        assert!(matches!(parse_script(" , ;\n"), Err(ElevatorError::EmptyScript)));
    }

    #[test]
    fn display_includes_floor() {
        assert_eq!(Trigger::Call(7).to_string(), "Call(7)");
        assert_eq!(Trigger::RestorePower.to_string(), "RestorePower");
    }
}
