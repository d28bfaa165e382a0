use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fs::File,
    io::Write,
    path::Path,
};

use crate::{
    elevator::{Elevator, TransitionRecord},
    error::Result,
    state::ElevatorState,
    transition::{self, Cabin, GROUND_FLOOR, Transition, Variant},
    trigger::Trigger,
};

/// Every state paired with one trigger of each kind, evaluated from a calm
/// cabin and from an overloaded one
#[must_use]
pub fn transition_table(variant: Variant) -> Vec<Transition> {
    let calm = Cabin::default();
    let heavy = Cabin { overloaded: true, ..calm };
    let other_floor = GROUND_FLOOR.saturating_add(1);

    let mut table = Vec::new();
    for state in ElevatorState::ALL {
        for cabin in [calm, heavy] {
            for trigger in Trigger::KINDS {
                let trigger = match trigger {
                    Trigger::Call(_) => Trigger::Call(other_floor),
                    other => other,
                };
                table.push(transition::apply(variant, state, trigger, cabin));
            }
        }
    }
    table
}

/// Distinct `(from, trigger name, to)` edges that change something
fn edges(variant: Variant) -> BTreeSet<(ElevatorState, &'static str, ElevatorState)> {
    transition_table(variant)
        .into_iter()
        .filter(|t| !t.is_noop())
        .map(|t| (t.from, t.trigger.name(), t.to))
        .collect()
}

/// Generate a DOT graph of the machine with the elevator's current state
/// highlighted
#[must_use]
pub fn generate_dot(elevator: &Elevator) -> String {
    let mut dot = String::from("digraph elevator {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

    for state in ElevatorState::ALL {
        if state == elevator.state() {
            dot.push_str(&format!(
                "  {state} [label=\"{state}\", fillcolor=palegreen, peripheries=2];\n"
            ));
        } else {
            dot.push_str(&format!("  {state} [label=\"{state}\"];\n"));
        }
    }

    for (from, trigger, to) in edges(elevator.variant()) {
        dot.push_str(&format!("  {from} -> {to} [label=\"{trigger}\"];\n"));
    }

    dot.push_str("}\n");
    dot
}

/// Save a DOT representation to a file
///
/// # Errors
///
/// Returns `ElevatorError::Io` if the file cannot be created or written to
pub fn save_dot_to_file(dot: &str, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(dot.as_bytes())?;
    Ok(())
}

/// Markdown table of history entries
#[must_use]
pub fn history_table(history: &VecDeque<TransitionRecord>) -> String {
    let mut table = String::from("| # | From | Cause | To | Floor | Overloaded |\n");
    table.push_str("|---|------|-------|----|-------|------------|\n");

    let mut rows = 0_usize;
    for (i, record) in history.iter().enumerate() {
        rows = i.saturating_add(1);
        table.push_str(&format!(
            "| {rows} | {} | {} | {} | {} | {} |\n",
            record.from, record.cause, record.to, record.floor, record.overloaded
        ));
    }

    if rows == 0 {
        return "No transitions recorded yet.".to_string();
    }
    table
}

/// How many history entries ended in each state
#[must_use]
pub fn visit_counts(history: &VecDeque<TransitionRecord>) -> BTreeMap<ElevatorState, usize> {
    let mut counts = BTreeMap::new();
    for record in history {
        let count: &mut usize = counts.entry(record.to).or_default();
        *count = count.saturating_add(1);
    }
    counts
}
