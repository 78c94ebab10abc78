//! Input mapping
//!
//! Turns discrete host events into immediate state changes. There is no
//! intent queue: each event is applied in delivery order.

use serde::{Deserialize, Serialize};

use super::state::SimulationState;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Fire,
}

/// A discrete event from the host's event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Window closed or user asked to leave
    Quit,
    KeyDown(Key),
}

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Apply one event to the state
///
/// Movement and firing are ignored once the session has ended; `Quit` is
/// always honoured.
pub fn apply_input(state: &mut SimulationState, event: InputEvent) -> Control {
    match event {
        InputEvent::Quit => return Control::Quit,
        InputEvent::KeyDown(_) if !state.is_running() => {}
        InputEvent::KeyDown(Key::Left) => state.move_player(-state.settings.player_step),
        InputEvent::KeyDown(Key::Right) => state.move_player(state.settings.player_step),
        InputEvent::KeyDown(Key::Fire) => {
            state.fire();
        }
    }
    Control::Continue
}

/// Drain every pending event; stops early on `Quit`
pub fn apply_all<I>(state: &mut SimulationState, events: I) -> Control
where
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        if apply_input(state, event) == Control::Quit {
            log::info!("Quit requested");
            return Control::Quit;
        }
    }
    Control::Continue
}
