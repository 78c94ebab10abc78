//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform code:
//! - Time only through the injected [`Clock`]
//! - Fixed-capacity storage, stable slot order
//! - Hosts feed [`InputEvent`]s in and read [`draw_list`] out

pub mod clock;
pub mod frame;
pub mod input;
pub mod rect;
pub mod state;
pub mod tick;

pub use clock::{Clock, FixedStep, ManualClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::MonotonicClock;
pub use frame::{Color, DrawCommand, colors, draw_list};
pub use input::{Control, InputEvent, Key, apply_all, apply_input};
pub use rect::{Rect, intersects};
pub use state::{
    Direction, EnemyCube, Outcome, PlayerCube, Projectile, ProjectilePool, SessionPhase,
    SimulationState,
};
pub use tick::tick;
