//! Cube Intercept - a single-screen arcade game
//!
//! A blue cube patrols the top of the screen and drops a little every few
//! seconds. The player slides a red cube along the bottom and fires green
//! projectiles upward; one hit wins, a landing cube loses.
//!
//! Core modules:
//! - `sim`: Simulation core (geometry, entities, input mapping, tick)
//! - `renderer`: WebGPU presenter for the browser build
//! - `terminal`: crossterm presenter and event source for native builds
//! - `settings`: Tunables with serde-backed loading

pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 640;
    pub const SCREEN_HEIGHT: i32 = 480;

    /// Enemy and player cube edge length
    pub const CUBE_SIZE: i32 = 50;
    /// Projectile edge length
    pub const SMALL_CUBE_SIZE: i32 = 10;
    /// Projectile ring buffer capacity
    pub const MAX_PROJECTILES: usize = 10;

    /// Player horizontal step per key press
    pub const PLAYER_STEP: i32 = 10;
    /// Enemy horizontal patrol speed (pixels per tick)
    pub const ENEMY_SPEED: i32 = 2;
    /// Projectile vertical speed (pixels per tick)
    pub const PROJECTILE_SPEED: i32 = 2;

    /// Wall-clock interval between enemy drops
    pub const DROP_INTERVAL_MS: u64 = 5000;
    /// Vertical distance of one enemy drop
    pub const DROP_DISTANCE: i32 = 30;

    /// Where a destroyed enemy is parked
    pub const ENEMY_OFFSCREEN_Y: i32 = -200;

    /// Delay between loop iterations
    pub const TICK_MS: u64 = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Window / document title
    pub const WINDOW_TITLE: &str = "Moving Cube";
}
