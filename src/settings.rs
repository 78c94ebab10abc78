//! Game settings
//!
//! Every gameplay tunable, with defaults matching the classic game. Both
//! hosts play with the defaults; JSON is the interchange format for tests
//! and embedders that build a session by hand.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Entities ===
    /// Edge length of the enemy and player cubes
    pub cube_size: i32,
    /// Edge length of a projectile
    pub projectile_size: i32,
    /// Projectile ring buffer capacity
    pub max_projectiles: usize,

    // === Motion ===
    pub player_step: i32,
    pub enemy_speed: i32,
    pub projectile_speed: i32,
    pub drop_interval_ms: u64,
    pub drop_distance: i32,

    // === Loop ===
    /// Delay between loop iterations (one simulation tick)
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            cube_size: CUBE_SIZE,
            projectile_size: SMALL_CUBE_SIZE,
            max_projectiles: MAX_PROJECTILES,

            player_step: PLAYER_STEP,
            enemy_speed: ENEMY_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            drop_interval_ms: DROP_INTERVAL_MS,
            drop_distance: DROP_DISTANCE,

            tick_ms: TICK_MS,
        }
    }
}

impl Settings {
    /// Largest accepted playfield edge, in pixels
    pub const MAX_SCREEN: i32 = 1 << 14;

    /// Largest accepted projectile capacity
    pub const MAX_CAPACITY: usize = 1 << 12;

    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would break the simulation's invariants
    ///
    /// Every distance ends up within `0..=MAX_SCREEN`, so positions stay
    /// far from `i32` limits.
    pub fn validated(mut self) -> Self {
        self.cube_size = self.cube_size.clamp(1, Self::MAX_SCREEN);
        self.projectile_size = self.projectile_size.clamp(1, Self::MAX_SCREEN);
        self.max_projectiles = self.max_projectiles.clamp(1, Self::MAX_CAPACITY);
        self.screen_width = self.screen_width.clamp(self.cube_size, Self::MAX_SCREEN);
        self.screen_height = self.screen_height.clamp(self.cube_size, Self::MAX_SCREEN);
        self.player_step = self.player_step.clamp(1, self.screen_width);
        self.enemy_speed = self.enemy_speed.clamp(1, self.screen_width);
        self.projectile_speed = self.projectile_speed.clamp(1, self.screen_height);
        self.drop_distance = self.drop_distance.clamp(0, self.screen_height);
        self.tick_ms = self.tick_ms.max(1);
        self
    }
}
