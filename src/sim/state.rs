//! Game state and entity store
//!
//! One enemy cube, one player cube and a fixed ring of projectiles. All
//! state lives in [`SimulationState`]; nothing is global.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::Settings;

/// Session lifecycle; `Won` and `Lost` are absorbing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Running,
    Won,
    Lost,
}

/// Terminal result of a session, reported once to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Message box title
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::Won => "You win!",
            Outcome::Lost => "Game Over",
        }
    }

    /// Message box body
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "Congratulations! You won the game.",
            Outcome::Lost => "Sorry, you lost the game.",
        }
    }
}

/// Horizontal patrol direction of the enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Right,
    Left,
}

/// The falling, patrolling target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyCube {
    pub rect: Rect,
    pub direction: Direction,
    /// Clock reading (ms) of the last drop, or of session start
    pub last_drop_ms: u64,
}

/// The player's cannon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCube {
    pub rect: Rect,
}

/// A projectile slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub active: bool,
}

/// Fixed-capacity ring of projectiles
///
/// Spawning always succeeds: the slot under the cursor is overwritten,
/// in flight or not, and the cursor advances modulo capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
    cursor: usize,
}

impl ProjectilePool {
    /// Create a pool of `capacity` inactive projectiles of edge `size`
    pub fn new(capacity: usize, size: i32) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: vec![
                Projectile {
                    rect: Rect::new(0, 0, size, size),
                    active: false,
                };
                capacity
            ],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot the next spawn will write
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Place a projectile with its top-left at the origin and return its slot
    pub fn spawn(&mut self, origin_x: i32, origin_y: i32) -> usize {
        let slot = self.cursor;
        if let Some(projectile) = self.slots.get_mut(slot) {
            projectile.rect.x = origin_x;
            projectile.rect.y = origin_y;
            projectile.active = true;
        }
        self.cursor = (self.cursor + 1) % self.slots.len();
        slot
    }

    pub fn get(&self, slot: usize) -> Option<&Projectile> {
        self.slots.get(slot)
    }

    /// All slots in index order
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.slots.iter_mut()
    }

    /// Active projectiles in slot order
    pub fn active(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| p.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub settings: Settings,
    pub enemy: EnemyCube,
    pub player: PlayerCube,
    pub projectiles: ProjectilePool,
    pub phase: SessionPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimulationState {
    /// Start a session at clock time `now_ms`
    ///
    /// The enemy starts in the top-left corner heading right; the player
    /// starts at the left edge, half sunk below the bottom of the screen.
    pub fn new(settings: Settings, now_ms: u64) -> Self {
        let settings = settings.validated();
        let size = settings.cube_size;

        Self {
            enemy: EnemyCube {
                rect: Rect::new(0, 0, size, size),
                direction: Direction::Right,
                last_drop_ms: now_ms,
            },
            player: PlayerCube {
                rect: Rect::new(0, settings.screen_height - size / 2, size, size),
            },
            projectiles: ProjectilePool::new(settings.max_projectiles, settings.projectile_size),
            phase: SessionPhase::Running,
            time_ticks: 0,
            settings,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// The terminal outcome, once the session has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            SessionPhase::Running => None,
            SessionPhase::Won => Some(Outcome::Won),
            SessionPhase::Lost => Some(Outcome::Lost),
        }
    }

    /// Shift the player horizontally, clamped to the screen
    pub fn move_player(&mut self, dx: i32) {
        let max_x = (self.settings.screen_width - self.player.rect.w).max(0);
        self.player.rect.x = self.player.rect.x.saturating_add(dx).clamp(0, max_x);
    }

    /// Fire a projectile centred on the player; returns the slot used
    pub fn fire(&mut self) -> usize {
        let size = self.settings.projectile_size;
        let origin_x = self.player.rect.center_x() - size / 2;
        let origin_y = self.player.rect.y;
        let slot = self.projectiles.spawn(origin_x, origin_y);
        log::debug!("Projectile fired from slot {} at x={}", slot, origin_x);
        slot
    }
}
