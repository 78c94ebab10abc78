//! Per-frame draw list handed to whichever presenter the host uses

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::SimulationState;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for GPU vertices
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            1.0,
        ]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const ENEMY: Color = Color::rgb(0x00, 0x00, 0xFF);
    pub const PLAYER: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const PROJECTILE: Color = Color::rgb(0x00, 0xFF, 0x00);
}

/// Fill `rect` with `color`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub rect: Rect,
    pub color: Color,
}

/// Draw commands for the current state, back to front:
/// enemy, player, then each active projectile in slot order
pub fn draw_list(state: &SimulationState) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2 + state.projectiles.capacity());
    commands.push(DrawCommand {
        rect: state.enemy.rect,
        color: colors::ENEMY,
    });
    commands.push(DrawCommand {
        rect: state.player.rect,
        color: colors::PLAYER,
    });
    commands.extend(state.projectiles.active().map(|p| DrawCommand {
        rect: p.rect,
        color: colors::PROJECTILE,
    }));
    commands
}
