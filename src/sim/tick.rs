//! Simulation tick
//!
//! Advances the session by one loop iteration. Sub-steps run in a fixed
//! order and later ones observe earlier mutations:
//! drop, patrol, loss check, projectiles.

use super::clock::Clock;
use super::state::{Direction, EnemyCube, Outcome, SessionPhase, SimulationState};
use crate::consts::ENEMY_OFFSCREEN_Y;
use crate::settings::Settings;

/// Advance the game state by one tick
///
/// Returns the outcome if the session is over after this tick. Calling
/// `tick` on a finished session changes nothing.
pub fn tick(state: &mut SimulationState, clock: &impl Clock) -> Option<Outcome> {
    if !state.is_running() {
        return state.outcome();
    }
    state.time_ticks += 1;

    drop_enemy(&mut state.enemy, &state.settings, clock.now_ms());
    patrol_enemy(&mut state.enemy, &state.settings);

    // Landed: nothing else moves this tick
    let loss_line = state.settings.screen_height - state.enemy.rect.h / 2;
    if state.enemy.rect.y >= loss_line {
        state.phase = SessionPhase::Lost;
        log::info!("Enemy landed at y={} after {} ticks", state.enemy.rect.y, state.time_ticks);
        return state.outcome();
    }

    advance_projectiles(state);
    state.outcome()
}

/// Drop the enemy once per elapsed interval of wall-clock time
fn drop_enemy(enemy: &mut EnemyCube, settings: &Settings, now_ms: u64) {
    if now_ms.saturating_sub(enemy.last_drop_ms) >= settings.drop_interval_ms {
        enemy.rect.y = enemy.rect.y.saturating_add(settings.drop_distance);
        enemy.last_drop_ms = now_ms;
        log::debug!("Enemy dropped to y={}", enemy.rect.y);
    }
}

/// Ping-pong between the left and right screen edges
fn patrol_enemy(enemy: &mut EnemyCube, settings: &Settings) {
    let max_x = (settings.screen_width - enemy.rect.w).max(0);
    match enemy.direction {
        Direction::Right => {
            enemy.rect.x = enemy.rect.x.saturating_add(settings.enemy_speed).min(max_x);
            if enemy.rect.x >= max_x {
                enemy.direction = Direction::Left;
            }
        }
        Direction::Left => {
            enemy.rect.x = enemy.rect.x.saturating_sub(settings.enemy_speed).max(0);
            if enemy.rect.x <= 0 {
                enemy.direction = Direction::Right;
            }
        }
    }
}

/// Move projectiles up; the first one to touch the enemy wins the game
fn advance_projectiles(state: &mut SimulationState) {
    let enemy_rect = state.enemy.rect;
    let speed = state.settings.projectile_speed;
    let mut hit = false;

    for projectile in state.projectiles.iter_mut().filter(|p| p.active) {
        projectile.rect.y = projectile.rect.y.saturating_sub(speed);

        if projectile.rect.intersects(&enemy_rect) {
            projectile.active = false;
            projectile.rect.y = -projectile.rect.h;
            hit = true;
            break;
        }
        if projectile.rect.y <= 0 {
            projectile.active = false;
        }
    }

    if hit {
        state.enemy.rect.y = ENEMY_OFFSCREEN_Y;
        state.phase = SessionPhase::Won;
        log::info!("Enemy hit after {} ticks", state.time_ticks);
    }
}
