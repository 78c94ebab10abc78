//! Whole sessions driven through the public API: input, tick, draw list

use cube_intercept::Settings;
use cube_intercept::consts::*;
use cube_intercept::sim::{
    Clock, Control, InputEvent, Key, ManualClock, Outcome, Rect, SessionPhase, SimulationState,
    apply_all, colors, draw_list, tick,
};

/// One host loop iteration at the classic 10 ms pace
fn step(
    state: &mut SimulationState,
    clock: &ManualClock,
    events: &[InputEvent],
) -> (Control, Option<Outcome>) {
    let control = apply_all(state, events.iter().copied());
    if control == Control::Quit {
        return (control, state.outcome());
    }
    clock.advance(TICK_MS);
    (control, tick(state, clock))
}

#[test]
fn idle_session_is_lost_when_the_enemy_lands() {
    let clock = ManualClock::new(0);
    let mut state = SimulationState::new(Settings::default(), 0);

    let mut outcome = None;
    let mut iterations = 0u64;
    while outcome.is_none() {
        outcome = step(&mut state, &clock, &[]).1;
        iterations += 1;
        assert!(iterations < 100_000, "session never ended");
    }

    assert_eq!(outcome, Some(Outcome::Lost));
    assert_eq!(state.phase, SessionPhase::Lost);
    // 16 drops of 30 px take the enemy from 0 to 480, past 455
    assert_eq!(state.enemy.rect.y, 480);
    assert_eq!(clock.now_ms(), 16 * DROP_INTERVAL_MS);
}

#[test]
fn firing_under_the_enemy_wins() {
    let clock = ManualClock::new(0);
    let mut state = SimulationState::new(Settings::default(), 0);

    // Heading right from x=100, the enemy is over x=420 when a shot fired
    // from the bottom climbs to y=100 (153 ticks later)
    state.enemy.rect = Rect::new(100, 100, CUBE_SIZE, CUBE_SIZE);

    // Slide the player to x=400, then fire
    let mut events = vec![InputEvent::KeyDown(Key::Right); 40];
    events.push(InputEvent::KeyDown(Key::Fire));
    let (control, outcome) = step(&mut state, &clock, &events);
    assert_eq!(control, Control::Continue);
    assert_eq!(outcome, None);
    assert_eq!(state.player.rect.x, 400);
    assert_eq!(state.projectiles.active_count(), 1);

    let mut outcome = None;
    for _ in 0..1000 {
        outcome = step(&mut state, &clock, &[]).1;
        if outcome.is_some() {
            break;
        }
    }

    assert_eq!(outcome, Some(Outcome::Won));
    assert_eq!(state.enemy.rect.y, ENEMY_OFFSCREEN_Y);
    assert_eq!(state.projectiles.active_count(), 0);

    // Frozen afterwards
    let frozen = state.enemy.clone();
    step(&mut state, &clock, &[InputEvent::KeyDown(Key::Left)]);
    assert_eq!(state.enemy, frozen);
    assert_eq!(state.player.rect.x, 400);
}

#[test]
fn quit_ends_the_loop_without_an_outcome() {
    let clock = ManualClock::new(0);
    let mut state = SimulationState::new(Settings::default(), 0);
    let (control, outcome) = step(
        &mut state,
        &clock,
        &[InputEvent::KeyDown(Key::Fire), InputEvent::Quit],
    );
    assert_eq!(control, Control::Quit);
    assert_eq!(outcome, None);
    assert!(state.is_running());
}

#[test]
fn rapid_fire_recycles_the_oldest_projectile() {
    let clock = ManualClock::new(0);
    let mut state = SimulationState::new(Settings::default(), 0);
    state.enemy.rect.x = 400;

    let volley = vec![InputEvent::KeyDown(Key::Fire); MAX_PROJECTILES + 3];
    step(&mut state, &clock, &volley);

    assert_eq!(state.projectiles.active_count(), MAX_PROJECTILES);
    assert_eq!(state.projectiles.cursor(), 3);

    let list = draw_list(&state);
    assert_eq!(list.len(), 2 + MAX_PROJECTILES);
    assert_eq!(list[0].color, colors::ENEMY);
    assert_eq!(list[1].color, colors::PLAYER);
    assert!(list[2..].iter().all(|c| c.color == colors::PROJECTILE));
}

#[test]
fn settings_from_json_drive_the_session() {
    let settings = Settings::from_json(r#"{ "drop_interval_ms": 100, "drop_distance": 100 }"#)
        .unwrap();
    let clock = ManualClock::new(0);
    let mut state = SimulationState::new(settings, 0);

    let mut outcome = None;
    for _ in 0..1000 {
        outcome = step(&mut state, &clock, &[]).1;
        if outcome.is_some() {
            break;
        }
    }
    // 0 -> 100 -> ... -> 500 >= 455 after five drops
    assert_eq!(outcome, Some(Outcome::Lost));
    assert_eq!(state.enemy.rect.y, 500);
}
