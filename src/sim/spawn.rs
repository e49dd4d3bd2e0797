//! Entity spawning: when new boxes and pieces appear, and with what.
//!
//! Cadence is countdown-based and level-dependent; all randomness draws from
//! the state-owned RNG so a fixed seed reproduces the whole session.

use glam::Vec2;
use rand::Rng;

use super::state::{EntityLife, FallingBox, FallingPiece, GameState};
use crate::catalog::{GAMES, PIECES};
use crate::consts::*;

/// Box spawn countdown for a level, floored
pub fn box_interval(level: u32) -> u32 {
    BOX_INTERVAL_BASE
        .saturating_sub(level.saturating_sub(1) * BOX_INTERVAL_STEP)
        .max(BOX_INTERVAL_MIN)
}

/// Piece spawn countdown for a level: `max(85, 175 - level*10)`
pub fn piece_interval(level: u32) -> u32 {
    175u32.saturating_sub(level * 10).max(85)
}

/// Probability that a freshly spawned box is incomplete, capped
pub fn incomplete_chance(level: u32) -> f64 {
    (INCOMPLETE_BASE + f64::from(level) * INCOMPLETE_PER_LEVEL).min(INCOMPLETE_CAP)
}

/// Run both spawn countdowns for one tick
pub(crate) fn run_spawners(state: &mut GameState) {
    if state.box_timer > 0 {
        state.box_timer -= 1;
    }
    if state.box_timer == 0 {
        spawn_box(state);
        // Past the threshold level, sometimes a second box drops at once
        if state.level >= SECOND_BOX_LEVEL && state.rng.random_bool(SECOND_BOX_CHANCE) {
            spawn_box(state);
        }
        state.box_timer = state.spawn_interval;
    }

    if state.piece_timer > 0 {
        state.piece_timer -= 1;
    }
    if state.piece_timer == 0 {
        spawn_piece(state);
        state.piece_timer = piece_interval(state.level);
    }
}

/// Spawn one falling box above the top edge
pub fn spawn_box(state: &mut GameState) {
    let game = &GAMES[state.rng.random_range(0..GAMES.len())];
    let x = state.rng.random_range(0.0..state.width - BOX_SIZE);
    let incomplete = state.rng.random_bool(incomplete_chance(state.level));
    let vy = 1.4 + state.level as f32 * 0.25 + state.rng.random_range(0.0..0.8);
    let wobble_phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let wobble_speed = state.rng.random_range(0.05..0.12);

    state.boxes.push(FallingBox {
        pos: Vec2::new(x, -BOX_SIZE),
        size: BOX_SIZE,
        game,
        incomplete,
        vy,
        wobble_phase,
        wobble_speed,
        inspected: false,
        life: EntityLife::Falling,
    });
}

/// Spawn one falling piece above the top edge
pub fn spawn_piece(state: &mut GameState) {
    let kind = &PIECES[state.rng.random_range(0..PIECES.len())];
    let x = state.rng.random_range(0.0..state.width - PIECE_SIZE);
    let vy = 1.7 + state.level as f32 * 0.18 + state.rng.random_range(0.0..0.7);
    let wobble_phase = state.rng.random_range(0.0..std::f32::consts::TAU);
    let wobble_speed = state.rng.random_range(0.06..0.14);

    state.pieces.push(FallingPiece {
        pos: Vec2::new(x, -PIECE_SIZE),
        size: PIECE_SIZE,
        kind,
        vy,
        wobble_phase,
        wobble_speed,
        life: EntityLife::Falling,
    });
}
