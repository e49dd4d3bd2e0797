//! Per-tick simulation advance.
//!
//! One call to [`tick`] advances exactly one discrete tick (conventionally
//! one per rendered frame). Order within a tick is fixed: player follow,
//! feedback decay, spawners, level refresh, box updates, piece updates,
//! purge, and a final level refresh so a catch that crosses a level boundary
//! takes effect the same tick while scoring with the pre-catch level.

use super::events::{GameEvent, MissNotice};
use super::spawn;
use super::state::{EntityLife, GamePhase, GameState};
use crate::catalog::GameDef;
use crate::complete_box_score;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Target horizontal position for the player cart (surface-local)
    pub target_x: Option<f32>,
    /// Discrete trigger edge: start/restart in menus, inspect while playing
    pub trigger: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Intro | GamePhase::GameOver => {
            if input.trigger {
                state.reset_session();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Smooth-follow the pointer target
    if let Some(target) = input.target_x {
        let width = state.width;
        state.player.move_toward(target, width);
    }

    // Feedback pulses decay before this tick's outcomes refresh them
    state.player.tick_feedback();

    spawn::run_spawners(state);
    refresh_level(state);

    update_boxes(state, input.trigger);
    update_pieces(state);
    purge_dead(state);

    // Catches this tick may have crossed a level boundary
    refresh_level(state);
}

/// Recompute the level from the catch count; emits on change.
///
/// Level is a pure function of `caught`, so this is idempotent and can never
/// lower the level within a session.
fn refresh_level(state: &mut GameState) {
    let level = state.caught / CATCHES_PER_LEVEL + 1;
    if level != state.level {
        state.level = level;
        state.spawn_interval = spawn::box_interval(level);
        state.box_timer = state.box_timer.min(state.spawn_interval);
        state.push_event(GameEvent::LevelChanged(level));
        log::info!("Level {level} (caught {})", state.caught);
    }
}

fn update_boxes(state: &mut GameState, trigger: bool) {
    let catch_y = state.catch_line();

    for i in 0..state.boxes.len() {
        if !state.boxes[i].life.is_falling() {
            continue;
        }

        {
            let b = &mut state.boxes[i];
            b.pos.y += b.vy;
            b.wobble_phase += b.wobble_speed;
        }

        let (bottom, top, center_x, size, game, incomplete, inspected) = {
            let b = &state.boxes[i];
            (b.bottom(), b.pos.y, b.center_x(), b.size, b.game, b.incomplete, b.inspected)
        };

        let in_reach = (center_x - state.player.x).abs() <= CATCH_RADIUS + size / 2.0;
        if bottom >= catch_y && in_reach {
            resolve_box_catch(state, game, incomplete);
            state.boxes[i].life = EntityLife::Dying { ticks: 0 };
            continue;
        }

        // Inspection is informational only and never consumes the box
        if trigger
            && !inspected
            && bottom >= state.height * INSPECT_MIN_Y_FRAC
            && (center_x - state.player.x).abs() <= INSPECT_REACH_X
        {
            state.boxes[i].inspected = true;
            state.push_event(GameEvent::BoxInspected { game_name: game.name, incomplete });
        }

        if top > state.height {
            // Only complete boxes cost a life; once the session is over no
            // further penalties apply this tick
            if !incomplete && state.phase == GamePhase::Playing {
                state.lives = state.lives.saturating_sub(1);
                state.player.groan();
                state.push_event(GameEvent::LivesChanged(state.lives));
                state.push_event(GameEvent::BoxMissed { game_name: game.name });
                if state.lives == 0 {
                    state.phase = GamePhase::GameOver;
                    state.push_event(GameEvent::PhaseChanged(GamePhase::GameOver));
                    if state.finalize_high_score() {
                        state.push_event(GameEvent::NewHighScore(state.score));
                    }
                    log::info!("Game over: score {}, best {}", state.score, state.high_score);
                }
            }
            state.boxes[i].life = EntityLife::Dying { ticks: 0 };
        }
    }
}

/// Catch-box resolution. The tie-break policy is deliberate:
/// a complete box scores with the current level, an incomplete box pays the
/// flat bonus when the bag holds its piece and a consolation score otherwise.
fn resolve_box_catch(state: &mut GameState, game: &'static GameDef, incomplete: bool) {
    if !incomplete {
        state.score += complete_box_score(state.level);
        state.caught += 1;
        state.player.cheer();
        state.push_event(GameEvent::ScoreChanged(state.score));
        return;
    }

    let piece = game.required_piece();
    if state.bag.take(piece.id) {
        state.score += SCORE_COMPLETED_BONUS;
        state.caught += 1;
        state.player.cheer();
        state.push_event(GameEvent::ScoreChanged(state.score));
        state.push_event(GameEvent::BoxCompleted { game_name: game.name });
        state.push_event(GameEvent::BagChanged(state.bag.kinds().to_vec()));
    } else {
        state.score += SCORE_MISSING_PIECE;
        state.caught += 1;
        state.player.groan();
        let notice = MissNotice {
            game_name: game.name,
            piece_name: piece.name,
            piece_glyph: piece.glyph,
        };
        state.last_miss = Some(notice);
        state.push_event(GameEvent::ScoreChanged(state.score));
        state.push_event(GameEvent::MissingPiece(notice));
    }
}

fn update_pieces(state: &mut GameState) {
    let catch_y = state.catch_line();

    for i in 0..state.pieces.len() {
        if !state.pieces[i].life.is_falling() {
            continue;
        }

        {
            let p = &mut state.pieces[i];
            p.pos.y += p.vy;
            p.wobble_phase += p.wobble_speed;
        }

        let (bottom, top, center_x, size, kind) = {
            let p = &state.pieces[i];
            (p.bottom(), p.pos.y, p.center_x(), p.size, p.kind)
        };

        let in_reach = (center_x - state.player.x).abs() <= CATCH_RADIUS + size / 2.0;
        if bottom >= catch_y && in_reach {
            if state.bag.push(kind.id) {
                state.score += SCORE_PIECE;
                state.player.smile();
                state.push_event(GameEvent::ScoreChanged(state.score));
                state.push_event(GameEvent::BagChanged(state.bag.kinds().to_vec()));
            } else {
                state.push_event(GameEvent::BagFull);
            }
            state.pieces[i].life = EntityLife::Dying { ticks: 0 };
            continue;
        }

        // Dropped pieces just vanish, no penalty
        if top > state.height {
            state.pieces[i].life = EntityLife::Dying { ticks: 0 };
        }
    }
}

/// Advance death animations and remove entities whose timer has run out.
/// An entity is never removed mid-animation.
fn purge_dead(state: &mut GameState) {
    for b in &mut state.boxes {
        if let EntityLife::Dying { ticks } = &mut b.life {
            *ticks += 1;
        }
    }
    state
        .boxes
        .retain(|b| !matches!(b.life, EntityLife::Dying { ticks } if ticks > BOX_DEATH_TICKS));

    for p in &mut state.pieces {
        if let EntityLife::Dying { ticks } = &mut p.life {
            *ticks += 1;
        }
    }
    state
        .pieces
        .retain(|p| !matches!(p.life, EntityLife::Dying { ticks } if ticks > PIECE_DEATH_TICKS));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{game_by_id, piece_by_id};
    use crate::highscore::{ScoreStore, StoreError};
    use crate::sim::state::{FallingBox, FallingPiece};
    use crate::MemoryScoreStore;
    use glam::Vec2;
    use proptest::prelude::*;

    fn test_state() -> GameState {
        GameState::new(480.0, 640.0, 42, Box::new(MemoryScoreStore::default()))
    }

    fn playing_state() -> GameState {
        let mut state = test_state();
        state.reset_session();
        state.take_events();
        state
    }

    /// A box one tick above the catch line, centered on the player
    fn box_on_player(state: &GameState, game_id: &str, incomplete: bool) -> FallingBox {
        let game = game_by_id(game_id).expect("unknown game id");
        FallingBox {
            pos: Vec2::new(state.player.x - BOX_SIZE / 2.0, state.catch_line() - BOX_SIZE - 1.0),
            size: BOX_SIZE,
            game,
            incomplete,
            vy: 5.0,
            wobble_phase: 0.0,
            wobble_speed: 0.0,
            inspected: false,
            life: EntityLife::Falling,
        }
    }

    /// A complete box about to cross the bottom edge, away from the player
    fn box_escaping(state: &GameState, game_id: &str, incomplete: bool) -> FallingBox {
        let mut b = box_on_player(state, game_id, incomplete);
        b.pos.x = 2.0; // player starts centered, so this is out of reach
        b.pos.y = state.height - 2.0;
        b
    }

    fn piece_on_player(state: &GameState, kind_id: &str) -> FallingPiece {
        let kind = piece_by_id(kind_id).expect("unknown piece id");
        FallingPiece {
            pos: Vec2::new(state.player.x - PIECE_SIZE / 2.0, state.catch_line() - PIECE_SIZE - 1.0),
            size: PIECE_SIZE,
            kind,
            vy: 5.0,
            wobble_phase: 0.0,
            wobble_speed: 0.0,
            life: EntityLife::Falling,
        }
    }

    #[test]
    fn intro_starts_on_trigger_only() {
        let mut state = test_state();
        assert_eq!(state.phase, GamePhase::Intro);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput { trigger: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
    }

    #[test]
    fn player_follows_target_with_smoothing() {
        let mut state = playing_state();
        let start = state.player.x;
        tick(&mut state, &TickInput { target_x: Some(400.0), trigger: false });
        let expected = start + (400.0 - start) * PLAYER_LERP;
        assert!((state.player.x - expected).abs() < 1e-4);
        // Clamped at the playfield edge
        for _ in 0..500 {
            tick(&mut state, &TickInput { target_x: Some(10_000.0), trigger: false });
        }
        assert!(state.player.x <= state.width - PLAYER_HALF_WIDTH + 1e-3);
    }

    #[test]
    fn scenario_a_complete_box_at_level_1() {
        let mut state = playing_state();
        let b = box_on_player(&state, "catane", false);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 12);
        assert_eq!(state.caught, 1);
        assert_eq!(state.level, 1);
        assert!(state.take_events().contains(&GameEvent::ScoreChanged(12)));
    }

    #[test]
    fn scenario_b_sixth_catch_levels_up_same_tick() {
        let mut state = playing_state();
        state.caught = 5;
        let b = box_on_player(&state, "dixit", false);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.caught, 6);
        assert_eq!(state.level, 2);
        // Scored with the level in effect at the moment of the catch
        assert_eq!(state.score, 12);
        assert!(state.take_events().contains(&GameEvent::LevelChanged(2)));
    }

    #[test]
    fn scenario_c_incomplete_box_resolved_from_bag() {
        let mut state = playing_state();
        state.bag.push("wood-ox");
        let b = box_on_player(&state, "agricola", true);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 25);
        assert_eq!(state.caught, 1);
        assert!(state.bag.is_empty());
        let events = state.take_events();
        assert!(events.contains(&GameEvent::BoxCompleted { game_name: "Agricola" }));
        assert!(events.contains(&GameEvent::BagChanged(Vec::new())));
    }

    #[test]
    fn scenario_d_incomplete_box_without_piece() {
        let mut state = playing_state();
        let b = box_on_player(&state, "splendor", true);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 2);
        assert!(state.bag.is_empty());
        let miss = state.last_miss.expect("miss notice recorded");
        assert_eq!(miss.game_name, "Splendor");
        assert_eq!(miss.piece_name, "Jeton or");
        assert_eq!(miss.piece_glyph, "🪙");
        assert!(state.take_events().contains(&GameEvent::MissingPiece(miss)));
    }

    #[test]
    fn scenario_e_last_life_lost_ends_session() {
        let mut state = playing_state();
        state.lives = 1;
        let b = box_escaping(&state, "azul", false);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));
        assert!(events.contains(&GameEvent::BoxMissed { game_name: "Azul" }));
    }

    #[test]
    fn scenario_f_full_bag_rejects_piece() {
        let mut state = playing_state();
        for _ in 0..5 {
            state.bag.push("blue-tile");
        }
        let p = piece_on_player(&state, "gold-token");
        state.pieces.push(p);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.bag.len(), 5);
        assert_eq!(state.score, 0);
        assert!(state.take_events().contains(&GameEvent::BagFull));
    }

    #[test]
    fn caught_piece_is_banked_for_points() {
        let mut state = playing_state();
        let p = piece_on_player(&state, "red-wagon");
        state.pieces.push(p);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, 3);
        assert_eq!(state.bag.kinds(), &["red-wagon"]);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::BagChanged(vec!["red-wagon"]))
        );
    }

    #[test]
    fn incomplete_box_falls_off_without_penalty() {
        let mut state = playing_state();
        let b = box_escaping(&state, "pandemie", true);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(matches!(state.boxes[0].life, EntityLife::Dying { .. }));
    }

    #[test]
    fn dropped_piece_costs_nothing() {
        let mut state = playing_state();
        let mut p = piece_on_player(&state, "gold-die");
        p.pos.x = 2.0;
        p.pos.y = state.height - 1.0;
        state.pieces.push(p);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
        assert!(matches!(state.pieces[0].life, EntityLife::Dying { .. }));
    }

    #[test]
    fn inspection_reveals_without_scoring() {
        let mut state = playing_state();
        let mut b = box_on_player(&state, "carcassonne", true);
        b.pos.y = state.height * 0.5;
        state.boxes.push(b);

        tick(&mut state, &TickInput { trigger: true, ..Default::default() });

        assert!(state.boxes[0].inspected);
        assert_eq!(state.score, 0);
        assert_eq!(state.caught, 0);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::BoxInspected {
            game_name: "Carcassonne",
            incomplete: true
        }));

        // A second trigger does not re-reveal
        tick(&mut state, &TickInput { trigger: true, ..Default::default() });
        let events = state.take_events();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::BoxInspected { .. })));
    }

    #[test]
    fn inspection_ignores_boxes_out_of_reach() {
        let mut state = playing_state();
        let mut b = box_on_player(&state, "carcassonne", true);
        b.pos.y = state.height * 0.5;
        b.pos.x = state.player.x + INSPECT_REACH_X + BOX_SIZE;
        state.boxes.push(b);

        tick(&mut state, &TickInput { trigger: true, ..Default::default() });
        assert!(!state.boxes[0].inspected);
    }

    #[test]
    fn death_animation_runs_full_length_before_purge() {
        let mut state = playing_state();
        let b = box_on_player(&state, "catane", false);
        state.boxes.push(b);

        // Catch tick: the box enters Dying but stays in the collection
        tick(&mut state, &TickInput::default());
        assert_eq!(state.boxes.len(), 1);

        for _ in 0..BOX_DEATH_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.boxes.len(), 1, "removed mid-animation");
        }
        tick(&mut state, &TickInput::default());
        assert!(state.boxes.is_empty());
    }

    #[test]
    fn two_misses_on_last_life_end_the_session_once() {
        let mut state = playing_state();
        state.lives = 1;
        let b1 = box_escaping(&state, "azul", false);
        let mut b2 = box_escaping(&state, "dixit", false);
        b2.pos.x = 60.0;
        state.boxes.push(b1);
        state.boxes.push(b2);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, 0);
        let events = state.take_events();
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PhaseChanged(GamePhase::GameOver)))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn game_over_records_and_persists_new_best() {
        let mut state = playing_state();
        state.score = 150;
        state.lives = 1;
        let b = box_escaping(&state, "catane", false);
        state.boxes.push(b);

        tick(&mut state, &TickInput::default());

        assert_eq!(state.high_score, 150);
        assert!(state.take_events().contains(&GameEvent::NewHighScore(150)));
    }

    #[test]
    fn restart_resets_session_but_keeps_best() {
        let mut state = playing_state();
        state.score = 150;
        state.lives = 1;
        state.caught = 14;
        state.level = 3;
        state.bag.push("gold-token");
        let b = box_escaping(&state, "catane", false);
        state.boxes.push(b);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        state.take_events();

        tick(&mut state, &TickInput { trigger: true, ..Default::default() });

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.caught, 0);
        assert!(state.bag.is_empty());
        assert!(state.boxes.is_empty());
        assert!(state.pieces.is_empty());
        assert!(state.last_miss.is_none());
        assert_eq!(state.high_score, 150);
    }

    #[test]
    fn failing_store_never_interrupts_the_game() {
        #[derive(Debug)]
        struct FailingStore;
        impl ScoreStore for FailingStore {
            fn load(&self) -> Option<u32> {
                None
            }
            fn save(&mut self, _score: u32) -> Result<(), StoreError> {
                Err(StoreError::Unavailable)
            }
        }

        let mut state = GameState::new(480.0, 640.0, 42, Box::new(FailingStore));
        // Read failure defaults to "no prior best"
        assert_eq!(state.high_score, 0);

        state.reset_session();
        state.score = 99;
        state.lives = 1;
        let b = box_escaping(&state, "azul", false);
        state.boxes.push(b);
        tick(&mut state, &TickInput::default());

        // Write failed silently; the in-memory best still updated
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 99);
    }

    #[test]
    #[should_panic(expected = "below minimum")]
    fn zero_sized_playfield_fails_fast() {
        let _ = GameState::new(0.0, 640.0, 1, Box::new(MemoryScoreStore::default()));
    }

    #[test]
    #[should_panic(expected = "below minimum")]
    fn narrow_playfield_rejected_at_construction() {
        // Wide enough to pass a naive positivity check, too narrow for the
        // cart or a box spawn; must be refused here, not at the first spawn
        let _ = GameState::new(40.0, 640.0, 1, Box::new(MemoryScoreStore::default()));
    }

    #[test]
    #[should_panic(expected = "too shallow")]
    fn shallow_playfield_rejected_at_construction() {
        let _ = GameState::new(480.0, 50.0, 1, Box::new(MemoryScoreStore::default()));
    }

    #[test]
    fn minimal_playfield_ticks_safely() {
        let mut state = GameState::new(
            PLAYER_HALF_WIDTH * 2.0,
            CATCH_LINE_MARGIN + 1.0,
            7,
            Box::new(MemoryScoreStore::default()),
        );
        state.reset_session();
        for t in 0..300u32 {
            let input = TickInput { target_x: Some(t as f32), trigger: t % 50 == 0 };
            tick(&mut state, &input);
        }
    }

    #[test]
    fn same_seed_same_session() {
        let mut a = playing_state();
        let mut b = playing_state();
        let input = TickInput { target_x: Some(120.0), trigger: false };
        for _ in 0..600 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.boxes.len(), b.boxes.len());
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        for (x, y) in a.boxes.iter().zip(&b.boxes) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.game.id, y.game.id);
        }
    }

    proptest! {
        /// Invariants hold under arbitrary seeds and input sequences
        #[test]
        fn invariants_hold(seed in any::<u64>(), steps in 0usize..500, targets in proptest::collection::vec(0.0f32..480.0, 0..500)) {
            let mut state = GameState::new(480.0, 640.0, seed, Box::new(MemoryScoreStore::default()));
            state.reset_session();

            for i in 0..steps {
                let input = TickInput {
                    target_x: targets.get(i).copied(),
                    trigger: i % 37 == 0,
                };
                tick(&mut state, &input);

                prop_assert!(state.lives <= START_LIVES);
                prop_assert!(state.bag.len() <= BAG_CAPACITY);
                prop_assert_eq!(state.level, state.caught / CATCHES_PER_LEVEL + 1);
                if state.lives == 0 {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
                prop_assert!(
                    state.player.x >= PLAYER_HALF_WIDTH - 1e-3
                        && state.player.x <= state.width - PLAYER_HALF_WIDTH + 1e-3
                );
            }
        }
    }
}
