//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bag::Bag;
use super::events::{GameEvent, MissNotice};
use crate::catalog::{GameDef, PieceKind};
use crate::consts::*;
use crate::highscore::ScoreStore;
use crate::lerp;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the first trigger
    Intro,
    /// Active gameplay
    Playing,
    /// Session ended, trigger restarts
    GameOver,
}

/// Entity lifecycle. An entity is purged only after its death animation
/// has run its full course, never mid-animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLife {
    /// Falling and interactive
    Falling,
    /// Playing its death animation; `ticks` counts up from 0
    Dying { ticks: u32 },
}

impl EntityLife {
    /// Whether the entity still reacts to catches and misses
    pub fn is_falling(&self) -> bool {
        matches!(self, EntityLife::Falling)
    }
}

/// A falling game box
#[derive(Debug, Clone)]
pub struct FallingBox {
    pub pos: Vec2,
    pub size: f32,
    pub game: &'static GameDef,
    /// Set at spawn; incomplete boxes need their piece from the bag
    pub incomplete: bool,
    /// Vertical velocity in pixels per tick
    pub vy: f32,
    /// Cosmetic horizontal oscillation
    pub wobble_phase: f32,
    pub wobble_speed: f32,
    /// Whether the player already peeked inside
    pub inspected: bool,
    pub life: EntityLife,
}

impl FallingBox {
    /// Horizontal center
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    /// Lowest point of the box
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    /// Cosmetic x offset for rendering, not used by collision
    pub fn wobble_offset(&self) -> f32 {
        self.wobble_phase.cos() * WOBBLE_AMPLITUDE
    }
}

/// A falling collectible piece
#[derive(Debug, Clone)]
pub struct FallingPiece {
    pub pos: Vec2,
    pub size: f32,
    pub kind: &'static PieceKind,
    pub vy: f32,
    pub wobble_phase: f32,
    pub wobble_speed: f32,
    pub life: EntityLife,
}

impl FallingPiece {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size
    }

    pub fn wobble_offset(&self) -> f32 {
        self.wobble_phase.cos() * WOBBLE_AMPLITUDE
    }
}

/// The player's cart
#[derive(Debug, Clone)]
pub struct Player {
    /// Horizontal center position
    pub x: f32,
    /// Positive feedback pulse, ticks remaining
    pub happy_ticks: u32,
    /// Negative feedback pulse, ticks remaining
    pub sad_ticks: u32,
}

impl Player {
    /// Smooth-follow toward the target x, clamped to the playfield
    pub fn move_toward(&mut self, target_x: f32, width: f32) {
        let target = target_x.clamp(PLAYER_HALF_WIDTH, width - PLAYER_HALF_WIDTH);
        self.x = lerp(self.x, target, PLAYER_LERP);
    }

    /// Count feedback pulses down by one tick
    pub fn tick_feedback(&mut self) {
        self.happy_ticks = self.happy_ticks.saturating_sub(1);
        self.sad_ticks = self.sad_ticks.saturating_sub(1);
    }

    /// Weaker positive pulse, used for banked pieces
    pub fn smile(&mut self) {
        self.happy_ticks = self.happy_ticks.max(HAPPY_TICKS / 2);
    }

    pub fn cheer(&mut self) {
        self.happy_ticks = HAPPY_TICKS;
        self.sad_ticks = 0;
    }

    pub fn groan(&mut self) {
        self.sad_ticks = SAD_TICKS;
        self.happy_ticks = 0;
    }
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Playfield width, fixed at construction
    pub width: f32,
    /// Playfield height, fixed at construction
    pub height: f32,
    /// Current phase
    pub phase: GamePhase,
    /// Session score, monotonic within a session
    pub score: u32,
    /// Lives remaining, 0..=3
    pub lives: u8,
    /// Difficulty tier, pure function of `caught`
    pub level: u32,
    /// Boxes caught this session
    pub caught: u32,
    /// Best score across sessions, loaded from the store at construction
    pub high_score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player cart
    pub player: Player,
    /// Box spawn countdown
    pub box_timer: u32,
    /// Countdown reload value, follows the level
    pub spawn_interval: u32,
    /// Piece spawn countdown
    pub piece_timer: u32,
    /// Active boxes
    pub boxes: Vec<FallingBox>,
    /// Active pieces
    pub pieces: Vec<FallingPiece>,
    /// Held piece kinds
    pub bag: Bag,
    /// Most recent missing-piece outcome, overwritten each occurrence
    pub last_miss: Option<MissNotice>,
    /// Seeded RNG; every random draw goes through here
    pub rng: Pcg32,
    events: Vec<GameEvent>,
    store: Box<dyn ScoreStore>,
}

impl GameState {
    /// Create a new game state.
    ///
    /// Panics when the playfield is too small to play on: the cart must fit
    /// (width of at least `2 * PLAYER_HALF_WIDTH`) and the catch line must
    /// sit inside the field (height above `CATCH_LINE_MARGIN`). A malformed
    /// host configuration fails here, never mid-tick.
    pub fn new(width: f32, height: f32, seed: u64, store: Box<dyn ScoreStore>) -> Self {
        assert!(
            width >= PLAYER_HALF_WIDTH * 2.0,
            "playfield width {width} below minimum {}",
            PLAYER_HALF_WIDTH * 2.0
        );
        assert!(
            height > CATCH_LINE_MARGIN,
            "playfield height {height} too shallow for the catch line"
        );

        let high_score = store.load().unwrap_or(0);
        log::info!("New session: {width}x{height}, seed {seed}, best {high_score}");

        Self {
            seed,
            width,
            height,
            phase: GamePhase::Intro,
            score: 0,
            lives: START_LIVES,
            level: 1,
            caught: 0,
            high_score,
            time_ticks: 0,
            player: Player { x: width / 2.0, happy_ticks: 0, sad_ticks: 0 },
            box_timer: BOX_INTERVAL_BASE,
            spawn_interval: BOX_INTERVAL_BASE,
            piece_timer: super::spawn::piece_interval(1),
            boxes: Vec::new(),
            pieces: Vec::new(),
            bag: Bag::new(),
            last_miss: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            store,
        }
    }

    /// Vertical coordinate at which falling entities become catchable
    pub fn catch_line(&self) -> f32 {
        self.height - CATCH_LINE_MARGIN
    }

    /// Queue an event for the host
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events queued since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Reset session counters and entities for a fresh run.
    ///
    /// The high score and the RNG stream survive; everything else returns to
    /// its starting value and the matching change events are emitted so the
    /// host HUD resynchronizes.
    pub fn reset_session(&mut self) {
        self.score = 0;
        self.lives = START_LIVES;
        self.level = 1;
        self.caught = 0;
        self.spawn_interval = BOX_INTERVAL_BASE;
        self.box_timer = BOX_INTERVAL_BASE;
        self.piece_timer = super::spawn::piece_interval(1);
        self.boxes.clear();
        self.pieces.clear();
        self.bag.clear();
        self.last_miss = None;
        self.player.happy_ticks = 0;
        self.player.sad_ticks = 0;
        self.phase = GamePhase::Playing;

        self.push_event(GameEvent::ScoreChanged(0));
        self.push_event(GameEvent::LivesChanged(START_LIVES));
        self.push_event(GameEvent::LevelChanged(1));
        self.push_event(GameEvent::BagChanged(Vec::new()));
        self.push_event(GameEvent::PhaseChanged(GamePhase::Playing));
    }

    /// Compare the final score against the stored best and persist when it
    /// improves. Persistence is best-effort; a failing store never interrupts
    /// the session.
    pub(crate) fn finalize_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        if let Err(e) = self.store.save(self.score) {
            log::warn!("Failed to persist high score: {e}");
        }
        true
    }
}
