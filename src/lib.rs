//! Meeple Drop - a falling-box catch arcade game
//!
//! Core modules:
//! - `catalog`: static board-game and piece reference data
//! - `sim`: deterministic simulation (spawning, catches, scoring, phases)
//! - `input`: pointer-to-simulation input adapter
//! - `highscore`: durable best-score persistence port
//! - `render`: canvas-2D painter (wasm only)

pub mod catalog;
pub mod highscore;
pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod render;
pub mod sim;

pub use highscore::{MemoryScoreStore, ScoreStore};
pub use input::InputAdapter;

/// Game balance and geometry constants
pub mod consts {
    /// Starting lives per session
    pub const START_LIVES: u8 = 3;
    /// Bag capacity (held piece kinds)
    pub const BAG_CAPACITY: usize = 5;
    /// Catches needed to advance one level
    pub const CATCHES_PER_LEVEL: u32 = 6;

    /// Box side length in playfield pixels
    pub const BOX_SIZE: f32 = 46.0;
    /// Piece side length
    pub const PIECE_SIZE: f32 = 26.0;
    /// Player cart half-width (also the clamp margin)
    pub const PLAYER_HALF_WIDTH: f32 = 34.0;
    /// Distance of the catch line above the bottom edge
    pub const CATCH_LINE_MARGIN: f32 = 64.0;
    /// Horizontal reach of a catch, added to half the entity width
    pub const CATCH_RADIUS: f32 = 38.0;
    /// Horizontal reach of an inspection (looser than a catch)
    pub const INSPECT_REACH_X: f32 = 84.0;
    /// Fraction of playfield height a box must have fallen past to be inspectable
    pub const INSPECT_MIN_Y_FRAC: f32 = 0.45;
    /// Smoothing factor: fraction of remaining distance covered per tick
    pub const PLAYER_LERP: f32 = 0.18;

    /// Box spawn countdown at level 1, in ticks
    pub const BOX_INTERVAL_BASE: u32 = 110;
    /// Box spawn countdown reduction per level
    pub const BOX_INTERVAL_STEP: u32 = 7;
    /// Box spawn countdown floor
    pub const BOX_INTERVAL_MIN: u32 = 48;

    /// Base probability that a spawned box is incomplete
    pub const INCOMPLETE_BASE: f64 = 0.25;
    /// Per-level increase of the incomplete probability
    pub const INCOMPLETE_PER_LEVEL: f64 = 0.025;
    /// Cap on the incomplete probability
    pub const INCOMPLETE_CAP: f64 = 0.50;
    /// Level at which a same-tick second box becomes possible
    pub const SECOND_BOX_LEVEL: u32 = 3;
    /// Chance of that second box
    pub const SECOND_BOX_CHANCE: f64 = 0.30;

    /// Death animation length for boxes, in ticks
    pub const BOX_DEATH_TICKS: u32 = 16;
    /// Death animation length for pieces
    pub const PIECE_DEATH_TICKS: u32 = 14;

    /// Flat score for resolving an incomplete box with the right piece
    pub const SCORE_COMPLETED_BONUS: u32 = 25;
    /// Consolation score for catching an incomplete box empty-handed
    pub const SCORE_MISSING_PIECE: u32 = 2;
    /// Score for banking a piece into the bag
    pub const SCORE_PIECE: u32 = 3;

    /// Positive feedback pulse length (ticks)
    pub const HAPPY_TICKS: u32 = 18;
    /// Negative feedback pulse length
    pub const SAD_TICKS: u32 = 20;

    /// Cosmetic horizontal wobble amplitude
    pub const WOBBLE_AMPLITUDE: f32 = 6.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Score for catching a complete box at the given level
#[inline]
pub fn complete_box_score(level: u32) -> u32 {
    10 + level * 2
}
