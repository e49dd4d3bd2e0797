//! State-change events surfaced to the host UI.
//!
//! Events are pushed during a tick and drained synchronously afterwards via
//! [`GameState::take_events`](super::GameState::take_events). All payloads
//! borrow from the static catalog, so they are cheap to copy around.

use super::state::GamePhase;

/// The most recent "missing piece" catch outcome (single slot, overwritten)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissNotice {
    /// Display name of the game that was caught incomplete
    pub game_name: &'static str,
    /// Display name of the piece it needed
    pub piece_name: &'static str,
    /// Glyph of that piece
    pub piece_glyph: &'static str,
}

/// A state change the host may want to reflect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Score changed; carries the new total
    ScoreChanged(u32),
    /// Lives changed; carries the new count
    LivesChanged(u8),
    /// Level changed; carries the new level (>= 1)
    LevelChanged(u32),
    /// Phase transition
    PhaseChanged(GamePhase),
    /// Bag contents changed; carries the held kind ids in order
    BagChanged(Vec<&'static str>),
    /// An incomplete box was caught without its required piece
    MissingPiece(MissNotice),
    /// An incomplete box was resolved with a piece from the bag
    BoxCompleted { game_name: &'static str },
    /// A complete box fell off the bottom (cost a life)
    BoxMissed { game_name: &'static str },
    /// A box was inspected; reveals whether it is incomplete
    BoxInspected { game_name: &'static str, incomplete: bool },
    /// A piece was caught while the bag was full (cosmetic only)
    BagFull,
    /// The session ended with a new best score
    NewHighScore(u32),
}
