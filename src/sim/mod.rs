//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete tick per rendered frame
//! - Seeded RNG only, owned by the state
//! - No rendering or platform dependencies; the host drains events instead

pub mod bag;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;

pub use bag::Bag;
pub use events::{GameEvent, MissNotice};
pub use spawn::{box_interval, incomplete_chance, piece_interval};
pub use state::{EntityLife, FallingBox, FallingPiece, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
