//! Static reference data: the board games that fall from the sky and the
//! collectible pieces that complete them.
//!
//! Read-only lookup tables, paired by index: `GAMES[i]` requires `PIECES[i]`.

/// A board game definition (one falling box variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDef {
    /// Stable identifier
    pub id: &'static str,
    /// Display name (French, matching the shelf labels)
    pub name: &'static str,
    /// Short label printed on the box face
    pub abbrev: &'static str,
    /// Accent color (CSS)
    pub color: &'static str,
    /// Box background color (CSS)
    pub bg_color: &'static str,
    /// Index into [`PIECES`] of the piece this game needs when incomplete
    piece: usize,
}

impl GameDef {
    /// The piece kind required to resolve an incomplete box of this game
    pub fn required_piece(&self) -> &'static PieceKind {
        &PIECES[self.piece]
    }
}

/// A collectible piece kind (one falling piece variant)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceKind {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Glyph drawn on the playfield and in the bag HUD
    pub glyph: &'static str,
    /// Accent color (CSS)
    pub color: &'static str,
}

/// All game definitions, paired by index with [`PIECES`]
pub static GAMES: [GameDef; 12] = [
    GameDef { id: "catane", name: "Catane", abbrev: "CAT", color: "#c0392b", bg_color: "#f5cba7", piece: 0 },
    GameDef { id: "carcassonne", name: "Carcassonne", abbrev: "CRC", color: "#2980b9", bg_color: "#aed6f1", piece: 1 },
    GameDef { id: "agricola", name: "Agricola", abbrev: "AGR", color: "#784212", bg_color: "#d5b895", piece: 2 },
    GameDef { id: "splendor", name: "Splendor", abbrev: "SPL", color: "#b7950b", bg_color: "#f9e79f", piece: 3 },
    GameDef { id: "dixit", name: "Dixit", abbrev: "DIX", color: "#8e44ad", bg_color: "#d7bde2", piece: 4 },
    GameDef { id: "azul", name: "Azul", abbrev: "AZU", color: "#1a5276", bg_color: "#a9cce3", piece: 5 },
    GameDef { id: "7-wonders", name: "7 Wonders", abbrev: "7WO", color: "#9c640c", bg_color: "#fad7a0", piece: 6 },
    GameDef { id: "pandemie", name: "Pandémie", abbrev: "PAN", color: "#1e8449", bg_color: "#a9dfbf", piece: 7 },
    GameDef { id: "aventuriers-rail", name: "Les Aventuriers du Rail", abbrev: "ADR", color: "#922b21", bg_color: "#e6b0aa", piece: 8 },
    GameDef { id: "dice-forge", name: "Dice Forge", abbrev: "DFO", color: "#d4ac0d", bg_color: "#fcf3cf", piece: 9 },
    GameDef { id: "king-of-tokyo", name: "King of Tokyo", abbrev: "KOT", color: "#117864", bg_color: "#a2d9ce", piece: 10 },
    GameDef { id: "terraforming-mars", name: "Terraforming Mars", abbrev: "TFM", color: "#a04000", bg_color: "#edbb99", piece: 11 },
];

/// All piece kinds, paired by index with [`GAMES`]
pub static PIECES: [PieceKind; 12] = [
    PieceKind { id: "clay-brick", name: "Brique argile", glyph: "🧱", color: "#c0392b" },
    PieceKind { id: "blue-meeple", name: "Meeple bleu", glyph: "🧍", color: "#2980b9" },
    PieceKind { id: "wood-ox", name: "Bœuf en bois", glyph: "🐂", color: "#784212" },
    PieceKind { id: "gold-token", name: "Jeton or", glyph: "🪙", color: "#b7950b" },
    PieceKind { id: "rabbit-pawn", name: "Pion lapin", glyph: "🐇", color: "#8e44ad" },
    PieceKind { id: "blue-tile", name: "Tuile bleue", glyph: "🔷", color: "#1a5276" },
    PieceKind { id: "silver-coin", name: "Pièce d'argent", glyph: "⚪", color: "#9c640c" },
    PieceKind { id: "virus-cube", name: "Cube virus", glyph: "🦠", color: "#1e8449" },
    PieceKind { id: "red-wagon", name: "Wagon rouge", glyph: "🚃", color: "#922b21" },
    PieceKind { id: "gold-die", name: "Dé doré", glyph: "🎲", color: "#d4ac0d" },
    PieceKind { id: "energy-cube", name: "Cube énergie", glyph: "⚡", color: "#117864" },
    PieceKind { id: "steel-cube", name: "Cube acier", glyph: "🟫", color: "#a04000" },
];

/// Look up a game definition by identifier
pub fn game_by_id(id: &str) -> Option<&'static GameDef> {
    GAMES.iter().find(|g| g.id == id)
}

/// Look up a piece kind by identifier
pub fn piece_by_id(id: &str) -> Option<&'static PieceKind> {
    PIECES.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, g) in GAMES.iter().enumerate() {
            assert!(GAMES.iter().skip(i + 1).all(|o| o.id != g.id), "duplicate game id {}", g.id);
        }
        for (i, p) in PIECES.iter().enumerate() {
            assert!(PIECES.iter().skip(i + 1).all(|o| o.id != p.id), "duplicate piece id {}", p.id);
        }
    }

    #[test]
    fn every_game_has_its_own_piece() {
        // Pairing is by index, so the association must be a bijection.
        for (i, g) in GAMES.iter().enumerate() {
            assert_eq!(g.piece, i);
            assert_eq!(g.required_piece().id, PIECES[i].id);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(game_by_id("agricola").map(|g| g.name), Some("Agricola"));
        assert_eq!(game_by_id("agricola").map(|g| g.required_piece().id), Some("wood-ox"));
        assert_eq!(piece_by_id("gold-token").map(|p| p.name), Some("Jeton or"));
        assert!(game_by_id("monopoly").is_none());
        assert!(piece_by_id("nope").is_none());
    }
}
