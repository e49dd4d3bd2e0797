//! Canvas-2D painter (wasm only).
//!
//! Pure function of the game state: reads entity positions, colors and HUD
//! counters, writes pixels. Nothing here feeds back into the simulation.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{EntityLife, GamePhase, GameState};

/// Wraps the 2D context of the game canvas
#[derive(Debug, Clone)]
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasPainter {
    /// Grab the 2D context from a canvas element
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: f64::from(canvas.width()),
            height: f64::from(canvas.height()),
        })
    }

    /// Paint one frame
    pub fn draw(&self, state: &GameState) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str("#1b2631");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);

        // Catch line
        self.ctx.set_fill_style_str("#2e4053");
        self.ctx.fill_rect(
            0.0,
            f64::from(state.catch_line()),
            self.width,
            f64::from(CATCH_LINE_MARGIN),
        );

        for b in &state.boxes {
            self.draw_box(b);
        }
        for p in &state.pieces {
            self.draw_piece(p);
        }
        self.draw_player(state);

        match state.phase {
            GamePhase::Intro => self.draw_banner("MEEPLE DROP", "Cliquez pour jouer"),
            GamePhase::GameOver => {
                let sub = format!("Score {} — record {}", state.score, state.high_score);
                self.draw_banner("PARTIE TERMINÉE", &sub);
            }
            GamePhase::Playing => {}
        }
    }

    fn death_alpha(life: EntityLife, duration: u32) -> f64 {
        match life {
            EntityLife::Falling => 1.0,
            EntityLife::Dying { ticks } => {
                (1.0 - f64::from(ticks) / f64::from(duration)).max(0.0)
            }
        }
    }

    fn draw_box(&self, b: &crate::sim::FallingBox) {
        let alpha = Self::death_alpha(b.life, BOX_DEATH_TICKS);
        let x = f64::from(b.pos.x + b.wobble_offset());
        let y = f64::from(b.pos.y);
        let size = f64::from(b.size);

        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(b.game.bg_color);
        self.ctx.fill_rect(x, y, size, size);
        self.ctx.set_line_width(3.0);
        self.ctx.set_stroke_style_str(b.game.color);
        self.ctx.stroke_rect(x, y, size, size);

        self.ctx.set_fill_style_str(b.game.color);
        self.ctx.set_font("bold 14px sans-serif");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(b.game.abbrev, x + size / 2.0, y + size / 2.0 + 5.0);

        // An inspected incomplete box shows the piece it is waiting for
        if b.inspected && b.incomplete {
            self.ctx.set_font("13px sans-serif");
            let _ = self
                .ctx
                .fill_text(b.game.required_piece().glyph, x + size / 2.0, y - 4.0);
        }
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_piece(&self, p: &crate::sim::FallingPiece) {
        let alpha = Self::death_alpha(p.life, PIECE_DEATH_TICKS);
        let x = f64::from(p.pos.x + p.wobble_offset());
        let y = f64::from(p.pos.y);
        let size = f64::from(p.size);

        self.ctx.set_global_alpha(alpha);
        self.ctx.set_font("20px sans-serif");
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(p.kind.color);
        let _ = self.ctx.fill_text(p.kind.glyph, x + size / 2.0, y + size * 0.8);
        self.ctx.set_global_alpha(1.0);
    }

    fn draw_player(&self, state: &GameState) {
        let x = f64::from(state.player.x);
        let y = f64::from(state.catch_line());
        let half = f64::from(PLAYER_HALF_WIDTH);

        self.ctx.set_fill_style_str("#f4d03f");
        self.ctx.fill_rect(x - half, y, half * 2.0, 18.0);
        self.ctx.set_fill_style_str("#935116");
        self.ctx.fill_rect(x - half, y + 18.0, half * 2.0, 8.0);

        let face = if state.player.sad_ticks > 0 {
            "😖"
        } else if state.player.happy_ticks > 0 {
            "😄"
        } else {
            "🙂"
        };
        self.ctx.set_font("22px sans-serif");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(face, x, y - 6.0);
    }

    fn draw_banner(&self, title: &str, subtitle: &str) {
        self.ctx.set_global_alpha(0.75);
        self.ctx.set_fill_style_str("#17202a");
        self.ctx.fill_rect(0.0, self.height / 2.0 - 70.0, self.width, 140.0);
        self.ctx.set_global_alpha(1.0);

        self.ctx.set_fill_style_str("#f7dc6f");
        self.ctx.set_font("bold 30px sans-serif");
        self.ctx.set_text_align("center");
        let _ = self.ctx.fill_text(title, self.width / 2.0, self.height / 2.0 - 10.0);

        self.ctx.set_fill_style_str("#fdfefe");
        self.ctx.set_font("16px sans-serif");
        let _ = self
            .ctx
            .fill_text(subtitle, self.width / 2.0, self.height / 2.0 + 28.0);
    }
}
