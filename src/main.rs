//! Meeple Drop entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use meeple_drop::highscore::LocalStorageScoreStore;
    use meeple_drop::render::CanvasPainter;
    use meeple_drop::sim::{tick, GameEvent, GameState};
    use meeple_drop::InputAdapter;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: Option<CanvasPainter>,
        input: InputAdapter,
        /// Cleared on teardown; once false, no further ticks run
        running: bool,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64) -> Self {
            Self {
                state: GameState::new(width, height, seed, Box::new(LocalStorageScoreStore)),
                painter: None,
                input: InputAdapter::new(width),
                running: true,
            }
        }

        /// Run one frame: sample input, advance one tick, paint, sync HUD
        fn frame(&mut self) {
            let input = self.input.sample();
            tick(&mut self.state, &input);

            for event in self.state.take_events() {
                handle_event(&event);
            }

            if let Some(ref painter) = self.painter {
                painter.draw(&self.state);
            }
            self.update_hud();
        }

        /// Stop scheduling; the state is never mutated again after this
        fn stop(&mut self) {
            self.running = false;
            log::info!("Game loop stopped");
        }

        /// Mirror counters into the DOM HUD
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set = |id: &str, value: String| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&value));
                }
            };

            set("hud-score", self.state.score.to_string());
            set("hud-lives", "❤".repeat(self.state.lives as usize));
            set("hud-level", self.state.level.to_string());
            set("hud-best", self.state.high_score.to_string());

            let bag: String = self
                .state
                .bag
                .kinds()
                .iter()
                .filter_map(|id| meeple_drop::catalog::piece_by_id(id))
                .map(|p| p.glyph)
                .collect();
            set("hud-bag", if bag.is_empty() { "—".to_string() } else { bag });
        }
    }

    /// React to simulation events that need more than a counter refresh
    fn handle_event(event: &GameEvent) {
        match event {
            GameEvent::MissingPiece(miss) => {
                show_toast(&format!(
                    "Il manque {} {} pour {} !",
                    miss.piece_name, miss.piece_glyph, miss.game_name
                ));
            }
            GameEvent::BoxCompleted { game_name } => {
                show_toast(&format!("{game_name} complété, +25 !"));
            }
            GameEvent::NewHighScore(score) => {
                show_toast(&format!("Nouveau record : {score} !"));
                log::info!("New high score: {score}");
            }
            GameEvent::LevelChanged(level) => log::info!("Level {level}"),
            _ => {}
        }
    }

    fn show_toast(message: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("miss-toast") {
            el.set_text_content(Some(message));
            let _ = el.set_attribute("class", "toast visible");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Meeple Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.width() as f32;
        let height = canvas.height() as f32;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(width, height, seed)));
        game.borrow_mut().painter = CanvasPainter::new(&canvas);

        log::info!("Playfield {width}x{height}, seed {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_stop_button(game.clone());

        request_animation_frame(game);

        log::info!("Meeple Drop running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.set_pointer_x(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down/up drive the trigger edge
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.set_held(true);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.set_held(false);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().input.set_pointer_x(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/end
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.set_held(true);
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    g.input.set_pointer_x(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.set_held(false);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space/Enter as the trigger
        {
            let game = game.clone();
            let window = web_sys::window().expect("no window");
            let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") {
                    game.borrow_mut().input.set_held(true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
            keydown.forget();
        }
        {
            let window = web_sys::window().expect("no window");
            let keyup = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), " " | "Enter") {
                    game.borrow_mut().input.set_held(false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
            keyup.forget();
        }
    }

    fn setup_stop_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("stop-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().stop();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !g.running {
                return;
            }
            g.frame();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use meeple_drop::sim::{tick, GameEvent, GameState};
    use meeple_drop::{InputAdapter, MemoryScoreStore};

    env_logger::init();
    log::info!("Meeple Drop (native) starting headless demo...");

    let width = 480.0;
    let height = 640.0;
    let mut state = GameState::new(width, height, 2024, Box::new(MemoryScoreStore::default()));
    let mut adapter = InputAdapter::new(width);

    // Start the session
    adapter.set_held(true);
    let input = adapter.sample();
    tick(&mut state, &input);
    adapter.set_held(false);

    // Sweep the cart back and forth for a while and report what happens
    for t in 0u64..4000 {
        let sweep = (t as f32 * 0.013).sin();
        adapter.set_pointer_x(width / 2.0 + sweep * width / 2.0);
        let input = adapter.sample();
        tick(&mut state, &input);

        for event in state.take_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::debug!("score {score}"),
                GameEvent::MissingPiece(miss) => {
                    log::info!("missing {} for {}", miss.piece_name, miss.game_name);
                }
                GameEvent::LevelChanged(level) => log::info!("level {level}"),
                GameEvent::LivesChanged(lives) => log::info!("lives {lives}"),
                GameEvent::PhaseChanged(phase) => log::info!("phase {phase:?}"),
                _ => {}
            }
        }

        if state.lives == 0 {
            break;
        }
    }

    log::info!(
        "Demo finished: score {}, level {}, caught {}, best {}",
        state.score,
        state.level,
        state.caught,
        state.high_score
    );
    println!(
        "score={} level={} caught={} best={}",
        state.score, state.level, state.caught, state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
