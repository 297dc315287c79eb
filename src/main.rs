//! Lane Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use lane_rush::audio::{AudioManager, SoundEffect};
    use lane_rush::sim::{GameEvent, MoveDir, Session};
    use lane_rush::ui::Ui;
    use lane_rush::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        ui: Ui,
        audio: AudioManager,
        high_score: HighScore,
    }

    impl Game {
        /// One animation frame: catch the scheduler up to `time`, apply the
        /// side effects it raised, mirror the state onto the page
        fn frame(&mut self, time: f64) {
            self.session.advance(time);
            self.drain_events();
            self.ui.sync(&self.session.state);
        }

        fn drain_events(&mut self) {
            for event in self.session.take_events() {
                match event {
                    GameEvent::MoveSound => self.audio.play(SoundEffect::Move),
                    GameEvent::GameOverSound => self.audio.play(SoundEffect::GameOver),
                    GameEvent::NewHighScore(best) => {
                        if self.high_score.update(best) {
                            self.high_score.save();
                        }
                    }
                }
            }
        }
    }

    /// Monotonic clock shared by the scheduler and every input handler
    /// (requestAnimationFrame timestamps are on the same timeline)
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let high_score = HighScore::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, high_score.best),
            ui: Ui::new(&document),
            audio,
            high_score,
        }));

        // Paint the idle screen (persisted high score included) before the
        // first frame
        {
            let g = game.borrow();
            g.ui.sync(&g.session.state);
        }

        setup_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_touch(game.clone());

        request_animation_frame(game);

        log::info!("Lane Rush running (seed {})", seed);
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Start and restart are the same operation on the session; the two
        // buttons only live on different overlays.
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().session.start(now_ms());
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            } else {
                log::warn!("#{} not found; that button won't work", id);
            }
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let dir = match event.key().as_str() {
                "ArrowUp" => MoveDir::Up,
                "ArrowDown" => MoveDir::Down,
                _ => return,
            };
            event.prevent_default();
            let mut g = game.borrow_mut();
            g.session.move_intent(dir, now_ms());
            g.drain_events();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            // Upper half of the screen moves up, lower half moves down
            let middle = web_sys::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0)
                / 2.0;
            let dir = if (touch.client_y() as f64) < middle {
                MoveDir::Up
            } else {
                MoveDir::Down
            };
            let mut g = game.borrow_mut();
            g.session.move_intent(dir, now_ms());
            g.drain_events();
        });
        let _ = window
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_rush::sim::{GamePhase, MoveDir, Session};

    env_logger::init();
    log::info!("Lane Rush (native) starting...");

    // Headless smoke run: drive one session on a synthetic clock, zig-zagging
    // between lanes, until a crash or half a minute passes.
    let mut session = Session::new(0xC0FFEE, 0);
    session.start(0.0);

    let mut t = 0.0;
    while t < 30_000.0 && session.state.phase == GamePhase::Playing {
        t += 2.0;
        session.advance(t);
        if (t as u64) % 1_000 == 0 {
            let dir = if ((t as u64) / 1_000) % 2 == 0 {
                MoveDir::Down
            } else {
                MoveDir::Up
            };
            session.move_intent(dir, t);
        }
        session.take_events();
    }

    println!(
        "survived {:.1}s, score {}, high score {}",
        t / 1000.0,
        session.state.score,
        session.state.high_score
    );
}
