//! Nova Strike entry point
//!
//! Browser builds run one frame per `requestAnimationFrame` and hand each
//! snapshot to a JavaScript renderer. Native builds run a headless demo with
//! an autopilot at a fixed rate.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use nova_strike::{Control, FrameDriver, FrameOutcome, RenderSnapshot, Settings};

    // The page installs `window.novaStrikeRender(json)` to draw snapshots
    #[wasm_bindgen(inline_js = "
        export function publish_snapshot(json) {
            if (typeof window.novaStrikeRender === 'function') {
                window.novaStrikeRender(json);
            }
        }
    ")]
    extern "C" {
        fn publish_snapshot(json: &str);
    }

    struct Game {
        driver: FrameDriver,
        /// True while an animation frame is scheduled
        loop_active: bool,
    }

    fn publish(snapshot: &RenderSnapshot<'_>) {
        match snapshot.to_json() {
            Ok(json) => publish_snapshot(&json),
            Err(e) => log::warn!("Snapshot encode failed: {}", e),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();

        let (settings, settings_err) = match Settings::load() {
            Ok(Some(settings)) => (settings, None),
            Ok(None) => {
                let settings = Settings::default();
                settings.save();
                (settings, None)
            }
            Err(e) => (Settings::default(), Some(e)),
        };
        let level = settings.level_filter().to_level().unwrap_or(log::Level::Error);
        let _ = console_log::init_with_level(level);
        if let Some(e) = settings_err {
            log::warn!("{}; using defaults", e);
        }

        log::info!("Nova Strike starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game {
            driver: FrameDriver::new(seed),
            loop_active: false,
        }));

        setup_keyboard(&window, game.clone());
        setup_restart_button(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        start_loop(&game);
        log::info!("Nova Strike running!");
    }

    /// Schedule frames again if the loop had stopped
    fn start_loop(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_active {
                return;
            }
            g.loop_active = true;
        }
        request_animation_frame(game.clone());
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = game.borrow_mut().driver.frame(time, publish);

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::Halted => {
                let mut g = game.borrow_mut();
                g.loop_active = false;
                if g.driver.state().game_over {
                    log::info!("Final score {}", g.driver.state().score);
                }
            }
        }
    }

    /// Toggle pause, show the paused frame and resume the loop if needed
    fn toggle_pause(game: &Rc<RefCell<Game>>) {
        let resume = {
            let mut g = game.borrow_mut();
            let resume = g.driver.toggle_pause();
            publish(&g.driver.snapshot());
            resume
        };
        if resume {
            start_loop(game);
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let Some(control) = Control::from_key(&event.key()) else {
                    return;
                };
                event.prevent_default();

                let edge = game.borrow_mut().driver.input_mut().press(control);
                if edge && control == Control::PauseToggle {
                    toggle_pause(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(control) = Control::from_key(&event.key()) {
                    game.borrow_mut().driver.input_mut().release(control);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().driver.reset_with_seed(seed);
                start_loop(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab is hidden or the window loses focus
    fn auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let running = {
            let mut g = game.borrow_mut();
            // Key-up events are lost while unfocused
            g.driver.input_mut().clear();
            g.driver.is_running()
        };
        if running {
            toggle_pause(game);
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn setup_auto_pause(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&game, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&game, "window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use nova_strike::sim::GameState;
    use nova_strike::{Control, FixedRateTimer, FrameDriver, FrameOutcome, Settings};

    /// Horizontal slack before the autopilot bothers steering
    const AIM_DEADZONE: f32 = 6.0;

    /// Hold fire and chase the lowest enemy (the most dangerous one)
    fn autopilot(state: &GameState) -> [(Control, bool); 3] {
        let player_x = state.player.body.center().x;
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| {
                a.body
                    .bottom()
                    .partial_cmp(&b.body.bottom())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|enemy| enemy.body.center().x);

        let (left, right) = match target {
            Some(x) if x < player_x - AIM_DEADZONE => (true, false),
            Some(x) if x > player_x + AIM_DEADZONE => (false, true),
            _ => (false, false),
        };

        [
            (Control::MoveLeft, left),
            (Control::MoveRight, right),
            (Control::Fire, true),
        ]
    }

    pub fn run(settings: &Settings) {
        let seed = settings.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut driver = FrameDriver::new(seed);
        let mut timer = FixedRateTimer::new(settings.tick_hz);
        let tick_limit = settings.demo_tick_limit();
        let snapshot_every = settings.snapshot_every.max(1) as u64;

        log::info!(
            "Headless demo at {} Hz ({:?} per frame)",
            settings.tick_hz,
            timer.period()
        );

        loop {
            for (control, held) in autopilot(driver.state()) {
                let input = driver.input_mut();
                if held {
                    input.press(control);
                } else {
                    input.release(control);
                }
            }

            let outcome = driver.frame(timer.now_ms(), |snapshot| {
                if settings.publish_snapshots && snapshot.time_ticks % snapshot_every == 0 {
                    match snapshot.to_json() {
                        Ok(json) => println!("{}", json),
                        Err(e) => log::warn!("Snapshot encode failed: {}", e),
                    }
                }
            });

            if outcome == FrameOutcome::Halted {
                break;
            }
            if tick_limit.is_some_and(|limit| driver.state().time_ticks >= limit) {
                log::info!("Demo time limit reached");
                break;
            }
            timer.wait();
        }

        let state = driver.state();
        log::info!(
            "Demo finished after {} ticks: score {}, wave {}, health {}",
            state.time_ticks,
            state.score,
            state.wave,
            state.player.health
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use nova_strike::Settings;

    let (settings, settings_err) = match Settings::load_from_env() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
    if let Some(e) = settings_err {
        log::warn!("{}; using defaults", e);
    }

    log::info!("Nova Strike (native) starting...");
    demo::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
