//! Drop Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, TouchEvent};

    use drop_catcher::consts::*;
    use drop_catcher::sim::{GameEvent, GameState, PointerInput, TickInput, WaterDrop, tick};
    use drop_catcher::ui::{self, Hud, Overlay};
    use drop_catcher::{GameError, Settings, Tuning};

    fn js_err(value: JsValue) -> GameError {
        GameError::Js(format!("{:?}", value))
    }

    fn set_px(el: &HtmlElement, prop: &str, value: f32) -> Result<(), GameError> {
        el.style()
            .set_property(prop, &format!("{}px", value))
            .map_err(js_err)
    }

    /// Handles to the page elements the game drives
    struct Dom {
        document: Document,
        container: HtmlElement,
        player: HtmlElement,
        drops: HashMap<u32, HtmlElement>,
    }

    fn create_div(document: &Document) -> Result<HtmlElement, GameError> {
        document
            .create_element("div")
            .map_err(js_err)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GameError::Js("created element is not an HtmlElement".into()))
    }

    /// Reuse the page's `#player` or create the jerry can sprite
    fn ensure_player(
        document: &Document,
        container: &HtmlElement,
        tuning: &Tuning,
    ) -> Result<HtmlElement, GameError> {
        if let Some(existing) = document.get_element_by_id("player") {
            if let Ok(el) = existing.dyn_into::<HtmlElement>() {
                return Ok(el);
            }
        }

        let player = create_div(document)?;
        player.set_id("player");
        player.set_class_name("jerry-can with-image");
        let style = player.style();
        for (prop, value) in [
            ("position", "absolute"),
            ("z-index", "60"),
            ("background-image", "url('img/jerry-can.png')"),
            ("background-size", "contain"),
            ("background-repeat", "no-repeat"),
            ("background-position", "center bottom"),
        ] {
            style.set_property(prop, value).map_err(js_err)?;
        }
        set_px(&player, "bottom", tuning.player_bottom)?;
        set_px(&player, "width", tuning.player_width)?;
        set_px(&player, "height", tuning.player_height)?;
        container.append_child(&player).map_err(js_err)?;
        Ok(player)
    }

    impl Dom {
        fn new(tuning: &Tuning) -> Result<Self, GameError> {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or(GameError::MissingElement("document"))?;
            let container: HtmlElement = document
                .get_element_by_id("game-container")
                .ok_or(GameError::MissingElement("game-container"))?
                .dyn_into()
                .map_err(|_| GameError::MissingElement("game-container"))?;
            let player = ensure_player(&document, &container, tuning)?;

            Ok(Self {
                document,
                container,
                player,
                drops: HashMap::new(),
            })
        }

        fn create_div(&self) -> Result<HtmlElement, GameError> {
            create_div(&self.document)
        }

        fn container_size(&self) -> (f32, f32) {
            (
                self.container.client_width() as f32,
                self.container.client_height() as f32,
            )
        }

        /// Convert viewport coordinates to container coordinates
        fn to_container(&self, client_x: i32, client_y: i32) -> (f32, f32) {
            let rect = self.container.get_bounding_client_rect();
            (
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            )
        }

        fn add_drop(&mut self, drop: &WaterDrop) -> Result<(), GameError> {
            let el = self.create_div()?;
            el.set_class_name(&format!("drop {}", drop.kind.as_str()));
            el.set_attribute("data-type", drop.kind.as_str())
                .map_err(js_err)?;
            el.style()
                .set_property("position", "absolute")
                .map_err(js_err)?;
            set_px(&el, "width", drop.size)?;
            set_px(&el, "height", drop.size)?;
            set_px(&el, "left", drop.x)?;
            set_px(&el, "top", drop.y)?;
            self.container.append_child(&el).map_err(js_err)?;
            self.drops.insert(drop.id, el);
            Ok(())
        }

        fn remove_drop(&mut self, id: u32) {
            if let Some(el) = self.drops.remove(&id) {
                el.remove();
            }
        }

        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        fn remove_by_id(&self, id: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.remove();
            }
        }

        fn show_overlay(&self, id: &str, html: &str) -> Result<(), GameError> {
            if self.document.get_element_by_id(id).is_some() {
                return Ok(());
            }
            let el = self.create_div()?;
            el.set_id(id);
            el.set_inner_html(html);
            self.container.append_child(&el).map_err(js_err)?;
            Ok(())
        }

        fn show_celebration(&self, text: &str) -> Result<(), GameError> {
            if self.celebrations().next().is_some() {
                return Ok(());
            }
            let el = self.create_div()?;
            el.set_class_name("celebration");
            el.set_text_content(Some(text));
            self.container.append_child(&el).map_err(js_err)?;
            Ok(())
        }

        fn celebrations(&self) -> impl Iterator<Item = Element> {
            let list = self.document.query_selector_all(".celebration").ok();
            let len = list.as_ref().map(|l| l.length()).unwrap_or(0);
            (0..len).filter_map(move |i| {
                list.as_ref()
                    .and_then(|l| l.item(i))
                    .and_then(|n| n.dyn_into::<Element>().ok())
            })
        }

        fn clear_celebrations(&self) {
            for el in self.celebrations().collect::<Vec<_>>() {
                el.remove();
            }
        }

        /// Mirror drops and the player into the page
        fn sync_world(&mut self, state: &GameState, events: &[GameEvent]) -> Result<(), GameError> {
            for event in events {
                match *event {
                    GameEvent::DropSpawned { id, .. } => {
                        // Spawned and resolved inside the same frame: nothing to show
                        if let Some(drop) = state.drop_by_id(id) {
                            self.add_drop(drop)?;
                        }
                    }
                    GameEvent::DropRemoved { id } => self.remove_drop(id),
                    _ => {}
                }
            }

            for drop in state.drops.iter().filter(|d| d.is_active()) {
                if let Some(el) = self.drops.get(&drop.id) {
                    set_px(el, "top", drop.y)?;
                }
            }

            set_px(&self.player, "left", state.player.left)
        }

        fn sync_hud(&self, hud: &Hud, win_score: u32) -> Result<(), GameError> {
            self.set_text("#score", &hud.score_text);
            self.set_text("#health", &hud.health_text);

            match hud.overlay {
                Overlay::None => {
                    self.remove_by_id("game-over-overlay");
                    self.remove_by_id("win-overlay");
                }
                Overlay::GameOver => {
                    self.remove_by_id("win-overlay");
                    self.show_overlay(
                        "game-over-overlay",
                        &format!("<div class=\"game-over-inner\">{}</div>", ui::GAME_OVER_TEXT),
                    )?;
                }
                Overlay::Win => {
                    self.remove_by_id("game-over-overlay");
                    self.show_overlay(
                        "win-overlay",
                        &format!(
                            "<div class=\"win-inner\">{}<div class=\"win-sub\">{}</div></div>",
                            ui::WIN_TEXT,
                            ui::win_subtitle(win_score)
                        ),
                    )?;
                }
            }

            match hud.celebration {
                Some(text) => self.show_celebration(text)?,
                None => self.clear_celebrations(),
            }
            Ok(())
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        dom: Dom,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        resize_pending: bool,
        last_hud: Option<Hud>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings, dom: Dom) -> Self {
            let mut state = GameState::with_tuning(seed, tuning);
            let (w, h) = dom.container_size();
            state.resize(w, h);
            let input = TickInput {
                autoplay: settings.autoplay,
                ..Default::default()
            };
            Self {
                state,
                settings,
                dom,
                accumulator: 0.0,
                last_time: 0.0,
                input,
                resize_pending: false,
                last_hud: None,
            }
        }

        /// True if pointer moves should be forwarded to the simulation
        fn drag_active(&self) -> bool {
            self.state.drag.is_dragging()
                || self
                    .input
                    .pointer
                    .iter()
                    .any(|p| matches!(p, PointerInput::Down { .. }))
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            if self.resize_pending {
                self.input.resize = Some(self.dom.container_size());
                self.resize_pending = false;
            }

            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.reset = false;
                self.input.resize = None;
                self.input.pointer.clear();
            }
        }

        /// Push the current state into the page
        fn render(&mut self) {
            let events = self.state.drain_events();
            if let Err(e) = self.dom.sync_world(&self.state, &events) {
                log::warn!("World sync failed: {}", e);
            }

            let hud = Hud::from_state(&self.state, &self.settings);
            if self.last_hud.as_ref() != Some(&hud) {
                if let Err(e) = self.dom.sync_hud(&hud, self.state.tuning.win_score) {
                    log::warn!("HUD sync failed: {}", e);
                }
                self.last_hud = Some(hud);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        console_log::init_with_level(settings.log_level()).expect("Failed to init logger");

        log::info!("Drop Catcher starting...");

        let tuning = Tuning::load();
        let dom = match Dom::new(&tuning) {
            Ok(dom) => dom,
            Err(e) => {
                log::error!("Cannot start: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings, dom)));
        log::info!("Game initialized with seed: {}", seed);

        setup_buttons(game.clone());
        setup_pointer_handlers(game.clone());
        setup_window_handlers(game.clone());

        game.borrow_mut().render();
        request_animation_frame(game);
    }

    fn first_element(document: &Document, ids: &[&str]) -> Option<Element> {
        ids.iter().find_map(|id| document.get_element_by_id(id))
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = game.borrow().dom.document.clone();

        if let Some(btn) = first_element(&document, &["start-bottom", "start-btn"]) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No start button found");
        }

        if let Some(btn) = first_element(&document, &["reset-bottom", "reset-btn"]) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("No reset button found");
        }
    }

    fn setup_pointer_handlers(game: Rc<RefCell<Game>>) {
        let player = game.borrow().dom.player.clone();
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse down on the jerry can
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.state.player.enabled {
                    return;
                }
                let (x, y) = g.dom.to_container(event.client_x(), event.client_y());
                g.input.pointer.push(PointerInput::Down { x, y });
                // Prevent text selection while dragging
                event.prevent_default();
            });
            let _ = player
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start on the jerry can
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.state.player.enabled {
                    return;
                }
                if let Some(touch) = event.touches().get(0) {
                    let (x, y) = g.dom.to_container(touch.client_x(), touch.client_y());
                    g.input.pointer.push(PointerInput::Down { x, y });
                    event.prevent_default();
                }
            });
            let _ = player
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move anywhere while dragging
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.drag_active() {
                    return;
                }
                let (x, _) = g.dom.to_container(event.client_x(), event.client_y());
                g.input.pointer.push(PointerInput::Move { x });
                event.prevent_default();
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (non-passive so the page doesn't scroll mid-drag)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.drag_active() {
                    return;
                }
                if let Some(touch) = event.touches().get(0) {
                    let (x, _) = g.dom.to_container(touch.client_x(), touch.client_y());
                    g.input.pointer.push(PointerInput::Move { x });
                    event.prevent_default();
                }
            });
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Release / cancel
        for (event_name, pointer) in [
            ("mouseup", PointerInput::Up),
            ("touchend", PointerInput::Up),
            ("touchcancel", PointerInput::Cancel),
        ] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.pointer.push(pointer);
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keep the player centered on resize/orientation changes
        for event_name in ["resize", "orientationchange"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize_pending = true;
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if matches!(event.key().as_str(), "i" | "I") {
                    let autoplay = g.settings.toggle_autoplay();
                    g.input.autoplay = autoplay;
                    g.settings.save();
                    log::info!("Autoplay: {}", autoplay);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
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

/// Headless autoplay session: useful for balance checks without a browser
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use drop_catcher::consts::SIM_DT;
    use drop_catcher::sim::{GamePhase, GameState, TickInput, tick};
    use drop_catcher::Tuning;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);
    let mut state = GameState::with_tuning(seed, Tuning::load());

    log::info!("Drop Catcher (native) headless autoplay, seed {}", seed);

    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };
    // Ten minutes of game time is far more than any session needs
    let max_ticks = (600.0 / SIM_DT) as u64;
    while state.time_ticks < max_ticks {
        tick(&mut state, &input, SIM_DT);
        if matches!(state.phase, GamePhase::Won | GamePhase::GameOver) {
            break;
        }
    }

    let outcome = match state.phase {
        GamePhase::Won => "won",
        GamePhase::GameOver => "lost",
        GamePhase::Ready | GamePhase::Playing => "timed out",
    };
    println!(
        "Seed {}: {} after {:.1}s (score {}, health {})",
        seed,
        outcome,
        state.time_ticks as f32 * SIM_DT,
        state.score,
        state.health,
    );
}
