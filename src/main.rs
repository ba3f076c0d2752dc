//! Fruit Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlInputElement,
        KeyboardEvent,
    };

    use fruit_catcher::consts::SIM_DT;
    use fruit_catcher::error::StoreError;
    use fruit_catcher::leaderboard::{KeyValueBackend, LocalStorageBackend};
    use fruit_catcher::platform::{Key, KeyEvent};
    use fruit_catcher::renderer::{FrameView, Renderer, heart_positions};
    use fruit_catcher::sim::{GameEvent, GamePhase};
    use fruit_catcher::{ColorAssets, Game, GameConfig, JsonStore, Leaderboard, MemoryBackend};

    const BACKGROUND: &str = "#f0f8ff";
    const BASKET_COLOR: &str = "#8b4513";
    const TEXT_COLOR: &str = "#222222";
    const HEART_COLOR: &str = "#e53935";

    /// LocalStorage when the browser allows it, otherwise scores only last
    /// until the tab closes
    enum BrowserStorage {
        Local(LocalStorageBackend),
        Memory(MemoryBackend),
    }

    impl KeyValueBackend for BrowserStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            match self {
                BrowserStorage::Local(b) => b.get_item(key),
                BrowserStorage::Memory(b) => b.get_item(key),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            match self {
                BrowserStorage::Local(b) => b.set_item(key, value),
                BrowserStorage::Memory(b) => b.set_item(key, value),
            }
        }
    }

    type WebGame = Game<JsonStore<BrowserStorage>, &'static str>;

    /// Draws frames onto a 2D canvas context
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer<&'static str> for CanvasRenderer {
        fn draw(&mut self, view: &FrameView<'_, &'static str>) {
            let ctx = &self.ctx;
            let width = view.arena.width as f64;
            let height = view.arena.height as f64;

            ctx.set_fill_style_str(BACKGROUND);
            ctx.fill_rect(0.0, 0.0, width, height);

            // Basket
            let actor = view.actor;
            ctx.set_fill_style_str(BASKET_COLOR);
            ctx.fill_rect(
                actor.x as f64,
                actor.y as f64,
                actor.width as f64,
                actor.height as f64,
            );

            // Falling objects
            for obj in view.objects {
                let color = view.assets.get(obj.kind).copied().unwrap_or(TEXT_COLOR);
                let r = obj.size as f64 / 2.0;
                ctx.set_fill_style_str(color);
                ctx.begin_path();
                let _ = ctx.arc(obj.pos.x as f64 + r, obj.pos.y as f64 + r, r, 0.0, TAU);
                ctx.fill();
            }

            // HUD
            ctx.set_fill_style_str(TEXT_COLOR);
            ctx.set_font("24px sans-serif");
            ctx.set_text_align("left");
            let _ = ctx.fill_text(&format!("Score: {}", view.ledger.score), 10.0, 40.0);

            ctx.set_fill_style_str(HEART_COLOR);
            ctx.set_font("30px sans-serif");
            for pos in heart_positions(view.ledger.lives, view.arena.width) {
                let _ = ctx.fill_text("\u{2665}", pos.x as f64, pos.y as f64 + 10.0);
            }

            if let Some(banner) = view.banner() {
                ctx.set_fill_style_str(TEXT_COLOR);
                ctx.set_text_align("center");
                ctx.set_font("36px sans-serif");
                let _ = ctx.fill_text(banner.title, width / 2.0, height / 2.0);
                if let Some(subtitle) = banner.subtitle {
                    ctx.set_font("20px sans-serif");
                    let _ = ctx.fill_text(subtitle, width / 2.0, height / 2.0 + 36.0);
                }
            }
        }
    }

    struct App {
        game: WebGame,
        renderer: CanvasRenderer,
        last_time: f64,
        /// Phase the DOM overlays were last synced to
        shown_phase: Option<GamePhase>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            let mut finished = false;
            for event in self.game.advance(dt) {
                log::debug!("{:?}", event);
                finished |= event == GameEvent::ResetDue;
            }
            if finished {
                // The finished session's score is in the store now
                if let Some(document) = document() {
                    render_leaderboard(&document, &self.game.leaderboard());
                }
            }
            self.game.render(&mut self.renderer);
            self.sync_overlays();
        }

        /// Show or hide the identity modal on phase changes
        fn sync_overlays(&mut self) {
            let phase = self.game.phase();
            let was_awaiting = self.shown_phase == Some(GamePhase::AwaitingIdentity);
            let awaiting = phase == GamePhase::AwaitingIdentity;
            if self.shown_phase.is_some() && was_awaiting == awaiting {
                self.shown_phase = Some(phase);
                return;
            }
            self.shown_phase = Some(phase);

            let Some(document) = document() else { return };
            if let Some(modal) = document.get_element_by_id("identityModal") {
                let class = if awaiting { "modal" } else { "modal hidden" };
                let _ = modal.set_attribute("class", class);
            }
            if awaiting {
                if let Some(id_input) = input_by_id(&document, "playerId") {
                    id_input.set_value("");
                    let _ = id_input.focus();
                }
                if let Some(name_input) = input_by_id(&document, "playerName") {
                    name_input.set_value("");
                }
                set_form_error(&document, None);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_form_error(document: &Document, message: Option<&str>) {
        if let Some(el) = document.get_element_by_id("formError") {
            el.set_text_content(message);
        }
    }

    fn escape_html(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                _ => out.push(c),
            }
        }
        out
    }

    fn render_leaderboard(document: &Document, board: &Leaderboard) {
        let Some(body) = document.get_element_by_id("playerTableBody") else {
            return;
        };
        let rows: String = board
            .entries
            .iter()
            .map(|p| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&p.id),
                    escape_html(&p.name),
                    p.best_score
                )
            })
            .collect();
        body.set_inner_html(&rows);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Fruit Catcher starting...");

        let Some(document) = document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let config = GameConfig::load();
        canvas.set_width(config.arena.width as u32);
        canvas.set_height(config.arena.height as u32);

        let backend = match LocalStorageBackend::open() {
            Some(local) => BrowserStorage::Local(local),
            None => {
                log::warn!("LocalStorage unavailable, scores will not persist");
                BrowserStorage::Memory(MemoryBackend::default())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = match Game::boot(config, seed, JsonStore::new(backend), &ColorAssets).await {
            Ok(game) => game,
            Err(e) => {
                log::error!("Failed to start: {}", e);
                return;
            }
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let app = Rc::new(RefCell::new(App {
            game,
            renderer: CanvasRenderer { ctx },
            last_time: 0.0,
            shown_phase: None,
        }));

        render_leaderboard(&document, &app.borrow().game.leaderboard());

        setup_keyboard(app.clone());
        setup_identity_form(app.clone());
        setup_focus_loss(app.clone());

        request_animation_frame(app);

        log::info!("Fruit Catcher running!");
    }

    /// True when the event came from a text-entry element
    fn from_text_field(event: &KeyboardEvent) -> bool {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"))
            .unwrap_or(false)
    }

    fn to_key_event(event: &KeyboardEvent, pressed: bool) -> KeyEvent {
        let key = Key::from_dom_key(&event.key());
        let mut ev = if pressed {
            KeyEvent::press(key)
        } else {
            KeyEvent::release(key)
        };
        ev.repeat = event.repeat();
        if from_text_field(event) {
            ev = ev.in_text_field();
        }
        ev
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };

        for (name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let consumed = app
                    .borrow_mut()
                    .game
                    .handle_key(to_key_event(&event, pressed));
                if consumed {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_identity_form(app: Rc<RefCell<App>>) {
        let Some(doc) = document() else { return };

        // Returning players get their name filled in
        if let Some(id_input) = input_by_id(&doc, "playerId") {
            let app = app.clone();
            let field = id_input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let name = app.borrow_mut().game.form_id_input(&field.value());
                if let Some(name) = name {
                    if let Some(name_input) =
                        document().and_then(|d| input_by_id(&d, "playerName"))
                    {
                        name_input.set_value(&name);
                    }
                }
            });
            let _ = id_input
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = doc.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = document() else { return };
                let id = input_by_id(&document, "playerId").map(|i| i.value()).unwrap_or_default();
                let name_input = input_by_id(&document, "playerName");
                let name = name_input.as_ref().map(|i| i.value()).unwrap_or_default();

                let mut app = app.borrow_mut();
                app.game.form_id_input(&id);
                app.game.form_name_input(&name);
                match app.game.submit_identity() {
                    Ok(()) => {
                        set_form_error(&document, None);
                        if let Some(name_input) = name_input {
                            let _ = name_input.blur();
                        }
                    }
                    Err(e) => set_form_error(&document, Some(&e.to_string())),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Held keys never see their keyup once the window loses focus
    fn setup_focus_loss(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().game.release_keys();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fruit Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    if let Err(e) = headless::run_demo() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use fruit_catcher::assets::catalog_kinds;
    use fruit_catcher::consts::SIM_DT;
    use fruit_catcher::renderer::{FrameView, Renderer};
    use fruit_catcher::sim::{GameEvent, Signal};
    use fruit_catcher::{
        AssetMap, ColorAssets, Game, GameConfig, GameError, JsonStore, MemoryBackend,
    };

    /// Ten minutes of play at 60 Hz
    const MAX_TICKS: u32 = 10 * 60 * 60;
    /// Print the HUD once per simulated second
    const REPORT_EVERY: u32 = 60;

    /// Prints the HUD line every so often
    #[derive(Default)]
    struct TextRenderer {
        frames: u32,
    }

    impl Renderer<&'static str> for TextRenderer {
        fn draw(&mut self, view: &FrameView<'_, &'static str>) {
            if self.frames % REPORT_EVERY == 0 {
                println!("{}", view.hud_line());
            }
            self.frames += 1;
        }
    }

    pub fn run_demo() -> Result<(), GameError> {
        let config = GameConfig::load();
        let assets: AssetMap<&'static str> = catalog_kinds(&config.catalog)
            .into_iter()
            .map(|kind| (kind, ColorAssets::color(kind)))
            .collect();

        let seed = 42;
        let mut game = Game::new(config, seed, JsonStore::new(MemoryBackend::default()), assets)?;
        let mut renderer = TextRenderer::default();

        game.request(Signal::Confirm);
        game.step();
        game.form_id_input("demo");
        game.form_name_input("Autopilot");
        game.submit_identity()?;
        game.set_demo(true);

        let mut ticks = 0;
        'outer: while ticks < MAX_TICKS {
            for event in game.advance(SIM_DT * 1.01) {
                match event {
                    GameEvent::GameOver { score } => println!("Game over with score {}", score),
                    GameEvent::ResetDue => break 'outer,
                    _ => {}
                }
            }
            game.render(&mut renderer);
            ticks += 1;
        }
        game.render(&mut renderer);

        println!("\nLeaderboard:");
        let board = game.leaderboard();
        if board.is_empty() {
            println!("  (no finished sessions after {} ticks)", ticks);
        }
        for (rank, player) in board.entries.iter().enumerate() {
            println!("  {}. {} ({}) {}", rank + 1, player.name, player.id, player.best_score);
        }
        if let Some(best) = board.top_score() {
            println!("Best score: {}", best);
        }
        Ok(())
    }
}
