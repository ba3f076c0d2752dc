//! Host-facing game driver
//!
//! Owns the session, the player store, the loaded assets, the identity form
//! and input state. Hosts forward events in and call [`Game::advance`] once
//! per display refresh.

use crate::assets::{AssetLoader, AssetMap, catalog_kinds, load_catalog_assets};
use crate::error::GameError;
use crate::identity::IdentityForm;
use crate::leaderboard::{Leaderboard, PlayerStore};
use crate::platform::{FrameClock, InputState, KeyEvent};
use crate::renderer::{FrameView, Renderer};
use crate::settings::GameConfig;
use crate::sim::{self, GameEvent, GamePhase, Session, Signal, TickInput};

pub struct Game<S, H> {
    session: Session,
    store: S,
    assets: AssetMap<H>,
    form: IdentityForm,
    input: InputState,
    clock: FrameClock,
    demo: bool,
}

impl<S: PlayerStore, H> Game<S, H> {
    /// Build a game from already-loaded assets
    pub fn new(
        config: GameConfig,
        seed: u64,
        store: S,
        assets: AssetMap<H>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        assets.ensure_complete(&catalog_kinds(&config.catalog))?;
        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            session: Session::new(config, seed),
            store,
            assets,
            form: IdentityForm::new(),
            input: InputState::new(),
            clock: FrameClock::new(),
            demo: false,
        })
    }

    /// Load assets, then build the game. Nothing starts until the loader
    /// resolves.
    pub async fn boot<L>(
        config: GameConfig,
        seed: u64,
        store: S,
        loader: &L,
    ) -> Result<Self, GameError>
    where
        L: AssetLoader<Handle = H>,
    {
        config.validate()?;
        let assets = load_catalog_assets(loader, &config.catalog).await?;
        Self::new(config, seed, store, assets)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &IdentityForm {
        &self.form
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::from_store(&self.store)
    }

    /// Idle/demo mode - autopilot steers the basket
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
        log::info!("Demo mode: {}", demo);
    }

    /// Forward a keyboard event. Returns true if the host should suppress
    /// the browser's default action.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        self.input.handle(event)
    }

    /// Queue a signal from a button or menu
    pub fn request(&mut self, signal: Signal) {
        self.input.push_signal(signal);
    }

    /// Forget held keys, e.g. when the window loses focus
    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    /// The player typed in the ID field. Returns the auto-filled name.
    pub fn form_id_input(&mut self, id: &str) -> Option<String> {
        self.form.set_id(id, &self.store).map(str::to_string)
    }

    pub fn form_name_input(&mut self, name: &str) {
        self.form.set_name(name);
    }

    /// Submit the identity form and start play. Fails without touching
    /// the form unless the game is waiting for a player.
    pub fn submit_identity(&mut self) -> Result<(), GameError> {
        let phase = self.session.phase;
        if phase != GamePhase::AwaitingIdentity {
            log::warn!("Identity submitted in {:?}, ignoring", phase);
            return Err(GameError::NotAwaitingIdentity(phase));
        }
        let identity = self.form.submit(&self.store)?;
        sim::begin(&mut self.session, identity);
        self.input.release_all();
        self.clock.reset();
        Ok(())
    }

    /// Abandon the current session and reopen the identity form
    pub fn reset(&mut self) {
        self.session.reset();
        self.form.clear();
        self.input.release_all();
        self.clock.reset();
    }

    /// Run one fixed simulation step
    pub fn step(&mut self) -> Vec<GameEvent> {
        let signal = self.input.next_signal();
        let before = self.session.phase;
        let input = TickInput {
            moving_left: self.input.moving_left,
            moving_right: self.input.moving_right,
            confirm: signal == Some(Signal::Confirm),
            restart: signal == Some(Signal::Restart),
            demo: self.demo,
        };
        let events = sim::tick(&mut self.session, &input);
        if signal == Some(Signal::Restart) && self.session.phase != before {
            self.form.clear();
        }
        if events.contains(&GameEvent::ResetDue) {
            self.finish_session();
        }
        events
    }

    /// Advance by elapsed wall-clock time, running as many fixed steps as
    /// fit. Call once per display refresh.
    pub fn advance(&mut self, elapsed_secs: f32) -> Vec<GameEvent> {
        let steps = self.clock.advance(elapsed_secs);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.step());
        }
        events
    }

    pub fn view(&self) -> FrameView<'_, H> {
        FrameView::new(&self.session, &self.assets)
    }

    pub fn render<R: Renderer<H>>(&self, renderer: &mut R) {
        renderer.draw(&self.view());
    }

    /// Persist the finished session's score, then start over
    fn finish_session(&mut self) {
        let score = self.session.ledger.score;
        match &self.session.identity {
            Some(identity) => {
                if let Err(e) = self.store.upsert_best_score(&identity.id, &identity.name, score) {
                    log::error!("Failed to save score for {}: {}", identity.id, e);
                } else {
                    log::info!("Saved score {} for {}", score, identity.id);
                }
            }
            None => log::warn!("Session ended without a player, score {} not saved", score),
        }
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ColorAssets;
    use crate::error::ValidationError;
    use crate::leaderboard::{JsonStore, MemoryBackend};
    use crate::platform::Key;

    type TestGame = Game<JsonStore<MemoryBackend>, &'static str>;

    fn game() -> TestGame {
        pollster::block_on(Game::boot(
            GameConfig::default(),
            1,
            JsonStore::new(MemoryBackend::default()),
            &ColorAssets,
        ))
        .unwrap()
    }

    #[test]
    fn test_confirm_opens_form_on_next_step() {
        let mut game = game();
        game.handle_key(KeyEvent::press(Key::Confirm));
        assert_eq!(game.phase(), GamePhase::Idle);
        game.step();
        assert_eq!(game.phase(), GamePhase::AwaitingIdentity);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut game = game();
        game.request(Signal::Confirm);
        game.step();
        game.form_id_input("p1");
        assert!(matches!(
            game.submit_identity(),
            Err(GameError::Validation(ValidationError::MissingName))
        ));
        assert_eq!(game.phase(), GamePhase::AwaitingIdentity);
        assert_eq!(game.form().error, Some(ValidationError::MissingName));
    }

    #[test]
    fn test_submit_while_idle_is_refused() {
        let mut game = game();
        game.form_id_input("p1");
        game.form_name_input("Pat");
        assert!(matches!(
            game.submit_identity(),
            Err(GameError::NotAwaitingIdentity(GamePhase::Idle))
        ));
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.session().identity.is_none());
        assert_eq!(game.form().name, "Pat");
        assert!(game.form().error.is_none());
    }

    #[test]
    fn test_ignored_restart_keeps_form() {
        let mut game = game();
        game.request(Signal::Confirm);
        game.step();
        game.form_id_input("p1");
        game.form_name_input("Pat");

        game.handle_key(KeyEvent::press(Key::Restart));
        game.step();

        assert_eq!(game.phase(), GamePhase::AwaitingIdentity);
        assert_eq!(game.form().id, "p1");
        assert_eq!(game.form().name, "Pat");
    }

    #[test]
    fn test_restart_while_running_clears_form() {
        let mut game = game();
        game.request(Signal::Confirm);
        game.step();
        game.form_id_input("p1");
        game.form_name_input("Pat");
        game.submit_identity().unwrap();

        game.request(Signal::Restart);
        game.step();

        assert_eq!(game.phase(), GamePhase::AwaitingIdentity);
        assert!(game.form().id.is_empty());
        assert!(game.session().identity.is_none());
    }

    #[test]
    fn test_missing_asset_blocks_start() {
        let assets: AssetMap<&str> = AssetMap::new();
        let result = Game::new(
            GameConfig::default(),
            1,
            JsonStore::new(MemoryBackend::default()),
            assets,
        );
        assert!(matches!(result, Err(GameError::Assets(_))));
    }

    #[test]
    fn test_invalid_config_blocks_start() {
        let config = GameConfig {
            max_lives: 0,
            ..GameConfig::default()
        };
        let result = pollster::block_on(Game::boot(
            config,
            1,
            JsonStore::new(MemoryBackend::default()),
            &ColorAssets,
        ));
        assert!(matches!(result, Err(GameError::Config(_))));
    }
}
