//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - A watcher task forwards every session snapshot as `SessionChanged`
//! - The runtime drains `inbox_rx` each loop iteration
//!
//! Structure:
//! - `mod.rs`: Core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations (API calls)

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use gymtrack_core::api::ApiClient;
use gymtrack_core::config::Config;
use gymtrack_core::core::interrupt;
use gymtrack_core::core::session::SessionHolder;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick rate while a request is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(50);

/// Poll duration when nothing is running.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on exit, panic, or a second Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    session: Arc<SessionHolder>,
    api: ApiClient,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each loop iteration.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config, session: Arc<SessionHolder>, api: ApiClient) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });

        // Reset interrupt flag in case it was set from a previous run
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(session.state(), config.ui.toast_duration());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        spawn_session_watcher(&session, inbox_tx.clone());

        Ok(Self {
            terminal,
            state,
            session,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            if interrupt::is_interrupted() {
                self.state.tui.should_quit = true;
                break;
            }

            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }
            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the inbox and the terminal, then a Tick if due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain inbox - all async results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick only when there is nothing to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Executes a single effect by dispatching to the appropriate handler.
    ///
    /// Session mutations run inline; their outcome comes back through the
    /// session watcher. API calls are spawned.
    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::SignOut => self.session.sign_out(),
            UiEffect::ExpireSession => self.session.expire(),
            UiEffect::ReplaceUser(user) => self.session.replace_user(user),

            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let session = Arc::clone(&self.session);
                self.spawn_effect(move || handlers::sign_in(session, task, email, password));
            }
            UiEffect::SignUp {
                task,
                name,
                email,
                password,
            } => {
                let api = self.api.clone();
                let session = Arc::clone(&self.session);
                self.spawn_effect(move || {
                    handlers::sign_up(api, session, task, name, email, password)
                });
            }

            UiEffect::LoadGroups { task } => {
                let (api, token) = self.api_call();
                self.spawn_effect(move || handlers::load_groups(api, token, task));
            }
            UiEffect::LoadExercises { task, group } => {
                let (api, token) = self.api_call();
                self.spawn_effect(move || handlers::load_exercises(api, token, task, group));
            }
            UiEffect::LoadHistory { task } => {
                let (api, token) = self.api_call();
                self.spawn_effect(move || handlers::load_history(api, token, task));
            }
            UiEffect::UpdateProfile {
                task,
                name,
                old_password,
                password,
            } => {
                let (api, token) = self.api_call();
                self.spawn_effect(move || {
                    handlers::update_profile(api, token, task, name, old_password, password)
                });
            }
            UiEffect::UploadAvatar { task, path } => {
                let (api, token) = self.api_call();
                self.spawn_effect(move || handlers::upload_avatar(api, token, task, path));
            }
        }
    }

    /// Client and the token current at dispatch time.
    fn api_call(&self) -> (ApiClient, Option<String>) {
        (self.api.clone(), self.session.token())
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Forwards every published session state to the inbox until the runtime
/// drops its receiver.
fn spawn_session_watcher(session: &SessionHolder, tx: UiEventSender) {
    let mut rx = session.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if tx.send(UiEvent::SessionChanged(state)).is_err() {
                break;
            }
        }
    });
}
