use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{error, info, warn};

use crate::client::{ClientError, SubmissionCoordinator, SwarmResponse, Transport};
use crate::model::{SubmissionPayload, resolve_form};
use crate::store::{Store, SwarmAction, SwarmStore};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{HelpState, SwarmFormState, draw_help, draw_swarm_form};
use super::widgets::{StatusBarContext, StatusMessage, draw_status_bar};

/// How long the loop waits for input before checking for replies.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of one start request.
type Completion = Result<SwarmResponse, ClientError>;

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Collect parameters and start a swarm.
    SwarmForm,
    /// Show keybinding help.
    Help,
}

impl Screen {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SwarmForm => "Start Swarm",
            Self::Help => "Help",
        }
    }
}

/// Top-level application state.
///
/// Owns the shared store; replies to start requests come back over a channel
/// and are applied on the UI loop.
pub struct App<T> {
    screen: Screen,
    store: Store,
    coordinator: SubmissionCoordinator<T>,
    runtime: Handle,
    swarm_form: SwarmFormState,
    help: HelpState,
    completions_tx: UnboundedSender<Completion>,
    completions: UnboundedReceiver<Completion>,
    in_flight: usize,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl<T: Transport + 'static> App<T> {
    /// Creates a new `App` on the [`Screen::SwarmForm`] screen.
    ///
    /// Requests are spawned onto `runtime`.
    pub fn new(store: Store, coordinator: SubmissionCoordinator<T>, runtime: Handle) -> Self {
        let swarm_form = SwarmFormState::new(resolve_form(store.swarm()));
        let (completions_tx, completions) = unbounded_channel();
        Self {
            screen: Screen::SwarmForm,
            store,
            coordinator,
            runtime,
            swarm_form,
            help: HelpState::new(),
            completions_tx,
            completions,
            in_flight: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Main event loop: draw → apply replies → poll input → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            self.drain_completions();
            if event::poll(POLL_INTERVAL)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen {
            Screen::SwarmForm => draw_swarm_form(&self.swarm_form, frame, main_area),
            Screen::Help => draw_help(&self.help, frame, main_area),
        }
        draw_status_bar(&self.status_context(), frame, status_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::F(1) => {
                if self.screen != Screen::Help {
                    self.help.set_origin(self.screen);
                    self.screen = Screen::Help;
                }
            }
            _ => {
                let action = self.active_screen().handle_key(key);
                self.apply(action);
            }
        }
    }

    fn active_screen(&mut self) -> &mut dyn ScreenState {
        match self.screen {
            Screen::SwarmForm => &mut self.swarm_form,
            Screen::Help => &mut self.help,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::StartSwarm(payload) => self.submit(payload),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Hands `payload` to the coordinator and spawns the request.
    fn submit(&mut self, payload: SubmissionPayload) {
        let state = self.store.swarm().state;
        if !state.can_start() {
            warn!(%state, "start requested while a test is active");
        }

        let pending = self.coordinator.start_swarm(&mut self.store, payload);
        let tx = self.completions_tx.clone();
        self.runtime.spawn(async move {
            // The receiver only closes when the app is shutting down.
            let _ = tx.send(pending.await);
        });
        self.in_flight += 1;
        self.status = Some(StatusMessage::Info("Starting swarm...".to_string()));
    }

    /// Applies every reply that has arrived without blocking.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.complete(completion);
        }
    }

    /// Applies one reply to shared state and the status bar.
    ///
    /// Failures are reported but leave the swarm state as submitted.
    fn complete(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Ok(reply) if reply.success => {
                info!(host = ?reply.host, "swarm started");
                self.store
                    .dispatch(SwarmAction::Started { host: reply.host });
                // Later submissions carry the host the backend settled on.
                self.swarm_form = SwarmFormState::new(resolve_form(self.store.swarm()));
                let message = if reply.message.is_empty() {
                    "Swarm started".to_string()
                } else {
                    reply.message
                };
                self.status = Some(StatusMessage::Info(message));
            }
            Ok(reply) => {
                warn!(message = %reply.message, "backend rejected start");
                self.swarm_form.set_error(reply.message.clone());
                self.status = Some(StatusMessage::Error(reply.message));
            }
            Err(e) => {
                error!(error = %e, "start request failed");
                self.status = Some(StatusMessage::Error(e.to_string()));
            }
        }
    }

    fn status_context(&self) -> StatusBarContext {
        let swarm = self.store.swarm();
        StatusBarContext {
            state: swarm.state,
            host: swarm.host.clone(),
            num_users: swarm.num_users,
            in_flight: self.in_flight,
            message: self.status.clone(),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the shared store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Number of start requests awaiting a reply.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns the latest status message, if any.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}
