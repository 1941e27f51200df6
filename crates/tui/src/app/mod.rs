//! The event-loop state machine.
//!
//! Responsibilities:
//! - Resolve each key to the active scope, a text-field edit, a command or
//!   a capability dispatch, and apply the outcome.
//! - Apply completion messages, dropping those addressed to closed contexts.
//! - Keep the command palette's listing current and expire status messages.
//!
//! Does NOT handle:
//! - Spawning work. `handle_event` returns the requests to dispatch; the
//!   runtime sends them to the collaborator.
//! - Drawing (see `ui`).
//!
//! Invariants:
//! - One event is handled to completion before the next; no handler awaits.
//! - While an overlay is open, keys it does not bind are swallowed, and
//!   app-level actions other than quit are ignored.

use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind};
use tally_config::Settings;

use crate::action::{Action, Completion, Invocation, InvocationKind, Payload, Request};
use crate::command::catalog::{self, AppCommands};
use crate::command::Execution;
use crate::context::{self, Context, Effects, Outcome, Overlay, PaletteContext, PaletteEntry, ViewerContext};
use crate::contract::{InteractionContract, footer};
use crate::error::StartupError;
use crate::event::Event;
use crate::input::help::help_text;
use crate::input::keymap::overrides::registry_with_overrides;
use crate::input::keymap::{BindingRegistry, KeyChord, Scope};
use crate::picker::MatchMode;
use crate::status::Status;

pub mod precedence;
pub mod state;

pub use precedence::{Handler, PrecedenceTable};
pub use state::{AppState, Tab};

pub struct App {
    pub state: AppState,
    keymap: BindingRegistry,
    commands: AppCommands,
    overlays: PrecedenceTable,
}

impl App {
    /// Build the app from loaded settings. Fails only on broken tables.
    pub fn new(settings: &Settings) -> Result<Self, StartupError> {
        let keymap = registry_with_overrides(&settings.keybind_overrides)?;
        Self::with_keymap(keymap, MatchMode::from(settings.picker_match_mode))
    }

    pub fn with_keymap(keymap: BindingRegistry, match_mode: MatchMode) -> Result<Self, StartupError> {
        Ok(Self {
            state: AppState::new(match_mode),
            keymap,
            commands: catalog::registry()?,
            overlays: precedence::table()?,
        })
    }

    /// Requests to issue before the first event.
    pub fn startup_requests(&self) -> Vec<Request> {
        vec![Request::new(self.state.transactions.id(), Invocation::LoadSnapshot)]
    }

    pub fn keymap(&self) -> &BindingRegistry {
        &self.keymap
    }

    pub fn commands(&self) -> &AppCommands {
        &self.commands
    }

    pub fn overlays(&self) -> &PrecedenceTable {
        &self.overlays
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit
    }

    /// The scope that owns the next key and the context that handles it.
    pub fn resolve(&self) -> (Scope, Handler) {
        self.overlays
            .resolve_or(&self.state, (self.state.base_scope(), Handler::Tab))
    }

    pub fn active_scope(&self) -> Scope {
        self.resolve().0
    }

    pub fn active_context(&self) -> &dyn Context {
        self.state.context(self.resolve().1)
    }

    pub fn active_context_mut(&mut self) -> &mut dyn Context {
        let (_, handler) = self.resolve();
        self.state.context_mut(handler)
    }

    pub fn contract(&self) -> InteractionContract {
        self.active_context().contract()
    }

    pub fn footer(&self, width: usize) -> String {
        footer::render_fitted(&self.contract(), &self.keymap, width)
    }

    /// Handle one event to completion and return the requests it produced.
    pub fn handle_event(&mut self, event: Event) -> Vec<Request> {
        let requests = match event {
            Event::Input(key) => self.handle_key(key),
            Event::Resize(width, height) => {
                self.state.viewport = (width, height);
                Vec::new()
            }
            Event::Tick => {
                self.expire_status(Instant::now());
                Vec::new()
            }
            Event::Completion(completion) => self.handle_completion(completion),
        };
        self.refresh_palette();
        requests
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Request> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        let (scope, handler) = self.resolve();

        if let Some(outcome) = context::edit_key(self.state.context_mut(handler), key) {
            return self.finish(outcome, Effects::new());
        }

        let Some(binding) = self.keymap.resolve(key, scope).cloned() else {
            tracing::debug!(%scope, key = %KeyChord::from(key), "Unbound key swallowed");
            return Vec::new();
        };

        if let Some(id) = binding.command {
            return self.run_command(id, false);
        }
        if binding.action.is_app_level() {
            return self.handle_app_action(binding.action);
        }

        let mut fx = Effects::new();
        let outcome = context::dispatch(self.state.context_mut(handler), binding.action, &mut fx);
        if outcome.is_noop() {
            tracing::debug!(%scope, action = %binding.action, "Action had no effect");
        }
        self.finish(outcome, fx)
    }

    fn finish(&mut self, outcome: Outcome, fx: Effects) -> Vec<Request> {
        let (mut requests, status) = fx.into_parts();
        if let Some(status) = status {
            self.state.set_status(status);
        }
        match outcome {
            Outcome::NoOp | Outcome::Handled => {}
            Outcome::Close => self.state.close_overlay(),
            Outcome::Run(id) => {
                self.state.close_overlay();
                requests.extend(self.run_command(&id, true));
            }
        }
        requests
    }

    fn handle_app_action(&mut self, action: Action) -> Vec<Request> {
        if let Some(overlay) = &self.state.overlay
            && action != Action::Quit
        {
            tracing::debug!(overlay = overlay.name(), %action, "App-level action ignored while overlay is open");
            return Vec::new();
        }
        match action {
            Action::Quit => self.state.quit = true,
            Action::Help => {
                let scope = self.state.base_scope();
                let text = help_text(&self.keymap, scope);
                self.state.open(Overlay::Help(ViewerContext::new(
                    Scope::Help,
                    format!("Help: {}", scope.title()),
                    text,
                )));
            }
            Action::OpenPalette => {
                let origin = self.state.base_scope();
                self.state.open(Overlay::Palette(PaletteContext::new(origin)));
            }
            Action::NextTab => self.state.tab = self.state.tab.next(),
            Action::PrevTab => self.state.tab = self.state.tab.prev(),
            _ => {}
        }
        Vec::new()
    }

    /// Execute a command by id. Disabled and unknown commands become status text.
    pub fn run_command(&mut self, id: &str, from_palette: bool) -> Vec<Request> {
        match self.commands.execute_by_id(id, &mut self.state) {
            Ok(Execution::Ran(request)) => {
                tracing::info!(command = id, "Command executed");
                if from_palette {
                    self.commands.record_recent(id);
                }
                request.into_iter().collect()
            }
            Ok(Execution::Disabled { reason }) => {
                tracing::debug!(command = id, %reason, "Command disabled");
                self.state.set_status(Status::info(reason));
                Vec::new()
            }
            Err(e) => {
                tracing::debug!(command = id, error = %e, "Command lookup failed");
                self.state.set_status(Status::error(e.to_string()));
                Vec::new()
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion) -> Vec<Request> {
        let span = tracing::info_span!(
            "tally.request",
            kind = %completion.kind,
            context = %completion.context
        );
        let _enter = span.enter();

        if !self.state.is_live(completion.context) {
            tracing::debug!("Discarding completion for a closed context");
            return Vec::new();
        }

        let kind = completion.kind;
        match completion.result {
            Err(error) => {
                tracing::warn!(%error, "Collaborator request failed");
                match kind {
                    InvocationKind::SuggestCategories => {
                        if let Some(Overlay::CategoryPicker(picker)) = &mut self.state.overlay
                            && picker.id() == completion.context
                        {
                            picker.suggestions_failed();
                        }
                    }
                    InvocationKind::RunDedupScan => self.state.dedup.scan_failed(),
                    InvocationKind::LoadSnapshot | InvocationKind::ResetData => {
                        self.state.loading = false;
                    }
                    _ => {}
                }
                self.state
                    .set_status(Status::error(format!("Failed to {}: {error}", kind.describe())));
                Vec::new()
            }
            Ok(payload) => self.apply_payload(kind, completion.context, payload),
        }
    }

    fn apply_payload(
        &mut self,
        kind: InvocationKind,
        context: crate::action::ContextId,
        payload: Payload,
    ) -> Vec<Request> {
        let mut follow_up = Vec::new();
        let message = match payload {
            Payload::Snapshot(data) => {
                self.state.set_data(data);
                kind.success_message().map(str::to_owned)
            }
            Payload::Suggestions(ids) => {
                if let Some(Overlay::CategoryPicker(picker)) = &mut self.state.overlay
                    && picker.id() == context
                {
                    picker.apply_suggestions(&ids);
                }
                None
            }
            Payload::Duplicates(groups) => {
                let count = groups.len();
                self.state.dedup.set_groups(groups);
                if kind == InvocationKind::ResolveDuplicate {
                    // Merges change transactions too.
                    follow_up.push(Request::new(self.state.dedup.id(), Invocation::LoadSnapshot));
                    kind.success_message().map(str::to_owned)
                } else {
                    Some(format!("Found {count} duplicate group(s)"))
                }
            }
            Payload::Done(message) => Some(message),
        };
        if let Some(message) = message {
            self.state.set_status(Status::success(message));
        }
        follow_up
    }

    fn expire_status(&mut self, now: Instant) {
        if self
            .state
            .status
            .as_ref()
            .is_some_and(|status| status.is_expired_at(now))
        {
            self.state.status = None;
        }
    }

    /// Re-run the palette search when its query changed.
    fn refresh_palette(&mut self) {
        let (query, origin) = match &self.state.overlay {
            Some(Overlay::Palette(palette)) if palette.is_dirty() => {
                (palette.query().to_string(), palette.origin())
            }
            _ => return,
        };
        let entries: Vec<PaletteEntry> = self
            .commands
            .search(&query, origin)
            .into_iter()
            .map(|command| PaletteEntry {
                id: command.id.clone(),
                name: command.name.clone(),
                description: command.description.clone(),
                disabled: match command.availability(&self.state) {
                    crate::command::Availability::Enabled => None,
                    crate::command::Availability::Disabled(reason) => Some(reason),
                },
            })
            .collect();
        if let Some(Overlay::Palette(palette)) = &mut self.state.overlay {
            palette.set_entries(entries);
        }
    }
}
