//! Addressable, enable-gated commands and their search index.
//!
//! Responsibilities:
//! - Register commands once at startup and execute them by id.
//! - Synthesize hidden per-entity commands from id-prefix generators.
//! - Rank visible commands for the palette and remember recent runs.
//!
//! Does NOT handle:
//! - Key resolution; bindings reference commands by id (see `input::keymap`).
//! - Defining the application's commands (see `catalog`).
//!
//! Invariants:
//! - Ids are unique; duplicates are a construction error.
//! - Hidden and generated commands never appear in `search` but remain
//!   executable through `execute_by_id`.
//! - A disabled command is not an error: it reports its reason instead.

use std::collections::{HashMap, VecDeque};

use tally_config::constants::MAX_RECENT_COMMANDS;
use thiserror::Error;

use crate::input::keymap::Scope;
use crate::picker::matcher::words;

pub mod catalog;

/// Whether a command can run in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Enabled,
    Disabled(String),
}

impl Availability {
    pub fn disabled(reason: impl Into<String>) -> Self {
        Self::Disabled(reason.into())
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

type EnabledFn<S> = Box<dyn Fn(&S) -> Availability + Send + Sync>;
type ExecuteFn<S, T> = Box<dyn Fn(&mut S) -> Option<T> + Send + Sync>;
type GeneratorFn<S, T> = Box<dyn Fn(&str, &S) -> Option<Command<S, T>> + Send + Sync>;

/// An executable unit over state `S`, optionally producing a task `T`.
pub struct Command<S, T> {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Scopes the command is listed in. Empty means every scope.
    pub scopes: Vec<Scope>,
    pub hidden: bool,
    enabled: EnabledFn<S>,
    execute: ExecuteFn<S, T>,
}

impl<S, T> Command<S, T> {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        execute: impl Fn(&mut S) -> Option<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            scopes: Vec::new(),
            hidden: false,
            enabled: Box::new(|_: &S| Availability::Enabled),
            execute: Box::new(execute),
        }
    }

    pub fn scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes = scopes.into_iter().collect();
        self
    }

    pub fn enabled_when(
        mut self,
        enabled: impl Fn(&S) -> Availability + Send + Sync + 'static,
    ) -> Self {
        self.enabled = Box::new(enabled);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn availability(&self, state: &S) -> Availability {
        (self.enabled)(state)
    }

    pub fn applies_to(&self, scope: Scope) -> bool {
        self.scopes.is_empty() || self.scopes.contains(&scope)
    }

    fn run(&self, state: &mut S) -> Execution<T> {
        match self.availability(state) {
            Availability::Enabled => Execution::Ran((self.execute)(state)),
            Availability::Disabled(reason) => Execution::Disabled { reason },
        }
    }
}

impl<S, T> std::fmt::Debug for Command<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("scopes", &self.scopes)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Execution<T> {
    Ran(Option<T>),
    Disabled { reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("command registered twice: {0}")]
    Duplicate(String),
}

struct Generator<S, T> {
    prefix: String,
    build: GeneratorFn<S, T>,
}

pub struct CommandRegistry<S, T> {
    commands: Vec<Command<S, T>>,
    index: HashMap<String, usize>,
    generators: Vec<Generator<S, T>>,
    recent: VecDeque<String>,
}

impl<S, T> Default for CommandRegistry<S, T> {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            index: HashMap::new(),
            generators: Vec::new(),
            recent: VecDeque::new(),
        }
    }
}

impl<S, T> CommandRegistry<S, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Command<S, T>) -> Result<(), CommandError> {
        if self.index.contains_key(&command.id) {
            return Err(CommandError::Duplicate(command.id));
        }
        self.index.insert(command.id.clone(), self.commands.len());
        self.commands.push(command);
        Ok(())
    }

    /// Synthesize hidden commands for ids starting with `prefix`.
    ///
    /// The builder receives the id suffix and the current state.
    pub fn register_generator(
        &mut self,
        prefix: impl Into<String>,
        build: impl Fn(&str, &S) -> Option<Command<S, T>> + Send + Sync + 'static,
    ) {
        self.generators.push(Generator {
            prefix: prefix.into(),
            build: Box::new(build),
        });
    }

    pub fn get(&self, id: &str) -> Option<&Command<S, T>> {
        self.index.get(id).map(|&i| &self.commands[i])
    }

    pub fn commands(&self) -> &[Command<S, T>] {
        &self.commands
    }

    fn generate(&self, id: &str, state: &S) -> Option<Command<S, T>> {
        self.generators.iter().find_map(|generator| {
            let suffix = id.strip_prefix(generator.prefix.as_str())?;
            (generator.build)(suffix, state).map(Command::hidden)
        })
    }

    pub fn execute_by_id(&self, id: &str, state: &mut S) -> Result<Execution<T>, CommandError> {
        if let Some(command) = self.get(id) {
            return Ok(command.run(state));
        }
        match self.generate(id, state) {
            Some(command) => Ok(command.run(state)),
            None => Err(CommandError::NotFound(id.to_string())),
        }
    }

    pub fn record_recent(&mut self, id: &str) {
        self.recent.retain(|r| r != id);
        self.recent.push_front(id.to_string());
        self.recent.truncate(MAX_RECENT_COMMANDS);
    }

    pub fn recent(&self) -> impl Iterator<Item = &str> {
        self.recent.iter().map(String::as_str)
    }

    /// Rank visible commands for `scope` against `query`.
    ///
    /// An empty query lists recent commands first, then the rest in
    /// registration order.
    pub fn search(&self, query: &str, scope: Scope) -> Vec<&Command<S, T>> {
        let listed = |c: &&Command<S, T>| !c.hidden && c.applies_to(scope);
        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        if tokens.is_empty() {
            let recent: Vec<&Command<S, T>> = self
                .recent
                .iter()
                .filter_map(|id| self.get(id))
                .filter(listed)
                .collect();
            let rest = self
                .commands
                .iter()
                .filter(listed)
                .filter(|c| !self.recent.contains(&c.id));
            return recent.into_iter().chain(rest).collect();
        }

        let mut scored: Vec<(u32, usize, &Command<S, T>)> = self
            .commands
            .iter()
            .enumerate()
            .filter(|(_, c)| listed(c))
            .filter_map(|(i, c)| token_score(c, &tokens).map(|s| (s, i, c)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, c)| c).collect()
    }
}

/// Sum of per-token scores; `None` if any token matches nothing.
fn token_score<S, T>(command: &Command<S, T>, tokens: &[String]) -> Option<u32> {
    let haystack = [
        command.id.to_lowercase(),
        command.name.to_lowercase(),
        command.description.to_lowercase(),
    ];
    tokens.iter().try_fold(0u32, |total, token| {
        let best = haystack
            .iter()
            .flat_map(|text| words(text))
            .map(|word| {
                if word.starts_with(token.as_str()) {
                    2
                } else if word.contains(token.as_str()) {
                    1
                } else {
                    0
                }
            })
            .max()
            .unwrap_or(0);
        (best > 0).then_some(total + best)
    })
}
