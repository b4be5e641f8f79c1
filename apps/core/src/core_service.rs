use std::sync::Arc;

use crate::action_executor::SystemActionRunner;
use crate::config::{self, Config};
use crate::contract::{
    ConfirmResponse, CoreRequest, CoreResponse, QueryResponse, ReloadPluginsResponse,
};
use crate::dispatcher::{self, ActionRunner, DispatchOutcome};
use crate::logging;
use crate::model::{PluginCommand, Suggestion};
use crate::plugin_registry::{LoadError, PluginRegistry};
use crate::query;
use crate::resolver;
use crate::session::QuerySequencer;

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Load(LoadError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Load(error) => write!(f, "load error: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<LoadError> for ServiceError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

/// The engine behind the launcher input box. Reacts to two events delivered
/// serially by the presentation layer: "query changed" and "query
/// confirmed". The registry lives in an `Arc` snapshot, so a reload swaps
/// the whole set atomically and readers never observe a partial registry.
pub struct CoreService {
    config: Config,
    registry: Arc<PluginRegistry>,
    sequencer: QuerySequencer,
    runner: Box<dyn ActionRunner>,
}

impl CoreService {
    /// Builds a service with builtins seeded, plugins loaded from the
    /// configured descriptor directory, and the system action runner.
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        config::validate(&config).map_err(ServiceError::Config)?;
        let registry =
            PluginRegistry::load_from_dir_seeded(resolver::builtin_commands(), &config.plugin_dir)?;
        let runner = Box::new(SystemActionRunner::new(config.clone()));
        Ok(Self {
            config,
            registry: Arc::new(registry),
            sequencer: QuerySequencer::default(),
            runner,
        })
    }

    /// Assembles a service from explicit parts. The registry is used as
    /// given; no builtins are seeded.
    pub fn with_parts(
        config: Config,
        registry: PluginRegistry,
        runner: Box<dyn ActionRunner>,
    ) -> Result<Self, ServiceError> {
        config::validate(&config).map_err(ServiceError::Config)?;
        Ok(Self {
            config,
            registry: Arc::new(registry),
            sequencer: QuerySequencer::default(),
            runner,
        })
    }

    /// Synchronous resolution for a keystroke. Never fails; an unmatched
    /// query still yields a defined (possibly empty) list. Truncation to
    /// `max_results` happens here, above the resolver.
    pub fn on_query_changed(&mut self, raw: &str) -> Vec<Suggestion> {
        let ticket = self.sequencer.begin_query();
        let mode = query::classify(raw);
        let mut suggestions = resolver::resolve(&mode, &self.registry);
        suggestions.truncate(self.config.max_results as usize);

        // Resolution is synchronous, so delivery order matches call order
        // and the ticket is always current.
        let _ = self.sequencer.accept_suggestions(ticket);
        suggestions
    }

    /// Dispatches a confirmed query against the registry snapshot current at
    /// confirmation time. If a newer confirmation settles first, this
    /// outcome is discarded (last-confirmed-wins).
    pub fn on_query_confirmed(&mut self, raw: &str) -> DispatchOutcome {
        let ticket = self.sequencer.begin_confirmation();
        let registry = Arc::clone(&self.registry);
        let outcome = dispatcher::dispatch(raw, &registry, self.runner.as_ref());

        if self.sequencer.accept_outcome(ticket) {
            outcome
        } else {
            DispatchOutcome::Failure("superseded by a newer confirmation".to_string())
        }
    }

    /// Replaces the plugin set wholesale. Builtins are re-seeded ahead of
    /// the new set; suggestion lists already handed out keep pointing at the
    /// old snapshot and are unaffected.
    pub fn on_plugins_reloaded(&mut self, commands: Vec<PluginCommand>) {
        let mut seeded = resolver::builtin_commands();
        seeded.extend(commands);
        self.registry = Arc::new(PluginRegistry::from_commands(seeded));
    }

    /// Re-runs the descriptor directory load and swaps the snapshot.
    /// Returns the number of registered commands.
    pub fn reload_from_disk(&mut self) -> Result<usize, ServiceError> {
        let registry = PluginRegistry::load_from_dir_seeded(
            resolver::builtin_commands(),
            &self.config.plugin_dir,
        )?;
        for warning in registry.warnings() {
            logging::warn(warning);
        }
        self.registry = Arc::new(registry);
        Ok(self.registry.len())
    }

    pub fn registry(&self) -> Arc<PluginRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn handle_command(&mut self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Query(request) => {
                let suggestions = self
                    .on_query_changed(&request.query)
                    .into_iter()
                    .map(Into::into)
                    .collect();
                Ok(CoreResponse::Query(QueryResponse { suggestions }))
            }
            CoreRequest::Confirm(request) => {
                let outcome = self.on_query_confirmed(&request.query);
                Ok(CoreResponse::Confirm(ConfirmResponse::from(outcome)))
            }
            CoreRequest::ReloadPlugins(_) => {
                let loaded = self.reload_from_disk()?;
                Ok(CoreResponse::ReloadPlugins(ReloadPluginsResponse {
                    loaded,
                    warnings: self.registry.warnings().to_vec(),
                }))
            }
        }
    }
}
