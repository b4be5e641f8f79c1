use std::fmt::{Display, Formatter};

use crate::model::CommandSource;
use crate::plugin_registry::PluginRegistry;
use crate::query::COMMAND_PREFIX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    ScriptMissing(String),
    Spawn(String),
    Failed(String),
}

impl Display for RunError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScriptMissing(command) => write!(f, "plugin script not found: {command}"),
            Self::Spawn(error) => write!(f, "failed to spawn action: {error}"),
            Self::Failed(reason) => write!(f, "action failed: {reason}"),
        }
    }
}

impl std::error::Error for RunError {}

/// External collaborator that performs the actual OS/network work. The core
/// never opens URLs or spawns processes itself.
pub trait ActionRunner {
    fn run_plugin_command(&self, command: &str) -> Result<String, RunError>;
    fn run_builtin_action(&self, raw: &str) -> Result<String, RunError>;
}

/// Result of a confirmed query. Always a defined value; runner failures are
/// surfaced here, never propagated as panics, and the core does not retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success(String),
    Failure(String),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Executes a confirmed query.
///
/// Resolver filtering is advisory; dispatch re-validates with an exact
/// lookup so free text sharing a substring with a command token never
/// triggers it. The token keeps its case (exact matching is case-sensitive)
/// and only the leading sentinel is stripped before lookup. When nothing
/// matches, the fallback receives `raw` unchanged, sentinel included.
pub fn dispatch(raw: &str, registry: &PluginRegistry, runner: &dyn ActionRunner) -> DispatchOutcome {
    let token = raw.strip_prefix(COMMAND_PREFIX).unwrap_or(raw);

    let result = match registry.find_by_command(token) {
        Some(command) if command.source == CommandSource::Plugin => {
            runner.run_plugin_command(&command.command)
        }
        // Builtins are executed by token semantics the runner owns, so it
        // gets the raw text, same as the fallback path.
        Some(_) | None => runner.run_builtin_action(raw),
    };

    match result {
        Ok(message) => DispatchOutcome::Success(message),
        Err(error) => DispatchOutcome::Failure(error.to_string()),
    }
}
