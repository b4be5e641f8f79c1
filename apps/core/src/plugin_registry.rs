use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use crate::model::{CommandSource, PluginCommand};

/// The plugin descriptor directory itself could not be enumerated. Failures
/// of individual descriptor files are quarantined as warnings instead, so a
/// single broken plugin never disables the rest.
#[derive(Debug)]
pub enum LoadError {
    DirUnreadable { path: PathBuf, source: std::io::Error },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirUnreadable { path, source } => {
                write!(f, "plugin dir '{}' unreadable: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Immutable set of loaded commands in load order. Reload replaces the whole
/// registry; nothing is patched field-by-field after construction.
#[derive(Debug, Default, Clone)]
pub struct PluginRegistry {
    commands: Vec<PluginCommand>,
    by_command: HashMap<String, usize>,
    warnings: Vec<String>,
}

impl PluginRegistry {
    /// Builds a registry from commands in load order. A duplicate `command`
    /// token replaces the earlier entry in place (last-loaded wins) and is
    /// recorded as a non-fatal warning.
    pub fn from_commands(commands: Vec<PluginCommand>) -> Self {
        let mut registry = Self::default();
        for command in commands {
            registry.insert(command);
        }
        registry
    }

    /// Loads descriptors from every `*.json` file under `dir`, sorted by
    /// path so load order is deterministic across restarts. A missing
    /// directory yields an empty registry.
    pub fn load_from_dir(dir: &Path) -> Result<Self, LoadError> {
        Self::load_from_dir_seeded(Vec::new(), dir)
    }

    /// Like [`load_from_dir`](Self::load_from_dir), but with `seed` commands
    /// registered first, so descriptors on disk can shadow them.
    pub fn load_from_dir_seeded(
        seed: Vec<PluginCommand>,
        dir: &Path,
    ) -> Result<Self, LoadError> {
        let mut registry = Self::from_commands(seed);
        if !dir.exists() {
            return Ok(registry);
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(2) {
            let entry = entry.map_err(|error| LoadError::DirUnreadable {
                path: dir.to_path_buf(),
                source: error
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk entry unavailable")),
            })?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path
                    .extension()
                    .and_then(|v| v.to_str())
                    .is_some_and(|v| v.eq_ignore_ascii_case("json"))
            {
                paths.push(path.to_path_buf());
            }
        }
        paths.sort();

        for path in paths {
            match load_descriptor(&path) {
                Ok(command) => registry.insert(command),
                Err(reason) => registry.warnings.push(reason),
            }
        }
        Ok(registry)
    }

    fn insert(&mut self, command: PluginCommand) {
        match self.by_command.get(&command.command) {
            Some(&index) => {
                self.warnings.push(format!(
                    "duplicate command '{}': '{}' replaces '{}'",
                    command.command, command.name, self.commands[index].name
                ));
                self.commands[index] = command;
            }
            None => {
                self.by_command
                    .insert(command.command.clone(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    /// Commands in load order.
    pub fn all(&self) -> &[PluginCommand] {
        &self.commands
    }

    /// Exact-match lookup by command token. Case-sensitive.
    pub fn find_by_command(&self, token: &str) -> Option<&PluginCommand> {
        self.by_command
            .get(token)
            .map(|&index| &self.commands[index])
    }

    /// Per-descriptor quarantine and duplicate-command diagnostics collected
    /// during construction.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PluginDescriptor {
    name: String,
    command: String,
    description: String,
}

fn load_descriptor(path: &Path) -> Result<PluginCommand, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("read failed for '{}': {e}", path.display()))?;
    let descriptor: PluginDescriptor = serde_json::from_str(&raw)
        .map_err(|e| format!("invalid json in '{}': {e}", path.display()))?;

    let name = descriptor.name.trim();
    let command = descriptor.command.trim();
    if name.is_empty() {
        return Err(format!("missing plugin name in '{}'", path.display()));
    }
    if command.is_empty() {
        return Err(format!("missing plugin command in '{}'", path.display()));
    }

    Ok(PluginCommand::from_owned(
        name.to_string(),
        command.to_string(),
        descriptor.description.trim().to_string(),
        CommandSource::Plugin,
    ))
}
