use std::process::Command;

use crate::config::Config;
use crate::dispatcher::{ActionRunner, RunError};
use crate::query::COMMAND_PREFIX;
use crate::resolver;

/// Action runner backed by the operating system: plugin commands run as
/// child processes, builtin commands and the web-search fallback open URLs
/// through the platform opener.
pub struct SystemActionRunner {
    config: Config,
}

impl SystemActionRunner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ActionRunner for SystemActionRunner {
    fn run_plugin_command(&self, command: &str) -> Result<String, RunError> {
        let script = self.config.plugin_dir.join(format!("{command}.js"));
        if !script.exists() {
            return Err(RunError::ScriptMissing(command.to_string()));
        }

        let output = Command::new(&script)
            .output()
            .map_err(|e| RunError::Spawn(e.to_string()))?;
        if !output.status.success() {
            return Err(RunError::Failed(format!(
                "plugin '{command}' exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            Ok(format!("Ran plugin command '{command}'"))
        } else {
            Ok(stdout)
        }
    }

    fn run_builtin_action(&self, raw: &str) -> Result<String, RunError> {
        let stripped = raw.strip_prefix(COMMAND_PREFIX).unwrap_or(raw);
        let mut parts = stripped.splitn(2, ' ');
        let cmd = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).filter(|s| !s.is_empty());

        let url = match cmd {
            "google" => "https://www.google.com".to_string(),
            "wiki" => {
                let term = argument.ok_or_else(|| {
                    RunError::Failed("missing search term for wiki command".to_string())
                })?;
                format!("https://en.wikipedia.org/wiki/{}", term.replace(' ', "_"))
            }
            // Anything else is a web search for the whole text.
            _ => resolver::provider_web_search_url(&self.config, stripped).ok_or_else(|| {
                RunError::Failed("web search provider is misconfigured".to_string())
            })?,
        };

        open_url(&url)?;
        Ok(format!("Opened {url}"))
    }
}

#[cfg(target_os = "windows")]
fn open_url(url: &str) -> Result<(), RunError> {
    let status = Command::new("cmd")
        .arg("/C")
        .arg("start")
        .arg("")
        .arg(url)
        .status()
        .map_err(|e| RunError::Spawn(e.to_string()))?;
    if !status.success() {
        return Err(RunError::Failed(format!(
            "opener exited with status {status}"
        )));
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn open_url(url: &str) -> Result<(), RunError> {
    let status = Command::new("open")
        .arg(url)
        .status()
        .map_err(|e| RunError::Spawn(e.to_string()))?;
    if !status.success() {
        return Err(RunError::Failed(format!(
            "opener exited with status {status}"
        )));
    }
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_url(url: &str) -> Result<(), RunError> {
    let status = Command::new("xdg-open")
        .arg(url)
        .status()
        .map_err(|e| RunError::Spawn(e.to_string()))?;
    if !status.success() {
        return Err(RunError::Failed(format!(
            "opener exited with status {status}"
        )));
    }
    Ok(())
}
