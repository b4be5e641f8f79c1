use std::io::BufRead;
use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, ServiceError};
use crate::dispatcher::DispatchOutcome;
use crate::logging;
use crate::model::{Suggestion, SuggestionKind};

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: Option<PathBuf>,
    pub plugin_dir: Option<PathBuf>,
    pub one_shot_query: Option<String>,
    pub one_shot_run: Option<String>,
}

pub fn parse_cli_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--config" => {
                options.config_path = Some(PathBuf::from(flag_value(args, &mut index, "--config")?));
            }
            "--plugins" => {
                options.plugin_dir = Some(PathBuf::from(flag_value(args, &mut index, "--plugins")?));
            }
            "--query" => {
                options.one_shot_query = Some(flag_value(args, &mut index, "--query")?.to_string());
            }
            "--run" => {
                options.one_shot_run = Some(flag_value(args, &mut index, "--run")?.to_string());
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
        index += 1;
    }
    Ok(options)
}

fn flag_value<'a>(args: &'a [String], index: &mut usize, flag: &str) -> Result<&'a str, String> {
    *index += 1;
    args.get(*index)
        .map(|value| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| format!("{flag} requires a value"))
}

pub fn run_with_options(options: CliOptions) -> Result<(), RuntimeError> {
    if let Err(error) = logging::init() {
        eprintln!("[quickbar-core] logging init failed: {error}");
    }

    let mut config = config::load(options.config_path.as_deref())?;
    if let Some(plugin_dir) = options.plugin_dir {
        config.plugin_dir = plugin_dir;
    }
    if !config.config_path.exists() {
        config::save(&config)?;
        println!(
            "[quickbar-core] wrote default config to {}",
            config.config_path.display()
        );
    }

    let mut service = CoreService::new(config)?;
    let registry = service.registry();
    logging::info(&format!(
        "startup commands={} plugin_dir={}",
        registry.len(),
        service.config().plugin_dir.display()
    ));
    for warning in registry.warnings() {
        logging::warn(warning);
        println!("[quickbar-core] plugin warning: {warning}");
    }

    if let Some(query) = options.one_shot_query {
        print_suggestions(&service.on_query_changed(&query));
        return Ok(());
    }
    if let Some(query) = options.one_shot_run {
        print_outcome(&service.on_query_confirmed(&query));
        return Ok(());
    }

    serve_stdin(&mut service)
}

/// Line-oriented stand-in for the presentation layer: each line is a
/// query-changed event; `:run <query>` is a confirmation.
fn serve_stdin(service: &mut CoreService) -> Result<(), RuntimeError> {
    println!("[quickbar-core] interactive mode: ':run <query>' confirms, ':reload' reloads plugins, ':quit' exits");
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(RuntimeError::Io)?;
        if line == ":quit" {
            break;
        }
        if line == ":reload" {
            match service.reload_from_disk() {
                Ok(count) => println!("reloaded; {count} commands registered"),
                Err(error) => println!("reload failed: {error}"),
            }
            continue;
        }
        if let Some(query) = line.strip_prefix(":run ") {
            print_outcome(&service.on_query_confirmed(query));
            continue;
        }
        print_suggestions(&service.on_query_changed(&line));
    }
    Ok(())
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for suggestion in suggestions {
        if suggestion.description.is_empty() {
            println!("[{}] {}", kind_label(suggestion.kind), suggestion.title);
        } else {
            println!(
                "[{}] {}: {}",
                kind_label(suggestion.kind),
                suggestion.title,
                suggestion.description
            );
        }
    }
}

fn kind_label(kind: SuggestionKind) -> &'static str {
    match kind {
        SuggestionKind::PluginAction => "plugin",
        SuggestionKind::BuiltinAction => "builtin",
        SuggestionKind::WebSearch => "web",
    }
}

fn print_outcome(outcome: &DispatchOutcome) {
    match outcome {
        DispatchOutcome::Success(message) => println!("ok: {message}"),
        DispatchOutcome::Failure(reason) => println!("failed: {reason}"),
    }
}
