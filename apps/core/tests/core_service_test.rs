use std::sync::{Arc, Mutex};

use quickbar_core::config::Config;
use quickbar_core::core_service::CoreService;
use quickbar_core::dispatcher::{ActionRunner, DispatchOutcome, RunError};
use quickbar_core::model::{CommandSource, PluginCommand, SuggestionKind};
use quickbar_core::plugin_registry::PluginRegistry;
use quickbar_core::resolver::WEB_SEARCH_SUGGESTION_ID;

struct StubRunner {
    builtin_calls: Arc<Mutex<Vec<String>>>,
}

impl StubRunner {
    fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                builtin_calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl ActionRunner for StubRunner {
    fn run_plugin_command(&self, command: &str) -> Result<String, RunError> {
        Ok(format!("plugin:{command}"))
    }

    fn run_builtin_action(&self, raw: &str) -> Result<String, RunError> {
        self.builtin_calls.lock().unwrap().push(raw.to_string());
        Ok(format!("builtin:{raw}"))
    }
}

fn sample_commands() -> Vec<PluginCommand> {
    vec![
        PluginCommand::new("Open Google", "google", "", CommandSource::Plugin),
        PluginCommand::new("Search on Wikipedia", "wiki", "", CommandSource::Plugin),
    ]
}

fn service() -> CoreService {
    let (runner, _) = StubRunner::new();
    CoreService::with_parts(
        Config::default(),
        PluginRegistry::from_commands(sample_commands()),
        Box::new(runner),
    )
    .unwrap()
}

#[test]
fn empty_query_browses_all_commands() {
    let mut service = service();
    let suggestions = service.on_query_changed("");
    let ids: Vec<&str> = suggestions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["google", "wiki"]);
}

#[test]
fn command_prefix_filters_registry() {
    let mut service = service();
    let suggestions = service.on_query_changed(">wik");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, "wiki");
    assert_eq!(suggestions[0].kind, SuggestionKind::PluginAction);
}

#[test]
fn free_text_returns_single_web_search_suggestion() {
    let mut service = service();
    let suggestions = service.on_query_changed("funny cats");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id, WEB_SEARCH_SUGGESTION_ID);
    assert_eq!(suggestions[0].title, "Search for \"funny cats\"");
}

#[test]
fn suggestion_lists_are_truncated_to_max_results() {
    let commands: Vec<PluginCommand> = (0..40)
        .map(|i| {
            PluginCommand::new(
                &format!("Command {i}"),
                &format!("cmd{i}"),
                "",
                CommandSource::Plugin,
            )
        })
        .collect();
    let (runner, _) = StubRunner::new();
    let config = Config::default();
    let max = config.max_results as usize;
    let mut service = CoreService::with_parts(
        config,
        PluginRegistry::from_commands(commands),
        Box::new(runner),
    )
    .unwrap();

    assert_eq!(service.on_query_changed("").len(), max);
}

#[test]
fn confirmed_plugin_command_dispatches_to_plugin_runner() {
    let mut service = service();
    let outcome = service.on_query_confirmed(">wiki");
    assert_eq!(outcome, DispatchOutcome::Success("plugin:wiki".to_string()));
}

#[test]
fn confirmed_unknown_command_falls_back_with_raw_text() {
    let (runner, calls) = StubRunner::new();
    let mut service = CoreService::with_parts(
        Config::default(),
        PluginRegistry::from_commands(sample_commands()),
        Box::new(runner),
    )
    .unwrap();

    let outcome = service.on_query_confirmed(">unknown");

    assert!(outcome.is_success());
    assert_eq!(*calls.lock().unwrap(), vec![">unknown".to_string()]);
}

#[test]
fn reload_replaces_results_for_subsequent_queries_only() {
    let mut service = service();
    let before = service.on_query_changed(">wik");
    let before_snapshot = before.clone();

    service.on_plugins_reloaded(vec![PluginCommand::new(
        "Wiktionary",
        "wikt",
        "",
        CommandSource::Plugin,
    )]);

    // Already-returned suggestions are plain values; the swap cannot touch them.
    assert_eq!(before, before_snapshot);

    let after = service.on_query_changed(">wik");
    let ids: Vec<&str> = after.iter().map(|s| s.id.as_str()).collect();
    // Builtins are re-seeded ahead of the new plugin set.
    assert_eq!(ids, vec!["wiki", "wikt"]);
    assert_eq!(after[0].kind, SuggestionKind::BuiltinAction);
}

#[test]
fn reload_from_disk_swaps_in_descriptor_commands() {
    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("quickbar-service-reload-{unique}"));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("emoji.json"),
        r#"{"name":"Emoji Picker","command":"emoji","description":"Pick an emoji"}"#,
    )
    .unwrap();

    let config = Config {
        plugin_dir: dir.clone(),
        ..Default::default()
    };
    let (runner, _) = StubRunner::new();
    let mut service =
        CoreService::with_parts(config, PluginRegistry::default(), Box::new(runner)).unwrap();

    assert!(service.on_query_changed(">emoji").is_empty());

    // Builtins (google, wiki) plus the descriptor.
    let loaded = service.reload_from_disk().unwrap();
    assert_eq!(loaded, 3);
    let suggestions = service.on_query_changed(">emoji");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].title, "Emoji Picker");

    std::fs::remove_dir_all(&dir).unwrap();
}
