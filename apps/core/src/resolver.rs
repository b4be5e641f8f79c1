use crate::config::{Config, WebSearchProvider};
use crate::model::{CommandSource, PluginCommand, Suggestion, SuggestionKind};
use crate::plugin_registry::PluginRegistry;
use crate::query::QueryMode;

pub const WEB_SEARCH_SUGGESTION_ID: &str = "__quickbar_web_search__";
pub const WEB_SEARCH_DESCRIPTION: &str = "Search the web for this text";

/// Commands that ship with the binary. They are seeded into the registry
/// ahead of loaded plugins, so a plugin descriptor that reuses a token
/// shadows the builtin (last-loaded wins).
pub fn builtin_commands() -> Vec<PluginCommand> {
    vec![
        PluginCommand::new(
            "Open Google",
            "google",
            "Open the Google home page",
            CommandSource::Builtin,
        ),
        PluginCommand::new(
            "Search on Wikipedia",
            "wiki",
            "Open a Wikipedia article",
            CommandSource::Builtin,
        ),
    ]
}

/// Produces the ordered suggestion list for a classified query.
///
/// Synchronous and I/O-free; equal `(mode, registry)` inputs always yield
/// the same ordering, so callers can truncate safely. No bound is enforced
/// here.
pub fn resolve(mode: &QueryMode, registry: &PluginRegistry) -> Vec<Suggestion> {
    match mode {
        // An empty query is not "no results": show everything the user can do.
        QueryMode::Empty => all_commands(registry),
        QueryMode::CommandPrefix(term) => {
            if term.is_empty() {
                return all_commands(registry);
            }
            registry
                .all()
                .iter()
                .filter(|command| command.matches_term(term))
                .map(Suggestion::from_command)
                .collect()
        }
        QueryMode::FreeText(term) => vec![web_search_suggestion(term)],
    }
}

fn all_commands(registry: &PluginRegistry) -> Vec<Suggestion> {
    registry.all().iter().map(Suggestion::from_command).collect()
}

fn web_search_suggestion(term: &str) -> Suggestion {
    Suggestion {
        id: WEB_SEARCH_SUGGESTION_ID.to_string(),
        title: format!("Search for \"{term}\""),
        description: WEB_SEARCH_DESCRIPTION.to_string(),
        kind: SuggestionKind::WebSearch,
    }
}

/// Web-search URL for the configured provider, used by the shipped action
/// runner for the fallback path. Returns `None` for a Custom provider whose
/// template is unusable.
pub fn provider_web_search_url(cfg: &Config, query: &str) -> Option<String> {
    let encoded = url_encode_component(query.trim());
    let url = match cfg.web_search_provider {
        WebSearchProvider::Duckduckgo => format!("https://duckduckgo.com/?q={encoded}"),
        WebSearchProvider::Google => format!("https://www.google.com/search?q={encoded}"),
        WebSearchProvider::Bing => format!("https://www.bing.com/search?q={encoded}"),
        WebSearchProvider::Custom => {
            let template = cfg.web_search_custom_template.trim();
            if template.is_empty() || !template.contains("{query}") {
                return None;
            }
            template.replace("{query}", &encoded)
        }
    };
    Some(url)
}

fn url_encode_component(input: &str) -> String {
    let mut out = String::new();
    for byte in input.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else if byte == b' ' {
            out.push('+');
        } else {
            out.push('%');
            out.push_str(&format!("{byte:02X}"));
        }
    }
    out
}
