/// Where a registered command came from. Builtins ship with the binary;
/// plugins arrive as descriptor files loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandSource {
    Builtin,
    Plugin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCommand {
    pub name: String,
    pub command: String,
    pub description: String,
    pub source: CommandSource,
    normalized_name: String,
    normalized_command: String,
}

impl PluginCommand {
    pub fn new(name: &str, command: &str, description: &str, source: CommandSource) -> Self {
        Self::from_owned(
            name.to_string(),
            command.to_string(),
            description.to_string(),
            source,
        )
    }

    pub fn from_owned(
        name: String,
        command: String,
        description: String,
        source: CommandSource,
    ) -> Self {
        let normalized_name = name.to_lowercase();
        let normalized_command = command.to_lowercase();
        Self {
            name,
            command,
            description,
            source,
            normalized_name,
            normalized_command,
        }
    }

    /// Case-insensitive substring match against the display name or the
    /// command token. `term` must already be lower-cased.
    pub fn matches_term(&self, term: &str) -> bool {
        self.normalized_name.contains(term) || self.normalized_command.contains(term)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    PluginAction,
    BuiltinAction,
    WebSearch,
}

/// A displayable candidate for the current query. Recomputed on every
/// keystroke; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn from_command(command: &PluginCommand) -> Self {
        let kind = match command.source {
            CommandSource::Builtin => SuggestionKind::BuiltinAction,
            CommandSource::Plugin => SuggestionKind::PluginAction,
        };
        Self {
            id: command.command.clone(),
            title: command.name.clone(),
            description: command.description.clone(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommandSource, PluginCommand, Suggestion, SuggestionKind};

    #[test]
    fn matches_term_is_case_insensitive_on_name_and_command() {
        let cmd = PluginCommand::new(
            "Search on Wikipedia",
            "wiki",
            "Open a Wikipedia article",
            CommandSource::Plugin,
        );
        assert!(cmd.matches_term("wikipedia"));
        assert!(cmd.matches_term("wik"));
        assert!(cmd.matches_term("search on"));
        assert!(!cmd.matches_term("google"));
    }

    #[test]
    fn suggestion_kind_follows_command_source() {
        let builtin = PluginCommand::new("Open Google", "google", "", CommandSource::Builtin);
        let plugin = PluginCommand::new("Emoji Picker", "emoji", "", CommandSource::Plugin);
        assert_eq!(
            Suggestion::from_command(&builtin).kind,
            SuggestionKind::BuiltinAction
        );
        assert_eq!(
            Suggestion::from_command(&plugin).kind,
            SuggestionKind::PluginAction
        );
    }
}
