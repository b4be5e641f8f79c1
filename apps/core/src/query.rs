/// Sentinel that switches the query into command mode.
pub const COMMAND_PREFIX: char = '>';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Empty,
    CommandPrefix(String),
    FreeText(String),
}

/// Classifies raw input text. Pure and total: every string maps to exactly
/// one mode, and classification performs no I/O.
///
/// An empty term after the sentinel is valid and means "browse all
/// commands"; free text keeps its original casing for display.
pub fn classify(raw: &str) -> QueryMode {
    if raw.is_empty() {
        return QueryMode::Empty;
    }

    if let Some(rest) = raw.strip_prefix(COMMAND_PREFIX) {
        return QueryMode::CommandPrefix(rest.to_lowercase());
    }

    QueryMode::FreeText(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::{classify, QueryMode};

    #[test]
    fn empty_input_is_empty_mode() {
        assert_eq!(classify(""), QueryMode::Empty);
    }

    #[test]
    fn bare_sentinel_is_command_mode_with_empty_term() {
        assert_eq!(classify(">"), QueryMode::CommandPrefix(String::new()));
    }

    #[test]
    fn sentinel_term_is_lower_cased() {
        assert_eq!(
            classify(">Wiki"),
            QueryMode::CommandPrefix("wiki".to_string())
        );
    }

    #[test]
    fn non_sentinel_input_is_free_text_with_case_preserved() {
        assert_eq!(
            classify("Funny Cats"),
            QueryMode::FreeText("Funny Cats".to_string())
        );
    }

    #[test]
    fn whitespace_only_input_is_free_text() {
        assert_eq!(classify("  "), QueryMode::FreeText("  ".to_string()));
    }

    #[test]
    fn reclassifying_a_free_text_term_is_stable() {
        let first = classify("teal deer");
        let QueryMode::FreeText(term) = &first else {
            panic!("expected free text");
        };
        assert_eq!(classify(term), first);
    }
}
