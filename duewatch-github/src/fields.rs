//! Loose matching of custom field names and single-select values

use regex::Regex;
use std::sync::OnceLock;

/// Sanitized name of the due date field
pub const DUE_DATE_FIELD: &str = "DueDate";
/// Sanitized name of the status field
pub const STATUS_FIELD: &str = "Status";
/// Sanitized name of the domain field
pub const DOMAIN_FIELD: &str = "Domain";

fn non_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\W+").expect("static pattern"))
}

fn done_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bdone\b").expect("static pattern"))
}

/// Strip every run of non-word characters
///
/// `"Due Date"`, `"DueDate"` and `"Due-Date!"` all become `"DueDate"`.
pub fn sanitize(text: &str) -> String {
    non_word().replace_all(text, "").into_owned()
}

/// Whole-word, case-insensitive `done`
pub fn is_done_word(value: &str) -> bool {
    done_word().is_match(value)
}

/// Case-insensitive `done` anywhere in the value
pub fn contains_done(value: &str) -> bool {
    value.to_lowercase().contains("done")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_variants_agree() {
        assert_eq!(sanitize("Due Date"), "DueDate");
        assert_eq!(sanitize("DueDate"), "DueDate");
        assert_eq!(sanitize("Due-Date!"), "DueDate");
        assert_eq!(sanitize("  Due   Date  "), "DueDate");
    }

    #[test]
    fn test_sanitize_keeps_word_characters() {
        assert_eq!(sanitize("due_date_2"), "due_date_2");
        assert_eq!(sanitize("Alan Ç"), "AlanÇ");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("✅ !!"), "");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for input in ["Due Date", "In Progress 🚧", "a-b_c d", "", "Done ✅", "__x__"] {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_done_word() {
        assert!(is_done_word("Done"));
        assert!(is_done_word("DONE"));
        assert!(is_done_word(&sanitize("Done ✅")));
        assert!(!is_done_word(&sanitize("Not Done")));
        assert!(!is_done_word("Undone"));
        assert!(!is_done_word("InProgress"));
    }

    #[test]
    fn test_contains_done_is_looser() {
        assert!(contains_done("Done"));
        assert!(contains_done(&sanitize("Not Done")));
        assert!(contains_done("Undone"));
        assert!(!contains_done("Todo"));
    }
}
