use crate::storage::{load_text_from_storage, save_text_to_storage, DRAFT_KEY_PREFIX};

pub(crate) const RESTORE_PROMPT: &str =
    "A draft was found in local storage. Do you want to load it?";

pub(crate) fn key(path: &str) -> String {
    format!("{DRAFT_KEY_PREFIX}{path}")
}

pub(crate) fn load_draft(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    load_text_from_storage(&key(path))
}

/// Writes the draft for `path`. Empty paths and empty content are ignored.
///
/// Returns whether anything was stored.
pub(crate) fn save_draft(path: &str, content: &str) -> bool {
    if path.is_empty() || content.is_empty() {
        return false;
    }
    save_text_to_storage(&key(path), content)
}

/// The draft worth offering to the user, if any: it must exist, be non-empty
/// and differ from what the page already shows.
pub(crate) fn restorable(stored: Option<String>, current: &str) -> Option<String> {
    stored.filter(|d| !d.is_empty() && d != current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_uses_prefix_and_raw_path() {
        assert_eq!(key("docs/intro.md"), "cms_draft_docs/intro.md");
    }

    #[test]
    fn test_restorable_requires_difference() {
        assert_eq!(restorable(None, "abc"), None);
        assert_eq!(restorable(Some(String::new()), "abc"), None);
        assert_eq!(restorable(Some("abc".into()), "abc"), None);
        assert_eq!(restorable(Some("abcd".into()), "abc"), Some("abcd".to_string()));
    }

    #[test]
    fn test_save_draft_ignores_empty_inputs() {
        // Neither call reaches storage, so this holds outside a browser too.
        assert!(!save_draft("", "text"));
        assert!(!save_draft("docs/a.md", ""));
    }
}
