//! In-memory conversation store, keyed by session id.
//!
//! Each session's history is disjoint; entries are read and appended
//! within a single request, so no coordination is needed.

use sage_core::coach::ConversationEntry;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Vec<ConversationEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// History for a session; unknown sessions are empty, not errors.
    pub fn history(&self, session_id: &str) -> &[ConversationEntry] {
        self.sessions
            .get(session_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn append(&mut self, session_id: &str, entry: ConversationEntry) {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(entry);
    }

    pub fn clear(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_disjoint() {
        let mut store = SessionStore::new();
        store.append("a", ConversationEntry::user("tomato"));
        store.append("b", ConversationEntry::user("cheese"));

        assert_eq!(store.history("a").len(), 1);
        assert_eq!(store.history("b").len(), 1);
        assert_eq!(store.history("a")[0].message, "tomato");
        assert!(store.history("missing").is_empty());
    }

    #[test]
    fn test_clear_resets_one_session() {
        let mut store = SessionStore::new();
        store.append("a", ConversationEntry::user("tomato"));
        store.append("b", ConversationEntry::user("cheese"));
        store.clear("a");
        assert!(store.history("a").is_empty());
        assert_eq!(store.history("b").len(), 1);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = SessionStore::new();
        store.append("a", ConversationEntry::user("tomato"));
        store.append("a", ConversationEntry::coach("Here are some ideas"));
        store.append("a", ConversationEntry::user("cheese"));
        let history = store.history("a");
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].message, "cheese");
    }
}
