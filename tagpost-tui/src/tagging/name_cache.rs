use std::collections::HashMap;

use tagpost_types::Friend;

/// Display names by puid, from the most recent friend list fetch
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    names: HashMap<String, String>,
}

impl NameCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache with the names in `friends`.
    /// Whichever fetch lands last wins.
    pub fn replace_with(&mut self, friends: &[Friend]) {
        self.names = friends
            .iter()
            .map(|f| (f.puid.clone(), f.display_name.clone()))
            .collect();
    }

    pub fn get(&self, puid: &str) -> Option<&str> {
        self.names.get(puid).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_drops_previous_entries() {
        let mut cache = NameCache::new();
        cache.replace_with(&[Friend::new("a", "Alice"), Friend::new("b", "Bob")]);
        cache.replace_with(&[Friend::new("a", "Alicia")]);

        assert_eq!(cache.get("a"), Some("Alicia"));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.len(), 1);
    }
}
