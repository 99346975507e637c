use tagpost_types::TaggedFriends;

/// Ordered set of tagged friend ids.
///
/// Order is insertion order; an id is never held twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    ids: Vec<String>,
}

impl TagSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from whatever shape the post carried.
    ///
    /// An encoded payload that is not a JSON array of strings gives an empty
    /// selection; the caller only gets a warning in the log.
    pub fn from_tagged(tagged: &TaggedFriends) -> Self {
        let ids = match tagged {
            TaggedFriends::Ids(ids) => ids.clone(),
            TaggedFriends::Encoded(raw) => match serde_json::from_str::<Vec<String>>(raw) {
                Ok(ids) => ids,
                Err(e) => {
                    log::warn!("Ignoring malformed tagged friends payload {:?}: {}", raw, e);
                    Vec::new()
                }
            },
        };

        let mut selection = Self::new();
        for id in ids {
            selection.insert(id);
        }
        selection
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id` if present. Returns whether anything changed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Remove `id` if selected, append it otherwise. Returns the new membership.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// JSON array form carried by the post form
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }
}
