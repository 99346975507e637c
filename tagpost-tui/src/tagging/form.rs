use super::TagSelection;

/// Serialized tag and location values submitted with the post.
///
/// `tagged_friends` is the JSON array of the committed selection,
/// `location` the committed location verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub tagged_friends: String,
    pub location: String,
}

impl FormFields {
    pub fn empty() -> Self {
        Self {
            tagged_friends: "[]".to_string(),
            location: String::new(),
        }
    }

    pub fn write_tags(&mut self, selection: &TagSelection) {
        self.tagged_friends = selection.to_json();
    }

    pub fn write_location(&mut self, location: &str) {
        self.location = location.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl Default for FormFields {
    fn default() -> Self {
        Self::empty()
    }
}
