use tagpost_types::{Friend, TaggedFriends};

use super::view::Chip;
use super::{validate_location, FormFields, NameCache, TagSelection, TaggingResult};
use crate::api::ApiResult;

/// Why a friend list fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    /// Resolve display names for chips of an initialized session
    ResolveNames,
    /// Fill the friend picker
    PopulatePicker,
}

/// Handle for a friend list fetch the session asked for.
///
/// The caller runs the fetch however it likes and hands the outcome back to
/// [`TagSession::apply_friend_fetch`] together with this token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendFetch {
    purpose: FetchPurpose,
    epoch: u64,
}

impl FriendFetch {
    pub fn purpose(&self) -> FetchPurpose {
        self.purpose
    }
}

/// What the friend picker list currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerContent {
    NotLoaded,
    Loading,
    Failed(String),
    Loaded(Vec<Friend>),
}

/// Tag and location state of one composer session.
///
/// Every committing operation leaves [`FormFields`] matching the
/// in-memory selection and location. Toggles made while the picker is open
/// stay provisional until [`TagSession::confirm_tag_selection`].
#[derive(Debug, Clone)]
pub struct TagSession {
    selection: TagSelection,
    location: String,
    fields: FormFields,
    names: NameCache,

    picker_open: bool,
    picker_content: PickerContent,
    picker_snapshot: Option<TagSelection>,

    location_editor: Option<String>,

    tag_chips: Vec<Chip>,
    tags_resolving: bool,

    alert: Option<String>,
    epoch: u64,
}

impl TagSession {
    pub fn new() -> Self {
        Self {
            selection: TagSelection::new(),
            location: String::new(),
            fields: FormFields::empty(),
            names: NameCache::new(),
            picker_open: false,
            picker_content: PickerContent::NotLoaded,
            picker_snapshot: None,
            location_editor: None,
            tag_chips: Vec::new(),
            tags_resolving: false,
            alert: None,
            epoch: 0,
        }
    }

    /// Load the tags and location a post already has.
    ///
    /// Returns a fetch to run in the background when there are tags whose
    /// names need resolving; chips stay in the resolving state until its
    /// outcome is applied.
    pub fn initialize(&mut self, tagged: &TaggedFriends, location: Option<&str>) -> Option<FriendFetch> {
        self.epoch += 1;
        self.selection = TagSelection::from_tagged(tagged);
        self.location = location.unwrap_or_default().to_string();
        self.picker_snapshot = None;

        self.fields.write_tags(&self.selection);
        self.fields.write_location(&self.location);

        if self.selection.is_empty() {
            self.render_tag_chips();
            return None;
        }

        self.tag_chips.clear();
        self.tags_resolving = true;
        Some(FriendFetch {
            purpose: FetchPurpose::ResolveNames,
            epoch: self.epoch,
        })
    }

    /// Show the picker in its loading state and ask for the friend list
    pub fn open_tag_picker(&mut self) -> FriendFetch {
        self.picker_open = true;
        self.picker_content = PickerContent::Loading;
        self.picker_snapshot = Some(self.selection.clone());
        FriendFetch {
            purpose: FetchPurpose::PopulatePicker,
            epoch: self.epoch,
        }
    }

    /// Whether `fetch` was issued since the last `initialize`/`reset`
    pub fn is_current(&self, fetch: &FriendFetch) -> bool {
        fetch.epoch == self.epoch
    }

    /// Apply the outcome of a fetch requested by this session.
    ///
    /// Outcomes from before the last `initialize`/`reset` only refresh the
    /// name cache.
    pub fn apply_friend_fetch(&mut self, fetch: FriendFetch, result: ApiResult<Vec<Friend>>) {
        let stale = !self.is_current(&fetch);

        match result {
            Ok(friends) => {
                self.names.replace_with(&friends);
                if stale {
                    return;
                }
                match fetch.purpose {
                    FetchPurpose::ResolveNames => self.render_tag_chips(),
                    FetchPurpose::PopulatePicker => {
                        self.picker_content = PickerContent::Loaded(friends);
                    }
                }
            }
            Err(e) => {
                if stale {
                    return;
                }
                match fetch.purpose {
                    FetchPurpose::ResolveNames => {
                        log::warn!("Could not resolve tagged friend names: {}", e);
                        self.render_tag_chips();
                    }
                    FetchPurpose::PopulatePicker => {
                        log::error!("Failed to load friends for picker: {}", e);
                        self.picker_content = PickerContent::Failed(format!("Failed to load friends: {}", e));
                    }
                }
            }
        }
    }

    /// Flip membership of `puid`. Provisional until the selection is confirmed.
    pub fn toggle_friend(&mut self, puid: &str) -> bool {
        self.selection.toggle(puid)
    }

    /// Commit the picker selection and close the picker
    pub fn confirm_tag_selection(&mut self) {
        self.picker_snapshot = None;
        self.picker_open = false;
        self.fields.write_tags(&self.selection);
        self.render_tag_chips();
    }

    /// Close the picker and drop toggles made since it opened
    pub fn cancel_tag_picker(&mut self) {
        if let Some(snapshot) = self.picker_snapshot.take() {
            self.selection = snapshot;
        }
        self.picker_open = false;
        if !self.tags_resolving {
            self.render_tag_chips();
        }
    }

    /// Untag `puid`. Returns false, changing nothing, when it was not tagged.
    ///
    /// With the picker open the id leaves both the committed selection and
    /// the provisional one.
    pub fn remove_tagged_chip(&mut self, puid: &str) -> bool {
        let removed = match self.picker_snapshot.as_mut() {
            Some(snapshot) => snapshot.remove(puid) && {
                self.selection.remove(puid);
                true
            },
            None => self.selection.remove(puid),
        };
        if !removed {
            return false;
        }
        let committed = self.picker_snapshot.as_ref().unwrap_or(&self.selection);
        self.fields.write_tags(committed);
        self.render_tag_chips();
        true
    }

    /// The selection as last confirmed, ignoring open-picker toggles
    fn committed_selection(&self) -> &TagSelection {
        self.picker_snapshot.as_ref().unwrap_or(&self.selection)
    }

    /// Open the location editor pre-filled with the current location
    pub fn open_location_editor(&mut self) {
        self.location_editor = Some(self.location.clone());
    }

    /// Mutable editor input, while the editor is open
    pub fn location_input_mut(&mut self) -> Option<&mut String> {
        self.location_editor.as_mut()
    }

    /// Commit the editor input as the location.
    ///
    /// Too-long input raises an alert and leaves the session untouched,
    /// editor included.
    pub fn confirm_location(&mut self) -> TaggingResult<()> {
        let Some(input) = self.location_editor.as_deref() else {
            return Ok(());
        };

        match validate_location(input) {
            Ok(location) => {
                self.location = location;
                self.fields.write_location(&self.location);
                self.location_editor = None;
                Ok(())
            }
            Err(e) => {
                self.alert = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn cancel_location_editor(&mut self) {
        self.location_editor = None;
    }

    /// Clear the location. Idempotent.
    pub fn remove_location_chip(&mut self) {
        self.location.clear();
        self.fields.write_location(&self.location);
    }

    /// Return to the empty state of a fresh session.
    ///
    /// Fetches issued before the reset no longer affect what is shown.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.selection.clear();
        self.location.clear();
        self.fields.clear();
        self.picker_open = false;
        self.picker_content = PickerContent::NotLoaded;
        self.picker_snapshot = None;
        self.location_editor = None;
        self.tag_chips.clear();
        self.tags_resolving = false;
        self.alert = None;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Chip label for `puid`: the rendered picker row, then the name cache,
    /// then the id itself
    pub fn label_for(&self, puid: &str) -> String {
        if let PickerContent::Loaded(friends) = &self.picker_content {
            if let Some(friend) = friends.iter().find(|f| f.puid == puid) {
                return friend.display_name.clone();
            }
        }
        self.names
            .get(puid)
            .map(str::to_string)
            .unwrap_or_else(|| puid.to_string())
    }

    fn render_tag_chips(&mut self) {
        self.tag_chips = self
            .committed_selection()
            .ids()
            .iter()
            .map(|puid| Chip {
                puid: puid.clone(),
                label: self.label_for(puid),
            })
            .collect();
        self.tags_resolving = false;
    }

    pub fn selection(&self) -> &TagSelection {
        &self.selection
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn names(&self) -> &NameCache {
        &self.names
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn picker_content(&self) -> &PickerContent {
        &self.picker_content
    }

    pub fn is_location_editor_open(&self) -> bool {
        self.location_editor.is_some()
    }

    pub fn location_input(&self) -> Option<&str> {
        self.location_editor.as_deref()
    }

    pub fn tag_chips(&self) -> &[Chip] {
        &self.tag_chips
    }

    pub fn tags_resolving(&self) -> bool {
        self.tags_resolving
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}

impl Default for TagSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::tagging::{TaggingError, MAX_LOCATION_CHARS};

    fn friends() -> Vec<Friend> {
        vec![Friend::new("a", "Alice"), Friend::new("b", "Bob"), Friend::new("c", "Carol")]
    }

    fn chip_labels(session: &TagSession) -> Vec<&str> {
        session.tag_chips().iter().map(|c| c.label.as_str()).collect()
    }

    fn server_down() -> ApiError {
        ApiError::Server {
            status: 502,
            message: "bad gateway".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = TagSession::new();
        assert!(session.selection().is_empty());
        assert_eq!(session.location(), "");
        assert_eq!(session.fields(), &FormFields::empty());
    }

    #[test]
    fn test_initialize_writes_fields() {
        let mut session = TagSession::new();
        let fetch = session.initialize(&TaggedFriends::from(r#"["a","b"]"#), Some("Lyon"));

        assert_eq!(fetch.map(|f| f.purpose()), Some(FetchPurpose::ResolveNames));
        assert_eq!(session.fields().tagged_friends, r#"["a","b"]"#);
        assert_eq!(session.fields().location, "Lyon");
        assert!(session.tags_resolving());
        assert!(session.tag_chips().is_empty());
    }

    #[test]
    fn test_initialize_without_tags_needs_no_fetch() {
        let mut session = TagSession::new();
        assert!(session.initialize(&TaggedFriends::default(), None).is_none());
        assert!(!session.tags_resolving());
        assert_eq!(session.location(), "");
        assert_eq!(session.fields().tagged_friends, "[]");
    }

    #[test]
    fn test_initialize_malformed_tags_keeps_location() {
        let mut session = TagSession::new();
        let fetch = session.initialize(&TaggedFriends::from("not valid json"), Some("Paris"));

        assert!(fetch.is_none());
        assert!(session.selection().is_empty());
        assert_eq!(session.location(), "Paris");
        assert_eq!(session.fields().location, "Paris");
        assert_eq!(session.fields().tagged_friends, "[]");
    }

    #[test]
    fn test_resolved_names_fall_back_to_raw_id() {
        let mut session = TagSession::new();
        let fetch = session
            .initialize(&TaggedFriends::from(vec!["a", "b"]), Some(""))
            .unwrap();
        session.apply_friend_fetch(fetch, Ok(vec![Friend::new("a", "Alice")]));

        assert!(!session.tags_resolving());
        assert_eq!(chip_labels(&session), vec!["Alice", "b"]);
    }

    #[test]
    fn test_failed_name_lookup_shows_raw_ids() {
        let mut session = TagSession::new();
        let fetch = session
            .initialize(&TaggedFriends::from(vec!["a", "b"]), None)
            .unwrap();
        session.apply_friend_fetch(fetch, Err(server_down()));

        assert_eq!(chip_labels(&session), vec!["a", "b"]);
        assert_eq!(session.selection().len(), 2);
    }

    #[test]
    fn test_picker_rows_win_over_cache() {
        let mut session = TagSession::new();
        let names = session.initialize(&TaggedFriends::from(vec!["a"]), None).unwrap();
        session.apply_friend_fetch(names, Ok(vec![Friend::new("a", "Alice")]));

        let picker = session.open_tag_picker();
        session.apply_friend_fetch(picker, Ok(vec![Friend::new("a", "Alice Liddell")]));
        session.confirm_tag_selection();

        assert_eq!(chip_labels(&session), vec!["Alice Liddell"]);
    }

    #[test]
    fn test_picker_failure_keeps_selection() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["a"]), None);

        let picker = session.open_tag_picker();
        session.apply_friend_fetch(picker, Err(server_down()));

        match session.picker_content() {
            PickerContent::Failed(msg) => assert!(msg.contains("Failed to load friends")),
            other => panic!("unexpected picker content: {:?}", other),
        }
        assert!(session.selection().contains("a"));
        assert_eq!(session.fields().tagged_friends, r#"["a"]"#);
    }

    #[test]
    fn test_toggles_are_provisional_until_confirm() {
        let mut session = TagSession::new();
        let picker = session.open_tag_picker();
        session.apply_friend_fetch(picker, Ok(friends()));

        session.toggle_friend("b");
        session.toggle_friend("a");
        assert_eq!(session.fields().tagged_friends, "[]");

        session.confirm_tag_selection();
        assert!(!session.is_picker_open());
        assert_eq!(session.fields().tagged_friends, r#"["b","a"]"#);
        assert_eq!(chip_labels(&session), vec!["Bob", "Alice"]);
    }

    #[test]
    fn test_confirm_round_trips_through_field() {
        let mut session = TagSession::new();
        session.open_tag_picker();
        for id in ["c", "a", "b", "a"] {
            session.toggle_friend(id);
        }
        session.confirm_tag_selection();

        let parsed = TagSelection::from_tagged(&TaggedFriends::from(session.fields().tagged_friends.clone()));
        assert_eq!(&parsed, session.selection());
    }

    #[test]
    fn test_cancel_picker_restores_committed_selection() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["a"]), None);

        session.open_tag_picker();
        session.toggle_friend("a");
        session.toggle_friend("b");
        session.cancel_tag_picker();

        assert_eq!(session.selection().ids(), &["a".to_string()]);
        assert_eq!(session.fields().tagged_friends, r#"["a"]"#);
        assert!(!session.is_picker_open());
    }

    #[test]
    fn test_name_lookup_during_picker_ignores_provisional_toggles() {
        let mut session = TagSession::new();
        let names = session.initialize(&TaggedFriends::from(vec!["a"]), None).unwrap();
        let picker = session.open_tag_picker();
        session.apply_friend_fetch(picker, Ok(vec![Friend::new("a", "Alice"), Friend::new("c", "Carol")]));
        session.toggle_friend("c");

        session.apply_friend_fetch(names, Ok(friends()));
        assert_eq!(chip_labels(&session), vec!["Alice"]);

        session.cancel_tag_picker();
        assert_eq!(session.selection().ids(), &["a".to_string()]);
        assert_eq!(session.fields().tagged_friends, r#"["a"]"#);
        assert_eq!(chip_labels(&session), vec!["Alice"]);
    }

    #[test]
    fn test_chips_follow_field_after_cancel() {
        let mut session = TagSession::new();
        let names = session.initialize(&TaggedFriends::from(vec!["a", "b"]), None).unwrap();
        session.apply_friend_fetch(names, Ok(friends()));

        let picker = session.open_tag_picker();
        session.apply_friend_fetch(picker, Ok(friends()));
        session.toggle_friend("a");
        session.toggle_friend("c");
        session.cancel_tag_picker();

        let chip_ids: Vec<&str> = session.tag_chips().iter().map(|c| c.puid.as_str()).collect();
        let field: Vec<String> = serde_json::from_str(&session.fields().tagged_friends).unwrap();
        assert_eq!(chip_ids, field);
        assert_eq!(chip_labels(&session), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_remove_chip_with_picker_open_skips_provisional_ids() {
        let mut session = TagSession::new();
        let names = session.initialize(&TaggedFriends::from(vec!["a"]), None).unwrap();
        session.apply_friend_fetch(names, Ok(friends()));
        session.open_tag_picker();
        session.toggle_friend("c");

        assert!(!session.remove_tagged_chip("c"));
        assert!(session.selection().contains("c"), "Provisional toggle stays");
        assert_eq!(session.fields().tagged_friends, r#"["a"]"#);

        assert!(session.remove_tagged_chip("a"));
        assert_eq!(session.fields().tagged_friends, "[]");
        assert!(session.tag_chips().is_empty());
        assert_eq!(session.selection().ids(), &["c".to_string()]);
    }

    #[test]
    fn test_remove_chip() {
        let mut session = TagSession::new();
        let fetch = session.initialize(&TaggedFriends::from(vec!["a", "b"]), None).unwrap();
        session.apply_friend_fetch(fetch, Ok(friends()));

        assert!(session.remove_tagged_chip("a"));
        assert_eq!(session.fields().tagged_friends, r#"["b"]"#);
        assert_eq!(chip_labels(&session), vec!["Bob"]);
    }

    #[test]
    fn test_remove_absent_chip_is_noop() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["a"]), Some("Oslo"));
        let before_fields = session.fields().clone();
        let before_selection = session.selection().clone();

        assert!(!session.remove_tagged_chip("zzz"));
        assert!(!session.remove_tagged_chip("zzz"));

        assert_eq!(session.fields(), &before_fields);
        assert_eq!(session.selection(), &before_selection);
    }

    #[test]
    fn test_location_editor_prefills_current_value() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::default(), Some("Berlin"));
        session.open_location_editor();
        assert_eq!(session.location_input(), Some("Berlin"));
    }

    #[test]
    fn test_confirm_location_trims_and_commits() {
        let mut session = TagSession::new();
        session.open_location_editor();
        session.location_input_mut().unwrap().push_str("  Cafe Central, Vienna ");

        session.confirm_location().unwrap();
        assert_eq!(session.location(), "Cafe Central, Vienna");
        assert_eq!(session.fields().location, "Cafe Central, Vienna");
        assert!(!session.is_location_editor_open());
    }

    #[test]
    fn test_confirm_location_at_limit() {
        let mut session = TagSession::new();
        let exact = "y".repeat(MAX_LOCATION_CHARS);
        session.open_location_editor();
        *session.location_input_mut().unwrap() = format!(" {} ", exact);

        session.confirm_location().unwrap();
        assert_eq!(session.location(), exact);
        assert!(session.alert().is_none());
    }

    #[test]
    fn test_confirm_location_over_limit_changes_nothing() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::default(), Some("Rome"));
        session.open_location_editor();
        let over = "z".repeat(MAX_LOCATION_CHARS + 1);
        *session.location_input_mut().unwrap() = over.clone();

        let err = session.confirm_location().unwrap_err();
        assert_eq!(err, TaggingError::LocationTooLong { len: 201, max: 200 });
        assert!(session.alert().is_some());
        assert_eq!(session.location(), "Rome");
        assert_eq!(session.fields().location, "Rome");
        assert_eq!(session.location_input(), Some(over.as_str()));
    }

    #[test]
    fn test_remove_location_is_idempotent() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::default(), Some("Madrid"));
        session.remove_location_chip();
        session.remove_location_chip();
        assert_eq!(session.location(), "");
        assert_eq!(session.fields().location, "");
    }

    #[test]
    fn test_reset_after_activity() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["a", "b"]), Some("Kyoto"));
        session.open_tag_picker();
        session.toggle_friend("c");
        session.open_location_editor();

        session.reset();

        assert!(session.selection().is_empty());
        assert_eq!(session.location(), "");
        assert_eq!(session.fields().tagged_friends, "[]");
        assert_eq!(session.fields().location, "");
        assert!(session.tag_chips().is_empty());
        assert!(!session.is_picker_open());
        assert!(!session.is_location_editor_open());
    }

    #[test]
    fn test_stale_lookup_only_refreshes_cache() {
        let mut session = TagSession::new();
        let old = session.initialize(&TaggedFriends::from(vec!["a"]), None).unwrap();
        session.reset();

        session.apply_friend_fetch(old, Ok(vec![Friend::new("a", "Alice")]));

        assert!(session.tag_chips().is_empty());
        assert_eq!(session.names().get("a"), Some("Alice"));
    }

    #[test]
    fn test_racing_fetches_last_write_wins() {
        let mut session = TagSession::new();
        let names = session.initialize(&TaggedFriends::from(vec!["a"]), None).unwrap();
        let picker = session.open_tag_picker();

        session.apply_friend_fetch(picker, Ok(vec![Friend::new("a", "Alice")]));
        session.apply_friend_fetch(names, Ok(vec![Friend::new("a", "Al")]));

        assert_eq!(session.names().get("a"), Some("Al"));
        // The rendered picker row still takes priority
        assert_eq!(chip_labels(&session), vec!["Alice"]);
    }
}
