//! Render-ready views of a [`TagSession`].
//!
//! Widgets are built from these values only, so what the composer shows is a
//! pure function of the session.

use super::session::{PickerContent, TagSession};
use super::MAX_LOCATION_CHARS;

/// One rendered tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub puid: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChipsView<'a> {
    pub chips: &'a [Chip],
    pub resolving: bool,
}

impl TagChipsView<'_> {
    /// Nothing to show: no chips and no lookup in flight
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty() && !self.resolving
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow<'a> {
    pub puid: &'a str,
    pub label: &'a str,
    pub avatar_url: Option<&'a str>,
    pub checked: bool,
}

impl PickerRow<'_> {
    /// Stand-in for the profile picture, which a terminal cannot show
    pub fn avatar_marker(&self) -> &'static str {
        if self.avatar_url.is_some() {
            "●"
        } else {
            "○"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerView<'a> {
    Hidden,
    Loading,
    Failed(&'a str),
    Rows(Vec<PickerRow<'a>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEditorView<'a> {
    pub input: &'a str,
    pub char_count: usize,
    pub max_chars: usize,
}

impl LocationEditorView<'_> {
    pub fn over_limit(&self) -> bool {
        self.char_count > self.max_chars
    }
}

pub fn tag_chips(session: &TagSession) -> TagChipsView<'_> {
    TagChipsView {
        chips: session.tag_chips(),
        resolving: session.tags_resolving(),
    }
}

/// The location chip, hidden when there is no location
pub fn location_chip(session: &TagSession) -> Option<&str> {
    Some(session.location()).filter(|l| !l.is_empty())
}

pub fn picker(session: &TagSession) -> PickerView<'_> {
    if !session.is_picker_open() {
        return PickerView::Hidden;
    }
    match session.picker_content() {
        PickerContent::NotLoaded | PickerContent::Loading => PickerView::Loading,
        PickerContent::Failed(msg) => PickerView::Failed(msg),
        PickerContent::Loaded(friends) => PickerView::Rows(
            friends
                .iter()
                .map(|f| PickerRow {
                    puid: &f.puid,
                    label: &f.display_name,
                    avatar_url: f.profile_picture_url.as_deref(),
                    checked: session.selection().contains(&f.puid),
                })
                .collect(),
        ),
    }
}

pub fn location_editor(session: &TagSession) -> Option<LocationEditorView<'_>> {
    session.location_input().map(|input| LocationEditorView {
        input,
        char_count: input.trim().chars().count(),
        max_chars: MAX_LOCATION_CHARS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagpost_types::{Friend, TaggedFriends};

    #[test]
    fn test_picker_rows_follow_selection() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["b"]), None);
        let fetch = session.open_tag_picker();
        session.apply_friend_fetch(fetch, Ok(vec![Friend::new("a", "Alice"), Friend::new("b", "Bob")]));

        let checked = |session: &TagSession| match picker(session) {
            PickerView::Rows(rows) => rows.iter().map(|r| r.checked).collect::<Vec<_>>(),
            other => panic!("unexpected picker view: {:?}", other),
        };
        assert_eq!(checked(&session), vec![false, true]);

        session.remove_tagged_chip("b");
        assert_eq!(checked(&session), vec![false, false]);
    }

    #[test]
    fn test_picker_rows_mark_avatars() {
        let mut session = TagSession::new();
        let fetch = session.open_tag_picker();
        let mut with_picture = Friend::new("a", "Alice");
        with_picture.profile_picture_url = Some("https://img.example/a.png".to_string());
        session.apply_friend_fetch(fetch, Ok(vec![with_picture, Friend::new("b", "Bob")]));

        match picker(&session) {
            PickerView::Rows(rows) => {
                assert_eq!(rows[0].avatar_url, Some("https://img.example/a.png"));
                let markers: Vec<_> = rows.iter().map(|r| r.avatar_marker()).collect();
                assert_eq!(markers, vec!["●", "○"]);
            }
            other => panic!("unexpected picker view: {:?}", other),
        }
    }

    #[test]
    fn test_picker_hidden_when_closed() {
        let mut session = TagSession::new();
        assert_eq!(picker(&session), PickerView::Hidden);
        session.open_tag_picker();
        assert_eq!(picker(&session), PickerView::Loading);
        session.cancel_tag_picker();
        assert_eq!(picker(&session), PickerView::Hidden);
    }

    #[test]
    fn test_location_chip_hidden_when_empty() {
        let mut session = TagSession::new();
        assert_eq!(location_chip(&session), None);
        session.initialize(&TaggedFriends::default(), Some("Quito"));
        assert_eq!(location_chip(&session), Some("Quito"));
        session.remove_location_chip();
        assert_eq!(location_chip(&session), None);
    }

    #[test]
    fn test_editor_view_flags_over_limit() {
        let mut session = TagSession::new();
        session.open_location_editor();
        *session.location_input_mut().unwrap() = "w".repeat(MAX_LOCATION_CHARS + 1);
        let view = location_editor(&session).unwrap();
        assert!(view.over_limit());
    }

    #[test]
    fn test_tag_chips_view_resolving_is_not_empty() {
        let mut session = TagSession::new();
        session.initialize(&TaggedFriends::from(vec!["a"]), None);
        let view = tag_chips(&session);
        assert!(view.chips.is_empty());
        assert!(!view.is_empty());
    }
}
