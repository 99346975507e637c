use std::sync::Arc;

use tagpost_types::{ColorScheme, Post};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tui_textarea::TextArea;
use uuid::Uuid;

use crate::api::{ApiClient, FriendsSource};
use crate::tagging::{FetchOutcome, FriendFetch, SessionSlot, TagSession};

/// Maximum post length accepted by the composer
pub const MAX_POST_CHARS: usize = 280;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing, shortcuts active
    Typing,     // In text input, shortcuts disabled
}

/// Composer mode, chosen when the composer opens.
///
/// It decides which tag session every tagging action goes to.
#[derive(Debug, Clone, PartialEq)]
pub enum ComposerMode {
    NewPost,
    EditPost { post_id: Uuid },
}

impl ComposerMode {
    pub fn slot(&self) -> SessionSlot {
        match self {
            ComposerMode::NewPost => SessionSlot::NewPost,
            ComposerMode::EditPost { .. } => SessionSlot::EditPost,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ComposerMode::NewPost => "New Post",
            ComposerMode::EditPost { .. } => "Edit Post",
        }
    }
}

/// Which part of the composer receives keys
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComposerFocus {
    Content,
    Tags,
    Location,
}

impl ComposerFocus {
    pub fn next(self) -> Self {
        match self {
            ComposerFocus::Content => ComposerFocus::Tags,
            ComposerFocus::Tags => ComposerFocus::Location,
            ComposerFocus::Location => ComposerFocus::Content,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ComposerFocus::Content => ComposerFocus::Location,
            ComposerFocus::Tags => ComposerFocus::Content,
            ComposerFocus::Location => ComposerFocus::Tags,
        }
    }
}

/// Composer modal state
pub struct ComposerState {
    pub mode: Option<ComposerMode>,
    pub textarea: TextArea<'static>,
    pub max_chars: usize,
    pub focus: ComposerFocus,
    /// Highlighted tag chip while tags have focus
    pub selected_chip: usize,
    /// Highlighted row in the friend picker
    pub picker_index: usize,
    pub error: Option<String>,
}

impl ComposerState {
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        Self {
            mode: None,
            textarea,
            max_chars: MAX_POST_CHARS,
            focus: ComposerFocus::Content,
            selected_chip: 0,
            picker_index: 0,
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_some()
    }

    pub fn get_content(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn char_count(&self) -> usize {
        self.get_content().chars().count()
    }
}

impl Default for ComposerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct App {
    pub running: bool,
    pub api_client: ApiClient,
    pub friends_source: Arc<dyn FriendsSource>,
    pub composer_state: ComposerState,
    /// Tags and location of the new-post composer
    pub new_post_tags: TagSession,
    /// Tags and location of the edit-post composer
    pub edit_post_tags: TagSession,
    /// Fetches requested by the sessions, not yet started
    pub pending_fetches: Vec<(SessionSlot, FriendFetch)>,
    pub fetch_tx: UnboundedSender<FetchOutcome>,
    pub fetch_rx: UnboundedReceiver<FetchOutcome>,
    pub input_mode: InputMode,
    pub color_scheme: ColorScheme,
    pub show_help: bool,
    /// Most recently saved post, offered for editing from the main screen
    pub last_saved: Option<Post>,
    pub status_message: Option<String>,
    pub log_config: crate::logging::LogConfig,
}
