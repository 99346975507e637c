use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Style;
use std::sync::Arc;
use tagpost_types::{CreatePostRequest, Post, UpdatePostRequest};
use tui_textarea::TextArea;

use crate::api::{ApiClient, FriendsSource};
use crate::tagging::{spawn_friend_fetch, view, FetchOutcome, SessionSlot, TagSession};
use crate::{log_api_call, log_modal_state, log_tagging};

pub mod state;
pub use state::*;
pub mod handlers;


impl App {
    pub fn new(api_client: ApiClient) -> Self {
        let friends_source: Arc<dyn FriendsSource> = Arc::new(api_client.clone());
        Self::with_friends_source(api_client, friends_source)
    }

    /// Create an app whose friend lookups go to `friends_source`
    pub fn with_friends_source(api_client: ApiClient, friends_source: Arc<dyn FriendsSource>) -> Self {
        let (fetch_tx, fetch_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            running: true,
            api_client,
            friends_source,
            composer_state: ComposerState::new(),
            new_post_tags: TagSession::new(),
            edit_post_tags: TagSession::new(),
            pending_fetches: Vec::new(),
            fetch_tx,
            fetch_rx,
            input_mode: InputMode::Navigation,
            color_scheme: tagpost_types::ColorScheme::default(),
            show_help: false,
            last_saved: None,
            status_message: None,
            log_config: crate::logging::LogConfig::default(),
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<handlers::KeyOutcome> {
        handlers::handle_key_event(self, key)
    }

    /// Toggle help modal
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn cycle_color_scheme(&mut self) {
        self.color_scheme = self.color_scheme.next();
    }

    // ============================================================================
    // TAG SESSION ROUTING
    // ============================================================================

    pub fn tags(&self, slot: SessionSlot) -> &TagSession {
        match slot {
            SessionSlot::NewPost => &self.new_post_tags,
            SessionSlot::EditPost => &self.edit_post_tags,
        }
    }

    pub fn tags_mut(&mut self, slot: SessionSlot) -> &mut TagSession {
        match slot {
            SessionSlot::NewPost => &mut self.new_post_tags,
            SessionSlot::EditPost => &mut self.edit_post_tags,
        }
    }

    /// Session selected by the open composer's mode
    pub fn active_slot(&self) -> Option<SessionSlot> {
        self.composer_state.mode.as_ref().map(ComposerMode::slot)
    }

    pub fn active_tags(&self) -> Option<&TagSession> {
        self.active_slot().map(|slot| self.tags(slot))
    }

    pub fn active_tags_mut(&mut self) -> Option<&mut TagSession> {
        let slot = self.active_slot()?;
        Some(self.tags_mut(slot))
    }

    // ============================================================================
    // FRIEND FETCHES
    // ============================================================================

    /// Start every queued fetch in the background
    pub fn dispatch_pending_fetches(&mut self) {
        for (slot, fetch) in self.pending_fetches.drain(..) {
            log_api_call!(self.log_config, "GET /friends ({:?}, {:?})", slot, fetch.purpose());
            spawn_friend_fetch(self.friends_source.clone(), slot, fetch, self.fetch_tx.clone());
        }
    }

    /// Apply whatever fetches have finished since the last call
    pub fn drain_fetch_outcomes(&mut self) {
        while let Ok(outcome) = self.fetch_rx.try_recv() {
            self.apply_fetch_outcome(outcome);
        }
    }

    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        let current = self.tags(outcome.slot).is_current(&outcome.fetch);
        match &outcome.result {
            Ok(friends) => log_tagging!(
                self.log_config,
                "{:?} for {:?}: {} friends{}",
                outcome.fetch.purpose(),
                outcome.slot,
                friends.len(),
                if current { "" } else { " (stale, cache only)" }
            ),
            Err(e) => log_tagging!(
                self.log_config,
                "{:?} for {:?} failed{}: {}",
                outcome.fetch.purpose(),
                outcome.slot,
                if current { "" } else { " (stale, ignored)" },
                e
            ),
        }
        self.tags_mut(outcome.slot)
            .apply_friend_fetch(outcome.fetch, outcome.result);
    }

    // ============================================================================
    // COMPOSER METHODS
    // ============================================================================

    /// Open composer for a new post with an empty tag session
    pub fn open_composer_new_post(&mut self) {
        self.new_post_tags.reset();
        self.open_composer(ComposerMode::NewPost, TextArea::default());
    }

    /// Open composer for editing `post`, loading its tags and location
    pub fn open_composer_edit_post(&mut self, post: &Post) {
        let tagged = post.tagged_friends.clone().unwrap_or_default();

        self.edit_post_tags.reset();
        if let Some(fetch) = self.edit_post_tags.initialize(&tagged, post.location.as_deref()) {
            self.pending_fetches.push((SessionSlot::EditPost, fetch));
        }
        log_tagging!(
            self.log_config,
            "Edit session for {}: {} tagged, location={:?}",
            post.id,
            self.edit_post_tags.selection().len(),
            self.edit_post_tags.location()
        );

        let textarea = TextArea::from(post.content.lines());
        self.open_composer(ComposerMode::EditPost { post_id: post.id }, textarea);
    }

    fn open_composer(&mut self, mode: ComposerMode, mut textarea: TextArea<'static>) {
        log_modal_state!(self.log_config, "Opening composer: {:?}", mode);
        textarea.set_hard_tab_indent(true);
        self.apply_composer_styling(&mut textarea);
        self.composer_state.textarea = textarea;
        self.composer_state.mode = Some(mode);
        self.composer_state.max_chars = MAX_POST_CHARS;
        self.composer_state.focus = ComposerFocus::Content;
        self.composer_state.selected_chip = 0;
        self.composer_state.picker_index = 0;
        self.composer_state.error = None;
        self.input_mode = InputMode::Typing;
    }

    /// Close composer, discarding its tag session
    pub fn close_composer(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.reset();
        }
        log_modal_state!(self.log_config, "Closing composer: {:?}", self.composer_state.mode);
        self.composer_state.mode = None;
        let mut textarea = TextArea::default();
        textarea.set_hard_tab_indent(true);
        self.apply_composer_styling(&mut textarea);
        self.composer_state.textarea = textarea;
        self.composer_state.error = None;
        self.input_mode = InputMode::Navigation;
    }

    /// Apply consistent styling to composer TextArea
    fn apply_composer_styling(&self, textarea: &mut TextArea) {
        use crate::ui::theme::get_theme_colors;
        let theme = get_theme_colors(self);

        textarea.set_style(Style::default().fg(theme.primary));
        textarea.set_cursor_style(Style::default().fg(theme.background).bg(theme.primary));
        textarea.set_cursor_line_style(Style::default());
    }

    /// Handle keyboard input for the content area (delegates to TextArea)
    pub fn handle_composer_input(&mut self, key: KeyEvent) {
        if let KeyCode::Char(_) = key.code {
            if self.composer_state.char_count() >= self.composer_state.max_chars {
                return;
            }
        }

        use tui_textarea::Input;
        let input = Input::from(crossterm::event::Event::Key(key));
        self.composer_state.textarea.input(input);
    }

    pub fn focus_next(&mut self) {
        self.composer_state.focus = self.composer_state.focus.next();
        self.sync_input_mode();
    }

    pub fn focus_previous(&mut self) {
        self.composer_state.focus = self.composer_state.focus.previous();
        self.sync_input_mode();
    }

    fn sync_input_mode(&mut self) {
        self.input_mode = if self.composer_state.focus == ComposerFocus::Content {
            InputMode::Typing
        } else {
            InputMode::Navigation
        };
    }

    /// Submit composer content, tags and location based on mode
    pub async fn submit_composer(&mut self) -> Result<()> {
        let Some(mode) = self.composer_state.mode.clone() else {
            return Ok(());
        };

        let content = self.composer_state.get_content();
        if content.trim().is_empty() {
            self.composer_state.error = Some("Validation Error: Cannot save empty post.".to_string());
            return Ok(());
        }

        let char_count = self.composer_state.char_count();
        if char_count > self.composer_state.max_chars {
            self.composer_state.error = Some(format!(
                "Validation Error: Content exceeds {} characters (current: {})",
                self.composer_state.max_chars, char_count
            ));
            return Ok(());
        }

        let fields = self.tags(mode.slot()).fields().clone();
        let result = match mode {
            ComposerMode::NewPost => {
                log_api_call!(self.log_config, "POST /posts tags={} location={:?}", fields.tagged_friends, fields.location);
                let request = CreatePostRequest {
                    content,
                    tagged_friends: fields.tagged_friends,
                    location: fields.location,
                };
                self.api_client.create_post(&request).await
            }
            ComposerMode::EditPost { post_id } => {
                log_api_call!(self.log_config, "PUT /posts/{} tags={} location={:?}", post_id, fields.tagged_friends, fields.location);
                let request = UpdatePostRequest {
                    content,
                    tagged_friends: fields.tagged_friends,
                    location: fields.location,
                };
                self.api_client.update_post(post_id, &request).await
            }
        };

        match result {
            Ok(post) => {
                self.status_message = Some(format!("Saved post {}", post.id));
                self.last_saved = Some(post);
                self.close_composer();
            }
            Err(e) => {
                log::error!("Failed to save post: {}", e);
                self.composer_state.error = Some(format!("Failed to save post: {}", e));
            }
        }
        Ok(())
    }

    // ============================================================================
    // TAGGING METHODS
    // ============================================================================

    /// Open the friend picker for the active session and queue its fetch
    pub fn open_tag_picker(&mut self) {
        let Some(slot) = self.active_slot() else {
            return;
        };
        let fetch = self.tags_mut(slot).open_tag_picker();
        self.pending_fetches.push((slot, fetch));
        self.composer_state.picker_index = 0;
        self.input_mode = InputMode::Navigation;
        log_modal_state!(self.log_config, "Friend picker opened for {:?}", slot);
    }

    /// Puid of the highlighted picker row, once the list has loaded
    pub fn highlighted_friend(&self) -> Option<String> {
        let tags = self.active_tags()?;
        match view::picker(tags) {
            view::PickerView::Rows(rows) => rows
                .get(self.composer_state.picker_index)
                .map(|row| row.puid.to_string()),
            _ => None,
        }
    }

    pub fn picker_row_count(&self) -> usize {
        match self.active_tags().map(view::picker) {
            Some(view::PickerView::Rows(rows)) => rows.len(),
            _ => 0,
        }
    }

    pub fn toggle_highlighted_friend(&mut self) {
        let Some(puid) = self.highlighted_friend() else {
            return;
        };
        if let Some(tags) = self.active_tags_mut() {
            let tagged = tags.toggle_friend(&puid);
            log_tagging!(self.log_config, "Toggled {} (tagged={})", puid, tagged);
        }
    }

    pub fn confirm_tag_selection(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.confirm_tag_selection();
            let field = tags.fields().tagged_friends.clone();
            log_tagging!(self.log_config, "Tags confirmed: {}", field);
        }
        self.clamp_selected_chip();
        self.restore_focus_input_mode();
    }

    pub fn cancel_tag_picker(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.cancel_tag_picker();
            let field = tags.fields().tagged_friends.clone();
            log_tagging!(self.log_config, "Picker cancelled, tags stay {}", field);
        }
        self.restore_focus_input_mode();
    }

    /// Untag the highlighted chip
    pub fn remove_selected_chip(&mut self) {
        let index = self.composer_state.selected_chip;
        let Some(tags) = self.active_tags_mut() else {
            return;
        };
        let Some(puid) = tags.tag_chips().get(index).map(|c| c.puid.clone()) else {
            return;
        };
        tags.remove_tagged_chip(&puid);
        log_tagging!(self.log_config, "Removed tag chip {}", puid);
        self.clamp_selected_chip();
    }

    fn clamp_selected_chip(&mut self) {
        let count = self.active_tags().map(|t| t.tag_chips().len()).unwrap_or(0);
        self.composer_state.selected_chip = self.composer_state.selected_chip.min(count.saturating_sub(1));
    }

    pub fn open_location_editor(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.open_location_editor();
        }
        self.input_mode = InputMode::Typing;
        log_modal_state!(self.log_config, "Location editor opened");
    }

    pub fn confirm_location(&mut self) {
        let Some(tags) = self.active_tags_mut() else {
            return;
        };
        match tags.confirm_location() {
            Ok(()) => {
                let location = tags.location().to_string();
                log_tagging!(self.log_config, "Location confirmed: {:?}", location);
                self.restore_focus_input_mode();
            }
            Err(e) => log::warn!("Location rejected: {}", e),
        }
    }

    pub fn cancel_location_editor(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.cancel_location_editor();
        }
        self.restore_focus_input_mode();
    }

    pub fn remove_location(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.remove_location_chip();
        }
    }

    pub fn dismiss_alert(&mut self) {
        if let Some(tags) = self.active_tags_mut() {
            tags.dismiss_alert();
        }
    }

    fn restore_focus_input_mode(&mut self) {
        if self.composer_state.is_open() {
            self.sync_input_mode();
        } else {
            self.input_mode = InputMode::Navigation;
        }
    }

    /// Alert raised by the active session, if any
    pub fn active_alert(&self) -> Option<&str> {
        self.active_tags().and_then(TagSession::alert)
    }
}
