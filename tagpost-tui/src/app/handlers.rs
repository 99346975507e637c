use crate::app::state::{App, ComposerFocus};
use crate::log_key_event;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyOutcome {
    Handled,
    /// The composer asked to be saved; the loop awaits `submit_composer`
    Submit,
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<KeyOutcome> {
    if key.kind != KeyEventKind::Press {
        return Ok(KeyOutcome::Handled);
    }
    log_key_event!(app.log_config, "key={:?} mode={:?}", key.code, app.input_mode);

    // Priority 1: Help modal
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.toggle_help();
        }
        return Ok(KeyOutcome::Handled);
    }

    // Priority 2: Alert raised by the tag session, any key dismisses it
    if app.active_alert().is_some() {
        app.dismiss_alert();
        return Ok(KeyOutcome::Handled);
    }

    let (editor_open, picker_open) = app
        .active_tags()
        .map(|t| (t.is_location_editor_open(), t.is_picker_open()))
        .unwrap_or((false, false));

    // Priority 3: Location editor
    if editor_open {
        handle_location_editor_keys(app, key);
        return Ok(KeyOutcome::Handled);
    }

    // Priority 4: Friend picker
    if picker_open {
        handle_picker_keys(app, key);
        return Ok(KeyOutcome::Handled);
    }

    // Priority 5: Composer
    if app.composer_state.is_open() {
        return handle_composer_keys(app, key);
    }

    // Main screen
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('n') => app.open_composer_new_post(),
        KeyCode::Char('e') => {
            if let Some(post) = app.last_saved.clone() {
                app.open_composer_edit_post(&post);
            }
        }
        KeyCode::Char('c') => app.cycle_color_scheme(),
        _ => {}
    }
    Ok(KeyOutcome::Handled)
}

fn handle_composer_keys(app: &mut App, key: KeyEvent) -> Result<KeyOutcome> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => {
            app.close_composer();
            return Ok(KeyOutcome::Handled);
        }
        KeyCode::Char('s') if ctrl => return Ok(KeyOutcome::Submit),
        KeyCode::Char('t') if ctrl => {
            app.open_tag_picker();
            return Ok(KeyOutcome::Handled);
        }
        KeyCode::Char('l') if ctrl => {
            app.open_location_editor();
            return Ok(KeyOutcome::Handled);
        }
        KeyCode::Tab => {
            app.focus_next();
            return Ok(KeyOutcome::Handled);
        }
        KeyCode::BackTab => {
            app.focus_previous();
            return Ok(KeyOutcome::Handled);
        }
        _ => {}
    }

    match app.composer_state.focus {
        ComposerFocus::Content => app.handle_composer_input(key),
        ComposerFocus::Tags => handle_tag_chip_keys(app, key),
        ComposerFocus::Location => match key.code {
            KeyCode::Enter | KeyCode::Char('l') => app.open_location_editor(),
            KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => app.remove_location(),
            _ => {}
        },
    }
    Ok(KeyOutcome::Handled)
}

fn handle_tag_chip_keys(app: &mut App, key: KeyEvent) {
    let chip_count = app.active_tags().map(|t| t.tag_chips().len()).unwrap_or(0);
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.composer_state.selected_chip = app.composer_state.selected_chip.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.composer_state.selected_chip + 1 < chip_count {
                app.composer_state.selected_chip += 1;
            }
        }
        KeyCode::Backspace | KeyCode::Delete | KeyCode::Char('x') => app.remove_selected_chip(),
        KeyCode::Enter | KeyCode::Char('t') => app.open_tag_picker(),
        _ => {}
    }
}

fn handle_picker_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_tag_picker(),
        KeyCode::Enter => app.confirm_tag_selection(),
        KeyCode::Char(' ') => app.toggle_highlighted_friend(),
        KeyCode::Up | KeyCode::Char('k') => {
            app.composer_state.picker_index = app.composer_state.picker_index.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let max_index = app.picker_row_count().saturating_sub(1);
            if app.composer_state.picker_index < max_index {
                app.composer_state.picker_index += 1;
            }
        }
        _ => {}
    }
}

fn handle_location_editor_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_location_editor(),
        KeyCode::Enter => app.confirm_location(),
        KeyCode::Backspace => {
            if let Some(input) = app.active_tags_mut().and_then(|t| t.location_input_mut()) {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.active_tags_mut().and_then(|t| t.location_input_mut()) {
                input.push(c);
            }
        }
        _ => {}
    }
}
