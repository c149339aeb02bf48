//! Keyboard input handling for the TUI.
//!
//! Input is routed to the open overlay first; the filter panel owns its
//! own text editing, every other overlay goes through the keybinding
//! registry in the Overlay context. With no overlay open, the feed
//! context applies.

use crate::app::{App, AppEvent, FilterField, Overlay};
use crate::feed::NavigationIntent;
use crate::keybindings::Action as KbAction;
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::Action;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) -> Result<Action> {
    match app.overlay {
        Some(Overlay::Filters(_)) => {
            handle_filter_input(app, code, event_tx);
            Ok(Action::Continue)
        }
        Some(Overlay::Help { .. }) => {
            handle_help_input(app, code);
            Ok(Action::Continue)
        }
        Some(_) => {
            handle_overlay_input(app, code, modifiers);
            Ok(Action::Continue)
        }
        None => handle_feed_input(app, code, modifiers, event_tx),
    }
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) {
    let Some(Overlay::Help { ref mut scroll }) = app.overlay else {
        return;
    };
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_overlay();
        }
        KeyCode::Char('j') | KeyCode::Down => *scroll = scroll.saturating_add(1),
        KeyCode::Char('k') | KeyCode::Up => *scroll = scroll.saturating_sub(1),
        _ => {}
    }
}

/// Handle input for the contact, details, and download-prompt overlays.
fn handle_overlay_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Overlay-specific keys first
    match (&app.overlay, code) {
        // Contact sheet: Enter opens the broker's WhatsApp thread
        (Some(Overlay::Contact), KeyCode::Enter | KeyCode::Char('w')) => {
            open_whatsapp(app);
            return;
        }
        // Download prompt: Enter acknowledges it, a/g open a store page
        (Some(Overlay::DownloadPrompt), KeyCode::Enter) => {
            app.close_overlay();
            return;
        }
        (Some(Overlay::DownloadPrompt), KeyCode::Char('a')) => {
            open_store(app, super::overlays::APP_STORE_URL);
            return;
        }
        (Some(Overlay::DownloadPrompt), KeyCode::Char('g')) => {
            open_store(app, super::overlays::PLAY_STORE_URL);
            return;
        }
        _ => {}
    }

    if let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, app.input_context())
    {
        match action {
            KbAction::Back => app.close_overlay(),
            KbAction::ShowHelp => app.overlay = Some(Overlay::Help { scroll: 0 }),
            _ => {}
        }
    }
}

/// Handle text editing inside the filter panel.
fn handle_filter_input(app: &mut App, code: KeyCode, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    let Some(Overlay::Filters(ref mut draft)) = app.overlay else {
        return;
    };

    match code {
        KeyCode::Esc => {
            app.close_overlay();
        }
        KeyCode::Enter => {
            let draft = draft.clone();
            app.apply_filters(&draft, event_tx);
        }
        KeyCode::Tab | KeyCode::Down => {
            draft.field = draft.field.next();
        }
        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right if draft.field == FilterField::Kind => {
            draft.cycle_kind();
        }
        KeyCode::Char(c) => {
            // Price fields accept digits only
            let editable = match draft.field {
                FilterField::City => true,
                FilterField::MinPrice | FilterField::MaxPrice => c.is_ascii_digit(),
                FilterField::Kind => false,
            };
            if editable {
                if let Some(text) = draft.active_text_mut() {
                    text.push(c);
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(text) = draft.active_text_mut() {
                text.pop();
            }
        }
        _ => {}
    }
    app.needs_redraw = true;
}

/// Handle input in the feed (no overlay open).
fn handle_feed_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::UnboundedSender<AppEvent>,
) -> Result<Action> {
    let action = app
        .keybindings
        .action_for_key(code, modifiers, app.input_context());

    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::NextItem) => app.navigate(NavigationIntent::Next, event_tx),
        Some(KbAction::PrevItem) => app.navigate(NavigationIntent::Prev, event_tx),
        Some(KbAction::FirstItem) => app.navigate(NavigationIntent::GoTo(0), event_tx),
        Some(KbAction::LastItem) => {
            let count = app.controller.item_count();
            if count > 0 {
                app.navigate(NavigationIntent::GoTo(count - 1), event_tx);
            }
        }
        Some(KbAction::Contact) => {
            if app.current_listing().is_some() {
                app.overlay = Some(Overlay::Contact);
            }
        }
        Some(KbAction::ShowDetails) => {
            if app.current_listing().is_some() {
                app.overlay = Some(Overlay::Details);
            }
        }
        Some(KbAction::OpenFilters) => app.open_filters(),
        Some(KbAction::ClearFilters) => app.clear_filters(event_tx),
        Some(KbAction::ToggleMute) => app.toggle_mute(),
        Some(KbAction::ToggleLike) => app.toggle_like(),
        Some(KbAction::ToggleSave) => app.toggle_save(),
        Some(KbAction::Follow) => app.toggle_follow(),
        Some(KbAction::OpenInBrowser) => open_clip(app),
        Some(KbAction::Refresh) => {
            app.set_status("Reloading listings...");
            app.spawn_fetch(event_tx);
        }
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => app.overlay = Some(Overlay::Help { scroll: 0 }),
        Some(KbAction::Back) | None => {}
    }

    Ok(Action::Continue)
}

/// Open the broker's WhatsApp thread for the active listing.
fn open_whatsapp(app: &mut App) {
    let Some(url) = app.current_listing().and_then(|l| l.broker.whatsapp_url()) else {
        app.set_status("No phone number on record for this broker");
        return;
    };
    // Validate before open::that() to keep odd schemes away from the
    // platform handler
    if let Err(e) = validate_url_for_open(&url) {
        app.set_status(e);
    } else if let Err(e) = open::that(&url) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opening WhatsApp...");
    }
}

/// Open one of the app-store pages from the download prompt.
fn open_store(app: &mut App, url: &str) {
    if let Err(e) = validate_url_for_open(url) {
        app.set_status(e);
    } else if let Err(e) = open::that(url) {
        app.set_status(format!("Failed to open browser: {}", e));
    } else {
        app.set_status("Opening store page...");
    }
}

/// Open the active listing's clip in the system browser.
fn open_clip(app: &mut App) {
    let Some(url) = app.current_listing().and_then(|l| l.video_url.clone()) else {
        app.set_status("No video for this listing");
        return;
    };
    if let Err(e) = validate_url_for_open(&url) {
        app.set_status(e);
    } else if let Err(e) = open::that(&url) {
        app.set_status(format!("Failed to open browser: {}", e));
    }
}
