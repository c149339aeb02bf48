//! Status bar widget.

use crate::app::{App, Overlay};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let error = matches!(&app.status_message, Some((msg, _)) if msg.starts_with("Failed"));

    // Cow avoids allocations for the static hint strings
    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.loading {
        Cow::Borrowed("Loading listings...")
    } else {
        match app.overlay {
            Some(Overlay::Filters(_)) => {
                Cow::Borrowed("[Tab]field [Enter]apply [Esc]cancel")
            }
            Some(_) => Cow::Borrowed("[Esc]close"),
            None => Cow::Borrowed(
                "[j/k]browse [c]ontact [d]etails [f]ilters [s]ave [m]ute [?]help [q]uit",
            ),
        }
    };

    let style = if error {
        app.palette.status_error
    } else {
        app.palette.status_bar
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}
