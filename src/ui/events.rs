//! Background task event processing.

use crate::app::{App, AppEvent};

/// Handle events sent from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::ListingsLoaded { generation, result } => {
            app.on_listings_loaded(generation, result);
        }
        AppEvent::NavCooldownElapsed { generation } => {
            app.on_cooldown_elapsed(generation);
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error = %error, "Background task panicked");
            app.set_status(format!("Internal error in {}: {}", task, error));
        }
    }
}
