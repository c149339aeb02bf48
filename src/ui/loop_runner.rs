//! Main event loop for the TUI.
//!
//! This module contains the core event loop that multiplexes terminal input
//! (keys, mouse wheel, drag gestures), background task events, and the
//! playback tick.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::render;

/// Playback tick interval. Drives the clip progress bar.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Accumulator delta contributed by one wheel notch. Chosen so that a
/// single notch clears the default navigation threshold of 50.
const WHEEL_TICK_DELTA: i32 = 60;

/// Vertical travel credited per terminal row during a drag. A terminal
/// row stands in for roughly this many pixels of touch movement, so a
/// drag of a few rows clears the default swipe threshold of 50.
const SWIPE_ROW_WEIGHT: i32 = 20;

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex three event sources:
/// - **Terminal input**: Keys and mouse events from crossterm's async stream
/// - **Background tasks**: Listing fetches and cool-down timers via `AppEvent`
/// - **Playback tick**: 100ms timer advancing the clip progress bar
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain all pending app events before handling more input so a
        // burst of wheel input cannot starve fetch results.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app.needs_redraw = true;
                        match handle_input(app, key.code, key.modifiers, &event_tx) {
                            Ok(Action::Quit) => break,
                            Ok(Action::Continue) => {}
                            Err(e) => app.set_status(format!("Error: {}", e)),
                        }
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        handle_mouse(app, mouse, &event_tx);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.needs_redraw = true;
                    }
                    _ => {}
                }
            }

            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event);
            }

            _ = tick_interval.tick() => {
                app.tick_playback(TICK_INTERVAL);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Translate mouse events into navigation intents.
///
/// Wheel notches feed the accumulator; press/release pairs of the left
/// button are tracked as a drag. Both are suppressed while an overlay is
/// open so scrolling cannot move the feed behind a modal.
fn handle_mouse(app: &mut App, mouse: MouseEvent, event_tx: &mpsc::UnboundedSender<AppEvent>) {
    if app.overlay.is_some() {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if let Some(intent) = app.wheel.push(WHEEL_TICK_DELTA) {
                app.navigate(intent, event_tx);
            }
        }
        MouseEventKind::ScrollUp => {
            if let Some(intent) = app.wheel.push(-WHEEL_TICK_DELTA) {
                app.navigate(intent, event_tx);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.swipe.begin(i32::from(mouse.row) * SWIPE_ROW_WEIGHT);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(intent) = app.swipe.end(i32::from(mouse.row) * SWIPE_ROW_WEIGHT) {
                app.navigate(intent, event_tx);
            }
        }
        _ => {}
    }
}

/// Set up the terminal for TUI rendering with mouse capture.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}
