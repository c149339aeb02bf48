//! Terminal User Interface module.
//!
//! This module provides the TUI for the listing feed, including:
//! - Main event loop (`run`)
//! - Keyboard and mouse input handling (wheel and drag navigation)
//! - Rendering for the listing card, action rail, and overlays
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Frame layout dispatch
//! - `card` - Full-screen listing card widget
//! - `overlays` - Filter, contact, details, and download-prompt overlays
//! - `help` - Keybinding help overlay
//! - `status` - Status bar widget

mod card;
mod events;
mod help;
mod input;
mod loop_runner;
mod overlays;
mod render;
mod status;

// Re-export the public API
pub use loop_runner::{run, Action};
