//! Shorts-style terminal browser for rental listings.
//!
//! One listing fills the screen at a time; wheel, drag, and j/k step
//! through the feed one card per gesture, with a cool-down between steps
//! and exactly one clip "playing" at any moment.

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod listings;
pub mod theme;
pub mod ui;
pub mod util;
