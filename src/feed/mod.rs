//! The shorts feed core: gesture translation, navigation state machine,
//! and clip playback arbitration.
//!
//! Everything in this module is synchronous and runtime-free. The event
//! loop feeds it raw input and timer completions; it answers with accepted
//! steps and side-effect requests (playback switches, the one-shot
//! download prompt).

mod controller;
mod gesture;
mod playback;

pub use controller::{FeedController, Phase, Step, StepOutcome};
pub use gesture::{NavigationIntent, SwipeTracker, WheelAccumulator};
pub use playback::{ClipPlayback, PlaybackDeck, PlaybackError};
