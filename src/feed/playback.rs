//! Clip playback state and single-active arbitration.
//!
//! Each listing owns a [`ClipPlayback`] tracking position, mute, and
//! play/pause. The [`PlaybackDeck`] enforces the feed's core playback rule:
//! at most one clip plays at a time, and it is always the active one.
//! Items have no visibility into siblings — arbitration lives here.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The environment refused to start playback (no playable source).
    /// Swallowed at the deck boundary: the clip stays paused.
    #[error("clip has no playable source")]
    NoSource,
}

// ============================================================================
// Per-clip state
// ============================================================================

/// Playback state for a single listing's clip.
///
/// Mute is independent per clip and defaults to muted. Position advances
/// only while playing, looping at the clip duration.
#[derive(Debug, Clone)]
pub struct ClipPlayback {
    position: Duration,
    duration: Duration,
    playing: bool,
    muted: bool,
    has_source: bool,
}

impl ClipPlayback {
    pub fn new(duration: Duration, has_source: bool) -> Self {
        Self {
            position: Duration::ZERO,
            // Zero-length clips would make the loop arithmetic degenerate
            duration: duration.max(Duration::from_secs(1)),
            playing: false,
            muted: true,
            has_source,
        }
    }

    /// Start playback from the current position (resume semantics).
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.has_source {
            return Err(PlaybackError::NoSource);
        }
        self.playing = true;
        Ok(())
    }

    /// Pause in place; position is retained.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Reset position to the start.
    pub fn rewind(&mut self) {
        self.position = Duration::ZERO;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Advance the position by `dt` while playing, wrapping at the clip
    /// duration (clips loop).
    pub fn advance(&mut self, dt: Duration) {
        if !self.playing {
            return;
        }
        let pos = self.position + dt;
        self.position = if pos >= self.duration {
            Duration::from_nanos((pos.as_nanos() % self.duration.as_nanos()) as u64)
        } else {
            pos
        };
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Fraction of the clip elapsed, in [0, 1). Drives the progress bar.
    pub fn progress(&self) -> f64 {
        self.position.as_secs_f64() / self.duration.as_secs_f64()
    }
}

// ============================================================================
// Deck — single-active enforcement
// ============================================================================

/// Owns every clip in the current sequence and guarantees at most one is
/// playing. The controller tells the deck which index became active; the
/// deck handles the pause/rewind of the outgoing clip and the play of the
/// incoming one.
pub struct PlaybackDeck {
    clips: Vec<ClipPlayback>,
    active: Option<usize>,
}

impl PlaybackDeck {
    pub fn new(clips: Vec<ClipPlayback>) -> Self {
        Self {
            clips,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn clip(&self, idx: usize) -> Option<&ClipPlayback> {
        self.clips.get(idx)
    }

    pub fn clip_mut(&mut self, idx: usize) -> Option<&mut ClipPlayback> {
        self.clips.get_mut(idx)
    }

    pub fn active_clip(&self) -> Option<&ClipPlayback> {
        self.active.and_then(|i| self.clips.get(i))
    }

    pub fn active_clip_mut(&mut self) -> Option<&mut ClipPlayback> {
        self.active.and_then(|i| self.clips.get_mut(i))
    }

    /// Make `idx` the active clip.
    ///
    /// The previously active clip is paused and rewound to zero, so a later
    /// re-activation restarts from the top. The new clip resumes from its
    /// current position. A play failure is swallowed here — the clip stays
    /// paused but `idx` is still the active index.
    pub fn activate(&mut self, idx: usize) {
        if self.active == Some(idx) {
            return;
        }
        if let Some(prev) = self.active.take() {
            if let Some(clip) = self.clips.get_mut(prev) {
                clip.pause();
                clip.rewind();
            }
        }
        match self.clips.get_mut(idx) {
            Some(clip) => {
                if let Err(e) = clip.play() {
                    tracing::debug!(index = idx, error = %e, "Playback start failed, leaving clip paused");
                }
                self.active = Some(idx);
            }
            None => {
                tracing::warn!(index = idx, len = self.clips.len(), "Activate out of range");
            }
        }
    }

    /// Stop everything: pause and rewind the active clip and clear the
    /// active slot. Used on teardown and sequence replacement — playing
    /// media must never outlive its feed.
    pub fn deactivate_all(&mut self) {
        if let Some(idx) = self.active.take() {
            if let Some(clip) = self.clips.get_mut(idx) {
                clip.pause();
                clip.rewind();
            }
        }
    }

    /// Advance the active clip's position. Called from the event-loop tick.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(clip) = self.active_clip_mut() {
            clip.advance(dt);
        }
    }

    /// Number of clips currently playing. The deck's invariant is that this
    /// never exceeds 1.
    pub fn playing_count(&self) -> usize {
        self.clips.iter().filter(|c| c.is_playing()).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
