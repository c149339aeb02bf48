//! Feed navigation state machine.
//!
//! Owns the active listing index, arbitrates [`NavigationIntent`]s, and
//! latches the one-shot download prompt. The machine has exactly two phases
//! for the whole feed: `Idle` (accepting intents) and `Transitioning`
//! (dropping them). The cool-down that returns the machine to `Idle` is
//! driven externally — the controller hands out a generation number, the
//! caller schedules a timer, and stale completions are rejected by
//! generation check. This keeps the controller synchronous and fully
//! testable without a runtime.

use super::gesture::NavigationIntent;

/// Feed phase. Not per-item: one gate serializes all navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting intents.
    Idle,
    /// Inside the cool-down window after an accepted step; intents are
    /// dropped silently (first gesture of a burst wins).
    Transitioning,
}

/// An accepted navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Index that was active before the step.
    pub from: usize,
    /// Newly active index.
    pub to: usize,
}

/// What a single intent produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The accepted step, or `None` if the intent was dropped (out of
    /// bounds, empty feed, or cool-down).
    pub step: Option<Step>,
    /// True exactly once per session: the download prompt should be raised.
    pub prompt: bool,
}

/// Navigation/playback-arbitration state machine for the shorts feed.
pub struct FeedController {
    active: usize,
    count: usize,
    phase: Phase,
    /// Incremented on every accepted step and every sequence replacement.
    /// A cool-down completion carrying an older generation is stale and
    /// must not flip the phase — it belongs to a torn-down transition.
    generation: u64,
    prompt_after: usize,
    prompt_shown: bool,
}

impl FeedController {
    /// Create a controller for a sequence of `count` listings.
    ///
    /// `prompt_after` is the index at which the one-shot download prompt
    /// fires (evaluated on accepted steps).
    pub fn new(count: usize, prompt_after: usize) -> Self {
        Self {
            active: 0,
            count,
            phase: Phase::Idle,
            generation: 0,
            prompt_after,
            prompt_shown: false,
        }
    }

    /// The active index, or `None` when the feed is empty.
    pub fn active_index(&self) -> Option<usize> {
        (self.count > 0).then_some(self.active)
    }

    pub fn item_count(&self) -> usize {
        self.count
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase == Phase::Transitioning
    }

    pub fn has_shown_prompt(&self) -> bool {
        self.prompt_shown
    }

    /// Current cool-down generation. The caller passes this back via
    /// [`Self::cooldown_elapsed`] when its timer fires.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a navigation intent.
    ///
    /// Out-of-bounds candidates and intents arriving during the cool-down
    /// are silent no-ops — dropping, not queueing, is the contract. An
    /// accepted step enters `Transitioning`; the caller must schedule a
    /// timer that delivers `cooldown_elapsed(self.generation())`.
    pub fn apply(&mut self, intent: NavigationIntent) -> StepOutcome {
        if self.count == 0 {
            return StepOutcome::default();
        }
        if self.phase == Phase::Transitioning {
            tracing::trace!(?intent, "Intent dropped during cool-down");
            return StepOutcome::default();
        }

        let candidate = match intent {
            NavigationIntent::Next => self.active.checked_add(1),
            NavigationIntent::Prev => self.active.checked_sub(1),
            NavigationIntent::GoTo(idx) => Some(idx),
        };

        let candidate = match candidate {
            Some(idx) if idx < self.count && idx != self.active => idx,
            // Guard at both ends, no wraparound; GoTo to the current index
            // is also a no-op (no point burning a cool-down in place).
            _ => return StepOutcome::default(),
        };

        let step = Step {
            from: self.active,
            to: candidate,
        };
        self.active = candidate;
        self.phase = Phase::Transitioning;
        self.generation = self.generation.wrapping_add(1);

        let prompt = !self.prompt_shown && self.active >= self.prompt_after;
        if prompt {
            self.prompt_shown = true;
            tracing::debug!(index = self.active, "Download prompt latched");
        }

        tracing::trace!(from = step.from, to = step.to, "Navigation step accepted");
        StepOutcome {
            step: Some(step),
            prompt,
        }
    }

    /// Deliver a cool-down completion. Returns true if the machine returned
    /// to `Idle`; a stale generation (superseded transition or replaced
    /// sequence) is ignored.
    pub fn cooldown_elapsed(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::trace!(
                stale = generation,
                current = self.generation,
                "Ignoring stale cool-down"
            );
            return false;
        }
        if self.phase == Phase::Transitioning {
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// Replace the listing sequence (e.g. after a filter change).
    ///
    /// Resets to index 0 and `Idle`, and bumps the generation so any
    /// pending cool-down for the old sequence is invalidated. The prompt
    /// latch deliberately survives — the session is the feed's lifetime,
    /// not one filter result.
    pub fn replace_items(&mut self, count: usize) {
        self.active = 0;
        self.count = count;
        self.phase = Phase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
