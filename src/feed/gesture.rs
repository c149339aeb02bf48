//! Gesture-to-intent translation.
//!
//! Three independent input sources feed the controller: mouse wheel deltas,
//! vertical drag gestures, and discrete key presses. This module owns the
//! first two — the accumulating translators that turn raw deltas into
//! discrete [`NavigationIntent`] values. Key presses map directly via the
//! keybinding registry and never accumulate.

/// A discrete navigation request produced by an input translator.
///
/// Intents are fire-and-forget: the controller decides whether an intent
/// results in a step (it may be dropped at feed edges or during cool-down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Advance to the next listing.
    Next,
    /// Return to the previous listing.
    Prev,
    /// Jump directly to the given index (position rail, first/last keys).
    GoTo(usize),
}

// ============================================================================
// Wheel Accumulator
// ============================================================================

/// Accumulates signed scroll deltas into discrete navigation intents.
///
/// Each wheel event is fully consumed by the feed — there is no underlying
/// scrollable surface. Deltas sum until the running total's magnitude
/// exceeds the threshold, at which point one intent is emitted and the
/// accumulator resets to zero. Opposite-direction deltas cancel.
#[derive(Debug)]
pub struct WheelAccumulator {
    accumulated: i32,
    threshold: i32,
}

impl WheelAccumulator {
    pub fn new(threshold: u16) -> Self {
        Self {
            accumulated: 0,
            threshold: i32::from(threshold.max(1)),
        }
    }

    /// Feed a signed delta (positive = toward next). Returns an intent when
    /// the accumulated magnitude crosses the threshold.
    pub fn push(&mut self, delta: i32) -> Option<NavigationIntent> {
        self.accumulated = self.accumulated.saturating_add(delta);

        if self.accumulated.abs() > self.threshold {
            let intent = if self.accumulated > 0 {
                NavigationIntent::Next
            } else {
                NavigationIntent::Prev
            };
            self.accumulated = 0;
            Some(intent)
        } else {
            None
        }
    }

    /// Discard any partial accumulation (e.g. when the sequence is replaced).
    pub fn reset(&mut self) {
        self.accumulated = 0;
    }
}

// ============================================================================
// Swipe Tracker
// ============================================================================

/// Tracks a press-drag-release gesture on the vertical axis.
///
/// The position at press is recorded; on release, `start − end` decides the
/// direction. A drag shorter than the threshold emits nothing. A release
/// without a matching press is ignored (e.g. the press landed on an overlay
/// that has since closed).
#[derive(Debug)]
pub struct SwipeTracker {
    start_row: Option<i32>,
    threshold: i32,
}

impl SwipeTracker {
    pub fn new(threshold: u16) -> Self {
        Self {
            start_row: None,
            threshold: i32::from(threshold.max(1)),
        }
    }

    /// Record the vertical position at gesture start.
    pub fn begin(&mut self, row: i32) {
        self.start_row = Some(row);
    }

    /// Complete the gesture. A positive diff (drag upward) means Next,
    /// matching the "pull the next card up" direction.
    pub fn end(&mut self, row: i32) -> Option<NavigationIntent> {
        let start = self.start_row.take()?;
        let diff = start - row;

        if diff.abs() > self.threshold {
            if diff > 0 {
                Some(NavigationIntent::Next)
            } else {
                Some(NavigationIntent::Prev)
            }
        } else {
            None
        }
    }

    /// Abandon an in-progress gesture without emitting.
    pub fn cancel(&mut self) {
        self.start_row = None;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_accumulates_across_events() {
        let mut wheel = WheelAccumulator::new(50);
        assert_eq!(wheel.push(30), None);
        assert_eq!(wheel.push(30), Some(NavigationIntent::Next)); // 60 > 50
    }

    #[test]
    fn test_wheel_resets_after_emit() {
        let mut wheel = WheelAccumulator::new(50);
        wheel.push(30);
        wheel.push(30);
        // Accumulator was reset; +10 alone stays below threshold
        assert_eq!(wheel.push(10), None);
    }

    #[test]
    fn test_wheel_negative_emits_prev() {
        let mut wheel = WheelAccumulator::new(50);
        assert_eq!(wheel.push(-60), Some(NavigationIntent::Prev));
    }

    #[test]
    fn test_wheel_opposite_deltas_cancel() {
        let mut wheel = WheelAccumulator::new(50);
        wheel.push(40);
        wheel.push(-40);
        assert_eq!(wheel.push(45), None); // Back to zero, 45 < 50
    }

    #[test]
    fn test_wheel_exact_threshold_does_not_emit() {
        let mut wheel = WheelAccumulator::new(50);
        assert_eq!(wheel.push(50), None); // Strictly greater than
        assert_eq!(wheel.push(1), Some(NavigationIntent::Next));
    }

    #[test]
    fn test_wheel_reset_discards_partial() {
        let mut wheel = WheelAccumulator::new(50);
        wheel.push(45);
        wheel.reset();
        assert_eq!(wheel.push(45), None);
    }

    #[test]
    fn test_swipe_upward_drag_is_next() {
        let mut swipe = SwipeTracker::new(50);
        swipe.begin(100);
        assert_eq!(swipe.end(20), Some(NavigationIntent::Next)); // 100-20=80
    }

    #[test]
    fn test_swipe_downward_drag_is_prev() {
        let mut swipe = SwipeTracker::new(50);
        swipe.begin(20);
        assert_eq!(swipe.end(100), Some(NavigationIntent::Prev));
    }

    #[test]
    fn test_swipe_short_drag_emits_nothing() {
        let mut swipe = SwipeTracker::new(50);
        swipe.begin(100);
        assert_eq!(swipe.end(60), None); // 40 < 50
    }

    #[test]
    fn test_swipe_release_without_press_ignored() {
        let mut swipe = SwipeTracker::new(50);
        assert_eq!(swipe.end(0), None);
    }

    #[test]
    fn test_swipe_cancel_discards_gesture() {
        let mut swipe = SwipeTracker::new(50);
        swipe.begin(100);
        swipe.cancel();
        assert_eq!(swipe.end(0), None);
    }
}
