// SPDX-License-Identifier: MPL-2.0
//! Gesture state management
//!
//! Turns continuous horizontal pointer or touch motion into discrete frame
//! steps. Device agnostic: the caller picks the sensitivity.

use crate::domain::viewer::Sensitivity;

/// Tracks one drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureTracker {
    /// X coordinate steps are measured from; `None` outside a gesture.
    reference_x: Option<f32>,
}

impl GestureTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture at `start_x`.
    pub fn begin(&mut self, start_x: f32) {
        self.reference_x = Some(start_x);
    }

    /// Returns the signed number of frame steps produced by moving to
    /// `current_x`.
    ///
    /// A step fires once the pointer is at least `sensitivity` pixels away
    /// from the reference; the reference then moves to `current_x`, so slow
    /// drags made of many small moves still accumulate. Returns 0 outside a
    /// gesture or when the move is below the threshold.
    #[allow(clippy::cast_possible_truncation)]
    pub fn update(&mut self, current_x: f32, sensitivity: Sensitivity) -> i32 {
        let Some(reference_x) = self.reference_x else {
            return 0;
        };
        if !current_x.is_finite() {
            return 0;
        }

        let delta_x = current_x - reference_x;
        let threshold = sensitivity.px();
        if delta_x.abs() < threshold {
            return 0;
        }

        self.reference_x = Some(current_x);
        let steps = (delta_x.abs() / threshold).floor() as i32;
        if delta_x < 0.0 {
            -steps
        } else {
            steps
        }
    }

    /// Ends the gesture. Never produces a step.
    pub fn end(&mut self) {
        self.reference_x = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.reference_x.is_some()
    }

    #[must_use]
    pub fn reference_x(&self) -> Option<f32> {
        self.reference_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: f32) -> Sensitivity {
        Sensitivity::new(value)
    }

    #[test]
    fn default_tracker_is_idle() {
        let tracker = GestureTracker::default();
        assert!(!tracker.is_active());
        assert!(tracker.reference_x().is_none());
    }

    #[test]
    fn update_without_begin_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.update(500.0, px(4.0)), 0);
    }

    #[test]
    fn reference_resets_only_when_a_step_fires() {
        let mut tracker = GestureTracker::new();
        tracker.begin(0.0);

        // Moves of +10, +3, -2 relative to the previous pointer position
        let steps: Vec<i32> = [10.0, 13.0, 11.0]
            .into_iter()
            .map(|x| tracker.update(x, px(4.0)))
            .collect();

        assert_eq!(steps, vec![2, 0, 0]);
        assert_eq!(tracker.reference_x(), Some(10.0));
    }

    #[test]
    fn small_moves_accumulate_until_threshold() {
        let mut tracker = GestureTracker::new();
        tracker.begin(100.0);

        assert_eq!(tracker.update(101.0, px(4.0)), 0);
        assert_eq!(tracker.update(102.5, px(4.0)), 0);
        assert_eq!(tracker.update(104.0, px(4.0)), 1);
        assert_eq!(tracker.reference_x(), Some(104.0));
    }

    #[test]
    fn leftward_drag_steps_backwards() {
        let mut tracker = GestureTracker::new();
        tracker.begin(200.0);
        assert_eq!(tracker.update(187.0, px(4.0)), -3);
        assert_eq!(tracker.update(183.0, px(4.0)), -1);
    }

    #[test]
    fn sensitivity_is_per_call() {
        let mut tracker = GestureTracker::new();
        tracker.begin(0.0);
        assert_eq!(tracker.update(12.0, Sensitivity::touch()), 4);
        assert_eq!(tracker.update(24.0, Sensitivity::default()), 3);
    }

    #[test]
    fn end_clears_state_without_stepping() {
        let mut tracker = GestureTracker::new();
        tracker.begin(0.0);
        tracker.end();

        assert!(!tracker.is_active());
        assert_eq!(tracker.update(100.0, px(4.0)), 0);
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let mut tracker = GestureTracker::new();
        tracker.begin(0.0);
        assert_eq!(tracker.update(f32::NAN, px(4.0)), 0);
        assert_eq!(tracker.reference_x(), Some(0.0));
    }
}
