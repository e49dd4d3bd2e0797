//! Input adapter: continuous pointer state in, discrete tick input out.
//!
//! The host feeds raw pointer/touch coordinates and a boolean "held" signal
//! as events arrive; [`InputAdapter::sample`] is called once at the start of
//! each tick and turns the held signal into a one-shot trigger edge
//! (not-held -> held transitions only).

use crate::sim::TickInput;

/// Accumulates pointer state between ticks
#[derive(Debug, Clone)]
pub struct InputAdapter {
    width: f32,
    target_x: Option<f32>,
    held: bool,
    held_last_sample: bool,
}

impl InputAdapter {
    /// Create an adapter for a playfield of the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            target_x: None,
            held: false,
            held_last_sample: false,
        }
    }

    /// Record the pointer's surface-local x coordinate (clamped on sample)
    pub fn set_pointer_x(&mut self, x: f32) {
        self.target_x = Some(x);
    }

    /// Record whether the trigger (button/finger) is currently down
    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    /// Produce the input for the next tick.
    ///
    /// The trigger fires only on the first sample after the held signal goes
    /// down; holding continuously yields a single edge.
    pub fn sample(&mut self) -> TickInput {
        let trigger = self.held && !self.held_last_sample;
        self.held_last_sample = self.held;
        TickInput {
            target_x: self.target_x.map(|x| x.clamp(0.0, self.width)),
            trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_fires_on_edge_only() {
        let mut adapter = InputAdapter::new(480.0);
        assert!(!adapter.sample().trigger);

        adapter.set_held(true);
        assert!(adapter.sample().trigger);
        // Still held: no second edge
        assert!(!adapter.sample().trigger);

        adapter.set_held(false);
        assert!(!adapter.sample().trigger);
        adapter.set_held(true);
        assert!(adapter.sample().trigger);
    }

    #[test]
    fn pointer_is_clamped_to_playfield() {
        let mut adapter = InputAdapter::new(480.0);
        adapter.set_pointer_x(-50.0);
        assert_eq!(adapter.sample().target_x, Some(0.0));
        adapter.set_pointer_x(9999.0);
        assert_eq!(adapter.sample().target_x, Some(480.0));
        adapter.set_pointer_x(240.0);
        assert_eq!(adapter.sample().target_x, Some(240.0));
    }

    #[test]
    fn no_pointer_means_no_target() {
        let mut adapter = InputAdapter::new(480.0);
        assert_eq!(adapter.sample().target_x, None);
    }
}
