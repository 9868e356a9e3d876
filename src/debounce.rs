//! Debounced digital input for the doorbell button.
//!
//! A mechanical switch bounces: one physical press produces a burst of
//! edges. The filter here is the polling kind — after a falling edge,
//! the line is sampled every millisecond for 50 samples, and only a line
//! that stayed active for the whole window counts as a press.
//!
//! The window is always consumed in full, so a qualifying edge costs a
//! bounded ~50 ms of the servicing context, bounce or not. While that
//! window (or any downstream press handling) runs, new edges are not
//! serviced; at most one press is in flight at a time.
//!
//! # Example
//!
//! ```rust
//! use rs_doorbell::debounce::DebouncedInput;
//! use rs_doorbell::hal::{MockDelay, MockInputLine};
//!
//! let mut input = DebouncedInput::new(MockInputLine::held(true));
//! let mut delay = MockDelay::new();
//! assert!(input.confirm_press(&mut delay));
//! ```

use crate::traits::{Delay, InputLine};
use log::debug;

/// Number of level samples taken per debounce window.
pub const DEBOUNCE_SAMPLES: u32 = 50;

/// Interval between samples, in milliseconds.
pub const DEBOUNCE_SAMPLE_MS: u32 = 1;

/// A digital input validated by a fixed sampling window.
pub struct DebouncedInput<L: InputLine> {
    line: L,
}

impl<L: InputLine> DebouncedInput<L> {
    /// Wraps `line` in the debounce filter.
    pub fn new(line: L) -> Self {
        Self { line }
    }

    /// Borrow the underlying line.
    pub fn line(&self) -> &L {
        &self.line
    }

    /// Mutably borrow the underlying line (e.g. to wait for the next
    /// hardware edge on platform implementations).
    pub fn line_mut(&mut self) -> &mut L {
        &mut self.line
    }

    /// Validate the press that a falling edge announced.
    ///
    /// Samples the line [`DEBOUNCE_SAMPLES`] times at
    /// [`DEBOUNCE_SAMPLE_MS`] intervals. Returns `true` only if the line
    /// stayed active for the entire window; anything else is bounce or
    /// noise and is discarded. Blocks the calling context for the full
    /// window either way.
    pub fn confirm_press(&mut self, delay: &mut impl Delay) -> bool {
        let mut held = true;
        for _ in 0..DEBOUNCE_SAMPLES {
            if !self.line.is_active() {
                held = false;
            }
            delay.delay_ms(DEBOUNCE_SAMPLE_MS);
        }
        if !held {
            debug!("edge discarded as bounce");
        }
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{MockDelay, MockInputLine};

    #[test]
    fn steady_press_is_confirmed() {
        let mut input = DebouncedInput::new(MockInputLine::held(true));
        let mut delay = MockDelay::new();

        assert!(input.confirm_press(&mut delay));
        // One sleep per sample, 1 ms each
        assert_eq!(delay.count_of(DEBOUNCE_SAMPLE_MS), DEBOUNCE_SAMPLES as usize);
    }

    #[test]
    fn early_release_is_rejected() {
        let mut line = MockInputLine::new();
        // Active for 10 samples, then released for the rest of the window
        line.queue_levels(&[true; 10]);
        line.rest = false;

        let mut input = DebouncedInput::new(line);
        let mut delay = MockDelay::new();
        assert!(!input.confirm_press(&mut delay));
    }

    #[test]
    fn single_dropout_is_rejected() {
        let mut line = MockInputLine::new();
        line.queue_levels(&[true; 20]);
        line.queue_level(false);
        line.rest = true;

        let mut input = DebouncedInput::new(line);
        assert!(!input.confirm_press(&mut MockDelay::new()));
    }

    #[test]
    fn window_is_consumed_even_on_bounce() {
        let mut line = MockInputLine::new();
        line.queue_level(false);
        line.rest = false;

        let mut input = DebouncedInput::new(line);
        let mut delay = MockDelay::new();
        assert!(!input.confirm_press(&mut delay));
        // The full 50 ms window elapses regardless of the early verdict
        assert_eq!(delay.total_ms(), (DEBOUNCE_SAMPLES * DEBOUNCE_SAMPLE_MS) as u64);
    }

    #[test]
    fn consecutive_presses_each_confirmed() {
        let mut input = DebouncedInput::new(MockInputLine::held(true));
        let mut delay = MockDelay::new();
        assert!(input.confirm_press(&mut delay));
        assert!(input.confirm_press(&mut delay));
        assert_eq!(
            delay.count_of(DEBOUNCE_SAMPLE_MS),
            2 * DEBOUNCE_SAMPLES as usize
        );
    }
}
