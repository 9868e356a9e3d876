//! Visual feedback: named LED patterns on one or two output lines.
//!
//! The indicator is the only user-visible channel the doorbell has, so
//! every controller state maps to a pattern: steady on for idle, a slow
//! blink for a delivered press, a fast long blink for a failed publish,
//! and a short burst between broker connect retries.
//!
//! When two lines are configured they mirror each other on every write —
//! there is no independent control. Patterns block the calling context
//! for their full duration and cannot be cancelled; feedback is meant to
//! be seen, and the controller has no other work to interleave.

use crate::traits::{Delay, IndicatorLine};
use heapless::Vec;
use log::debug;

const SUCCESS_CYCLES: u32 = 20;
const SUCCESS_HALF_MS: u32 = 200;

const ERROR_CYCLES: u32 = 66;
const ERROR_OFF_MS: u32 = 100;
const ERROR_ON_MS: u32 = 50;

const RETRY_CYCLES: u32 = 3;
const RETRY_OFF_MS: u32 = 200;
const RETRY_ON_MS: u32 = 100;

/// A named feedback pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// Lines on. Immediate, idempotent, terminal.
    SteadyOn,
    /// Lines off. Immediate, idempotent, terminal.
    SteadyOff,
    /// A press was published: 20 off/on cycles at a 200 ms half-period
    /// (~8 s), settling steady-on.
    SuccessBlink,
    /// A publish failed: 66 cycles of 100 ms off / 50 ms on (~10 s).
    /// Used on unrecoverable paths; no settled end state is promised.
    ErrorBlink,
    /// A broker connect attempt failed: 3 cycles of 200 ms off /
    /// 100 ms on, played before each retry wait.
    ConnectRetry,
}

impl Pattern {
    /// Returns the pattern name as a lowercase string, for log lines.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Pattern::SteadyOn => "steady-on",
            Pattern::SteadyOff => "steady-off",
            Pattern::SuccessBlink => "success-blink",
            Pattern::ErrorBlink => "error-blink",
            Pattern::ConnectRetry => "connect-retry",
        }
    }
}

/// Drives one or two indicator lines in lockstep.
pub struct Indicator<L: IndicatorLine> {
    lines: Vec<L, 2>,
}

impl<L: IndicatorLine> Indicator<L> {
    /// Indicator with a single output line.
    pub fn single(line: L) -> Self {
        let mut lines = Vec::new();
        let _ = lines.push(line);
        Self { lines }
    }

    /// Indicator with two mirrored output lines.
    pub fn pair(first: L, second: L) -> Self {
        let mut lines = Vec::new();
        let _ = lines.push(first);
        let _ = lines.push(second);
        Self { lines }
    }

    /// Borrow the underlying lines (test inspection).
    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    /// Play `pattern`, blocking through `delay` until it completes.
    pub fn apply(&mut self, pattern: Pattern, delay: &mut impl Delay) {
        debug!("indicator pattern: {}", pattern.as_str());
        match pattern {
            Pattern::SteadyOn => self.all_on(),
            Pattern::SteadyOff => self.all_off(),
            Pattern::SuccessBlink => {
                self.cycle(delay, SUCCESS_CYCLES, SUCCESS_HALF_MS, SUCCESS_HALF_MS);
                self.all_on();
            }
            Pattern::ErrorBlink => self.cycle(delay, ERROR_CYCLES, ERROR_OFF_MS, ERROR_ON_MS),
            Pattern::ConnectRetry => self.cycle(delay, RETRY_CYCLES, RETRY_OFF_MS, RETRY_ON_MS),
        }
    }

    fn cycle(&mut self, delay: &mut impl Delay, cycles: u32, off_ms: u32, on_ms: u32) {
        for _ in 0..cycles {
            self.all_off();
            delay.delay_ms(off_ms);
            self.all_on();
            delay.delay_ms(on_ms);
        }
    }

    fn all_on(&mut self) {
        for line in &mut self.lines {
            line.set_high();
        }
    }

    fn all_off(&mut self) {
        for line in &mut self.lines {
            line.set_low();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{MockDelay, MockIndicatorLine};

    fn pair() -> Indicator<MockIndicatorLine> {
        Indicator::pair(MockIndicatorLine::new(), MockIndicatorLine::new())
    }

    #[test]
    fn steady_patterns_are_immediate() {
        let mut indicator = pair();
        let mut delay = MockDelay::new();

        indicator.apply(Pattern::SteadyOn, &mut delay);
        assert!(indicator.lines().iter().all(|l| l.level));
        indicator.apply(Pattern::SteadyOff, &mut delay);
        assert!(indicator.lines().iter().all(|l| !l.level));
        assert!(delay.slept.is_empty());
    }

    #[test]
    fn steady_on_is_idempotent() {
        let mut indicator = pair();
        let mut delay = MockDelay::new();
        indicator.apply(Pattern::SteadyOn, &mut delay);
        indicator.apply(Pattern::SteadyOn, &mut delay);
        assert!(indicator.lines().iter().all(|l| l.level));
    }

    #[test]
    fn success_blink_settles_on() {
        let mut indicator = pair();
        let mut delay = MockDelay::new();
        indicator.apply(Pattern::SuccessBlink, &mut delay);

        assert!(indicator.lines().iter().all(|l| l.level));
        // 20 cycles, two 200 ms half-periods each
        assert_eq!(delay.count_of(200), 40);
        assert_eq!(delay.total_ms(), 8_000);
        // off/on per cycle plus the final settling write
        assert_eq!(indicator.lines()[0].history.len(), 41);
    }

    #[test]
    fn error_blink_timing() {
        let mut indicator = pair();
        let mut delay = MockDelay::new();
        indicator.apply(Pattern::ErrorBlink, &mut delay);

        assert_eq!(delay.count_of(100), 66);
        assert_eq!(delay.count_of(50), 66);
        assert_eq!(delay.total_ms(), 66 * 150);
    }

    #[test]
    fn connect_retry_burst_timing() {
        let mut indicator = pair();
        let mut delay = MockDelay::new();
        indicator.apply(Pattern::ConnectRetry, &mut delay);

        assert_eq!(delay.count_of(200), 3);
        assert_eq!(delay.count_of(100), 3);
    }

    #[test]
    fn lines_mirror_through_every_pattern() {
        for pattern in [
            Pattern::SteadyOn,
            Pattern::SteadyOff,
            Pattern::SuccessBlink,
            Pattern::ErrorBlink,
            Pattern::ConnectRetry,
        ] {
            let mut indicator = pair();
            indicator.apply(pattern, &mut MockDelay::new());
            let lines = indicator.lines();
            assert_eq!(lines[0].history, lines[1].history, "{}", pattern.as_str());
            assert_eq!(lines[0].level, lines[1].level);
        }
    }

    #[test]
    fn single_line_indicator_works() {
        let mut indicator = Indicator::single(MockIndicatorLine::new());
        indicator.apply(Pattern::SuccessBlink, &mut MockDelay::new());
        assert_eq!(indicator.lines().len(), 1);
        assert!(indicator.lines()[0].level);
    }
}
