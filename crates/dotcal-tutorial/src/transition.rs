#![forbid(unsafe_code)]

//! Overlay transitions: fade in/out of the whole overlay and the popover
//! moving from one step to the next.
//!
//! # Invariants
//!
//! - Progress is always in `[0.0, 1.0]`.
//! - Closing → Closed is reported by [`OverlayTransition::tick`] exactly once;
//!   that signal is what resets the tour.
//! - Zero-duration transitions complete on the next tick.

use dotcal_core::geometry::Coordinate;
use web_time::Duration;

use crate::config::TutorialConfig;

/// Easing curves used by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    Linear,
    /// Decelerating; used for step moves.
    #[default]
    EaseOut,
    /// Accelerating; used for the exit fade.
    EaseIn,
    EaseInOut,
    /// Slight overshoot then settle; used for the bounced entrance.
    Back,
}

impl Easing {
    /// Apply the curve to a progress value in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let t_minus_1 = t - 1.0;
                1.0 + c3 * t_minus_1 * t_minus_1 * t_minus_1 + c1 * t_minus_1 * t_minus_1
            }
        }
    }
}

/// Lifecycle of the overlay: Closed → Opening → Open → Closing → Closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl OverlayPhase {
    /// Whether the overlay should be rendered.
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Durations and curves for the overlay fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTimings {
    pub enter: Duration,
    pub exit: Duration,
    pub enter_easing: Easing,
    pub exit_easing: Easing,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self::from_config(&TutorialConfig::default())
    }
}

impl TransitionTimings {
    /// Timings taken from the tour configuration.
    pub fn from_config(config: &TutorialConfig) -> Self {
        Self {
            enter: config.enter_duration(),
            exit: config.exit_duration(),
            enter_easing: if config.reduced_motion {
                Easing::Linear
            } else {
                Easing::Back
            },
            exit_easing: Easing::EaseIn,
        }
    }
}

/// Fade state of the overlay.
#[derive(Debug, Clone, Default)]
pub struct OverlayTransition {
    phase: OverlayPhase,
    progress: f64,
}

impl OverlayTransition {
    /// A closed overlay.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Raw progress within the current phase.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Start fading in. Reverses an in-flight exit, keeping momentum.
    pub fn start_opening(&mut self) {
        match self.phase {
            OverlayPhase::Closed => {
                self.phase = OverlayPhase::Opening;
                self.progress = 0.0;
            }
            OverlayPhase::Closing => {
                self.phase = OverlayPhase::Opening;
                self.progress = 1.0 - self.progress;
            }
            OverlayPhase::Opening | OverlayPhase::Open => {}
        }
    }

    /// Start fading out. Reverses an in-flight entrance, keeping momentum.
    pub fn start_closing(&mut self) {
        match self.phase {
            OverlayPhase::Open => {
                self.phase = OverlayPhase::Closing;
                self.progress = 0.0;
            }
            OverlayPhase::Opening => {
                self.phase = OverlayPhase::Closing;
                self.progress = 1.0 - self.progress;
            }
            OverlayPhase::Closing | OverlayPhase::Closed => {}
        }
    }

    /// Jump straight to closed.
    pub fn force_close(&mut self) {
        self.phase = OverlayPhase::Closed;
        self.progress = 0.0;
    }

    /// Advance by `delta`.
    ///
    /// Returns `true` if the phase changed (Opening → Open or Closing → Closed).
    pub fn tick(&mut self, delta: Duration, timings: &TransitionTimings) -> bool {
        let duration = match self.phase {
            OverlayPhase::Opening => timings.enter,
            OverlayPhase::Closing => timings.exit,
            OverlayPhase::Open | OverlayPhase::Closed => return false,
        };

        let secs = duration.as_secs_f64();
        if secs > 0.0 {
            self.progress += delta.as_secs_f64() / secs;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        if self.progress >= 1.0 {
            if self.phase == OverlayPhase::Opening {
                self.phase = OverlayPhase::Open;
                self.progress = 1.0;
            } else {
                self.phase = OverlayPhase::Closed;
                self.progress = 0.0;
            }
            return true;
        }
        false
    }

    /// Current overlay opacity.
    pub fn opacity(&self, timings: &TransitionTimings) -> f64 {
        match self.phase {
            OverlayPhase::Closed => 0.0,
            OverlayPhase::Open => 1.0,
            OverlayPhase::Opening => timings.enter_easing.apply(self.progress).clamp(0.0, 1.0),
            OverlayPhase::Closing => 1.0 - timings.exit_easing.apply(self.progress),
        }
    }
}

/// The popover sliding from the previous step's origin to the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct StepMove {
    pub from: Coordinate,
    pub to: Coordinate,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl StepMove {
    /// Start a move.
    pub fn new(from: Coordinate, to: Coordinate, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::EaseOut,
        }
    }

    /// A move that is already at its destination.
    pub fn settled(at: Coordinate) -> Self {
        Self::new(at, at, Duration::ZERO)
    }

    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `delta`; returns `true` when the move finishes on this tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed = (self.elapsed + delta).min(self.duration);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        }
    }

    /// Current popover origin.
    pub fn current(&self) -> Coordinate {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseIn,
            Easing::EaseInOut,
            Easing::Back,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-9, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn open_then_close_cycle() {
        let timings = TransitionTimings::default();
        let mut t = OverlayTransition::new();
        assert!(!t.phase().is_visible());

        t.start_opening();
        assert_eq!(t.phase(), OverlayPhase::Opening);
        assert!(!t.tick(ms(100), &timings));
        assert!(t.tick(ms(150), &timings));
        assert_eq!(t.phase(), OverlayPhase::Open);
        assert_eq!(t.opacity(&timings), 1.0);

        t.start_closing();
        assert!(!t.tick(ms(150), &timings));
        assert!(t.phase().is_animating());
        assert!(t.tick(ms(200), &timings));
        assert_eq!(t.phase(), OverlayPhase::Closed);
        assert!(!t.tick(ms(150), &timings));
    }

    #[test]
    fn closing_during_entrance_reverses() {
        let timings = TransitionTimings::default();
        let mut t = OverlayTransition::new();
        t.start_opening();
        t.tick(ms(50), &timings);
        assert!((t.progress() - 0.25).abs() < 1e-9);
        t.start_closing();
        assert_eq!(t.phase(), OverlayPhase::Closing);
        assert!((t.progress() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn zero_exit_completes_next_tick() {
        let timings = TransitionTimings {
            exit: Duration::ZERO,
            ..TransitionTimings::default()
        };
        let mut t = OverlayTransition::new();
        t.start_opening();
        t.tick(ms(500), &timings);
        t.start_closing();
        assert!(t.tick(Duration::ZERO, &timings));
        assert_eq!(t.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn step_move_interpolates() {
        let mut mv = StepMove::new(Coordinate::ZERO, Coordinate::new(100.0, 50.0), ms(150))
            .easing(Easing::Linear);
        assert_eq!(mv.current(), Coordinate::ZERO);
        assert!(!mv.tick(ms(75)));
        let mid = mv.current();
        assert!((mid.x - 50.0).abs() < 1e-9);
        assert!((mid.y - 25.0).abs() < 1e-9);
        assert!(mv.tick(ms(100)));
        assert_eq!(mv.current(), Coordinate::new(100.0, 50.0));
        assert!(!mv.tick(ms(10)));
    }

    #[test]
    fn settled_move_is_finished() {
        let mv = StepMove::settled(Coordinate::new(3.0, 4.0));
        assert!(mv.is_finished());
        assert_eq!(mv.progress(), 1.0);
        assert_eq!(mv.current(), Coordinate::new(3.0, 4.0));
    }

    #[test]
    fn reduced_motion_uses_linear_entrance() {
        let config = TutorialConfig {
            reduced_motion: true,
            ..TutorialConfig::default()
        };
        let timings = TransitionTimings::from_config(&config);
        assert_eq!(timings.enter_easing, Easing::Linear);
        assert_eq!(TransitionTimings::default().enter_easing, Easing::Back);
    }
}
