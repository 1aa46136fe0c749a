#![forbid(unsafe_code)]

//! Onboarding tour controller.
//!
//! [`Tour`] owns the current step index and the overlay lifecycle. The host
//! forwards user intent (`open`, `advance_step`, `close`), scroll events and
//! frame ticks, and performs the [`TourEffect`]s that come back. Rendering
//! pulls an [`OverlayFrame`] from [`Tour::frame`] with fresh measurements.
//!
//! # State Machine
//!
//! ```text
//!   Closed --open--> Open(k) --advance, target on screen--> Open(k+1)
//!                     |   \--advance, target off screen--> AwaitingScroll(k -> k+1)
//!                     |                                        | settle or click,
//!                     |                                        | target on screen
//!                     |                                        v
//!                     |                                     Open(k+1)
//!                     \--close / advance at N--> Closing(k) --exit done--> Closed (k = 1)
//! ```
//!
//! # Invariants
//!
//! - The step index stays in `1..=N` and only increases while the overlay is
//!   visible. It returns to 1 when the exit transition completes, never before.
//! - A step is never entered while its target is measured off screen. Both
//!   triggers of an advance, the CTA and a scroll settle, go through the same
//!   check and request a scroll instead.
//! - While waiting for a requested scroll, a CTA click re-measures: it moves
//!   on if the target is now visible and repeats the scroll request otherwise.
//!   Moving on cancels the pending settle, so one wait yields one advance.
//! - Scroll events are ignored once the overlay is closing or closed, and a
//!   pending settle is cancelled on close.

use dotcal_core::geometry::{Coordinate, DomRect, Size, Viewport};
use web_time::{Duration, Instant};

use crate::arrow::ArrowGeometry;
use crate::config::TutorialConfig;
use crate::positioner::Positioner;
use crate::scroll_settle::ScrollSettle;
use crate::step::{Placement, Step, find_step};
use crate::transition::{OverlayPhase, OverlayTransition, StepMove, TransitionTimings};

/// Label of the call-to-action button on intermediate steps.
pub const CTA_NEXT: &str = "Next";
/// Label of the call-to-action button on the final step.
pub const CTA_FINISH: &str = "Finish";

/// Where the tour is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourPhase {
    #[default]
    Closed,
    Open,
    /// The next target was off screen; a scroll was requested and the tour
    /// advances to `next` once scrolling settles.
    AwaitingScroll { next: usize },
    /// Exit transition running; the index is kept until it completes.
    Closing,
}

impl TourPhase {
    /// Whether the overlay is mounted.
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether scroll events are being listened to.
    pub fn accepts_scroll(self) -> bool {
        matches!(self, Self::Open | Self::AwaitingScroll { .. })
    }
}

/// Side effects the host performs on behalf of the tour.
#[derive(Debug, Clone, PartialEq)]
pub enum TourEffect {
    /// Scroll the element for `step` into view (nearest block, smooth).
    ScrollIntoView { step: usize, target: DomRect },
    /// The user moved past the first step; the scheduler selects the
    /// founder group so the next step has something to show.
    LeftFirstStep,
    /// The exit transition finished and the overlay unmounted.
    Closed,
}

/// Messages accepted by [`Tour::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourMsg {
    Open,
    Advance,
    Scroll,
    Close,
    Tick(Duration),
    ExitComplete,
}

/// Everything needed to draw the overlay for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Current 1-based step.
    pub step: usize,
    pub total: usize,
    pub header: String,
    pub text: String,
    /// `"k of N"`.
    pub counter: String,
    /// [`CTA_NEXT`] or [`CTA_FINISH`].
    pub cta: &'static str,
    /// Origin of the previous step, where the move starts.
    pub from: Coordinate,
    /// Origin of the current step, where the move ends.
    pub to: Coordinate,
    /// Animated origin for this frame.
    pub origin: Coordinate,
    pub placement: Placement,
    /// Popover size including the arrow margin.
    pub box_size: Size,
    pub arrow: ArrowGeometry,
    pub opacity: f64,
    pub phase: OverlayPhase,
}

/// The tour controller.
#[derive(Debug, Clone)]
pub struct Tour {
    config: TutorialConfig,
    timings: TransitionTimings,
    total: usize,
    step: usize,
    phase: TourPhase,
    previous: Option<usize>,
    move_elapsed: Duration,
    left_first_step: bool,
    settle: ScrollSettle,
    transition: OverlayTransition,
}

impl Tour {
    /// Create a closed tour over `total` steps with the default configuration.
    pub fn new(total: usize) -> Self {
        Self::with_config(total, TutorialConfig::default())
    }

    /// Create a closed tour with an explicit configuration.
    pub fn with_config(total: usize, config: TutorialConfig) -> Self {
        Self {
            timings: TransitionTimings::from_config(&config),
            settle: ScrollSettle::new(config.settle_delay()),
            config,
            total,
            step: 1,
            phase: TourPhase::Closed,
            previous: None,
            move_elapsed: Duration::ZERO,
            left_first_step: false,
            transition: OverlayTransition::new(),
        }
    }

    pub fn config(&self) -> &TutorialConfig {
        &self.config
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    /// Current 1-based step index.
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_open(&self) -> bool {
        self.phase.is_visible()
    }

    /// Whether a scroll burst is waiting to settle.
    pub fn settle_pending(&self) -> bool {
        self.settle.is_pending()
    }

    /// Phase of the overlay fade.
    pub fn overlay_phase(&self) -> OverlayPhase {
        self.transition.phase()
    }

    /// Show the overlay at step 1.
    ///
    /// Opening while the exit transition runs cancels the exit and keeps the
    /// current step. Opening an empty tour does nothing.
    pub fn open(&mut self) -> Vec<TourEffect> {
        match self.phase {
            TourPhase::Closed if self.total > 0 => {
                self.step = 1;
                self.previous = None;
                self.move_elapsed = Duration::ZERO;
                self.left_first_step = false;
                self.settle.cancel();
                self.phase = TourPhase::Open;
                self.transition.start_opening();
                tracing::debug!(message = "tour.open", total = self.total);
            }
            TourPhase::Closing => {
                self.phase = TourPhase::Open;
                self.transition.start_opening();
                tracing::debug!(message = "tour.reopen", step = self.step);
            }
            _ => {}
        }
        Vec::new()
    }

    /// Handle the call-to-action.
    ///
    /// At the final step this closes the tour. If the next step's target is
    /// off screen a scroll is requested and the step changes once it settles;
    /// otherwise the step changes immediately. While a requested scroll is
    /// outstanding the click re-checks `steps` and either moves on or asks
    /// for the scroll again.
    pub fn advance_step(&mut self, steps: &[Step], viewport: Viewport) -> Vec<TourEffect> {
        let mut effects = Vec::new();
        match self.phase {
            TourPhase::Open if self.step >= self.total => return self.close(),
            TourPhase::Open => self.step_to(self.step + 1, steps, viewport, &mut effects),
            TourPhase::AwaitingScroll { next } => {
                tracing::debug!(message = "tour.advance.recheck", step = next);
                self.step_to(next, steps, viewport, &mut effects);
            }
            TourPhase::Closed | TourPhase::Closing => {
                tracing::trace!(message = "tour.advance.ignored", phase = ?self.phase);
            }
        }
        effects
    }

    /// Record a scroll event on the sidebar.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.phase.accepts_scroll() {
            self.settle.on_scroll(now);
        }
    }

    /// Drive timers and transitions.
    ///
    /// `now` is checked against the scroll-settle deadline; `delta` advances
    /// the fade and the step move. A settle advances against `steps` measured
    /// for this frame.
    pub fn tick(
        &mut self,
        now: Instant,
        delta: Duration,
        steps: &[Step],
        viewport: Viewport,
    ) -> Vec<TourEffect> {
        let mut effects = Vec::new();

        if self.settle.poll(now) {
            tracing::debug!(message = "tour.settle", step = self.step);
            match self.phase {
                TourPhase::AwaitingScroll { next } => {
                    self.step_to(next, steps, viewport, &mut effects);
                }
                TourPhase::Open if self.step < self.total => {
                    self.step_to(self.step + 1, steps, viewport, &mut effects);
                }
                _ => {}
            }
        }

        self.move_elapsed = self.move_elapsed.saturating_add(delta);

        let was_closing = self.transition.phase() == OverlayPhase::Closing;
        if self.transition.tick(delta, &self.timings)
            && was_closing
            && self.phase == TourPhase::Closing
        {
            effects.extend(self.exit_complete());
        }

        effects
    }

    /// Start the exit transition. The step index is kept.
    pub fn close(&mut self) -> Vec<TourEffect> {
        if matches!(self.phase, TourPhase::Open | TourPhase::AwaitingScroll { .. }) {
            self.settle.cancel();
            self.phase = TourPhase::Closing;
            self.transition.start_closing();
            tracing::debug!(message = "tour.close", step = self.step);
        }
        Vec::new()
    }

    /// Finish closing: unmount the overlay and reset to step 1.
    pub fn exit_complete(&mut self) -> Vec<TourEffect> {
        if self.phase != TourPhase::Closing {
            return Vec::new();
        }
        self.phase = TourPhase::Closed;
        self.transition.force_close();
        self.settle.cancel();
        self.step = 1;
        self.previous = None;
        self.move_elapsed = Duration::ZERO;
        tracing::debug!(message = "tour.reset");
        vec![TourEffect::Closed]
    }

    /// Single entry point for hosts built around a message loop.
    pub fn update(
        &mut self,
        msg: TourMsg,
        steps: &[Step],
        viewport: Viewport,
        now: Instant,
    ) -> Vec<TourEffect> {
        match msg {
            TourMsg::Open => self.open(),
            TourMsg::Advance => self.advance_step(steps, viewport),
            TourMsg::Scroll => {
                self.on_scroll(now);
                Vec::new()
            }
            TourMsg::Close => self.close(),
            TourMsg::Tick(delta) => self.tick(now, delta, steps, viewport),
            TourMsg::ExitComplete => self.exit_complete(),
        }
    }

    /// Build the render model from this render's measurements.
    ///
    /// Returns `None` while closed or if the current step is missing.
    pub fn frame(&self, steps: &[Step], content: Size, viewport: Viewport) -> Option<OverlayFrame> {
        if !self.phase.is_visible() {
            return None;
        }
        let current = find_step(steps, self.step)?;
        let positioner = Positioner::new(viewport).config(self.config.positioner());
        let resolved = positioner.position(current, content);

        let from = self
            .previous
            .and_then(|index| find_step(steps, index))
            .map_or(resolved.origin, |prev| positioner.position(prev, content).origin);
        let mut movement = StepMove::new(from, resolved.origin, self.config.move_duration());
        movement.tick(self.move_elapsed);

        let total = steps.len();
        Some(OverlayFrame {
            step: self.step,
            total,
            header: current.header.clone(),
            text: current.text.clone(),
            counter: format!("{} of {}", self.step, total),
            cta: if self.step >= total { CTA_FINISH } else { CTA_NEXT },
            from,
            to: resolved.origin,
            origin: movement.current(),
            placement: resolved.placement,
            box_size: positioner.config.box_size(content),
            arrow: ArrowGeometry::new(resolved.placement, &positioner.config),
            opacity: self.transition.opacity(&self.timings),
            phase: self.transition.phase(),
        })
    }

    /// Enter `next`, or request a scroll when its target is off screen.
    fn step_to(
        &mut self,
        next: usize,
        steps: &[Step],
        viewport: Viewport,
        effects: &mut Vec<TourEffect>,
    ) {
        if let Some(target) = hidden_target(steps, next, viewport) {
            self.phase = TourPhase::AwaitingScroll { next };
            tracing::debug!(message = "tour.scroll_into_view", step = next);
            effects.push(TourEffect::ScrollIntoView { step: next, target });
            self.note_left_first_step(effects);
        } else {
            self.phase = TourPhase::Open;
            self.settle.cancel();
            self.note_left_first_step(effects);
            self.move_to(next);
        }
    }

    fn move_to(&mut self, next: usize) {
        tracing::debug!(message = "tour.advance", from = self.step, to = next);
        self.previous = Some(self.step);
        self.step = next;
        self.move_elapsed = Duration::ZERO;
    }

    fn note_left_first_step(&mut self, effects: &mut Vec<TourEffect>) {
        if self.step == 1 && !self.left_first_step {
            self.left_first_step = true;
            effects.push(TourEffect::LeftFirstStep);
        }
    }
}

/// Target of step `index` when it is measured and off screen.
fn hidden_target(steps: &[Step], index: usize, viewport: Viewport) -> Option<DomRect> {
    find_step(steps, index)
        .and_then(|step| step.target)
        .filter(|target| viewport.is_out_of_view(target))
}
