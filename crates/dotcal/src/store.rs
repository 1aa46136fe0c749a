#![forbid(unsafe_code)]

//! Onboarding state for the scheduler page.
//!
//! [`OnboardingStore`] owns the tour and the remembered roster section and
//! exposes them as named operations. Hosts pass a [`PageSnapshot`] with fresh
//! measurements on every call; nothing measured is kept between calls.

use std::path::Path;

use dotcal_core::geometry::{DomRect, Size, Viewport};
use dotcal_core::preferences::PreferenceStore;
use dotcal_invitees::{SectionSelector, UserKind};
use dotcal_tutorial::{
    OverlayFrame, Step, StepDefinition, Tour, TourEffect, TourPhase, TutorialConfig,
    scheduler_tour,
};
use web_time::{Duration, Instant};

use crate::error::Result;

/// Measurements taken by the host for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    /// Target box per step, in step order. `None` for unmounted targets.
    pub targets: Vec<Option<DomRect>>,
    pub viewport: Viewport,
}

impl PageSnapshot {
    #[must_use]
    pub fn new(targets: impl IntoIterator<Item = Option<DomRect>>, viewport: Viewport) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            viewport,
        }
    }
}

/// Load a tour configuration by file extension, then apply environment
/// overrides. `.json` files are read as JSON, anything else as TOML.
pub fn load_tutorial_config(path: impl AsRef<Path>) -> Result<TutorialConfig> {
    let path = path.as_ref();
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => TutorialConfig::from_json_file(path)?,
        _ => TutorialConfig::from_toml_file(path)?,
    };
    tracing::debug!(message = "config.load", path = %path.display());
    Ok(config.with_env_overrides())
}

#[derive(Debug)]
pub struct OnboardingStore<P> {
    definitions: Vec<StepDefinition>,
    tour: Tour,
    sections: SectionSelector<P>,
}

impl<P: PreferenceStore> OnboardingStore<P> {
    /// Store with the default configuration and the scheduler walkthrough.
    pub fn new(preferences: P, team_available: bool) -> Result<Self> {
        Self::with_config(TutorialConfig::default(), preferences, team_available)
    }

    pub fn with_config(
        config: TutorialConfig,
        preferences: P,
        team_available: bool,
    ) -> Result<Self> {
        Self::with_steps(scheduler_tour(), config, preferences, team_available)
    }

    /// Store for a custom walkthrough.
    pub fn with_steps(
        definitions: Vec<StepDefinition>,
        config: TutorialConfig,
        preferences: P,
        team_available: bool,
    ) -> Result<Self> {
        let sections = SectionSelector::load(preferences, team_available)?;
        let tour = Tour::with_config(definitions.len(), config);
        Ok(Self {
            definitions,
            tour,
            sections,
        })
    }

    #[must_use]
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    #[must_use]
    pub fn definitions(&self) -> &[StepDefinition] {
        &self.definitions
    }

    /// Steps for this render.
    #[must_use]
    pub fn steps(&self, page: &PageSnapshot) -> Vec<Step> {
        Step::measure_all(&self.definitions, page.targets.iter().copied())
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.tour.current_step()
    }

    #[must_use]
    pub fn phase(&self) -> TourPhase {
        self.tour.phase()
    }

    pub fn open_tutorial(&mut self) -> Vec<TourEffect> {
        self.tour.open()
    }

    /// The CTA was clicked.
    pub fn advance_step(&mut self, page: &PageSnapshot) -> Vec<TourEffect> {
        let steps = self.steps(page);
        self.tour.advance_step(&steps, page.viewport)
    }

    pub fn close(&mut self) -> Vec<TourEffect> {
        self.tour.close()
    }

    /// The page scrolled.
    pub fn scrolled(&mut self, now: Instant) {
        self.tour.on_scroll(now);
    }

    /// Drive timers and animations. A scroll settle advances against `page`.
    pub fn tick(
        &mut self,
        now: Instant,
        delta: Duration,
        page: &PageSnapshot,
    ) -> Vec<TourEffect> {
        let steps = self.steps(page);
        self.tour.tick(now, delta, &steps, page.viewport)
    }

    /// Render model for the overlay, if it is visible.
    #[must_use]
    pub fn overlay(&self, page: &PageSnapshot, content: Size) -> Option<OverlayFrame> {
        self.tour.frame(&self.steps(page), content, page.viewport)
    }

    #[must_use]
    pub fn current_section(&self) -> UserKind {
        self.sections.current()
    }

    #[must_use]
    pub fn sections(&self) -> &'static [UserKind] {
        self.sections.sections()
    }

    /// Switch the roster tab. Returns `false` when the section is not shown.
    pub fn select_section(&mut self, kind: UserKind) -> Result<bool> {
        Ok(self.sections.select(kind)?)
    }

    #[must_use]
    pub fn preferences(&self) -> &P {
        self.sections.store()
    }
}

#[cfg(test)]
mod tests {
    use dotcal_core::preferences::MemoryPreferences;

    use super::*;

    fn page() -> PageSnapshot {
        PageSnapshot::new(
            [
                Some(DomRect::new(96.0, 24.0, 220.0, 48.0)),
                Some(DomRect::new(180.0, 24.0, 220.0, 40.0)),
                Some(DomRect::new(320.0, 520.0, 480.0, 320.0)),
                Some(DomRect::new(72.0, 1000.0, 200.0, 40.0)),
                Some(DomRect::new(240.0, 24.0, 220.0, 40.0)),
            ],
            Viewport::new(1280.0, 800.0),
        )
    }

    #[test]
    fn walkthrough_through_store() {
        let mut store = OnboardingStore::new(MemoryPreferences::new(), false).expect("store");
        assert!(store.overlay(&page(), Size::new(300.0, 120.0)).is_none());
        store.open_tutorial();
        store.advance_step(&page());
        assert_eq!(store.current_step(), 2);
        let frame = store
            .overlay(&page(), Size::new(300.0, 120.0))
            .expect("overlay");
        assert_eq!(frame.counter, "2 of 5");
        store.close();
        assert_eq!(store.phase(), TourPhase::Closing);
    }

    #[test]
    fn unmeasured_targets_do_not_panic() {
        let mut store = OnboardingStore::new(MemoryPreferences::new(), false).expect("store");
        let empty = PageSnapshot::new([], Viewport::new(1280.0, 800.0));
        store.open_tutorial();
        store.advance_step(&empty);
        let frame = store
            .overlay(&empty, Size::new(300.0, 120.0))
            .expect("overlay");
        assert_eq!(frame.to.x, 0.0);
        assert_eq!(frame.to.y, 0.0);
    }

    #[test]
    fn section_selection_is_persisted() {
        let mut store = OnboardingStore::new(MemoryPreferences::new(), true).expect("store");
        assert_eq!(store.current_section(), UserKind::Connection);
        assert!(store.select_section(UserKind::Team).expect("select"));
        assert_eq!(
            store.preferences().load("currentSection").expect("load"),
            Some("team".to_owned())
        );
    }
}
