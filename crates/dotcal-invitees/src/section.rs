#![forbid(unsafe_code)]

//! The Connections / Team section switch and its remembered value.

use dotcal_core::preferences::{PreferenceError, PreferenceStore};

use crate::model::UserKind;

/// Preference key holding the last selected section.
pub const SECTION_KEY: &str = "currentSection";

/// Active roster section, persisted through a [`PreferenceStore`].
///
/// The Team section only exists for users that belong to a team; a stored
/// `team` value is ignored otherwise.
#[derive(Debug)]
pub struct SectionSelector<P> {
    store: P,
    current: UserKind,
    team_available: bool,
}

impl<P: PreferenceStore> SectionSelector<P> {
    /// Load the remembered section and write the effective one back.
    ///
    /// Missing or unreadable values fall back to Connections.
    pub fn load(mut store: P, team_available: bool) -> Result<Self, PreferenceError> {
        let stored = store
            .load(SECTION_KEY)?
            .and_then(|value| value.parse::<UserKind>().ok());
        let current = match stored {
            Some(UserKind::Team) if team_available => UserKind::Team,
            _ => UserKind::Connection,
        };
        store.save(SECTION_KEY, current.as_str())?;
        tracing::debug!(message = "section.load", section = current.as_str(), team_available);
        Ok(Self {
            store,
            current,
            team_available,
        })
    }

    #[must_use]
    pub fn current(&self) -> UserKind {
        self.current
    }

    #[must_use]
    pub fn team_available(&self) -> bool {
        self.team_available
    }

    /// Sections shown as tabs.
    #[must_use]
    pub fn sections(&self) -> &'static [UserKind] {
        if self.team_available {
            &UserKind::ALL
        } else {
            &[UserKind::Connection]
        }
    }

    /// Switch section and persist it. Returns `false` when `kind` is not shown.
    pub fn select(&mut self, kind: UserKind) -> Result<bool, PreferenceError> {
        if !self.sections().contains(&kind) {
            return Ok(false);
        }
        self.store.save(SECTION_KEY, kind.as_str())?;
        self.current = kind;
        tracing::debug!(message = "section.select", section = kind.as_str());
        Ok(true)
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn into_store(self) -> P {
        self.store
    }
}
