#![forbid(unsafe_code)]

//! Dotcal UI public facade crate.
//!
//! Re-exports the types hosts use day to day, the unified [`Error`], and the
//! [`OnboardingStore`] that ties the tour to the remembered roster section.
//!
//! ```
//! use dotcal::prelude::*;
//!
//! let mut store = OnboardingStore::new(MemoryPreferences::new(), false)?;
//! store.open_tutorial();
//! let page = PageSnapshot::new([None; 5], Viewport::new(1280.0, 800.0));
//! let frame = store.overlay(&page, Size::new(320.0, 140.0));
//! assert_eq!(frame.map(|f| f.counter), Some("1 of 5".to_owned()));
//! # Ok::<(), dotcal::Error>(())
//! ```

pub mod error;
pub mod store;

pub use error::{Error, Recovery, Result};
pub use store::{OnboardingStore, PageSnapshot, load_tutorial_config};

// --- Core re-exports -------------------------------------------------------

pub use dotcal_core::geometry::{Coordinate, DomRect, Size, Viewport};
pub use dotcal_core::preferences::{
    FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore,
};

// --- Tutorial re-exports ---------------------------------------------------

pub use dotcal_tutorial::{
    OverlayFrame, Placement, Side, Step, StepDefinition, Tour, TourEffect, TourMsg, TourPhase,
    TutorialConfig,
};

// --- Invitee re-exports ----------------------------------------------------

pub use dotcal_invitees::{
    BookingMode, ConnectedUser, InvitationService, InviteError, Notice, Notifier, Roster,
    UserKind,
};

/// Install the default `tracing` subscriber (see `dotcal_core::logging`).
#[cfg(feature = "logging")]
pub fn init_logging() -> bool {
    dotcal_core::logging::init()
}

pub mod prelude {
    pub use crate::{
        BookingMode, ConnectedUser, DomRect, Error, MemoryPreferences, OnboardingStore,
        PageSnapshot, Result, Roster, Size, TourEffect, TutorialConfig, UserKind, Viewport,
    };

    pub use crate::{core, invitees, tutorial};
}

pub use dotcal_core as core;
pub use dotcal_invitees as invitees;
pub use dotcal_tutorial as tutorial;
