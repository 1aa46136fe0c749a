#![forbid(unsafe_code)]

//! Dotcal error model.
//!
//! Each crate keeps its own typed error; [`Error`] wraps them so hosts can
//! propagate with `?` and still decide per variant how to keep the page
//! usable. [`Error::recovery`] names that decision.

use dotcal_core::PreferenceError;
use dotcal_invitees::InviteError;
use dotcal_tutorial::ConfigError;

/// Top-level error type for Dotcal UI hosts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Tour configuration could not be loaded or failed validation.
    #[error("tour configuration: {0}")]
    Config(#[from] ConfigError),

    /// Preference storage failed.
    #[error("preferences: {0}")]
    Preferences(#[from] PreferenceError),

    /// An invitee operation was rejected or the backend failed.
    #[error("invitees: {0}")]
    Invite(#[from] InviteError),
}

/// Standard result type for Dotcal APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What the host should do instead of failing the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Continue with built-in defaults.
    UseDefaults,
    /// Keep the value for this session only.
    KeepInMemory,
    /// Tell the user; the roster is unchanged or already rolled back.
    ShowNotice,
}

impl Error {
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Config(_) => Recovery::UseDefaults,
            Self::Preferences(_) => Recovery::KeepInMemory,
            Self::Invite(_) => Recovery::ShowNotice,
        }
    }

    /// Error type label for tracing.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Preferences(_) => "preferences",
            Self::Invite(_) => "invite",
        }
    }
}
