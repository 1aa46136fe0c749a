#![forbid(unsafe_code)]

//! Seams to the invitation backend and the toast bus.

use web_time::Duration;

use crate::model::UserKind;

/// How long a toast stays on screen.
pub const NOTICE_DISMISS: Duration = Duration::from_millis(3000);

/// Errors surfaced by roster operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InviteError {
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("{email} is already listed as a {}", .kind.noun())]
    Duplicate { email: String, kind: UserKind },

    #[error("only the owner of the booking page can change its invitees")]
    NotPermitted,

    #[error("{0} is not in the roster")]
    NotFound(String),

    #[error("invitation service failed: {0}")]
    Service(#[from] ServiceError),
}

/// Failure reported by the invitation backend. The message is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

impl ServiceError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Record the backend returns after creating a connection or team invite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatedInvite {
    pub id: String,
    pub name: Option<String>,
    pub username: Option<String>,
    /// Confirmation shown to the user.
    pub message: String,
}

/// Backend calls behind the roster.
///
/// Destroy calls return the backend's confirmation message.
pub trait InvitationService {
    fn create_connection(&mut self, email: &str) -> Result<CreatedInvite, ServiceError>;

    fn destroy_connection(&mut self, email: &str) -> Result<String, ServiceError>;

    fn invite_team_member(&mut self, email: &str) -> Result<CreatedInvite, ServiceError>;

    fn destroy_team_member(&mut self, email: &str) -> Result<String, ServiceError>;

    /// Create or invite according to `kind`.
    fn create(&mut self, email: &str, kind: UserKind) -> Result<CreatedInvite, ServiceError> {
        match kind {
            UserKind::Connection => self.create_connection(email),
            UserKind::Team => self.invite_team_member(email),
        }
    }

    /// Destroy according to `kind`.
    fn destroy(&mut self, email: &str, kind: UserKind) -> Result<String, ServiceError> {
        match kind {
            UserKind::Connection => self.destroy_connection(email),
            UserKind::Team => self.destroy_team_member(email),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast for the host to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub dismiss_after: Duration,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            dismiss_after: NOTICE_DISMISS,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            dismiss_after: NOTICE_DISMISS,
        }
    }
}

/// Receives toasts raised by roster operations.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices so a host can drain them once per frame.
#[derive(Debug, Clone, Default)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
}

impl NoticeQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for NoticeQueue {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}
