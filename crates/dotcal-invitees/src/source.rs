#![forbid(unsafe_code)]

//! Booking-mode specific behavior of the roster.
//!
//! The roster is embedded in three places: the quick scheduler, the
//! create-booking-page form, and the edit-booking-page form. Each differs in
//! when invitations reach the backend and who may change them. The mode is
//! resolved to an [`InviteeSource`] once, when the roster is built.

use serde::{Deserialize, Serialize};

use crate::model::UserKind;

/// Where the roster is embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingMode {
    Create,
    QuickCreate,
    Edit,
}

impl BookingMode {
    /// Behavior for this mode.
    #[must_use]
    pub fn source(self) -> Box<dyn InviteeSource> {
        match self {
            Self::Create => Box::new(CreateBookingPage),
            Self::QuickCreate => Box::new(QuickScheduler),
            Self::Edit => Box::new(EditBookingPage),
        }
    }
}

/// When invitations and deletions reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitePolicy {
    /// Call the service as soon as the user acts.
    Immediate,
    /// Keep the change locally until the booking page is saved.
    Deferred,
}

pub trait InviteeSource: std::fmt::Debug {
    fn mode(&self) -> BookingMode;

    fn policy(&self) -> InvitePolicy;

    /// Label recorded with each sent invitation.
    fn invite_method(&self) -> &'static str;

    /// Whether `user_id` may change invitees of a page owned by `page_owner`.
    fn can_edit(&self, _page_owner: Option<&str>, _user_id: &str) -> bool {
        true
    }

    /// Event that applies deferred changes, as used in notices.
    fn deferred_until(&self) -> &'static str {
        "saving the booking page"
    }

    /// Notice shown when an invitee is added under [`InvitePolicy::Deferred`].
    fn added_notice(&self, kind: UserKind) -> String {
        format!(
            "{} added locally and will be created after {}",
            kind.title_noun(),
            self.deferred_until()
        )
    }

    /// Notice shown when an invitee is removed under [`InvitePolicy::Deferred`].
    fn removed_notice(&self, kind: UserKind, linked: bool) -> String {
        if linked {
            format!(
                "The {} will be deleted after {}",
                kind.noun(),
                self.deferred_until()
            )
        } else {
            format!("Local {} deleted", kind.noun())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuickScheduler;

impl InviteeSource for QuickScheduler {
    fn mode(&self) -> BookingMode {
        BookingMode::QuickCreate
    }

    fn policy(&self) -> InvitePolicy {
        InvitePolicy::Immediate
    }

    fn invite_method(&self) -> &'static str {
        "scheduler_connected_user_form"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateBookingPage;

impl InviteeSource for CreateBookingPage {
    fn mode(&self) -> BookingMode {
        BookingMode::Create
    }

    fn policy(&self) -> InvitePolicy {
        InvitePolicy::Deferred
    }

    fn invite_method(&self) -> &'static str {
        "create_booking_page_connected_user_form"
    }

    fn deferred_until(&self) -> &'static str {
        "the creation of the booking page"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EditBookingPage;

impl InviteeSource for EditBookingPage {
    fn mode(&self) -> BookingMode {
        BookingMode::Edit
    }

    fn policy(&self) -> InvitePolicy {
        InvitePolicy::Deferred
    }

    fn invite_method(&self) -> &'static str {
        "edit_booking_page_connected_user_form"
    }

    /// Only the page owner edits an existing page.
    fn can_edit(&self, page_owner: Option<&str>, user_id: &str) -> bool {
        page_owner == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_source() {
        for mode in [BookingMode::Create, BookingMode::QuickCreate, BookingMode::Edit] {
            assert_eq!(mode.source().mode(), mode);
        }
        assert_eq!(BookingMode::QuickCreate.source().policy(), InvitePolicy::Immediate);
        assert_eq!(BookingMode::Create.source().policy(), InvitePolicy::Deferred);
        assert_eq!(BookingMode::Edit.source().policy(), InvitePolicy::Deferred);
    }

    #[test]
    fn edit_requires_ownership() {
        let edit = BookingMode::Edit.source();
        assert!(edit.can_edit(Some("u1"), "u1"));
        assert!(!edit.can_edit(Some("u2"), "u1"));
        assert!(!edit.can_edit(None, "u1"));
        assert!(BookingMode::Create.source().can_edit(None, "u1"));
    }

    #[test]
    fn notice_wording() {
        let create = BookingMode::Create.source();
        assert_eq!(
            create.added_notice(UserKind::Connection),
            "Connection added locally and will be created after the creation of the booking page"
        );
        let edit = BookingMode::Edit.source();
        assert_eq!(
            edit.added_notice(UserKind::Team),
            "Team member added locally and will be created after saving the booking page"
        );
        assert_eq!(
            edit.removed_notice(UserKind::Team, true),
            "The team member will be deleted after saving the booking page"
        );
        assert_eq!(
            create.removed_notice(UserKind::Connection, false),
            "Local connection deleted"
        );
    }

    #[test]
    fn invite_methods() {
        assert_eq!(
            BookingMode::QuickCreate.source().invite_method(),
            "scheduler_connected_user_form"
        );
        assert_eq!(
            BookingMode::Edit.source().invite_method(),
            "edit_booking_page_connected_user_form"
        );
    }
}
