#![forbid(unsafe_code)]

//! Invitee roster for Dotcal booking pages.
//!
//! # Role in Dotcal
//! Booking pages are hosted by several organizers: personal connections and
//! members of the user's team. `dotcal-invitees` keeps the list of those
//! people, the organizers picked from it, and the invitations sent to new
//! addresses.
//!
//! # Primary responsibilities
//! - **Model**: [`ConnectedUser`] records, tag titles, email validation.
//! - **Source**: per-[`BookingMode`] policy for when changes reach the backend.
//! - **Section**: the remembered Connections / Team tab.
//! - **Roster**: filtering, invite, delete and resend flows.
//!
//! # How it fits in the system
//! The backend and the toast bus stay outside; the host plugs them in through
//! [`InvitationService`] and [`Notifier`]. The section preference goes through
//! `dotcal_core`'s `PreferenceStore`.

pub mod model;
pub mod roster;
pub mod section;
pub mod service;
pub mod source;

pub use model::{
    ConnectedUser, ListItemState, TAG_TITLE_LIMIT, Tag, TagStatus, UserKind, is_valid_email,
    truncate_title,
};
pub use roster::Roster;
pub use section::{SECTION_KEY, SectionSelector};
pub use service::{
    CreatedInvite, InvitationService, InviteError, Notice, NoticeKind, NoticeQueue, Notifier,
    ServiceError,
};
pub use source::{BookingMode, InvitePolicy, InviteeSource};
