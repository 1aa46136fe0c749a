#![forbid(unsafe_code)]

//! Invitee roster: the list of connections and team members, the subset
//! chosen as organizers of a booking page, and the invite/delete flows.
//!
//! # Flow
//!
//! ```text
//! search field ──invite──▶ available ──add_existing──▶ organizers (tags)
//!                              │
//!                           delete ──Immediate──▶ service.destroy
//!                              └────Deferred───▶ pending deletes (linked only)
//! ```
//!
//! Every backend call goes through [`InvitationService`]; every toast through
//! [`Notifier`]. Whether calls happen at once or on save is decided by the
//! [`InviteeSource`] chosen from the [`BookingMode`].

use std::cmp::Ordering;

use regex::RegexBuilder;

use crate::model::{ConnectedUser, ListItemState, Tag, UserKind, is_valid_email};
use crate::service::{InvitationService, InviteError, Notice, Notifier};
use crate::source::{BookingMode, InvitePolicy, InviteeSource};

/// Accepted users first, then by display name ignoring case.
fn by_acceptance_then_name(a: &ConnectedUser, b: &ConnectedUser) -> Ordering {
    b.has_accepted.cmp(&a.has_accepted).then_with(|| {
        a.display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase())
    })
}

#[derive(Debug)]
pub struct Roster<S, N> {
    source: Box<dyn InviteeSource>,
    user_id: String,
    page_owner: Option<String>,
    available: Vec<ConnectedUser>,
    organizers: Vec<ConnectedUser>,
    pending_deletes: Vec<ConnectedUser>,
    service: S,
    notifier: N,
}

impl<S: InvitationService, N: Notifier> Roster<S, N> {
    /// Roster for `user_id` embedded in a `mode` form.
    pub fn new(mode: BookingMode, user_id: impl Into<String>, service: S, notifier: N) -> Self {
        Self {
            source: mode.source(),
            user_id: user_id.into(),
            page_owner: None,
            available: Vec::new(),
            organizers: Vec::new(),
            pending_deletes: Vec::new(),
            service,
            notifier,
        }
    }

    /// Owner of the booking page being edited.
    #[must_use]
    pub fn page_owner(mut self, owner: impl Into<String>) -> Self {
        self.page_owner = Some(owner.into());
        self
    }

    /// Users loaded from the backend.
    #[must_use]
    pub fn users(mut self, users: impl IntoIterator<Item = ConnectedUser>) -> Self {
        self.available = users.into_iter().collect();
        self
    }

    /// Organizers already attached to the page.
    #[must_use]
    pub fn organizers(mut self, organizers: impl IntoIterator<Item = ConnectedUser>) -> Self {
        self.organizers = organizers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn source(&self) -> &dyn InviteeSource {
        self.source.as_ref()
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        self.source
            .can_edit(self.page_owner.as_deref(), &self.user_id)
    }

    #[must_use]
    pub fn available(&self) -> &[ConnectedUser] {
        &self.available
    }

    #[must_use]
    pub fn organizer_list(&self) -> &[ConnectedUser] {
        &self.organizers
    }

    /// Linked users removed while changes are deferred.
    #[must_use]
    pub fn pending_deletes(&self) -> &[ConnectedUser] {
        &self.pending_deletes
    }

    /// Hand the queued deletions to the save of the booking page.
    pub fn take_pending_deletes(&mut self) -> Vec<ConnectedUser> {
        std::mem::take(&mut self.pending_deletes)
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    #[must_use]
    pub fn is_organizer(&self, email: &str) -> bool {
        self.organizers.iter().any(|o| o.email == email)
    }

    /// Listing order: suggestions after everyone else, the user excluded.
    #[must_use]
    pub fn visible(&self) -> Vec<&ConnectedUser> {
        let mut users: Vec<&ConnectedUser> = self
            .available
            .iter()
            .filter(|u| u.id.as_deref() != Some(self.user_id.as_str()))
            .collect();
        users.sort_by_key(|u| u.is_suggestion);
        users
    }

    /// Users whose name, username or email contains `query`, ignoring case.
    ///
    /// The query is matched literally. An empty query returns [`Self::visible`].
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&ConnectedUser> {
        if query.is_empty() {
            return self.visible();
        }
        let Ok(pattern) = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        else {
            tracing::warn!(message = "roster.filter.rejected", len = query.len());
            return Vec::new();
        };
        let mut matches: Vec<&ConnectedUser> = self
            .visible()
            .into_iter()
            .filter(|u| {
                [u.name.as_deref(), u.username.as_deref(), Some(u.email.as_str())]
                    .into_iter()
                    .flatten()
                    .any(|field| pattern.is_match(field))
            })
            .collect();
        matches.sort_by(|a, b| by_acceptance_then_name(a, b));
        matches
    }

    /// Users listed under the `kind` tab.
    #[must_use]
    pub fn section(&self, kind: UserKind) -> Vec<&ConnectedUser> {
        self.visible()
            .into_iter()
            .filter(|u| u.kind == kind)
            .collect()
    }

    /// Badge count on the `kind` tab.
    #[must_use]
    pub fn section_count(&self, kind: UserKind) -> usize {
        self.available.iter().filter(|u| u.kind == kind).count()
    }

    /// Rows of the `kind` tab with their display state.
    #[must_use]
    pub fn rows(&self, kind: UserKind, overlapping: &[String]) -> Vec<(&ConnectedUser, ListItemState)> {
        self.section(kind)
            .into_iter()
            .map(|u| (u, u.list_item(self.is_organizer(&u.email), overlapping)))
            .collect()
    }

    /// Tags for the organizer field.
    #[must_use]
    pub fn tags(&self, overlapping: &[String]) -> Vec<Tag> {
        self.organizers
            .iter()
            .map(|o| Tag::for_user(o, overlapping))
            .collect()
    }

    fn ensure_editable(&self) -> Result<(), InviteError> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(InviteError::NotPermitted)
        }
    }

    /// Invite `email` into the `kind` section and make them an organizer.
    pub fn invite(&mut self, email: &str, kind: UserKind) -> Result<(), InviteError> {
        self.ensure_editable()?;
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(InviteError::InvalidEmail(email.to_owned()));
        }
        if self.available.iter().any(|u| u.is_same(email, kind)) {
            return Err(InviteError::Duplicate {
                email: email.to_owned(),
                kind,
            });
        }

        self.pending_deletes.retain(|u| !u.is_same(email, kind));
        let user = ConnectedUser::local(email, kind);
        if !self.is_organizer(email) {
            self.organizers.insert(0, user.clone());
        }
        self.available.insert(0, user);

        let policy = self.source.policy();
        tracing::debug!(
            message = "roster.invite",
            kind = kind.as_str(),
            immediate = policy == InvitePolicy::Immediate
        );
        match policy {
            InvitePolicy::Immediate => self.send_invitation(email, kind),
            InvitePolicy::Deferred => {
                let text = self.source.added_notice(kind);
                self.notifier.notify(Notice::success(text));
                Ok(())
            }
        }
    }

    /// List a calendar-derived suggestion. Returns `false` if already listed.
    pub fn suggest(&mut self, email: &str) -> bool {
        if self
            .available
            .iter()
            .any(|u| u.is_same(email, UserKind::Connection))
        {
            return false;
        }
        self.available.insert(0, ConnectedUser::suggestion(email));
        true
    }

    fn send_invitation(&mut self, email: &str, kind: UserKind) -> Result<(), InviteError> {
        match self.service.create(email, kind) {
            Ok(created) => {
                for user in self
                    .available
                    .iter_mut()
                    .chain(self.organizers.iter_mut())
                    .filter(|u| u.is_same(email, kind))
                {
                    user.id = Some(created.id.clone());
                    user.name.clone_from(&created.name);
                    user.username.clone_from(&created.username);
                    user.is_invited = true;
                }
                tracing::debug!(
                    message = "roster.invitation_sent",
                    kind = kind.as_str(),
                    invite_method = self.source.invite_method()
                );
                self.notifier.notify(Notice::success(created.message));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(message = "roster.invitation_failed", kind = kind.as_str(), error = %err);
                self.notifier.notify(Notice::error(err.message.clone()));
                Err(err.into())
            }
        }
    }

    /// Add a listed user as organizer.
    ///
    /// In the quick scheduler an unlisted address becomes a local organizer.
    /// Returns `false` when nothing was added and the tag should be dropped.
    pub fn add_existing(&mut self, email: &str, kind: UserKind) -> Result<bool, InviteError> {
        self.ensure_editable()?;
        let listed = self
            .visible()
            .into_iter()
            .find(|u| u.email == email)
            .cloned();
        if let Some(user) = listed {
            if !self.is_organizer(email) {
                self.organizers.push(user);
            }
            return Ok(true);
        }
        if self.source.mode() == BookingMode::QuickCreate {
            self.organizers.push(ConnectedUser::local(email, kind));
            return Ok(true);
        }
        Ok(false)
    }

    /// Drop `email` from the organizers. Returns whether it was present.
    pub fn remove_organizer(&mut self, email: &str) -> Result<bool, InviteError> {
        self.ensure_editable()?;
        let before = self.organizers.len();
        self.organizers.retain(|o| o.email != email);
        Ok(self.organizers.len() != before)
    }

    /// Remove a user from the roster.
    pub fn delete(&mut self, email: &str, kind: UserKind) -> Result<(), InviteError> {
        self.ensure_editable()?;
        let Some(index) = self.available.iter().position(|u| u.is_same(email, kind)) else {
            return Err(InviteError::NotFound(email.to_owned()));
        };
        let user = self.available.remove(index);
        self.organizers.retain(|o| o.email != email);

        match self.source.policy() {
            InvitePolicy::Immediate => match self.service.destroy(email, kind) {
                Ok(message) => {
                    tracing::debug!(message = "roster.delete", kind = kind.as_str(), immediate = true);
                    self.notifier.notify(Notice::success(message));
                    Ok(())
                }
                Err(err) => {
                    tracing::warn!(message = "roster.delete_failed", kind = kind.as_str(), error = %err);
                    self.notifier.notify(Notice::error(err.message.clone()));
                    Err(err.into())
                }
            },
            InvitePolicy::Deferred => {
                let linked = user.connection_id.is_some();
                let text = self.source.removed_notice(kind, linked);
                if linked {
                    self.pending_deletes.push(user);
                }
                tracing::debug!(message = "roster.delete", kind = kind.as_str(), immediate = false, linked);
                self.notifier.notify(Notice::success(text));
                Ok(())
            }
        }
    }

    /// Send the invitation again. The resent mark is rolled back on failure.
    pub fn resend(&mut self, email: &str, kind: UserKind) -> Result<(), InviteError> {
        let Some(index) = self.available.iter().position(|u| u.is_same(email, kind)) else {
            return Err(InviteError::NotFound(email.to_owned()));
        };
        self.available[index].is_resent = true;
        match self.service.create(email, kind) {
            Ok(created) => {
                tracing::debug!(message = "roster.resend", kind = kind.as_str());
                self.notifier.notify(Notice::success(created.message));
                Ok(())
            }
            Err(err) => {
                if let Some(user) = self.available.iter_mut().find(|u| u.is_same(email, kind)) {
                    user.is_resent = false;
                }
                tracing::warn!(message = "roster.resend_failed", kind = kind.as_str(), error = %err);
                self.notifier.notify(Notice::error(err.message.clone()));
                Err(err.into())
            }
        }
    }
}
