#![forbid(unsafe_code)]

//! Invitee records and the derived state shown for them.
//!
//! A [`ConnectedUser`] is either a personal connection or a member of the
//! user's team. Records created from the search field start out local
//! (`id == None`) until the invitation service confirms them.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Longest display title shown on a tag before it is cut.
pub const TAG_TITLE_LIMIT: usize = 30;

/// Which roster section a user belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    #[default]
    Connection,
    Team,
}

impl UserKind {
    /// Both kinds, in section order.
    pub const ALL: [UserKind; 2] = [UserKind::Connection, UserKind::Team];

    /// Stable identifier, also the persisted section value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Team => "team",
        }
    }

    /// Section tab label.
    #[must_use]
    pub const fn section_label(self) -> &'static str {
        match self {
            Self::Connection => "Connections",
            Self::Team => "Team",
        }
    }

    /// Lower-case noun used inside sentences.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Connection => "connection",
            Self::Team => "team member",
        }
    }

    /// Noun used at the start of a sentence.
    #[must_use]
    pub const fn title_noun(self) -> &'static str {
        match self {
            Self::Connection => "Connection",
            Self::Team => "Team member",
        }
    }
}

impl fmt::Display for UserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`UserKind`] from a stored string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown user kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for UserKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connection" => Ok(Self::Connection),
            "team" => Ok(Self::Team),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// A connection or team member as listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedUser {
    /// Server id; `None` while the record only exists locally.
    pub id: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub username: Option<String>,
    pub kind: UserKind,
    #[serde(default)]
    pub has_accepted: bool,
    #[serde(default)]
    pub is_invited: bool,
    #[serde(default)]
    pub is_suggestion: bool,
    #[serde(default)]
    pub is_resent: bool,
    /// Id of the booking-page link; only linked users need a server delete.
    #[serde(default)]
    pub connection_id: Option<String>,
}

impl ConnectedUser {
    /// A fresh local record typed into the search field.
    #[must_use]
    pub fn local(email: impl Into<String>, kind: UserKind) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: None,
            username: None,
            kind,
            has_accepted: false,
            is_invited: false,
            is_suggestion: false,
            is_resent: false,
            connection_id: None,
        }
    }

    /// A calendar-derived suggestion. Suggestions are always connections.
    #[must_use]
    pub fn suggestion(email: impl Into<String>) -> Self {
        Self {
            is_suggestion: true,
            ..Self::local(email, UserKind::Connection)
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn accepted(mut self, has_accepted: bool) -> Self {
        self.has_accepted = has_accepted;
        self
    }

    #[must_use]
    pub fn invited(mut self, is_invited: bool) -> Self {
        self.is_invited = is_invited;
        self
    }

    #[must_use]
    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }

    /// Name, then username, then email; empty strings are skipped.
    #[must_use]
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.username.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(self.email.as_str())
    }

    /// Same person in the same section.
    #[must_use]
    pub fn is_same(&self, email: &str, kind: UserKind) -> bool {
        self.email == email && self.kind == kind
    }

    /// State of the row in the roster list.
    #[must_use]
    pub fn list_item(&self, is_organizer: bool, overlapping: &[String]) -> ListItemState {
        let pending = !self.has_accepted && !self.is_suggestion;
        ListItemState {
            selectable: !is_organizer,
            unavailable: self.has_accepted && !overlapping.iter().any(|e| e == &self.email),
            pending,
            can_resend: pending && self.is_invited && !self.is_resent,
            delete_label: if self.has_accepted || self.is_suggestion {
                "Delete connection"
            } else {
                "Cancel invitation"
            },
        }
    }
}

/// Cut a title to [`TAG_TITLE_LIMIT`] characters, appending `...` when cut.
#[must_use]
pub fn truncate_title(title: &str) -> String {
    match title.char_indices().nth(TAG_TITLE_LIMIT) {
        Some((byte, _)) => format!("{}...", &title[..byte]),
        None => title.to_owned(),
    }
}

/// Invitation status shown by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStatus {
    Accepted,
    Waiting,
}

/// An organizer rendered as a tag in the invitee field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub title: String,
    pub email: String,
    pub status: TagStatus,
    /// The organizer has free time overlapping the current selection.
    pub overlapping: bool,
}

impl Tag {
    #[must_use]
    pub fn for_user(user: &ConnectedUser, overlapping: &[String]) -> Self {
        Self {
            title: truncate_title(user.display_name()),
            email: user.email.clone(),
            status: if user.has_accepted {
                TagStatus::Accepted
            } else {
                TagStatus::Waiting
            },
            overlapping: overlapping.iter().any(|e| e == &user.email),
        }
    }
}

/// Row state for a roster list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItemState {
    /// Clicking adds the user as an organizer.
    pub selectable: bool,
    /// Accepted but with no overlapping availability.
    pub unavailable: bool,
    /// Invitation not accepted yet.
    pub pending: bool,
    pub can_resend: bool,
    pub delete_label: &'static str,
}

const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `email` looks like an address the invitation service accepts.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_fallbacks() {
        let user = ConnectedUser::local("ann@example.com", UserKind::Connection);
        assert_eq!(user.display_name(), "ann@example.com");
        let user = user.with_username("ann");
        assert_eq!(user.display_name(), "ann");
        let user = user.with_name("Ann Lee");
        assert_eq!(user.display_name(), "Ann Lee");
        let user = user.with_name("");
        assert_eq!(user.display_name(), "ann");
    }

    #[test]
    fn titles_are_cut_at_limit() {
        assert_eq!(truncate_title("short"), "short");
        let exact = "a".repeat(TAG_TITLE_LIMIT);
        assert_eq!(truncate_title(&exact), exact);
        let long = "b".repeat(TAG_TITLE_LIMIT + 5);
        assert_eq!(truncate_title(&long), format!("{}...", "b".repeat(TAG_TITLE_LIMIT)));
    }

    #[test]
    fn titles_cut_on_char_boundaries() {
        let long = "é".repeat(40);
        let cut = truncate_title(&long);
        assert_eq!(cut.chars().count(), TAG_TITLE_LIMIT + 3);
    }

    #[test]
    fn email_validation() {
        for ok in [
            "ann@example.com",
            "first.last@mail.example.org",
            "\"odd name\"@example.com",
            "ops@[10.0.0.1]",
        ] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in [
            "",
            "ann",
            "ann@",
            "ann@example",
            "ann@@example.com",
            "a b@example.com",
            ".ann@example.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn tag_reflects_acceptance_and_overlap() {
        let user = ConnectedUser::local("ann@example.com", UserKind::Team).accepted(true);
        let tag = Tag::for_user(&user, &["ann@example.com".to_owned()]);
        assert_eq!(tag.status, TagStatus::Accepted);
        assert!(tag.overlapping);
        let tag = Tag::for_user(&user.accepted(false), &[]);
        assert_eq!(tag.status, TagStatus::Waiting);
        assert!(!tag.overlapping);
    }

    #[test]
    fn list_item_states() {
        let invited = ConnectedUser::local("bo@example.com", UserKind::Connection).invited(true);
        let item = invited.list_item(false, &[]);
        assert!(item.selectable && item.pending && item.can_resend);
        assert_eq!(item.delete_label, "Cancel invitation");

        let accepted = invited.clone().accepted(true);
        let item = accepted.list_item(true, &[]);
        assert!(!item.selectable && item.unavailable && !item.pending);
        assert_eq!(item.delete_label, "Delete connection");

        let suggestion = ConnectedUser::suggestion("cy@example.com");
        let item = suggestion.list_item(false, &[]);
        assert!(!item.pending && !item.can_resend);
    }

    #[test]
    fn kind_round_trips_through_str() {
        for kind in UserKind::ALL {
            assert_eq!(kind.as_str().parse::<UserKind>(), Ok(kind));
        }
        assert!("admin".parse::<UserKind>().is_err());
    }

    #[test]
    fn serde_uses_snake_case_kind() {
        let user = ConnectedUser::local("ann@example.com", UserKind::Team);
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(json.contains("\"kind\":\"team\""));
        let back: ConnectedUser = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, user);
    }
}
