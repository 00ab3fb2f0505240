//! App user records.

use chrono::{DateTime, Utc};

use crate::address::MailAddress;
use crate::role::Role;

/// A member or tester of an app, as reported by the `app_users` listing.
///
/// Every field except `email` and `role` may be absent: users converted from
/// a mail address carry only an email and a name, and the service omits
/// `invited_at` and `pending` for some records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub email: String,
    pub full_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    /// `None` means the user has not been invited yet.
    pub invited: Option<DateTime<Utc>>,
    /// `None` when the service did not say either way.
    pub pending: Option<bool>,
    pub role: Role,
    /// Comma separated, as sent by the service.
    pub tags: Option<String>,
}

impl User {
    /// The part of the full name before the first space, or the whole name
    /// when it has no space.
    pub fn first_name(&self) -> Option<&str> {
        self.full_name.as_deref().map(|name| split_name(name).0)
    }

    /// The part of the full name after the first space; empty when the name
    /// has no space.
    pub fn last_name(&self) -> Option<&str> {
        self.full_name.as_deref().map(|name| split_name(name).1)
    }

    pub fn is_pending(&self) -> bool {
        self.pending == Some(true)
    }

    pub fn address(&self) -> MailAddress {
        MailAddress::new(self.email.clone(), self.full_name.clone())
    }
}

/// Split a full name on its first space into `(first, last)`.
pub(crate) fn split_name(name: &str) -> (&str, &str) {
    name.split_once(' ').unwrap_or((name, ""))
}
