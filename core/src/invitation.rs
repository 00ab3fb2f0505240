//! Parameters of an `app_users` invitation.
//!
//! # Design
//! The builder consumes and returns `self` so calls chain; fallible setters
//! return `Result<Self, ApiError>` and fail before anything reaches the wire.
//! Parameters live in a `BTreeMap`, so the form body and the diagnostic
//! rendering come out in a stable order.

use std::collections::BTreeMap;
use std::fmt;

use validator::ValidateEmail;

use crate::address::MailAddress;
use crate::error::ApiError;
use crate::role::Role;
use crate::user::{split_name, User};

const EMAIL: &str = "email";
const FIRST_NAME: &str = "first_name";
const LAST_NAME: &str = "last_name";
const ROLE: &str = "role";
const TAGS: &str = "tags";
const MESSAGE: &str = "message";

/// Form parameters for inviting a user to an app.
///
/// `email` is required by the service; everything else is optional. Leaving
/// the role unset lets the service apply its own default (tester).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invitation {
    parameters: BTreeMap<String, String>,
}

impl Invitation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an invitation from a mailbox such as `Jane Doe <jane@example.com>`.
    ///
    /// The display name is split on its first space into first and last name.
    pub fn from_address(address: &str) -> Result<Self, ApiError> {
        let address: MailAddress = address.parse()?;
        Self::from_mail_address(&address)
    }

    /// Invite an existing user record again, e.g. into another app.
    pub fn for_user(user: &User) -> Result<Self, ApiError> {
        Self::from_mail_address(&user.address())
    }

    fn from_mail_address(address: &MailAddress) -> Result<Self, ApiError> {
        let invitation = Self::new().email(&address.email)?;
        Ok(match address.name.as_deref().filter(|name| !name.is_empty()) {
            Some(name) => {
                let (first, last) = split_name(name);
                invitation.first_name(first).last_name(last)
            }
            None => invitation,
        })
    }

    /// Set the address to invite.
    ///
    /// Syntax only: single-label domains such as `jane@localhost` pass, and
    /// the service decides whether it can deliver to them.
    pub fn email(mut self, email: &str) -> Result<Self, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::InvalidEmail {
                email: email.to_string(),
            });
        }
        self.parameters.insert(EMAIL.to_string(), email.to_string());
        Ok(self)
    }

    pub fn first_name(self, first_name: impl Into<String>) -> Self {
        self.with(FIRST_NAME, first_name)
    }

    pub fn last_name(self, last_name: impl Into<String>) -> Self {
        self.with(LAST_NAME, last_name)
    }

    /// Set the role; `Role::Owner` is rejected.
    pub fn role(self, role: Role) -> Result<Self, ApiError> {
        if role == Role::Owner {
            return Err(ApiError::OwnerRoleForbidden {
                name: role.name(),
                index: role.index(),
            });
        }
        Ok(self.with(ROLE, role.index().to_string()))
    }

    /// Comma separated tags.
    pub fn tags(self, tags: impl Into<String>) -> Self {
        self.with(TAGS, tags)
    }

    /// Text included in the invitation mail.
    pub fn message(self, message: impl Into<String>) -> Self {
        self.with(MESSAGE, message)
    }

    fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.parameters.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }
}

impl fmt::Display for Invitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invitation [parameters={")?;
        for (i, (key, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        f.write_str("}]")
    }
}
