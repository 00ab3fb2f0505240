//! App membership roles and their wire indices.

use std::fmt;

use crate::error::ApiError;

/// Membership level of an app user.
///
/// Each role travels as a small integer in both the `app_users` listing and
/// the invitation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Developer,
    Member,
    #[default]
    Tester,
    /// Reserved for the app's creator. Cannot be granted by invitation.
    Owner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Developer, Role::Member, Role::Tester, Role::Owner];

    pub fn index(self) -> u8 {
        match self {
            Role::Developer => 0,
            Role::Member => 1,
            Role::Tester => 2,
            Role::Owner => 3,
        }
    }

    /// Resolve a wire index. Unknown values are an error, never a default.
    pub fn from_index(index: i64) -> Result<Self, ApiError> {
        Role::ALL
            .into_iter()
            .find(|role| i64::from(role.index()) == index)
            .ok_or(ApiError::InvalidRole(index))
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Developer => "DEVELOPER",
            Role::Member => "MEMBER",
            Role::Tester => "TESTER",
            Role::Owner => "OWNER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
