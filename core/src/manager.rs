//! Blocking facade over `HockeyAppClient` and a `Transport`.
//!
//! # Design
//! Each method builds one request, executes it and parses the response. No
//! retries and no caching: a failed call surfaces as an `Err` and the caller
//! decides what to do. The manager holds only immutable credentials, so a
//! shared reference can be used from several threads when the transport
//! allows it.

use crate::app::App;
use crate::client::HockeyAppClient;
use crate::error::ApiError;
use crate::invitation::Invitation;
use crate::transport::{Transport, UreqTransport};
use crate::user::User;

/// Manages the users of one app.
#[derive(Debug, Clone)]
pub struct HockeyAppManager<T = UreqTransport> {
    client: HockeyAppClient,
    transport: T,
}

impl HockeyAppManager<UreqTransport> {
    pub fn new(api_token: &str, app_id: &str) -> Self {
        Self {
            client: HockeyAppClient::new(api_token, app_id),
            transport: UreqTransport,
        }
    }

    pub fn from_app(app: &App) -> Self {
        Self::new(&app.api_token, &app.app_id)
    }
}

impl<T: Transport> HockeyAppManager<T> {
    pub fn with_transport<U: Transport>(self, transport: U) -> HockeyAppManager<U> {
        HockeyAppManager {
            client: self.client,
            transport,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.client = self.client.with_base_url(base_url);
        self
    }

    pub fn api_token(&self) -> &str {
        self.client.api_token()
    }

    pub fn app_id(&self) -> &str {
        self.client.app_id()
    }

    pub fn client(&self) -> &HockeyAppClient {
        &self.client
    }

    /// Users whose membership is not pending, as a new vector.
    ///
    /// Name the transport when calling through the type, e.g.
    /// `<HockeyAppManager>::non_pending_app_users(&users)`.
    pub fn non_pending_app_users(users: &[User]) -> Vec<User> {
        HockeyAppClient::non_pending_users(users)
    }

    /// All users of the app, pending ones included.
    pub fn app_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.client.build_list_users();
        tracing::debug!(path = %request.path, "listing app users");
        let response = self.transport.execute(&request)?;
        self.client.parse_list_users(response)
    }

    /// Invite a user. `Ok(false)` means the service refused the invitation
    /// (e.g. the user is already a member).
    pub fn invite_user(&self, invitation: &Invitation) -> Result<bool, ApiError> {
        let request = self.client.build_invite_user(invitation);
        tracing::debug!(path = %request.path, %invitation, "inviting user");
        let response = self.transport.execute(&request)?;
        self.client.parse_invite_user(response)
    }

    /// Whether `email` belongs to a member of the app.
    pub fn is_app_member(&self, email: &str, secret: &str) -> Result<bool, ApiError> {
        let request = self.client.build_check_membership(email, secret);
        tracing::debug!(email, "checking membership");
        let response = self.transport.execute(&request)?;
        self.client.parse_check_membership(response)
    }
}
