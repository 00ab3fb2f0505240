//! Stateless HTTP request builder and response parser for the HockeyApp
//! `app_users` API.
//!
//! # Design
//! `HockeyAppClient` holds the app's credentials and base URL and nothing
//! else. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`. The
//! caller (usually `HockeyAppManager`) executes the round-trip in between.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{self, HttpMethod, HttpRequest, HttpResponse, StatusFamily};
use crate::converter::UserConverter;
use crate::invitation::Invitation;
use crate::user::User;

pub const BASE_URL: &str = "https://rink.hockeyapp.net/api/2/apps";
pub const TOKEN_HEADER: &str = "X-HockeyAppToken";

const APP_USERS: &str = "app_users";
const APP_USERS_CHECK: &str = "app_users/check";

#[derive(Deserialize)]
struct AppUsersBody {
    app_users: Vec<Value>,
}

/// Request builder and response parser bound to one app.
#[derive(Clone)]
pub struct HockeyAppClient {
    api_token: String,
    app_id: String,
    base_url: String,
    converter: UserConverter,
}

impl HockeyAppClient {
    pub fn new(api_token: &str, app_id: &str) -> Self {
        Self {
            api_token: api_token.to_string(),
            app_id: app_id.to_string(),
            base_url: BASE_URL.to_string(),
            converter: UserConverter::new(),
        }
    }

    /// Point the client at another API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resource(&self, resource: &str) -> String {
        format!("{}/{}/{resource}", self.base_url, self.app_id)
    }

    fn authenticated_headers(&self) -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), "application/json".to_string()),
            (TOKEN_HEADER.to_string(), self.api_token.clone()),
        ]
    }

    pub fn build_list_users(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.resource(APP_USERS),
            headers: self.authenticated_headers(),
            body: None,
        }
    }

    pub fn build_invite_user(&self, invitation: &Invitation) -> HttpRequest {
        let mut headers = self.authenticated_headers();
        headers.push((
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
        HttpRequest {
            method: HttpMethod::Post,
            path: self.resource(APP_USERS),
            headers,
            body: Some(
                url::form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(invitation.parameters())
                    .finish(),
            ),
        }
    }

    /// Membership checks authenticate with the app secret; no token header
    /// is sent.
    pub fn build_check_membership(&self, email: &str, secret: &str) -> HttpRequest {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("email", email)
            .append_pair("secret", secret)
            .finish();
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?{query}", self.resource(APP_USERS_CHECK)),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// Parse the `app_users` listing.
    ///
    /// An empty array yields an empty vector. Any non-2xx status is an
    /// error, so an empty result always means the app has no users.
    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        match StatusFamily::of(response.status) {
            StatusFamily::Successful => {}
            StatusFamily::ClientError => {
                tracing::debug!(status = response.status, body = %response.body, "listing rejected");
                return Err(ApiError::Rejected {
                    status: response.status,
                    body: response.body,
                });
            }
            _ => return Err(http::unexpected_status(response.status)),
        }

        let body: AppUsersBody = serde_json::from_str(&response.body)?;
        let mut users = Vec::with_capacity(body.app_users.len());
        for raw in body.app_users {
            if let Some(user) = self.converter.convert(raw)? {
                users.push(user);
            }
        }
        Ok(users)
    }

    pub fn parse_invite_user(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_boolean(response)
    }

    pub fn parse_check_membership(&self, response: HttpResponse) -> Result<bool, ApiError> {
        parse_boolean(response)
    }

    /// Users whose membership is not pending, in their original order.
    pub fn non_pending_users(users: &[User]) -> Vec<User> {
        users.iter().filter(|user| !user.is_pending()).cloned().collect()
    }
}

impl std::fmt::Debug for HockeyAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HockeyAppClient")
            .field("app_id", &self.app_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn parse_boolean(response: HttpResponse) -> Result<bool, ApiError> {
    tracing::debug!(status = response.status, "response received");
    let success = http::classify(&response)?;
    if !success {
        tracing::debug!(status = response.status, body = %response.body, "request not accepted");
    }
    Ok(success)
}
