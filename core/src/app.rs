//! App credentials.
//!
//! # Environment Variables
//!
//! - `HOCKEYAPP_APP_ID`: public identifier of the app (required)
//! - `HOCKEYAPP_API_TOKEN`: API token with user management rights (required)
//! - `HOCKEYAPP_SECRET`: app secret used by membership checks (optional)
//!
//! A `.env` file in the working directory is loaded first when present.

use std::env;
use std::fmt;

use crate::error::ApiError;

pub const APP_ID_VAR: &str = "HOCKEYAPP_APP_ID";
pub const API_TOKEN_VAR: &str = "HOCKEYAPP_API_TOKEN";
pub const SECRET_VAR: &str = "HOCKEYAPP_SECRET";

/// Identity of one HockeyApp app.
#[derive(Clone, PartialEq, Eq)]
pub struct App {
    pub app_id: String,
    pub api_token: String,
    pub secret: Option<String>,
}

impl App {
    pub fn new(app_id: impl Into<String>, api_token: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_token: api_token.into(),
            secret,
        }
    }

    /// Load the app from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingConfig` when the app id or token is unset.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok(), [APP_ID_VAR, API_TOKEN_VAR, SECRET_VAR])
    }

    /// Load the app from key/value pairs with the keys `appId`, `apiToken`
    /// and `secret`, e.g. the entries of a properties file.
    pub fn from_properties<I, K, V>(properties: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut app_id = None;
        let mut api_token = None;
        let mut secret = None;
        for (key, value) in properties {
            match key.as_ref() {
                "appId" => app_id = Some(value.into()),
                "apiToken" => api_token = Some(value.into()),
                "secret" => secret = Some(value.into()),
                _ => {}
            }
        }
        Self::from_lookup(
            |key| match key {
                "appId" => app_id.clone(),
                "apiToken" => api_token.clone(),
                _ => secret.clone(),
            },
            ["appId", "apiToken", "secret"],
        )
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
        [app_id, api_token, secret]: [&'static str; 3],
    ) -> Result<Self, ApiError> {
        let required = |key| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ApiError::MissingConfig { key })
        };
        Ok(Self {
            app_id: required(app_id)?,
            api_token: required(api_token)?,
            secret: lookup(secret).filter(|value| !value.is_empty()),
        })
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("app_id", &self.app_id)
            .field("api_token", &"<redacted>")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
