//! Conversion of raw records into `User` values.
//!
//! # Design
//! The converter accepts a closed set of input shapes through
//! `ConversionInput`. Inputs it has no mapping for yield `Ok(None)` rather
//! than an error; malformed data inside a supported shape (missing required
//! field, unknown role, unparsable timestamp) is an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::address::MailAddress;
use crate::error::ApiError;
use crate::role::Role;
use crate::user::User;

/// Anything the converter knows how to turn into a `User`.
#[derive(Debug, Clone)]
pub enum ConversionInput {
    /// One element of the `app_users` array.
    Json(Value),
    /// A contact that has not been invited yet.
    Address(MailAddress),
}

impl From<Value> for ConversionInput {
    fn from(value: Value) -> Self {
        ConversionInput::Json(value)
    }
}

impl From<MailAddress> for ConversionInput {
    fn from(address: MailAddress) -> Self {
        ConversionInput::Address(address)
    }
}

/// Wire shape of an app user record.
#[derive(Debug, Deserialize)]
struct RawUser {
    id: i64,
    user_id: i64,
    email: String,
    full_name: String,
    role: i64,
    tags: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    invited_at: Option<String>,
    #[serde(default)]
    pending: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UserConverter;

impl UserConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, input: impl Into<ConversionInput>) -> Result<Option<User>, ApiError> {
        match input.into() {
            ConversionInput::Json(value @ Value::Object(_)) => self.convert_json(value).map(Some),
            ConversionInput::Json(_) => Ok(None),
            ConversionInput::Address(address) => Ok(Some(self.convert_address(address))),
        }
    }

    fn convert_json(&self, value: Value) -> Result<User, ApiError> {
        let raw: RawUser = serde_json::from_value(value)?;
        let role = Role::from_index(raw.role)?;
        Ok(User {
            id: Some(raw.id),
            user_id: Some(raw.user_id),
            email: raw.email,
            full_name: Some(raw.full_name),
            created: parse_timestamp("created_at", raw.created_at)?,
            invited: parse_timestamp("invited_at", raw.invited_at)?,
            pending: raw.pending,
            role,
            tags: Some(raw.tags),
        })
    }

    fn convert_address(&self, address: MailAddress) -> User {
        User {
            email: address.email,
            full_name: address.name,
            ..User::default()
        }
    }
}

/// Parse an RFC 3339 timestamp. Absent and empty values are left unset.
fn parse_timestamp(field: &'static str, value: Option<String>) -> Result<Option<DateTime<Utc>>, ApiError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(value) => DateTime::parse_from_rfc3339(&value)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|_| ApiError::InvalidTimestamp { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn record() -> Value {
        json!({
            "id": 17,
            "user_id": 4711,
            "email": "jane@example.com",
            "full_name": "Jane Doe",
            "role": 2,
            "tags": "beta,qa",
            "created_at": "2015-08-12T10:20:30Z",
            "invited_at": "2015-08-13T08:00:00Z",
            "pending": false
        })
    }

    #[test]
    fn converts_full_record() {
        let user = UserConverter.convert(record()).unwrap().unwrap();
        assert_eq!(user.id, Some(17));
        assert_eq!(user.user_id, Some(4711));
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.first_name(), Some("Jane"));
        assert_eq!(user.role, Role::Tester);
        assert_eq!(user.tags.as_deref(), Some("beta,qa"));
        assert_eq!(user.created, Some(Utc.with_ymd_and_hms(2015, 8, 12, 10, 20, 30).unwrap()));
        assert_eq!(user.invited, Some(Utc.with_ymd_and_hms(2015, 8, 13, 8, 0, 0).unwrap()));
        assert_eq!(user.pending, Some(false));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut value = record();
        let obj = value.as_object_mut().unwrap();
        obj.remove("created_at");
        obj.remove("invited_at");
        obj.remove("pending");

        let user = UserConverter.convert(value).unwrap().unwrap();
        assert_eq!(user.created, None);
        assert_eq!(user.invited, None);
        assert_eq!(user.pending, None);
    }

    #[test]
    fn empty_invited_at_means_not_invited() {
        let mut value = record();
        value["invited_at"] = json!("");
        let user = UserConverter.convert(value).unwrap().unwrap();
        assert_eq!(user.invited, None);
    }

    #[test]
    fn null_invited_at_means_not_invited() {
        let mut value = record();
        value["invited_at"] = Value::Null;
        let user = UserConverter.convert(value).unwrap().unwrap();
        assert_eq!(user.invited, None);
    }

    #[test]
    fn unknown_role_is_an_error() {
        let mut value = record();
        value["role"] = json!(99);
        let err = UserConverter.convert(value).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRole(99)));
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let mut value = record();
        value.as_object_mut().unwrap().remove("email");
        let err = UserConverter.convert(value).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let mut value = record();
        value["created_at"] = json!("yesterday");
        let err = UserConverter.convert(value).unwrap_err();
        assert!(matches!(err, ApiError::InvalidTimestamp { field: "created_at", .. }));
    }

    #[test]
    fn non_object_json_yields_nothing() {
        assert!(UserConverter.convert(json!([1, 2, 3])).unwrap().is_none());
        assert!(UserConverter.convert(json!("jane@example.com")).unwrap().is_none());
    }

    #[test]
    fn address_populates_email_and_name_only() {
        let address: MailAddress = "Jane Doe <jane@example.com>".parse().unwrap();
        let user = UserConverter.convert(address).unwrap().unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(user.id, None);
        assert_eq!(user.user_id, None);
        assert_eq!(user.created, None);
        assert_eq!(user.role, Role::Tester);
    }
}
