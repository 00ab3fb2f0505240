use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const TOKEN_HEADER: &str = "X-HockeyAppToken";

/// Wire shape of one entry in the `app_users` listing.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AppUser {
    pub id: i64,
    pub user_id: i64,
    pub email: String,
    pub full_name: String,
    pub role: u8,
    pub tags: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_at: Option<String>,
    pub pending: bool,
}

#[derive(Deserialize)]
pub struct InviteForm {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub tags: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckParams {
    pub email: Option<String>,
    pub secret: Option<String>,
}

/// The single app the mock serves.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub app_id: String,
    pub api_token: String,
    pub secret: String,
    pub users: Vec<AppUser>,
    /// Answer every request with 503.
    pub outage: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            app_id: "0123456789abcdef".to_string(),
            api_token: "mock-token".to_string(),
            secret: "mock-secret".to_string(),
            users: Vec::new(),
            outage: false,
        }
    }
}

const OWNER_ROLE: u8 = 3;
const TESTER_ROLE: u8 = 2;

pub struct MockState {
    config: MockConfig,
    users: RwLock<Vec<AppUser>>,
    next_id: AtomicI64,
}

pub type Db = Arc<MockState>;

pub fn app(config: MockConfig) -> Router {
    let next_id = config.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
    let state: Db = Arc::new(MockState {
        users: RwLock::new(config.users.clone()),
        config,
        next_id: AtomicI64::new(next_id),
    });
    Router::new()
        .route("/api/2/apps/{app_id}/app_users", get(list_users).post(invite_user))
        .route("/api/2/apps/{app_id}/app_users/check", get(check_membership))
        .with_state(state)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app(config)).await
}

/// Common gatekeeping: outage, unknown app, and (optionally) the token header.
fn guard(db: &MockState, app_id: &str, headers: Option<&HeaderMap>) -> Result<(), StatusCode> {
    if db.config.outage {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    if app_id != db.config.app_id {
        return Err(StatusCode::NOT_FOUND);
    }
    if let Some(headers) = headers {
        let token = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());
        if token != Some(db.config.api_token.as_str()) {
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    Ok(())
}

async fn list_users(
    State(db): State<Db>,
    Path(app_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&db, &app_id, Some(&headers))?;
    let users = db.users.read().await;
    Ok(Json(json!({ "app_users": users.as_slice() })))
}

async fn invite_user(
    State(db): State<Db>,
    Path(app_id): Path<String>,
    headers: HeaderMap,
    Form(input): Form<InviteForm>,
) -> Response {
    if let Err(status) = guard(&db, &app_id, Some(&headers)) {
        return status.into_response();
    }

    let Some(email) = input.email.filter(|e| e.contains('@')) else {
        return unprocessable("email", "is invalid");
    };
    let role = match input.role.as_deref().map(str::parse::<u8>) {
        None => TESTER_ROLE,
        Some(Ok(role)) if role < OWNER_ROLE => role,
        Some(_) => return unprocessable("role", "is invalid"),
    };

    let mut users = db.users.write().await;
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
        return unprocessable("email", "has already been taken");
    }

    let full_name = [input.first_name, input.last_name]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let id = db.next_id.fetch_add(1, Ordering::Relaxed);
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let user = AppUser {
        id,
        user_id: id * 100,
        email,
        full_name,
        role,
        tags: input.tags.unwrap_or_default(),
        created_at: now.clone(),
        invited_at: Some(now),
        pending: true,
    };
    tracing::info!(email = %user.email, message = ?input.message, "user invited");
    users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn check_membership(
    State(db): State<Db>,
    Path(app_id): Path<String>,
    Query(params): Query<CheckParams>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    guard(&db, &app_id, None)?;
    if params.secret.as_deref() != Some(db.config.secret.as_str()) {
        return Err(StatusCode::FORBIDDEN);
    }
    let email = params.email.unwrap_or_default();
    let users = db.users.read().await;
    users
        .iter()
        .find(|u| u.email.eq_ignore_ascii_case(&email))
        .map(|u| Json(json!({ "email": u.email, "role": u.role })))
        .ok_or(StatusCode::NOT_FOUND)
}

fn unprocessable(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "errors": { field: [message] } })),
    )
        .into_response()
}
