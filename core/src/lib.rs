//! Client for the HockeyApp app user API.
//!
//! # Overview
//! Lists the users of an app, invites new users and checks whether an email
//! address belongs to a member. Requests are described as plain data
//! (`HttpRequest`) and responses are parsed from plain data (`HttpResponse`),
//! so the mapping layer is deterministic and testable without a network.
//! `HockeyAppManager` ties the two halves together with a blocking
//! `Transport`.
//!
//! # Design
//! - `HockeyAppClient` holds only credentials and the base URL.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response).
//! - Boolean operations map 2xx to `true`, 4xx to `false` and everything else
//!   to `ApiError::UnexpectedStatus`.
//! - Validation (email syntax, owner role) happens while the invitation is
//!   assembled, before any request exists.

pub mod address;
pub mod app;
pub mod client;
pub mod converter;
pub mod error;
pub mod http;
pub mod invitation;
pub mod manager;
pub mod role;
pub mod transport;
pub mod user;

pub use address::MailAddress;
pub use app::App;
pub use client::{HockeyAppClient, BASE_URL, TOKEN_HEADER};
pub use converter::{ConversionInput, UserConverter};
pub use error::ApiError;
pub use crate::http::{classify, HttpMethod, HttpRequest, HttpResponse, StatusFamily};
pub use invitation::Invitation;
pub use manager::HockeyAppManager;
pub use role::Role;
pub use transport::{Transport, UreqTransport};
pub use user::User;
