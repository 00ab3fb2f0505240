//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Form bodies are compared as key/value maps so
//! parameter order does not matter.

use std::collections::BTreeMap;

use hockeyapp_core::{
    ApiError, HockeyAppClient, HttpMethod, HttpRequest, HttpResponse, Invitation, Role, User,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/api/2/apps";

fn client(vectors: &Value) -> HockeyAppClient {
    HockeyAppClient::new(
        vectors["api_token"].as_str().unwrap(),
        vectors["app_id"].as_str().unwrap(),
    )
    .with_base_url(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_role(s: &str) -> Role {
    Role::ALL
        .into_iter()
        .find(|role| role.name() == s)
        .unwrap_or_else(|| panic!("unknown role: {s}"))
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let arr = h.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, err: ApiError, expected: &str) {
    let matched = match expected {
        "InvalidRole" => matches!(err, ApiError::InvalidRole(_)),
        "Rejected" => matches!(err, ApiError::Rejected { .. }),
        "UnexpectedStatus" => matches!(err, ApiError::UnexpectedStatus { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

fn user_summary(user: &User) -> Value {
    serde_json::json!({
        "id": user.id,
        "user_id": user.user_id,
        "email": user.email,
        "first_name": user.first_name(),
        "last_name": user.last_name(),
        "role": user.role.name(),
        "tags": user.tags,
        "invited": user.invited.is_some(),
        "pending": user.pending,
    })
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_users_test_vectors() {
    let raw = include_str!("../../test-vectors/list_users.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Verify build
        let req = c.build_list_users();
        check_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_list_users(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            let users: Vec<Value> = result.unwrap().iter().map(user_summary).collect();
            assert_eq!(Value::Array(users), case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Invite
// ---------------------------------------------------------------------------

#[test]
fn invite_user_test_vectors() {
    let raw = include_str!("../../test-vectors/invite_user.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let mut invitation = Invitation::new().email(input["email"].as_str().unwrap()).unwrap();
        if let Some(first) = input["first_name"].as_str() {
            invitation = invitation.first_name(first);
        }
        if let Some(last) = input["last_name"].as_str() {
            invitation = invitation.last_name(last);
        }
        if let Some(role) = input["role"].as_str() {
            invitation = invitation.role(parse_role(role)).unwrap();
        }
        if let Some(tags) = input["tags"].as_str() {
            invitation = invitation.tags(tags);
        }
        if let Some(message) = input["message"].as_str() {
            invitation = invitation.message(message);
        }

        // Verify build
        let expected_req = &case["expected_request"];
        let req = c.build_invite_user(&invitation);
        check_request(name, &req, expected_req);

        let form: BTreeMap<String, String> =
            url::form_urlencoded::parse(req.body.as_deref().unwrap().as_bytes())
                .into_owned()
                .collect();
        let expected_form: BTreeMap<String, String> =
            serde_json::from_value(expected_req["form"].clone()).unwrap();
        assert_eq!(form, expected_form, "{name}: form body");

        // Verify parse
        let result = c.parse_invite_user(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            assert_eq!(
                result.unwrap(),
                case["expected_result"].as_bool().unwrap(),
                "{name}: parsed result"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Check membership
// ---------------------------------------------------------------------------

#[test]
fn check_membership_test_vectors() {
    let raw = include_str!("../../test-vectors/check_membership.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client(&vectors);
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        // Verify build
        let req = c.build_check_membership(
            input["email"].as_str().unwrap(),
            input["secret"].as_str().unwrap(),
        );
        check_request(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        // Verify parse
        let result = c.parse_check_membership(simulated_response(case));
        if let Some(expected_error) = case.get("expected_error") {
            check_error(name, result.unwrap_err(), expected_error.as_str().unwrap());
        } else {
            assert_eq!(
                result.unwrap(),
                case["expected_result"].as_bool().unwrap(),
                "{name}: parsed result"
            );
        }
    }
}
