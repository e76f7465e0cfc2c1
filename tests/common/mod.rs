#![allow(dead_code)]

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use http::HeaderMap;
use http::HeaderValue;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use mockito::Mock;
use mockito::ServerGuard;
use msgraph_credentials::providers::microsoft::MicrosoftTokenAuthenticator;
use msgraph_credentials::TokenAuthConfig;
use serde::Serialize;
use serde_json::json;
use serde_json::Value;

pub const ME_PATH: &str = "/v1.0/me";

/// Signing secret for test ID tokens; the extractor never checks it
const TEST_SECRET: &[u8] = b"test-secret-not-checked";

/// Claims of a test Microsoft ID token
#[derive(Debug, Serialize)]
pub struct TestIdClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: u64,
    pub iat: u64,
    pub tid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
}

impl TestIdClaims {
    /// Create claims for the user with the given object id, expiring in 1 hour
    pub fn for_user(oid: &str) -> Self {
        let now = unix_now();
        Self {
            iss: "https://login.microsoftonline.com/tenant-1/v2.0".to_string(),
            sub: format!("pairwise-{oid}"),
            aud: "mobile-client-id".to_string(),
            exp: now + 3600,
            iat: now,
            tid: "tenant-1".to_string(),
            oid: Some(oid.to_string()),
        }
    }

    /// Create claims without the `oid` claim
    pub fn without_oid() -> Self {
        Self {
            oid: None,
            ..Self::for_user("ignored")
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs()
}

/// Create a test ID token with custom claims
pub fn create_id_token<T: Serialize>(claims: &T) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to encode ID token")
}

/// ID token claiming to be the user with the given object id
pub fn id_token_for(oid: &str) -> String {
    create_id_token(&TestIdClaims::for_user(oid))
}

/// A Graph `/me` document for the given user id
pub fn graph_user(id: &str) -> Value {
    json!({
        "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users/$entity",
        "id": id,
        "displayName": "A B",
        "givenName": "A",
        "surname": "B",
        "userPrincipalName": "a@b.com",
        "businessPhones": [],
        "jobTitle": null,
        "mail": null,
    })
}

/// Mock `/me` answering `body` with status 200 for requests bearing `access_token`
pub async fn mock_graph_user(
    server: &mut ServerGuard,
    access_token: &str,
    body: &Value,
    expected_calls: usize,
) -> Mock {
    mock_graph_response(server, access_token, 200, &body.to_string(), expected_calls).await
}

/// Mock `/me` with an arbitrary status and raw body
pub async fn mock_graph_response(
    server: &mut ServerGuard,
    access_token: &str,
    status: usize,
    body: &str,
    expected_calls: usize,
) -> Mock {
    server
        .mock("GET", ME_PATH)
        .match_header("authorization", format!("Bearer {access_token}").as_str())
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(expected_calls)
        .create_async()
        .await
}

/// Headers of a request carrying Microsoft tokens
pub fn auth_headers(id_token: &str, access_token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-token-type", HeaderValue::from_static("MicrosoftToken"));
    headers.insert("id_token", HeaderValue::from_str(id_token).unwrap());
    headers.insert("access_token", HeaderValue::from_str(access_token).unwrap());
    headers
}

/// Authenticator talking to the mock server
pub fn authenticator_for(server: &ServerGuard, config: TokenAuthConfig) -> MicrosoftTokenAuthenticator {
    let config = config.with_graph_base_url(server.url());
    MicrosoftTokenAuthenticator::from_config(config).expect("Failed to build authenticator")
}
