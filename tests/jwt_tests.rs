mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use common::TestApp;
use dishes_backend::config::JwtConfig;
use dishes_backend::util::jwt::{Claims, JwtTokenUtils, JwtTokenUtilsImpl, ACCESS_TOKEN_TYPE};

fn signed(claims: &Claims, secret: &str) -> String {
    encode(&Header::new(Algorithm::HS256), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

fn claims(token_type: &str, exp_offset: i64) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: "user123".to_string(),
        email: "cook@example.com".to_string(),
        iat: now,
        exp: now + exp_offset,
        token_type: token_type.to_string(),
        jti: Uuid::new_v4().to_string(),
    }
}

async fn create_status(app: &TestApp, token: &str) -> (StatusCode, serde_json::Value) {
    app.request(Method::POST, "/api/dishes", Some(json!({ "name": "Soup" })), Some(token))
        .await
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new(true);
    let token = signed(&claims(ACCESS_TOKEN_TYPE, -3600), &JwtConfig::default().jwt_secret);

    let (status, body) = create_status(&app, &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication error");
}

#[tokio::test]
async fn test_token_with_wrong_type_is_rejected() {
    let app = TestApp::new(true);
    let token = signed(&claims("refresh", 3600), &JwtConfig::default().jwt_secret);

    let (status, _) = create_status(&app, &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_with_wrong_secret_is_rejected() {
    let app = TestApp::new(true);
    let token = signed(&claims(ACCESS_TOKEN_TYPE, 3600), "another_secret_that_is_at_least_32_chars");

    let (status, _) = create_status(&app, &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hand_signed_access_token_is_accepted() {
    let app = TestApp::new(true);
    let token = signed(&claims(ACCESS_TOKEN_TYPE, 3600), &JwtConfig::default().jwt_secret);

    let (status, _) = create_status(&app, &token).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[test]
fn test_generated_token_round_trips_claims() {
    let utils = JwtTokenUtilsImpl::new(JwtConfig::default());
    let token = utils.generate_access_token("abc", "a@b.com").unwrap();
    let decoded = utils.validate_access_token(&token).unwrap();
    assert_eq!(decoded.sub, "abc");
    assert_eq!(decoded.email, "a@b.com");
    assert_eq!(decoded.exp - decoded.iat, utils.access_token_ttl_secs());
}
