//! Opaque HMAC token auth
//!
//! Token format: `user_id.timestamp.signature` where the signature is
//! HMAC-SHA256 over `user_id @#$% timestamp` with the shared secret.
//! Verification is constant-time and age-bounded. The middleware only
//! runs when auth is enabled in settings; the verified user id is
//! attached to the request so the process handler can cross-check it
//! against the request body.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Joins user id and timestamp in the signed message.
const TOKEN_SEPARATOR: &str = "@#$%";

pub const TOKEN_HEADER: &str = "x-auth-token";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("token is empty")]
    Empty,

    #[error("token format is invalid")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token signature mismatch")]
    BadSignature,
}

/// Verified identity attached to the request by the middleware.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

fn sign(user_id: &str, timestamp: u64, secret: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(format!("{user_id}{TOKEN_SEPARATOR}{timestamp}").as_bytes());
    mac.finalize().into_bytes().to_vec()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Generate a token for a user at the current time.
pub fn generate_token(user_id: &str, secret: &str) -> String {
    generate_token_at(user_id, secret, unix_now())
}

pub fn generate_token_at(user_id: &str, secret: &str, timestamp: u64) -> String {
    let signature = hex::encode(sign(user_id, timestamp, secret));
    format!("{user_id}.{timestamp}.{signature}")
}

/// Verify a token and return its user id.
pub fn verify_token(token: &str, secret: &str, max_age_secs: u64) -> Result<String, AuthError> {
    verify_token_at(token, secret, max_age_secs, unix_now())
}

fn verify_token_at(
    token: &str,
    secret: &str,
    max_age_secs: u64,
    now: u64,
) -> Result<String, AuthError> {
    if token.is_empty() {
        return Err(AuthError::Empty);
    }

    // user ids may themselves contain dots; the timestamp and signature
    // never do, so split from the right.
    let mut parts = token.rsplitn(3, '.');
    let signature_hex = parts.next().ok_or(AuthError::Malformed)?;
    let timestamp_str = parts.next().ok_or(AuthError::Malformed)?;
    let user_id = parts.next().ok_or(AuthError::Malformed)?;
    if user_id.is_empty() {
        return Err(AuthError::Malformed);
    }

    let timestamp: u64 = timestamp_str.parse().map_err(|_| AuthError::Malformed)?;
    if now.saturating_sub(timestamp) > max_age_secs {
        return Err(AuthError::Expired);
    }

    let provided = hex::decode(signature_hex).map_err(|_| AuthError::Malformed)?;
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(format!("{user_id}{TOKEN_SEPARATOR}{timestamp}").as_bytes());
    mac.verify_slice(&provided)
        .map_err(|_| AuthError::BadSignature)?;

    Ok(user_id.to_string())
}

/// Axum middleware: verify the token header when auth is enabled.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth = &state.settings.auth;
    // Liveness probes stay unauthenticated.
    if !auth.enabled || request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let token = request
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match verify_token(token, &auth.secret_key, auth.max_age_secs) {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            Ok(next.run(request).await)
        }
        Err(e) => {
            tracing::warn!(error = %e, "token verification failed");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trip() {
        let token = generate_token_at("user-42", SECRET, 1_700_000_000);
        let user = verify_token_at(&token, SECRET, 3600, 1_700_000_100).unwrap();
        assert_eq!(user, "user-42");
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = generate_token_at("user-42", SECRET, 1_700_000_000);
        let result = verify_token_at(&token, SECRET, 3600, 1_700_010_000);
        assert_eq!(result.unwrap_err(), AuthError::Expired);
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let token = generate_token_at("user-42", "other-secret", 1_700_000_000);
        let result = verify_token_at(&token, SECRET, 3600, 1_700_000_100);
        assert_eq!(result.unwrap_err(), AuthError::BadSignature);
    }

    #[test]
    fn tampered_user_id_fails() {
        let token = generate_token_at("user-42", SECRET, 1_700_000_000);
        let tampered = token.replacen("user-42", "user-43", 1);
        let result = verify_token_at(&tampered, SECRET, 3600, 1_700_000_100);
        assert_eq!(result.unwrap_err(), AuthError::BadSignature);
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(
            verify_token_at("", SECRET, 3600, 0).unwrap_err(),
            AuthError::Empty
        );
        assert_eq!(
            verify_token_at("no-dots-here", SECRET, 3600, 0).unwrap_err(),
            AuthError::Malformed
        );
        assert_eq!(
            verify_token_at("a.not-a-number.ff", SECRET, 3600, 0).unwrap_err(),
            AuthError::Malformed
        );
    }

    #[test]
    fn user_ids_containing_dots_survive() {
        let token = generate_token_at("org.team.user", SECRET, 1_700_000_000);
        let user = verify_token_at(&token, SECRET, 3600, 1_700_000_001).unwrap();
        assert_eq!(user, "org.team.user");
    }
}
