use anyhow::Result;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Cookie carrying the auth token for browser clients.
pub const AUTH_COOKIE: &str = "auth-token";

/// Token validity window.
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in the signed token. Only the public identity is carried;
/// password hashes never leave the user repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authenticated caller, decoded from a verified token and handed to
/// handlers via request extensions.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: i32,
    pub username: String,
    pub role: String,
}

impl Identity {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Hash a password with Argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Constant-time password check against a stored hash. CPU-intensive; run
/// inside `spawn_blocking` from async contexts.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Issue a signed token asserting the identity for the next 24 hours.
pub fn generate_token(identity: &Identity, secret: &str) -> Result<String> {
    let now = Utc::now();

    let claims = Claims {
        id: identity.id,
        username: identity.username.clone(),
        role: identity.role.clone(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Decode and validate a token. Expired, tampered and malformed tokens all
/// collapse to `None`; callers get no further detail.
#[must_use]
pub fn verify_token(token: &str, secret: &str) -> Option<Identity> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;

    Some(Identity {
        id: data.claims.id,
        username: data.claims.username,
        role: data.claims.role,
    })
}

/// Pull the token out of a request: `Authorization: Bearer` first, then the
/// auth cookie.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    let cookies = headers.get("cookie")?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE).then(|| value.to_string())
    })
}

/// `Set-Cookie` value issued on login.
#[must_use]
pub fn login_cookie(token: &str) -> String {
    format!("{AUTH_COOKIE}={token}; HttpOnly; Path=/; Max-Age=86400; SameSite=Strict")
}

/// `Set-Cookie` value that clears the auth cookie on logout.
#[must_use]
pub fn logout_cookie() -> String {
    format!("{AUTH_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Strict")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn identity() -> Identity {
        Identity {
            id: 7,
            username: "editor".to_string(),
            role: "editor".to_string(),
        }
    }

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = hash_password("hunter22").unwrap();
        assert!(verify_password("hunter22", &hash));
        assert!(!verify_password("hunter23", &hash));
    }

    #[test]
    fn test_token_roundtrip() {
        let token = generate_token(&identity(), SECRET).unwrap();
        let decoded = verify_token(&token, SECRET).unwrap();
        assert_eq!(decoded.id, 7);
        assert_eq!(decoded.username, "editor");
        assert_eq!(decoded.role, "editor");
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = generate_token(&identity(), SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_none());
        assert!(verify_token("not.a.token", SECRET).is_none());
    }

    #[test]
    fn test_token_from_headers_prefers_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());
        headers.insert("cookie", "auth-token=def".parse().unwrap());
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_token_from_headers_cookie_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            "theme=dark; auth-token=def; lang=en".parse().unwrap(),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("def"));
    }

    #[test]
    fn test_token_from_headers_missing() {
        assert!(token_from_headers(&HeaderMap::new()).is_none());
    }
}
