use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Token payload: the authenticated account and the expiry window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 signing/verification keys derived from the configured secret.
///
/// Verification recomputes the signature over the header+payload segments, so
/// any alteration of either segment invalidates the token. Every failure mode
/// (malformed, bad signature, undecodable payload, expired) surfaces as the
/// same opaque error so callers cannot distinguish them.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt.secret, state.config.jwt.ttl_seconds)
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl_seconds);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::default();
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEEK: i64 = 60 * 60 * 24 * 7;

    fn keys(secret: &str) -> JwtKeys {
        JwtKeys::new(secret, WEEK)
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = keys("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, WEEK as usize);
    }

    #[test]
    fn token_has_three_segments() {
        let keys = keys("dev-secret");
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn verify_rejects_other_secret() {
        let token = keys("secret-a").sign(Uuid::new_v4()).expect("sign");
        assert!(keys("secret-b").verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // TTL pushed far enough into the past to clear the default leeway.
        let keys = JwtKeys::new("dev-secret", -120);
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_tampering_in_any_segment() {
        let keys = keys("dev-secret");
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        let segments: Vec<&str> = token.split('.').collect();
        for i in 0..3 {
            let mut parts = segments.clone();
            let flipped = flip_first_char(parts[i]);
            parts[i] = &flipped;
            let tampered = parts.join(".");
            assert!(keys.verify(&tampered).is_err(), "segment {i} tamper accepted");
        }
    }

    #[test]
    fn verify_rejects_malformed_tokens() {
        let keys = keys("dev-secret");
        assert!(keys.verify("").is_err());
        assert!(keys.verify("just-one-segment").is_err());
        assert!(keys.verify("a.b").is_err());
        assert!(keys.verify("a.b.c.d").is_err());
    }

    fn flip_first_char(segment: &str) -> String {
        let mut chars: Vec<char> = segment.chars().collect();
        chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
        chars.into_iter().collect()
    }
}
