use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Claims of an access token issued by the hosted auth provider.
///
/// Anonymous tokens carry no `sub`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: String,
    // Checked by the decoder, not read afterwards.
    #[allow(dead_code)]
    pub exp: usize,
    #[allow(dead_code)]
    pub iat: usize,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Provider tokens carry an audience we don't pin.
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|d| d.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            AppError::Unauthorized
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(expires_in: Duration) -> Claims {
        let now = Utc::now();
        Claims {
            sub: Some(Uuid::from_u128(42)),
            email: Some("dona@loja.com".into()),
            role: "authenticated".into(),
            iat: now.timestamp() as usize,
            exp: (now + expires_in).timestamp() as usize,
        }
    }

    #[test]
    fn valid_token_is_accepted() {
        let token = sign(&claims(Duration::hours(1)), "s3cret");

        let verified = verify_token(&token, "s3cret").unwrap();
        assert_eq!(verified.sub, Some(Uuid::from_u128(42)));
        assert_eq!(verified.email.as_deref(), Some("dona@loja.com"));
        assert_eq!(verified.role, "authenticated");
    }

    #[test]
    fn anonymous_token_without_subject_still_decodes() {
        let mut anon = claims(Duration::hours(1));
        anon.sub = None;
        anon.email = None;
        anon.role = "anon".into();
        let token = sign(&anon, "s3cret");

        let verified = verify_token(&token, "s3cret").unwrap();
        assert_eq!(verified.sub, None);
        assert_eq!(verified.role, "anon");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(&claims(Duration::hours(1)), "s3cret");
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(&claims(Duration::hours(-2)), "s3cret");
        assert!(verify_token(&token, "s3cret").is_err());
    }
}
