//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use alwc_core::error::AppError;

use super::claims::Claims;

/// Verifies signature and expiry of session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // tokens are rejected from the exact second they expire
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Decode and validate a token string. Every failure is
    /// `Unauthenticated`.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::unauthenticated("Session has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::unauthenticated("Invalid session token")
                    }
                    _ => AppError::unauthenticated("Invalid session token"),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired() {
            return Err(AppError::unauthenticated("Session has expired"));
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use alwc_core::error::ErrorKind;
    use alwc_core::types::UserId;
    use alwc_entity::user::UserRole;
    use chrono::Utc;

    fn claims(exp_offset_secs: i64) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: UserId(4),
            email: "editor@example.org".to_string(),
            name: "Editor".to_string(),
            role: UserRole::User,
            iat: now,
            exp: now + exp_offset_secs,
        }
    }

    #[test]
    fn test_roundtrip_preserves_claims() {
        let encoder = JwtEncoder::new("test-secret");
        let decoder = JwtDecoder::new("test-secret");
        let original = claims(3600);
        let token = encoder.encode(&original).unwrap();
        assert_eq!(decoder.decode(&token).unwrap(), original);
    }

    #[test]
    fn test_expired_token_rejected() {
        let encoder = JwtEncoder::new("test-secret");
        let decoder = JwtDecoder::new("test-secret");
        let token = encoder.encode(&claims(-10)).unwrap();
        let err = decoder.decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.message, "Session has expired");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtEncoder::new("one").encode(&claims(3600)).unwrap();
        let err = JwtDecoder::new("two").decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new("s").decode("not-a-jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
