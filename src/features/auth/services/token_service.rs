use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{User, UserRole};

/// Session token claims: identity id and role, time-bounded.
///
/// The role claim exists so clients can route without an extra request;
/// server-side authorization always re-fetches the stored role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Service for issuing and verifying signed session tokens (HS256)
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expiry_secs: config.token_expiry.as_secs() as i64,
        }
    }

    /// Issue a token binding the user's id and role
    pub fn issue(&self, user: &User) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now,
            exp: now + self.expiry_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Verify signature and expiry; invalid or expired tokens fail with
    /// Unauthorized.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_service(expiry: Duration) -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "test-secret-that-is-long-enough-0123456789".to_string(),
            token_expiry: expiry,
        })
    }

    fn test_user(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: "$2b$12$unused".to_string(),
            role,
            photo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let service = test_service(Duration::from_secs(3600));
        let user = test_user(UserRole::Citizen);

        let token = service.issue(&user).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, UserRole::Citizen);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = test_service(Duration::from_secs(3600));
        let user = test_user(UserRole::Admin);

        let mut token = service.issue(&user).unwrap();
        // Flip a character in the signature segment
        let flipped = if token.ends_with('a') { 'b' } else { 'a' };
        token.pop();
        token.push(flipped);

        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = test_service(Duration::from_secs(3600));
        let verifier = TokenService::new(&AuthConfig {
            jwt_secret: "another-secret-that-is-long-enough-987654".to_string(),
            token_expiry: Duration::from_secs(3600),
        });

        let token = issuer.issue(&test_user(UserRole::Staff)).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        // jsonwebtoken applies a default leeway, so push expiry well past it
        let service = test_service(Duration::from_secs(0));
        let user = test_user(UserRole::Citizen);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            iat: now - 600,
            exp: now - 300,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(AppError::Unauthorized(_))
        ));
    }
}
