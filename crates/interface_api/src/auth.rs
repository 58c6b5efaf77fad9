//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_pmb::CallerIdentity;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles and permission scopes
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl TokenClaims {
    /// The identity recorded on audit events
    pub fn caller(&self) -> CallerIdentity {
        CallerIdentity::new(self.sub.clone())
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = TokenClaims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
///
/// # Arguments
///
/// * `token` - The JWT token to validate
/// * `secret` - JWT secret key
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &TokenClaims, required_role: &str) -> bool {
    claims.roles.iter().any(|r| r == required_role || r == "admin")
}

/// Fails with `MissingPermission` unless the caller holds the scope
pub fn require_permission(claims: &TokenClaims, permission: &str) -> Result<(), AuthError> {
    if has_role(claims, permission) {
        Ok(())
    } else {
        Err(AuthError::MissingPermission(permission.to_string()))
    }
}

/// Permission definitions
pub mod permissions {
    pub const PMB_READ: &str = "pmb:read";
    pub const PMB_EVALUATE: &str = "pmb:evaluate";
    pub const CLAIM_WRITE: &str = "claim:write";
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token("user-1", vec![permissions::PMB_READ.to_string()], SECRET, 60).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.caller().user_id, "user-1");
        assert!(has_role(&claims, permissions::PMB_READ));
        assert!(!has_role(&claims, permissions::PMB_EVALUATE));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token("user-1", vec![], SECRET, 60).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_admin_satisfies_any_permission() {
        let claims = TokenClaims {
            sub: "root".to_string(),
            roles: vec!["admin".to_string()],
            exp: 0,
            iat: 0,
        };
        assert!(require_permission(&claims, permissions::CLAIM_WRITE).is_ok());
    }

    #[test]
    fn test_missing_permission_names_scope() {
        let claims = TokenClaims {
            sub: "viewer".to_string(),
            roles: vec![permissions::PMB_READ.to_string()],
            exp: 0,
            iat: 0,
        };
        let err = require_permission(&claims, permissions::PMB_EVALUATE).unwrap_err();
        assert!(err.to_string().contains("pmb:evaluate"));
    }
}
