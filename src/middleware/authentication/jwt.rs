//! HS256 bearer tokens issued by the account service.

use crate::models;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JwtClaims {
    /// user id
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: i64,
}

fn default_role() -> String {
    models::user::ROLE_USER.to_string()
}

/// Checks the HS256 signature and expiration and returns the claims.
pub fn verify(token: &str, secret: &str) -> Result<JwtClaims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<JwtClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => "JWT token expired".to_string(),
            ErrorKind::InvalidSignature => "Invalid JWT signature".to_string(),
            ErrorKind::InvalidAlgorithm => "Unsupported JWT algorithm".to_string(),
            _ => format!("Invalid JWT: {}", err),
        })
}

pub fn user_from_claims(claims: JwtClaims) -> models::User {
    models::User {
        id: claims.sub,
        name: claims.name,
        email: claims.email,
        role: claims.role,
    }
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Result<&str, String> {
    let parts: Vec<&str> = authorization.split_whitespace().collect();
    if parts.len() != 2 {
        return Err("Invalid Authorization header format".to_string());
    }
    if parts[0] != "Bearer" {
        return Err("Expected Bearer scheme in Authorization header".to_string());
    }
    Ok(parts[1])
}
