//! Stateless session tokens. The role travels inside the token as a claim,
//! so every request re-establishes who the caller is and whether they hold
//! the admin role without a database round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domains::models::{Role, UserIdentity};
use domains::{DomainError, DomainResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

pub fn issue(identity: &UserIdentity, secret: &[u8], ttl: Duration) -> DomainResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: identity.id,
        username: identity.username.clone(),
        email: identity.email.clone(),
        role: identity.role,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|err| DomainError::Internal(format!("token issuance: {err}")))
}

pub fn verify(token: &str, secret: &[u8]) -> DomainResult<UserIdentity> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map_err(|err| DomainError::Unauthorized(format!("invalid session token: {err}")))?;

    Ok(UserIdentity {
        id: data.claims.sub,
        username: data.claims.username,
        email: data.claims.email,
        role: data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> UserIdentity {
        UserIdentity {
            id: Uuid::new_v4(),
            username: "olena".into(),
            email: "olena@example.com".into(),
            role,
        }
    }

    #[test]
    fn issue_then_verify_preserves_the_role_claim() {
        let admin = identity(Role::Admin);
        let token = issue(&admin, b"secret", Duration::hours(1)).unwrap();
        let verified = verify(&token, b"secret").unwrap();
        assert_eq!(verified, admin);
        assert!(verified.is_admin());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue(&identity(Role::Member), b"secret", Duration::hours(1)).unwrap();
        assert!(matches!(
            verify(&token, b"other-secret"),
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue(&identity(Role::Member), b"secret", Duration::seconds(-120)).unwrap();
        assert!(matches!(
            verify(&token, b"secret"),
            Err(DomainError::Unauthorized(_))
        ));
    }
}
