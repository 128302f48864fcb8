use chrono::{DateTime, Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::{AuthError, Principal};

/// Longest access-token lifetime; keeps `issued_at + ttl` well inside chrono's range.
pub const MAX_TTL_SECONDS: u64 = i32::MAX as u64;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccessTokenClaims {
    iss: String,
    aud: String,
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
}

/// A freshly signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Seconds until expiry.
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 access tokens with the process-wide secret.
///
/// Built once at startup and shared read-only; key material is not printable via Debug.
#[derive(Clone)]
pub struct TokenService {
    issuer: String,
    audience: String,
    ttl_seconds: u64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("leeway_seconds", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_seconds: u64,
        leeway_seconds: u64,
    ) -> Result<Self, AuthError> {
        if secret.is_empty() {
            warn!("refusing to build token service with an empty secret");
            return Err(AuthError::Internal);
        }

        let issuer = issuer.into();
        let audience = audience.into();
        let ttl_seconds = ttl_seconds.clamp(1, MAX_TTL_SECONDS);
        // jsonwebtoken subtracts the leeway from the current time.
        let leeway_seconds = leeway_seconds.min(ttl_seconds);

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            issuer,
            audience,
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue an access token for `principal`, valid from now.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, AuthError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue an access token as if it had been signed at `issued_at`.
    pub fn issue_at(
        &self,
        principal: &Principal,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = issued_at + ChronoDuration::seconds(self.ttl_seconds as i64);

        let claims = AccessTokenClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: principal.user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign access token");
            AuthError::Internal
        })?;

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_seconds,
            expires_at,
        })
    }

    /// Verify signature, `exp`, `iss` and `aud`, then map `sub` back to a principal.
    pub fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| {
                    debug!(kind = ?e.kind(), "access token did not verify");
                    AuthError::InvalidToken
                })?;

        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| {
            debug!("access token subject is not a UUID");
            AuthError::InvalidToken
        })?;

        Ok(Principal::new(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-long-enough";

    fn service() -> TokenService {
        TokenService::new(SECRET, "session-guard", "session-guard", 3600, 60).unwrap()
    }

    #[test]
    fn issued_token_decodes_back_to_the_same_principal() {
        let tokens = service();
        let principal = Principal::new(Uuid::new_v4());

        let issued = tokens.issue(&principal).unwrap();

        assert_eq!(issued.expires_in, 3600);
        assert_eq!(tokens.verify(&issued.token).unwrap(), principal);
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service();
        let principal = Principal::new(Uuid::new_v4());
        // ttl (3600) + leeway (60) already elapsed
        let issued_at = Utc::now() - ChronoDuration::seconds(3600 + 60 + 30);

        let issued = tokens.issue_at(&principal, issued_at).unwrap();

        assert_eq!(tokens.verify(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_within_leeway_is_accepted() {
        let tokens = service();
        let principal = Principal::new(Uuid::new_v4());
        let issued_at = Utc::now() - ChronoDuration::seconds(3600 + 10);

        let issued = tokens.issue_at(&principal, issued_at).unwrap();

        assert_eq!(tokens.verify(&issued.token), Ok(principal));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let other = TokenService::new(
            "a-completely-different-secret-value",
            "session-guard",
            "session-guard",
            3600,
            60,
        )
        .unwrap();
        let issued = other.issue(&Principal::new(Uuid::new_v4())).unwrap();

        assert_eq!(service().verify(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn token_for_another_audience_is_rejected() {
        let other = TokenService::new(SECRET, "session-guard", "billing", 3600, 60).unwrap();
        let issued = other.issue(&Principal::new(Uuid::new_v4())).unwrap();

        assert_eq!(service().verify(&issued.token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn swapped_payload_fails_signature_check() {
        let tokens = service();
        let alice = tokens.issue(&Principal::new(Uuid::new_v4())).unwrap().token;
        let mallory = tokens.issue(&Principal::new(Uuid::new_v4())).unwrap().token;

        let a: Vec<&str> = alice.split('.').collect();
        let m: Vec<&str> = mallory.split('.').collect();
        let forged = format!("{}.{}.{}", a[0], m[1], a[2]);

        assert_eq!(tokens.verify(&forged), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected() {
        let tokens = service();

        assert_eq!(tokens.verify("123456"), Err(AuthError::InvalidToken));
        assert_eq!(tokens.verify(""), Err(AuthError::InvalidToken));
        assert_eq!(tokens.verify("a.b.c"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn empty_secret_is_refused() {
        let err = TokenService::new("", "iss", "aud", 60, 0).unwrap_err();
        assert_eq!(err, AuthError::Internal);
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let printed = format!("{:?}", service());
        assert!(!printed.contains(SECRET));
        assert!(printed.contains("ttl_seconds"));
    }

    #[test]
    fn oversized_leeway_is_clamped_to_the_ttl() {
        let tokens = TokenService::new(SECRET, "session-guard", "session-guard", 60, u64::MAX)
            .unwrap();
        let principal = Principal::new(Uuid::new_v4());

        let fresh = tokens.issue(&principal).unwrap();
        assert_eq!(tokens.verify(&fresh.token), Ok(principal));

        // 60 s ttl + at most 60 s leeway have passed
        let stale = tokens
            .issue_at(&principal, Utc::now() - ChronoDuration::seconds(60 + 60 + 30))
            .unwrap();
        assert_eq!(tokens.verify(&stale.token), Err(AuthError::InvalidToken));
    }
}
