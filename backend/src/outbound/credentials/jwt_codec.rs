//! HS256 JWT `TokenCodec`.
//!
//! Expiry is checked against the injected clock rather than the system time
//! so tests can move time forward. No leeway is applied.

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialError, TokenCodec};
use crate::domain::{AccessToken, Claims, EmailAddress, UserId};

/// Signs and validates access tokens with a shared secret.
pub struct JwtTokenCodec {
    secret: Zeroizing<Vec<u8>>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenCodec").finish_non_exhaustive()
    }
}

impl JwtTokenCodec {
    pub fn new(secret: impl Into<Vec<u8>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        validation
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId, email: &EmailAddress) -> Result<AccessToken, CredentialError> {
        if self.secret.is_empty() {
            return Err(CredentialError::signing("signing key is empty"));
        }
        let claims = Claims::issue(user_id.clone(), email.clone(), self.clock.utc());
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map(AccessToken::new)
        .map_err(|err| CredentialError::signing(err.to_string()))
    }

    fn validate(&self, token: &str) -> Result<Claims, CredentialError> {
        if self.secret.is_empty() {
            return Err(CredentialError::InvalidToken);
        }
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Self::validation(),
        )
        .map_err(|error| {
            debug!(%error, "token rejected");
            CredentialError::InvalidToken
        })?;

        let claims = data.claims;
        if claims.exp <= self.clock.utc().timestamp() {
            debug!(exp = claims.exp, "token expired");
            return Err(CredentialError::InvalidToken);
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use mockable::MockClock;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::TOKEN_LIFETIME_SECS;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn clock_at(now: DateTime<Utc>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock.expect_utc().return_const(now);
        Arc::new(clock)
    }

    fn codec_at(now: DateTime<Utc>) -> JwtTokenCodec {
        JwtTokenCodec::new("test-secret", clock_at(now))
    }

    #[fixture]
    fn identity() -> (UserId, EmailAddress) {
        (
            UserId::random(),
            EmailAddress::new("ada@example.com").expect("valid email"),
        )
    }

    #[rstest]
    fn issued_token_validates_to_same_claims(identity: (UserId, EmailAddress)) {
        let (user_id, email) = identity;
        let codec = codec_at(issued_at());
        let token = codec.issue(&user_id, &email).expect("issue succeeds");
        let claims = codec.validate(token.as_str()).expect("validates");

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, email);
        assert_eq!(claims.sub, "ada@example.com");
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
    }

    #[rstest]
    #[case(TOKEN_LIFETIME_SECS - 1, true)]
    #[case(TOKEN_LIFETIME_SECS, false)]
    #[case(TOKEN_LIFETIME_SECS + 60, false)]
    fn expiry_has_no_leeway(
        identity: (UserId, EmailAddress),
        #[case] elapsed_secs: i64,
        #[case] valid: bool,
    ) {
        let (user_id, email) = identity;
        let token = codec_at(issued_at())
            .issue(&user_id, &email)
            .expect("issue succeeds");
        let later = codec_at(issued_at() + chrono::Duration::seconds(elapsed_secs));
        assert_eq!(later.validate(token.as_str()).is_ok(), valid);
    }

    #[rstest]
    fn wrong_secret_is_rejected(identity: (UserId, EmailAddress)) {
        let (user_id, email) = identity;
        let token = codec_at(issued_at())
            .issue(&user_id, &email)
            .expect("issue succeeds");
        let other = JwtTokenCodec::new("other-secret", clock_at(issued_at()));
        assert_eq!(
            other.validate(token.as_str()),
            Err(CredentialError::InvalidToken)
        );
    }

    #[rstest]
    #[case("")]
    #[case("not.a.token")]
    #[case("garbage")]
    fn malformed_tokens_are_rejected(#[case] token: &str) {
        assert_eq!(
            codec_at(issued_at()).validate(token),
            Err(CredentialError::InvalidToken)
        );
    }

    #[rstest]
    fn empty_secret_cannot_sign(identity: (UserId, EmailAddress)) {
        let (user_id, email) = identity;
        let codec = JwtTokenCodec::new(Vec::new(), clock_at(issued_at()));
        assert!(matches!(
            codec.issue(&user_id, &email),
            Err(CredentialError::Signing { .. })
        ));
    }
}
