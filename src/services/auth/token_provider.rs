use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::JwtConfig;
use crate::services::auth::principal::{Principal, Role};

const BEARER_TYPE: &str = "bearer";
const ACCESS_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 2; // 2 hours
const REFRESH_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24 * 7; // 7 days
const ACCESS_TOKEN_TYP: &str = "JWT";
const REFRESH_TOKEN_TYP: &str = "refresh+jwt";

/// Why a token was rejected.
///
/// The JWT filter branches on the variant to pick the request-level error code,
/// so each failure class must stay distinct.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token or invalid signature")]
    Malformed,
    #[error("token expired")]
    Expired,
    #[error("unsupported token")]
    Unsupported,
    #[error("invalid token")]
    Invalid,
    #[error("token carries no authorities")]
    MissingAuthorities,
    #[error("failed to sign token")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_) => TokenError::Malformed,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => TokenError::Unsupported,
            _ => TokenError::Invalid,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    #[serde(default)]
    alg: Option<String>,
}

/// `true` when the header decodes but names no algorithm we know, `"none"`
/// included. jsonwebtoken reports those as JSON errors.
fn names_unknown_algorithm(token: &str) -> bool {
    let Some(segment) = token.split('.').next() else {
        return false;
    };
    let Ok(bytes) = URL_SAFE_NO_PAD.decode(segment) else {
        return false;
    };
    let Ok(header) = serde_json::from_slice::<RawHeader>(&bytes) else {
        return false;
    };
    match header.alg {
        Some(alg) => alg.parse::<Algorithm>().is_err(),
        None => true,
    }
}

#[derive(Debug, Serialize)]
struct AccessTokenClaims<'a> {
    sub: String,
    #[serde(rename = "auth")]
    authorities: String,
    #[serde(rename = "memberUsername")]
    member_username: &'a str,
    #[serde(rename = "memberNickname")]
    member_nickname: &'a str,
    exp: i64,
}

#[derive(Debug, Serialize)]
struct RefreshTokenClaims {
    exp: i64,
}

/// Claims as read back from any token we signed. Every field is optional so
/// that refresh tokens parse too; presence is checked by the caller.
#[derive(Debug, Deserialize)]
struct ParsedClaims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(rename = "auth", default)]
    authorities: Option<String>,
    #[serde(rename = "memberUsername", default)]
    member_username: Option<String>,
    #[serde(rename = "memberNickname", default)]
    member_nickname: Option<String>,
}

/// Access/refresh pair handed out at signup and login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundle {
    pub grant_type: &'static str,
    pub access_token: String,
    /// Access token expiry, epoch milliseconds.
    pub access_token_expires_in: i64,
    pub refresh_token: String,
    pub username: String,
}

/// HS512 token issuer/verifier.
///
/// Immutable after construction; share it as `Arc<TokenProvider>`.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    // signature + exp
    validation: Validation,
    // signature only; expired tokens still yield their claims
    claims_validation: Validation,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenProvider")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenProvider {
    pub fn new(config: &JwtConfig) -> Self {
        // A token without `exp` never expires.
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let mut claims_validation = Validation::new(Algorithm::HS512);
        claims_validation.validate_exp = false;
        claims_validation.required_spec_claims.remove("exp");

        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
            claims_validation,
        }
    }

    pub fn issue_tokens(&self, principal: &Principal) -> Result<TokenBundle, TokenError> {
        self.issue_tokens_at(principal, Utc::now())
    }

    pub(crate) fn issue_tokens_at(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<TokenBundle, TokenError> {
        let now = now.timestamp_millis();
        let access_expires_at = now + ACCESS_TOKEN_TTL_SECONDS * 1000;
        let refresh_expires_at = now + REFRESH_TOKEN_TTL_SECONDS * 1000;

        let access_claims = AccessTokenClaims {
            sub: principal.id.to_string(),
            authorities: principal.authorities.join(","),
            member_username: &principal.username,
            member_nickname: &principal.nickname,
            exp: access_expires_at / 1000,
        };
        let access_token = self.sign(ACCESS_TOKEN_TYP, &access_claims)?;

        let refresh_claims = RefreshTokenClaims {
            exp: refresh_expires_at / 1000,
        };
        let refresh_token = self.sign(REFRESH_TOKEN_TYP, &refresh_claims)?;

        Ok(TokenBundle {
            grant_type: BEARER_TYPE,
            access_token,
            access_token_expires_in: access_expires_at,
            refresh_token,
            username: principal.username.clone(),
        })
    }

    /// Verify signature, structure and expiry.
    pub fn validate(&self, token: &str) -> Result<bool, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Invalid);
        }

        self.decode(token, &self.validation)
            .map(|_| true)
            .inspect_err(|e| debug!(error = %e, "token validation failed"))
    }

    /// Rebuild the principal from an access token's claims.
    ///
    /// Expiry is not enforced here: an expired but correctly signed token still
    /// yields its principal. Only `validate` rejects on time.
    pub fn authenticate(&self, access_token: &str) -> Result<Principal, TokenError> {
        let claims = self.parse_claims(access_token)?;

        let raw_authorities = claims
            .authorities
            .ok_or(TokenError::MissingAuthorities)?;

        let authorities = raw_authorities
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>();

        // Whole-claim comparison, not a membership test.
        let role = if raw_authorities == Role::User.as_authority() {
            Role::User
        } else {
            Role::Admin
        };

        let id = claims
            .sub
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .ok_or(TokenError::Malformed)?;
        let username = claims.member_username.ok_or(TokenError::Malformed)?;
        let nickname = claims.member_nickname.ok_or(TokenError::Malformed)?;

        Ok(Principal {
            id,
            username,
            nickname,
            role,
            authorities,
        })
    }

    fn parse_claims(&self, token: &str) -> Result<ParsedClaims, TokenError> {
        self.decode(token, &self.claims_validation)
    }

    fn decode(&self, token: &str, validation: &Validation) -> Result<ParsedClaims, TokenError> {
        if names_unknown_algorithm(token) {
            return Err(TokenError::Unsupported);
        }
        let data = jsonwebtoken::decode::<ParsedClaims>(token, &self.decoding_key, validation)?;
        Ok(data.claims)
    }

    fn sign<T: Serialize>(&self, typ: &str, claims: &T) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS512);
        header.typ = Some(typ.to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Signing
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::{Value, json};

    fn provider_with(byte: u8) -> TokenProvider {
        let config = JwtConfig::from_secret(vec![byte; 64]).unwrap();
        TokenProvider::new(&config)
    }

    fn member(id: i64, username: &str, nickname: &str, authorities: &[&str]) -> Principal {
        Principal {
            id,
            username: username.to_string(),
            nickname: nickname.to_string(),
            role: Role::User,
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn segment(json: &Value) -> String {
        URL_SAFE_NO_PAD.encode(json.to_string())
    }

    fn payload(token: &str) -> Value {
        let body = token.split('.').nth(1).unwrap();
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(body).unwrap()).unwrap()
    }

    #[test]
    fn issued_access_token_round_trips_identity() {
        let provider = provider_with(1);
        let tokens = provider
            .issue_tokens(&member(7, "a", "b", &["ROLE_USER"]))
            .unwrap();

        assert_eq!(tokens.grant_type, "bearer");
        assert_eq!(tokens.username, "a");
        assert!(provider.validate(&tokens.access_token).unwrap());

        let principal = provider.authenticate(&tokens.access_token).unwrap();
        assert_eq!(principal.id, 7);
        assert_eq!(principal.username, "a");
        assert_eq!(principal.nickname, "b");
        assert_eq!(principal.role, Role::User);
        assert_eq!(principal.authorities, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn access_token_expires_two_hours_after_issuance() {
        let provider = provider_with(1);
        let now = Utc::now();
        let tokens = provider
            .issue_tokens_at(&member(1, "u", "n", &["ROLE_USER"]), now)
            .unwrap();

        let expected = (now + Duration::hours(2)).timestamp_millis();
        assert_eq!(tokens.access_token_expires_in, expected);
        assert_eq!(
            payload(&tokens.access_token)["exp"],
            json!(now.timestamp() + 2 * 60 * 60)
        );
    }

    #[test]
    fn refresh_token_carries_only_a_seven_day_expiry() {
        let provider = provider_with(1);
        let now = Utc::now();
        let tokens = provider
            .issue_tokens_at(&member(1, "u", "n", &["ROLE_USER"]), now)
            .unwrap();

        assert_eq!(
            payload(&tokens.refresh_token),
            json!({ "exp": now.timestamp() + 7 * 24 * 60 * 60 })
        );
    }

    #[test]
    fn refresh_token_cannot_authenticate() {
        let provider = provider_with(1);
        let tokens = provider
            .issue_tokens(&member(7, "a", "b", &["ROLE_USER"]))
            .unwrap();

        assert!(provider.validate(&tokens.refresh_token).unwrap());
        assert!(matches!(
            provider.authenticate(&tokens.refresh_token),
            Err(TokenError::MissingAuthorities)
        ));

        let header = jsonwebtoken::decode_header(&tokens.refresh_token).unwrap();
        assert_eq!(header.alg, Algorithm::HS512);
        assert_eq!(header.typ.as_deref(), Some(REFRESH_TOKEN_TYP));
    }

    #[test]
    fn expired_token_fails_validation_but_still_authenticates() {
        let provider = provider_with(1);
        let issued_at = Utc::now() - Duration::hours(3);
        let tokens = provider
            .issue_tokens_at(&member(42, "old", "timer", &["ROLE_USER"]), issued_at)
            .unwrap();

        assert!(matches!(
            provider.validate(&tokens.access_token),
            Err(TokenError::Expired)
        ));

        let principal = provider.authenticate(&tokens.access_token).unwrap();
        assert_eq!(principal.id, 42);
        assert_eq!(principal.username, "old");
        assert_eq!(principal.nickname, "timer");
    }

    #[test]
    fn token_signed_with_another_key_is_malformed() {
        let issuer = provider_with(1);
        let verifier = provider_with(2);
        let tokens = issuer
            .issue_tokens(&member(1, "u", "n", &["ROLE_USER"]))
            .unwrap();

        assert!(matches!(
            verifier.validate(&tokens.access_token),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            verifier.authenticate(&tokens.access_token),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn garbage_and_empty_tokens() {
        let provider = provider_with(1);
        assert!(matches!(
            provider.validate("not-a-jwt"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(provider.validate(""), Err(TokenError::Invalid)));
        assert!(matches!(provider.validate("   "), Err(TokenError::Invalid)));
    }

    #[test]
    fn other_algorithm_is_unsupported() {
        let provider = provider_with(1);
        let claims = RefreshTokenClaims {
            exp: Utc::now().timestamp() + 60,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&[1u8; 64]),
        )
        .unwrap();

        assert!(matches!(
            provider.validate(&token),
            Err(TokenError::Unsupported)
        ));
    }

    #[test]
    fn unsigned_token_is_unsupported() {
        let provider = provider_with(1);
        let token = format!(
            "{}.{}.",
            segment(&json!({ "alg": "none", "typ": "JWT" })),
            segment(&json!({
                "sub": "1",
                "auth": "ROLE_ADMIN",
                "memberUsername": "u",
                "memberNickname": "n",
                "exp": Utc::now().timestamp() + 60
            })),
        );

        assert!(matches!(
            provider.validate(&token),
            Err(TokenError::Unsupported)
        ));
        assert!(matches!(
            provider.authenticate(&token),
            Err(TokenError::Unsupported)
        ));
    }

    #[test]
    fn token_without_expiry_never_expires() {
        let provider = provider_with(1);
        let claims = json!({
            "sub": "9",
            "auth": "ROLE_USER",
            "memberUsername": "u",
            "memberNickname": "n"
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(&[1u8; 64]),
        )
        .unwrap();

        assert!(provider.validate(&token).unwrap());
        assert_eq!(provider.authenticate(&token).unwrap().id, 9);
    }

    #[test]
    fn role_is_user_only_for_exact_role_user_claim() {
        let provider = provider_with(1);

        let cases: [(&[&str], Role); 4] = [
            (&["ROLE_USER"], Role::User),
            (&["ROLE_ADMIN"], Role::Admin),
            (&["ROLE_USER", "ROLE_ADMIN"], Role::Admin),
            (&["ROLE_ADMIN", "ROLE_USER"], Role::Admin),
        ];

        for (authorities, expected) in cases {
            let tokens = provider
                .issue_tokens(&member(3, "u", "n", authorities))
                .unwrap();
            let principal = provider.authenticate(&tokens.access_token).unwrap();
            assert_eq!(principal.role, expected, "authorities: {:?}", authorities);
            assert_eq!(principal.authorities.len(), authorities.len());
        }
    }
}
