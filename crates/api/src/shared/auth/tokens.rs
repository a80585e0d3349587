use agenda_domain::ID;
use agenda_infra::AgendaContext;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    /// The `User` this token was issued to
    sub: String,
    /// Expiry in unix seconds
    exp: usize,
    /// Issued at in unix seconds
    iat: usize,
    kind: TokenKind,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn sign_token(
    user_id: &ID,
    kind: TokenKind,
    now: i64,
    ttl_millis: i64,
    secret: &str,
) -> anyhow::Result<String> {
    let claims = TokenClaims {
        sub: user_id.as_string(),
        exp: ((now + ttl_millis) / 1000) as usize,
        iat: (now / 1000) as usize,
        kind,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Unable to sign token: {}", e))
}

/// Issues a fresh access + refresh token pair for the given user
pub fn create_token_pair(user_id: &ID, ctx: &AgendaContext) -> anyhow::Result<TokenPair> {
    let now = ctx.sys.get_timestamp_millis();
    Ok(TokenPair {
        access_token: sign_token(
            user_id,
            TokenKind::Access,
            now,
            ctx.config.access_token_ttl,
            &ctx.config.jwt_secret,
        )?,
        refresh_token: sign_token(
            user_id,
            TokenKind::Refresh,
            now,
            ctx.config.refresh_token_ttl,
            &ctx.config.jwt_secret,
        )?,
    })
}

/// Extracts the user id from a valid, unexpired token of the
/// expected kind. Access tokens are not accepted where refresh
/// tokens are expected and vice versa.
pub fn decode_token(token: &str, expected_kind: TokenKind, secret: &str) -> Option<ID> {
    let decoded = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    if decoded.claims.kind != expected_kind {
        return None;
    }
    decoded.claims.sub.parse::<ID>().ok()
}
