use crate::error::ApiError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, DecodingKey, Validation};
use roamio_reminders_domain::ID;
use roamio_reminders_infra::RoamioContext;
use serde::{Deserialize, Serialize};

/// Claims carried by the api json web tokens. Tokens are issued by the
/// main platform at login, this service only verifies them.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    #[serde(default)]
    pub admin: bool,
    pub exp: usize,
}

/// The verified identity behind a request
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ID,
    pub admin: bool,
}

fn token_from_headers(http_req: &HttpRequest) -> Option<String> {
    http_req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

fn decode_token(token: &str, ctx: &RoamioContext) -> Result<AuthUser, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(ctx.config.api_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| ApiError::Unauthorized(format!("Invalid api token: {}", e)))?;

    let claims = token_data.claims;
    let id = claims
        .user_id
        .parse::<ID>()
        .map_err(|e| ApiError::Unauthorized(format!("Invalid user id in api token: {}", e)))?;

    Ok(AuthUser {
        id,
        admin: claims.admin,
    })
}

/// Protects routes that require an authenticated caller
pub fn protect_route(http_req: &HttpRequest, ctx: &RoamioContext) -> Result<AuthUser, ApiError> {
    match token_from_headers(http_req) {
        Some(token) => decode_token(&token, ctx),
        None => Err(ApiError::Unauthorized(
            "Missing bearer token in the Authorization header".into(),
        )),
    }
}

/// For routes that are open to anonymous callers but tag the created
/// resource with an owner when the caller is authenticated. A missing
/// header is fine, a present but invalid token is not.
pub fn optional_user(
    http_req: &HttpRequest,
    ctx: &RoamioContext,
) -> Result<Option<AuthUser>, ApiError> {
    match token_from_headers(http_req) {
        Some(token) => decode_token(&token, ctx).map(Some),
        None => Ok(None),
    }
}
