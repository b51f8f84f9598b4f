use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;

#[derive(Serialize)]
struct Claims {
    user_id: String,
    admin: bool,
    exp: usize,
}

// Far enough in the future for any test run
const EXP: usize = 10_000_000_000;

pub fn create_token(user_id: &str, admin: bool, secret: &str) -> String {
    let claims = Claims {
        user_id: user_id.into(),
        admin,
        exp: EXP,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Token to be created")
}
