use serde::{Deserialize, Serialize};

/// Authenticated identity performing a mutating action. Issued by the auth
/// collaborator; this service only verifies and consumes it.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub aud: String,
    pub exp: usize,
}
