use serde::{Deserialize, Serialize};

use crate::models::user::UserResponse;

// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Login / register response: token + perfil del usuario
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub usuario: UserResponse,
}
