//! Authentication models

use serde::{Deserialize, Serialize};

/// Credential exchange request body for `POST auth/authenticate`
#[derive(Debug, Clone, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Credential exchange response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer credential (three-segment token)
    pub token: String,
}
