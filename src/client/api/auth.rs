//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::AuthResponse;
use crate::error::Result;

/// Authentication operations for the care service API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange email and password for a bearer credential
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthResponse>;
}
