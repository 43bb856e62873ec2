use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub name: String,
    pub email: String,
}

/// Authentication/session boundary. The mechanics live behind the remote
/// service; this crate only needs to know who is signed in.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// `None` when the session cookie is missing or expired.
    async fn current_user(&self) -> Result<Option<UserSession>, AppError>;

    fn login_url(&self) -> String;

    fn logout_url(&self) -> String;
}
