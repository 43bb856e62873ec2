use std::sync::Arc;

use tracing::warn;

use crate::application::ports::SessionGateway;
use crate::presentation::view::SessionState;

/// Resolves the auth boundary for the shell. Auth mechanics stay behind the
/// gateway; a failed check degrades to signed-out with a message.
pub struct SessionHandler {
    gateway: Arc<dyn SessionGateway>,
}

impl SessionHandler {
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        Self { gateway }
    }

    pub async fn resolve(&self) -> SessionState {
        match self.gateway.current_user().await {
            Ok(Some(user)) => SessionState::SignedIn(user),
            Ok(None) => SessionState::SignedOut { error: None },
            Err(err) => {
                warn!(error = %err, "session check failed");
                SessionState::SignedOut {
                    error: Some("Authentication check failed.".to_string()),
                }
            }
        }
    }

    pub fn login_url(&self) -> String {
        self.gateway.login_url()
    }

    pub fn logout_url(&self) -> String {
        self.gateway.logout_url()
    }
}
