use serde::{Deserialize, Serialize};

use crate::application::ports::UserSession;

/// Screens reachable from the drawer menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    Home,
    IdentifyPackage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Session check still in flight.
    Unknown,
    SignedOut { error: Option<String> },
    SignedIn(UserSession),
}

/// What should actually be on screen, after auth gating.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    SignIn,
    Home,
    IdentifyPackage,
}

/// Shell composition state: view selection, drawer, auth gate. Glue only;
/// rendering lives with the embedding UI.
#[derive(Debug, Clone)]
pub struct AppShell {
    active_view: ActiveView,
    drawer_open: bool,
    session: SessionState,
}

impl Default for AppShell {
    fn default() -> Self {
        Self {
            active_view: ActiveView::Home,
            drawer_open: false,
            session: SessionState::Unknown,
        }
    }
}

impl AppShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting from the drawer also closes it.
    pub fn select_view(&mut self, view: ActiveView) {
        self.active_view = view;
        self.drawer_open = false;
    }

    pub fn set_drawer(&mut self, open: bool) {
        self.drawer_open = open;
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn set_session(&mut self, session: SessionState) {
        self.session = session;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Authenticated views render only for a signed-in session.
    pub fn screen(&self) -> Screen {
        match &self.session {
            SessionState::Unknown => Screen::Loading,
            SessionState::SignedOut { .. } => Screen::SignIn,
            SessionState::SignedIn(_) => match self.active_view {
                ActiveView::Home => Screen::Home,
                ActiveView::IdentifyPackage => Screen::IdentifyPackage,
            },
        }
    }
}
