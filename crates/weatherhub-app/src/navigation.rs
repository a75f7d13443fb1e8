use parking_lot::Mutex;
use weatherhub_auth::Session;
use weatherhub_client::SessionListener;
use weatherhub_core::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    Weather,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Home => "/home",
            Route::Weather => "/home/weather",
        }
    }
}

/// Tracks where the application is. Doubles as the client's
/// [`SessionListener`]: an invalidated session sends the user to login.
#[derive(Debug)]
pub struct Navigator {
    history: Mutex<Vec<Route>>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            history: Mutex::new(vec![start]),
        }
    }

    pub fn navigate(&self, route: Route) {
        tracing::debug!("Navigating to {}", route.path());
        self.history.lock().push(route);
    }

    pub fn current(&self) -> Route {
        self.history
            .lock()
            .last()
            .copied()
            .unwrap_or(Route::Login)
    }

    pub fn history(&self) -> Vec<Route> {
        self.history.lock().clone()
    }
}

impl SessionListener for Navigator {
    fn session_invalidated(&self) {
        self.navigate(Route::Login);
    }
}

/// What the nav bar's account button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Login,
    Logout,
}

impl NavAction {
    pub fn label(self) -> &'static str {
        match self {
            NavAction::Login => "Login",
            NavAction::Logout => "Logout",
        }
    }
}

pub struct NavBar;

impl NavBar {
    /// Logout when an identity marker is stored, Login otherwise. The
    /// credential itself is not consulted.
    pub fn action(session: &Session) -> Result<NavAction, StorageError> {
        if session.is_logged_in()? {
            Ok(NavAction::Logout)
        } else {
            Ok(NavAction::Login)
        }
    }
}
