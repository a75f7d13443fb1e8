use std::sync::Arc;

use anyhow::{Context, Result};
use weatherhub_auth::{KeyValueStore, Session};
use weatherhub_client::ApiClient;
use weatherhub_core::Config;

use crate::auth_flow::AuthFlow;
use crate::navigation::{NavAction, NavBar, Navigator, Route};
use crate::weather_flow::WeatherFlow;

/// Wires session storage, the API client and the screen flows together.
pub struct App {
    session: Session,
    navigator: Arc<Navigator>,
    auth: AuthFlow,
    weather: WeatherFlow,
}

impl App {
    /// Build the application against `base_url`, starting on `start`.
    pub fn new(
        config: &Config,
        base_url: &str,
        store: Arc<dyn KeyValueStore>,
        start: Route,
    ) -> Result<Self> {
        let session = Session::new(store);
        let navigator = Arc::new(Navigator::new(start));

        let client = ApiClient::new(base_url, session.clone())
            .with_context(|| format!("Failed to create API client for {}", base_url))?
            .with_listener(navigator.clone());

        tracing::debug!("API client ready for {}", client.base_url());

        Ok(Self {
            session,
            navigator,
            auth: AuthFlow::new(client.clone(), &config.ui),
            weather: WeatherFlow::new(client, &config.ui),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn auth(&self) -> &AuthFlow {
        &self.auth
    }

    pub fn weather(&self) -> &WeatherFlow {
        &self.weather
    }

    pub fn nav_action(&self) -> Result<NavAction> {
        Ok(NavBar::action(&self.session)?)
    }
}
