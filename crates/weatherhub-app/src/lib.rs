//! WeatherHub application layer: form checks, account and weather flows,
//! and navigation state on top of the session-aware API client.

pub mod app;
pub mod auth_flow;
pub mod forms;
pub mod navigation;
pub mod notice;
pub mod weather_flow;

pub use app::App;
pub use auth_flow::{AuthFlow, AuthOutcome, Redirect};
pub use forms::{CoordinateForm, LoginForm, RegisterForm, ValidationError};
pub use navigation::{NavAction, NavBar, Navigator, Route};
pub use notice::{Notice, Severity};
pub use weather_flow::{WeatherFlow, WeatherView};
