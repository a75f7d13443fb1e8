//! Session-aware HTTP client for the WeatherHub API.
//!
//! Wraps the `/auth/*` and `/weather` endpoints. Callers never touch headers
//! or session storage: the bearer credential is attached on every send and
//! dropped when the server answers 401.

pub mod client;
pub mod error;
pub mod listener;
pub mod types;

pub use client::ApiClient;
pub use error::ClientError;
pub use listener::{NoopListener, SessionListener};
pub use types::{Ack, ApiErrorBody, ApiResult, AuthToken, Coordinates, WeatherReport};
