//! Core library for SkyCast.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and the WeatherAPI.com client
//! - The weather view state machine and its async session driver
//!
//! It is used by the `skycast` binary, which puts an HTTP shell and a
//! terminal front end on top of it.

pub mod config;
pub mod model;
pub mod provider;
pub mod session;
pub mod view;

pub use config::Config;
pub use model::{WeatherSnapshot, celsius_to_fahrenheit, format_two_decimals};
pub use provider::{ProviderError, WeatherProvider, provider_from_config};
pub use session::WeatherSession;
pub use view::{FetchTicket, Rendered, Resolution, ViewState, WeatherView, render};
