//! Core library for the `forecast` CLI.
//!
//! This crate defines:
//! - The fixed city → forecast grid table
//! - Issue-time resolution for the short-term forecast service
//! - The relay route list and the fetch loop that walks it
//! - Selection of the current slot from the flat forecast series
//! - The display model and the request pipeline tying it together
//!
//! It is used by `forecast-cli`, but can also be reused by other binaries or services.

pub mod app;
pub mod city;
pub mod config;
pub mod error;
pub mod fetch;
pub mod icon;
pub mod model;
pub mod route;
pub mod select;
pub mod view;
pub mod window;

pub use app::{AppError, WeatherApp};
pub use city::{City, GridCoordinate};
pub use config::Config;
pub use error::{FetchError, RouteError, RouteFailure};
pub use fetch::{ClientSettings, ForecastClient, ForecastSource};
pub use icon::{Condition, WeatherIcon, map_icon};
pub use model::{CurrentConditions, ForecastEntry};
pub use route::{Envelope, TransportRoute, UrlTemplate, default_routes};
pub use select::select_current;
pub use view::{Report, ViewState};
pub use window::{IssueTimeWindow, resolve};
