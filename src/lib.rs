//! Async client for the OANDA v1 REST trading API.
//!
//! Every endpoint shapes its arguments into a request descriptor and hands it
//! to a [`http::Gateway`], which attaches the bearer token, dispatches the
//! call and classifies the response into a JSON payload or an [`AppError`].

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod utils;

pub use api::types::*;
pub use api::{CandleOptions, OandaClient};
pub use config::{BodyEncoding, ClientConfig, Environment};
pub use error::{AppError, ErrorKind, Result};
