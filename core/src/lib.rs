//! Async client core for a URL-shortening API (Bitly v3 wire format).
//!
//! # Overview
//! `ShortenerClient::shorten` normalizes a long URL, issues one GET through an
//! injected [`Transport`], and turns the JSON envelope into either the short
//! URL or a typed [`ShortenError`].
//!
//! # Design
//! - The client is stateless apart from its immutable `ClientConfig` and
//!   transport handle; concurrent calls never coordinate.
//! - Request building (`build_shorten`) and response parsing
//!   (`parse_shorten`) are pure, so hosts can also drive the I/O themselves.
//! - With the default `reqwest` feature, `ShortenerClient::new` wires in
//!   `ReqwestTransport`; tests and embedders inject their own.
//! - The crate only emits `tracing` events and never installs a subscriber.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{fix_url, handle_response, ShortenRequest, ShortenerClient, SHORTEN_ACTION};
pub use config::{ClientConfig, DEFAULT_HOST, V3};
pub use error::{BoxError, ShortenError};
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use types::{status_txt, Envelope, ShortenData};
