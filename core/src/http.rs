//! HTTP transport types and the injectable [`Transport`] seam.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`
//! and parses an `HttpResponse` without touching the network; whatever sits
//! between the two is a `Transport`. Callers can either drive the round-trip
//! themselves (host-does-IO) or hand a `Transport` to `ShortenerClient` and
//! await `shorten`.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved into
//! spawned tasks or other threads without lifetime concerns.

use std::future::Future;
use std::sync::Arc;

/// HTTP method for a request. The shorten API only ever issues GETs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
///
/// Built by `ShortenerClient::build_shorten`. The token travels in the query
/// string, so `url` is sensitive and should not be logged verbatim.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Classification only looks at `body`; the remote API reports failures in
/// the JSON envelope rather than through the HTTP status line.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Something that can perform an asynchronous HTTP GET.
pub trait Transport: Send + Sync {
    /// The error type returned when the request cannot be completed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issues a GET to `url` and resolves to the full response.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

impl<T: Transport> Transport for &T {
    type Error = T::Error;

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        (**self).get(url)
    }
}

impl<T: Transport> Transport for Arc<T> {
    type Error = T::Error;

    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::sync::OnceLock;

    use super::{HttpResponse, Transport};

    /// Default transport backed by `reqwest`.
    ///
    /// The underlying `reqwest::Client` is only built on the first request,
    /// so constructing a `ShortenerClient` never allocates a connection pool.
    #[derive(Debug, Default)]
    pub struct ReqwestTransport {
        client: OnceLock<reqwest::Client>,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Uses an already configured `reqwest::Client`.
        pub fn with_client(client: reqwest::Client) -> Self {
            Self {
                client: OnceLock::from(client),
            }
        }

        fn client(&self) -> &reqwest::Client {
            self.client.get_or_init(reqwest::Client::new)
        }
    }

    impl Transport for ReqwestTransport {
        type Error = reqwest::Error;

        async fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
            let response = self.client().get(url).send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
