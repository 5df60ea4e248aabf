//! Request builder, response classifier and async client for the shorten API.
//!
//! # Design
//! `ShortenerClient` holds an immutable `ClientConfig` and a `Transport`, and
//! carries no mutable state between calls. The work is split the same way as
//! a host-does-IO client: `build_shorten` produces an `HttpRequest`,
//! `parse_shorten` consumes an `HttpResponse`, and `shorten` is nothing more
//! than those two steps around a single `Transport::get`. No retries.

use serde_json::Value;
use tracing::debug;
use url::form_urlencoded::byte_serialize;

use crate::config::ClientConfig;
use crate::error::ShortenError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::status_txt;

#[cfg(feature = "reqwest")]
use crate::http::ReqwestTransport;

/// The only action this client issues.
pub const SHORTEN_ACTION: &str = "shorten";

/// A single, already normalized shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenRequest {
    long_url: String,
    action: &'static str,
}

impl ShortenRequest {
    /// Normalizes `url` with [`fix_url`]. Fails on an empty URL, and on
    /// `"0"`, which the API has always treated as empty.
    pub fn new(url: &str, encode: bool) -> Result<Self, ShortenError> {
        if url.is_empty() || url == "0" {
            return Err(ShortenError::EmptyInput);
        }
        Ok(Self {
            long_url: fix_url(url, encode),
            action: SHORTEN_ACTION,
        })
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn action(&self) -> &str {
        self.action
    }
}

/// Prefixes `http://` unless `url` already starts with `"http"`, then
/// optionally form-urlencodes the result.
///
/// Encoding follows classic `application/x-www-form-urlencoded` rules: ASCII
/// alphanumerics and `-_.` are kept, space becomes `+`, everything else is
/// percent-escaped. The prefix check is literal, so `"httpbin.org"` is left
/// alone.
pub fn fix_url(url: &str, encode: bool) -> String {
    let url = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("http://{url}")
    };

    if encode {
        form_urlencode(&url)
    } else {
        url
    }
}

fn form_urlencode(input: &str) -> String {
    // byte_serialize leaves '*' as-is; the API expects it escaped.
    byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
}

/// Decodes a response body and classifies its envelope.
///
/// A body without a `status_code` (or with a `null` one) is returned
/// unchanged. Any other `status_code` that is not a number in `200..300`,
/// numeric strings included, becomes an error keyed on `status_txt`.
pub fn handle_response(body: &str) -> Result<Value, ShortenError> {
    let data: Value = serde_json::from_str(body)?;

    if matches!(data.get("status_code"), None | Some(Value::Null)) {
        return Ok(data);
    }
    let status_code = &data["status_code"];
    if is_success_code(status_code) {
        return Ok(data);
    }

    let text = match data.get("status_txt") {
        Some(Value::String(text)) => text.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    debug!(%status_code, status_txt = %text, "shorten API returned an error envelope");

    Err(match text.as_str() {
        status_txt::RATE_LIMIT_EXCEEDED => ShortenError::RateLimit,
        status_txt::INVALID_LOGIN => ShortenError::Auth,
        _ => ShortenError::Api(text),
    })
}

fn is_success_code(code: &Value) -> bool {
    let numeric = match code {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    numeric.is_some_and(|code| (200.0..300.0).contains(&code))
}

/// Client for the shorten API.
#[derive(Debug, Clone)]
pub struct ShortenerClient<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "reqwest")]
impl ShortenerClient<ReqwestTransport> {
    /// Builds a client backed by a lazily created `reqwest::Client`.
    pub fn new(config: ClientConfig) -> Result<Self, ShortenError> {
        Self::with_transport(config, ReqwestTransport::new())
    }
}

impl<T> ShortenerClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ShortenError> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `https://{host}/{version}/{action}?access_token=..&format=json&longUrl={url}`
    ///
    /// `url` is inserted verbatim; pass it through [`fix_url`] first.
    pub fn build_request_url(&self, url: &str, action: &str) -> String {
        format!(
            "https://{}/{}/{action}?access_token={}&format=json&longUrl={url}",
            self.config.host, self.config.api_version, self.config.access_token
        )
    }

    pub fn build_shorten(&self, request: &ShortenRequest) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.build_request_url(request.long_url(), request.action()),
            headers: Vec::new(),
        }
    }

    /// Classifies the body and extracts `data.url`.
    pub fn parse_shorten(&self, response: HttpResponse) -> Result<String, ShortenError> {
        let data = handle_response(&response.body)?;
        data.pointer("/data/url")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(ShortenError::MissingShortUrl)
    }
}

impl<T: Transport> ShortenerClient<T> {
    /// Shortens `url`, form-urlencoding it first.
    pub async fn shorten(&self, url: &str) -> Result<String, ShortenError> {
        self.shorten_with(url, true).await
    }

    /// Shortens `url`; with `encode = false` the long URL is sent as-is
    /// (after the `http://` fix-up).
    pub async fn shorten_with(&self, url: &str, encode: bool) -> Result<String, ShortenError> {
        let request = ShortenRequest::new(url, encode)?;
        let http_request = self.build_shorten(&request);

        debug!(
            host = %self.config.host,
            api_version = %self.config.api_version,
            action = request.action(),
            "issuing shorten request"
        );
        let response = self
            .transport
            .get(&http_request.url)
            .await
            .map_err(ShortenError::transport)?;

        self.parse_shorten(response)
    }
}
