use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const DEFAULT_TOKEN: &str = "test-token";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub status_code: u16,
    pub status_txt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ShortenData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenData {
    pub url: String,
    pub hash: String,
    pub global_hash: String,
    pub long_url: String,
    pub new_hash: u8,
}

#[derive(Deserialize)]
pub struct ShortenParams {
    pub access_token: Option<String>,
    pub format: Option<String>,
    #[serde(rename = "longUrl")]
    pub long_url: Option<String>,
}

/// Behaviour knobs for the mock API.
#[derive(Clone, Debug)]
pub struct MockConfig {
    /// Tokens accepted as valid logins.
    pub tokens: HashSet<String>,
    /// Successful shortens allowed per token before `RATE_LIMIT_EXCEEDED`.
    pub quota: Option<u32>,
    /// Domain used to build short links.
    pub short_domain: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            tokens: HashSet::from([DEFAULT_TOKEN.to_string()]),
            quota: None,
            short_domain: "bit.ly".to_string(),
        }
    }
}

#[derive(Default)]
struct Store {
    hashes: HashMap<String, String>,
    usage: HashMap<String, u32>,
    next_id: u64,
}

#[derive(Clone)]
struct AppState {
    config: Arc<MockConfig>,
    store: Arc<RwLock<Store>>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(RwLock::new(Store::default())),
    };
    Router::new()
        .route("/{version}/shorten", get(shorten))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error(status_code: u16, status_txt: &str) -> Json<Envelope> {
    Json(Envelope {
        status_code,
        status_txt: status_txt.to_string(),
        data: None,
    })
}

fn is_valid_uri(long_url: &str) -> bool {
    let rest = long_url
        .strip_prefix("http://")
        .or_else(|| long_url.strip_prefix("https://"));
    matches!(rest, Some(rest) if !rest.is_empty() && !rest.starts_with('/'))
}

/// Base62 rendering of the link counter.
fn encode_hash(mut id: u64) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut out = Vec::new();
    loop {
        out.push(ALPHABET[(id % 62) as usize]);
        id /= 62;
        if id == 0 {
            break;
        }
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// The real API always answers HTTP 200 and reports failures in the envelope.
async fn shorten(
    State(state): State<AppState>,
    Path(version): Path<String>,
    Query(params): Query<ShortenParams>,
) -> Json<Envelope> {
    let token = params.access_token.unwrap_or_default();
    if !state.config.tokens.contains(&token) {
        tracing::info!(%version, "rejecting unknown access token");
        return error(500, "INVALID_LOGIN");
    }
    if params.format.as_deref().is_some_and(|f| f != "json") {
        return error(500, "INVALID_FORMAT");
    }
    let long_url = match params.long_url {
        Some(url) if !url.is_empty() => url,
        _ => return error(500, "MISSING_ARG_LONGURL"),
    };
    if !is_valid_uri(&long_url) {
        return error(500, "INVALID_URI");
    }

    let mut store = state.store.write().await;
    let used = store.usage.entry(token).or_default();
    if state.config.quota.is_some_and(|quota| *used >= quota) {
        return error(403, "RATE_LIMIT_EXCEEDED");
    }
    *used += 1;

    let (hash, new_hash) = if let Some(hash) = store.hashes.get(&long_url).cloned() {
        (hash, 0)
    } else {
        store.next_id += 1;
        let hash = encode_hash(store.next_id);
        store.hashes.insert(long_url.clone(), hash.clone());
        (hash, 1)
    };
    tracing::debug!(%long_url, %hash, new_hash, "shortened");

    Json(Envelope {
        status_code: 200,
        status_txt: "OK".to_string(),
        data: Some(ShortenData {
            url: format!("http://{}/{hash}", state.config.short_domain),
            global_hash: hash.clone(),
            hash,
            long_url,
            new_hash,
        }),
    })
}
