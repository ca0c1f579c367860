use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::analytics::stats::RequestStats;
use crate::config::{BodyEncoding, ClientConfig};
use crate::error::{AppError, Result};
use crate::http::pool::create_http_client;
use crate::http::request::{QueryParams, RequestDescriptor};
use crate::utils::time::{elapsed_ms, now_instant};

/// Dispatches one request and returns the parsed JSON payload.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<Value>;
}

/// `reqwest`-backed gateway bound to one account token and base URL.
#[derive(Debug, Clone)]
pub struct RequestGateway {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    body_encoding: BodyEncoding,
    stats: Arc<RequestStats>,
}

impl RequestGateway {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.base_url().to_string();
        Url::parse(&base_url)?;

        let client = create_http_client(config.effective_timeout_ms())?;

        Ok(Self {
            client,
            base_url,
            access_token: config.access_token().map(str::to_string),
            body_encoding: config.body_encoding,
            stats: Arc::new(RequestStats::new()),
        })
    }

    pub fn stats(&self) -> &RequestStats {
        &self.stats
    }

    async fn dispatch(
        &self,
        request: &RequestDescriptor,
        token: &str,
        url: &str,
        context: &str,
    ) -> Result<Value> {
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(AUTHORIZATION, format!("Bearer {}", token));

        if !request.query.is_empty() {
            builder = builder.query(request.query.pairs());
        }

        if !request.body.is_empty() {
            builder = match self.body_encoding {
                BodyEncoding::Form => builder.form(&request.body.to_form()),
                BodyEncoding::Json => builder.json(&request.body.to_json()),
            };
        }

        let response = builder.send().await.map_err(|source| AppError::Transport {
            context: context.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|source| AppError::Transport {
            context: context.to_string(),
            source,
        })?;

        classify(status, &body, context)
    }
}

#[async_trait]
impl Gateway for RequestGateway {
    async fn send(&self, request: RequestDescriptor) -> Result<Value> {
        let Some(token) = self.access_token.as_deref() else {
            return Err(AppError::Config(
                "must provide access token to make this API request".into(),
            ));
        };

        let url = format!("{}{}", self.base_url, request.path);
        let context = describe_request(&request.method, &url, &request.query);

        self.stats.record_request();
        let start = now_instant();
        let result = self.dispatch(&request, token, &url, &context).await;
        let latency = elapsed_ms(start);
        self.stats.update_latency(latency);

        match &result {
            Ok(_) => debug!("{} completed in {}ms", context, latency),
            Err(e) => {
                self.stats.record_failure();
                warn!("{} failed in {}ms: {}", context, latency, e);
            }
        }

        result
    }
}

/// Human-readable description of a request, carried by every error it produces.
pub fn describe_request(method: &Method, url: &str, query: &QueryParams) -> String {
    format!("{} request to url {} with params {}", method, url, query.describe())
}

/// Turns a received response into its JSON payload or an error.
///
/// A non-2xx status wins over everything else and keeps the raw body. A 2xx
/// body must be JSON; a JSON object carrying a non-empty `message` is an
/// API-level error even though the status reported success. `null`, `""`,
/// `false` and `0` messages count as absent.
pub fn classify(status: u16, body: &str, context: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        return Err(AppError::HttpStatus {
            status,
            body: body.to_string(),
            context: context.to_string(),
        });
    }

    let json: Value = serde_json::from_str(body).map_err(|source| AppError::Parse {
        body: body.to_string(),
        context: context.to_string(),
        source,
    })?;

    if let Some(message) = json.get("message").filter(|m| is_set(m)) {
        let message = match message {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(AppError::Api {
            status,
            code: json.get("code").and_then(Value::as_i64),
            message,
            more_info: json.get("moreInfo").and_then(Value::as_str).map(str::to_string),
            context: context.to_string(),
        });
    }

    Ok(json)
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
