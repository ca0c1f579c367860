use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::api::candles::CandleOptions;
use crate::api::types::{
    AccountInfo, Accounts, Candles, Instruments, NewOrderResponse, Positions, Price, Prices, Side,
};
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::http::gateway::{Gateway, RequestGateway};
use crate::http::request::{BodyParams, QueryParams, RequestDescriptor};

/// Endpoint adapters for the OANDA v1 REST API.
///
/// Each method only shapes its arguments into a [`RequestDescriptor`] and
/// decodes the payload returned by the gateway.
#[derive(Debug, Clone)]
pub struct OandaClient<G = RequestGateway> {
    gateway: G,
}

impl OandaClient<RequestGateway> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_gateway(RequestGateway::new(config)?))
    }
}

impl<G: Gateway> OandaClient<G> {
    pub fn with_gateway(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn call<T: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<T> {
        let path = request.path.clone();
        let value = self.gateway.send(request).await?;
        decode(&path, value)
    }

    /// `instruments` and `fields` are sent comma-joined; empty slices are omitted.
    pub async fn get_instruments<I: AsRef<str>, F: AsRef<str>>(
        &self,
        account_id: &str,
        instruments: &[I],
        fields: &[F],
    ) -> Result<Instruments> {
        let mut query = QueryParams::new();
        query
            .push("accountId", account_id)
            .push_list("instruments", instruments)
            .push_list("fields", fields);

        self.call(RequestDescriptor::get("/v1/instruments").with_query(query)).await
    }

    pub async fn get_prices<S: AsRef<str>>(
        &self,
        instruments: &[S],
        since: Option<DateTime<Utc>>,
    ) -> Result<Prices> {
        let mut query = QueryParams::new();
        query
            .push_list("instruments", instruments)
            .push_time("since", since.as_ref());

        self.call(RequestDescriptor::get("/v1/prices").with_query(query)).await
    }

    /// First quote of the prices response, `None` if the server returned no quotes.
    pub async fn get_price(
        &self,
        instrument: &str,
        since: Option<DateTime<Utc>>,
    ) -> Result<Option<Price>> {
        let prices = self.get_prices(&[instrument], since).await?;
        Ok(prices.prices.into_iter().next())
    }

    pub async fn get_candles(&self, instrument: &str, options: &CandleOptions) -> Result<Candles> {
        let query = options.to_query(instrument);
        self.call(RequestDescriptor::get("/v1/candles").with_query(query)).await
    }

    pub async fn get_accounts(&self) -> Result<Accounts> {
        self.call(RequestDescriptor::get("/v1/accounts")).await
    }

    pub async fn get_account_info(&self, account_id: &str) -> Result<AccountInfo> {
        self.call(RequestDescriptor::get(account_path(account_id, ""))).await
    }

    pub async fn get_open_positions(&self, account_id: &str) -> Result<Positions> {
        self.call(RequestDescriptor::get(account_path(account_id, "/positions"))).await
    }

    pub async fn create_market_order(
        &self,
        account_id: &str,
        instrument: &str,
        side: Side,
        units: u64,
    ) -> Result<NewOrderResponse> {
        let mut body = BodyParams::new();
        body.push("instrument", instrument)
            .push("side", side.as_str())
            .push("units", units)
            .push("type", "market");

        debug!("Placing market order: {} {} {} on account {}", side, units, instrument, account_id);

        let request = RequestDescriptor::post(account_path(account_id, "/orders")).with_body(body);
        self.call(request).await
    }
}

/// `/v1/accounts/{id}{suffix}` with the id percent-encoded as one path segment.
fn account_path(account_id: &str, suffix: &str) -> String {
    format!("/v1/accounts/{}{}", urlencoding::encode(account_id), suffix)
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    // Keep the payload text for the error; only paid for on failure.
    T::deserialize(&value).map_err(|source| AppError::Parse {
        body: value.to_string(),
        context: format!("decoding response of {}", path),
        source,
    })
}
