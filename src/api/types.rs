use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Instruments may be requested with a `fields` subset, so everything but the name is optional.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub instrument: String,
    pub display_name: Option<String>,
    pub pip: Option<String>,
    pub max_trade_units: Option<u64>,
    pub precision: Option<String>,
    pub max_trailing_stop: Option<f64>,
    pub min_trailing_stop: Option<f64>,
    pub margin_rate: Option<f64>,
    pub halted: Option<bool>,
    pub interest_rate: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Instruments {
    pub instruments: Vec<Instrument>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: u64,
    pub account_name: String,
    pub account_currency: String,
    pub margin_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Accounts {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub account_id: u64,
    pub account_name: String,
    pub balance: f64,
    pub unrealized_pl: f64,
    pub realized_pl: f64,
    pub margin_used: f64,
    pub margin_avail: f64,
    pub open_trades: u64,
    pub open_orders: u64,
    pub margin_rate: f64,
    pub account_currency: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub instrument: String,
    pub units: u64,
    pub side: Side,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Positions {
    pub positions: Vec<Position>,
}

/// Quote for one instrument. `time` is RFC 3339 text as sent by the server.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Price {
    pub instrument: String,
    pub time: String,
    pub bid: f64,
    pub ask: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prices {
    pub prices: Vec<Price>,
}

/// OHLC bucket. Bid/ask fields are set for `bidask` candles, mid fields for `midpoint`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Candle {
    pub time: String,
    pub open_bid: Option<f64>,
    pub open_mid: Option<f64>,
    pub open_ask: Option<f64>,
    pub high_bid: Option<f64>,
    pub high_mid: Option<f64>,
    pub high_ask: Option<f64>,
    pub low_bid: Option<f64>,
    pub low_mid: Option<f64>,
    pub low_ask: Option<f64>,
    pub close_bid: Option<f64>,
    pub close_mid: Option<f64>,
    pub close_ask: Option<f64>,
    pub volume: u64,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Candles {
    pub instrument: String,
    pub granularity: String,
    pub candles: Vec<Candle>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Trade {
    pub id: u64,
    pub units: u64,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOpened {
    pub id: u64,
    pub units: u64,
    pub side: Side,
    pub take_profit: Option<f64>,
    pub stop_loss: Option<f64>,
    pub trailing_stop: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub instrument: String,
    pub time: String,
    pub price: f64,
    // The API sends `{}` when nothing was opened or reduced.
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub trade_opened: Option<TradeOpened>,
    #[serde(default)]
    pub trades_closed: Vec<Trade>,
    #[serde(default, deserialize_with = "empty_object_as_none")]
    pub trade_reduced: Option<Trade>,
}

fn empty_object_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Object(map)) if map.is_empty() => Ok(None),
        Some(other) => serde_json::from_value(other)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_response_with_empty_objects() {
        let value = json!({
            "instrument": "AUD_USD",
            "time": "2015-03-05T06:24:22.000000Z",
            "price": 0.77,
            "tradeOpened": {},
            "tradesClosed": [{"id": 176403879, "units": 100, "side": "sell"}],
            "tradeReduced": {}
        });
        let order: NewOrderResponse = serde_json::from_value(value).unwrap();
        assert!(order.trade_opened.is_none());
        assert!(order.trade_reduced.is_none());
        assert_eq!(order.trades_closed.len(), 1);
        assert_eq!(order.trades_closed[0].side, Side::Sell);
    }

    #[test]
    fn test_order_response_with_opened_trade() {
        let value = json!({
            "instrument": "AUD_USD",
            "time": "2015-03-05T06:24:22.000000Z",
            "price": 0.77,
            "tradeOpened": {
                "id": 176403879,
                "units": 100,
                "side": "buy",
                "takeProfit": 0,
                "stopLoss": 0,
                "trailingStop": 0
            },
            "tradesClosed": [],
            "tradeReduced": {}
        });
        let order: NewOrderResponse = serde_json::from_value(value).unwrap();
        let opened = order.trade_opened.unwrap();
        assert_eq!(opened.id, 176403879);
        assert_eq!(opened.side, Side::Buy);
    }

    #[test]
    fn test_partial_instrument() {
        let value = json!({"instrument": "AUD_USD", "displayName": "AUD/USD", "pip": "0.0001"});
        let instrument: Instrument = serde_json::from_value(value).unwrap();
        assert_eq!(instrument.display_name.as_deref(), Some("AUD/USD"));
        assert!(instrument.margin_rate.is_none());
    }

    #[test]
    fn test_midpoint_candle() {
        let value = json!({
            "time": "2015-02-01T16:00:00.000000Z",
            "openMid": 0.7779, "highMid": 0.781, "lowMid": 0.7748, "closeMid": 0.7761,
            "volume": 9251,
            "complete": true
        });
        let candle: Candle = serde_json::from_value(value).unwrap();
        assert_eq!(candle.open_mid, Some(0.7779));
        assert!(candle.open_bid.is_none());
        assert!(candle.complete);
    }
}
