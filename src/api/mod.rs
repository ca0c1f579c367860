pub mod candles;
pub mod client;
pub mod types;

pub use candles::CandleOptions;
pub use client::OandaClient;
