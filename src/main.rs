use anyhow::{bail, Context};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oanda_rest::{CandleOptions, ClientConfig, OandaClient};

const USAGE: &str = "usage: oanda-cli <accounts | account <id> | positions <id> | instruments <id> | prices <I1,I2> | candles <instrument> [granularity]>";

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::load().context("loading configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Using {} environment at {}", config.environment, config.base_url());

    let client = OandaClient::new(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["accounts"] => print_json(&client.get_accounts().await?)?,
        ["account", id] => print_json(&client.get_account_info(id).await?)?,
        ["positions", id] => print_json(&client.get_open_positions(id).await?)?,
        ["instruments", id] => {
            let none: [&str; 0] = [];
            print_json(&client.get_instruments(id, &none, &none).await?)?
        }
        ["prices", list] => {
            let instruments: Vec<&str> = list.split(',').map(str::trim).collect();
            print_json(&client.get_prices(&instruments, None).await?)?
        }
        ["candles", instrument] => {
            print_json(&client.get_candles(instrument, &CandleOptions::default()).await?)?
        }
        ["candles", instrument, granularity] => {
            let options = CandleOptions::new().granularity(*granularity);
            print_json(&client.get_candles(instrument, &options).await?)?
        }
        _ => bail!(USAGE),
    }

    client.gateway().stats().log_stats();

    Ok(())
}
