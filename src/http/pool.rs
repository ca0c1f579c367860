use reqwest::Client;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const USER_AGENT: &str = "Rust client for OANDA REST API";

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

pub fn create_http_client(timeout_ms: u64) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .tcp_nodelay(true)
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .pool_max_idle_per_host(10)
        .connect_timeout(CONNECTION_TIMEOUT)
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

    Ok(client)
}
