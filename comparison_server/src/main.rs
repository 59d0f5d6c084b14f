// src/main.rs

use market_data::client::MarketDataClient;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let bind = env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    let provider_url =
        env::var("PROVIDER_URL").unwrap_or_else(|_| "https://www.alphavantage.co".to_string());
    let api_key = env::var("PROVIDER_API_KEY").unwrap_or_else(|_| "demo".to_string());

    log::info!("Starting dividend comparison server at http://{}", bind);

    let market = MarketDataClient::new(provider_url, api_key);
    comparison_server::run_server(&bind, market).await
}
