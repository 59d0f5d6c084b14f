// src/lib.rs

pub mod companies;
pub mod handlers;
pub mod models;
pub mod returns;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use handlers::{company_list, dividend_comparison, health_check, AppState};
use market_data::client::MarketDataClient;

pub async fn run_server(bind: &str, market: MarketDataClient) -> std::io::Result<()> {
    let state = web::Data::new(AppState { market });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .service(dividend_comparison)
            .service(company_list)
            .service(health_check)
    })
    .bind(bind)?
    .run()
    .await
}
