// src/handlers.rs

use crate::companies::{company_directory, display_name};
use crate::models::{
    ComparisonQuery, ComparisonRequest, ComparisonResponse, ErrorDetail, MAX_MONTHS,
};
use crate::returns::compute_dividend_return;
use actix_web::{get, web, HttpResponse, Responder};
use log::{info, warn};
use market_data::client::MarketDataClient;
use std::collections::HashMap;
use validator::Validate;

pub struct AppState {
    pub market: MarketDataClient,
}

/// Batch error policy: any per-symbol failure aborts the whole comparison.
/// The 400 body names the offending symbol.
#[get("/dividend_comparison/{months}")]
pub async fn dividend_comparison(
    months: web::Path<u32>,
    query: web::Query<ComparisonQuery>,
    state: web::Data<AppState>,
) -> impl Responder {
    let months = months.into_inner();
    if !(1..=MAX_MONTHS).contains(&months) {
        return HttpResponse::BadRequest().json(ErrorDetail {
            detail: format!("months must be between 1 and {}", MAX_MONTHS),
        });
    }

    let request = ComparisonRequest::from_query(&query);
    if request.symbols.is_empty() {
        return HttpResponse::BadRequest().json(ErrorDetail {
            detail: "At least one symbol is required".to_string(),
        });
    }
    // Guard runs before any provider call
    if request.validate().is_err() {
        return HttpResponse::BadRequest().json(ErrorDetail {
            detail: "Maximum 6 companies allowed".to_string(),
        });
    }

    info!(
        "comparing {} symbols over {} months",
        request.symbols.len(),
        months
    );

    let mut series = Vec::with_capacity(request.symbols.len());
    let mut company_names = HashMap::new();
    for symbol in &request.symbols {
        match compute_dividend_return(&state.market, symbol, months, None).await {
            Ok(returns) => {
                company_names.insert(symbol.clone(), display_name(symbol));
                series.push(returns);
            }
            Err(e) => {
                warn!("comparison aborted, {} failed: {}", symbol, e);
                return HttpResponse::BadRequest().json(ErrorDetail {
                    detail: format!("Error fetching data for {}: {}", symbol, e),
                });
            }
        }
    }

    HttpResponse::Ok().json(ComparisonResponse::from_series(&series, company_names))
}

#[get("/company_list")]
pub async fn company_list() -> impl Responder {
    HttpResponse::Ok().json(company_directory())
}

#[get("/health")]
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("OK")
}
