// tests/integration_tests.rs

use actix_web::{test, web, App};
use chrono::{Duration, NaiveDate, Utc};
use comparison_server::handlers::{company_list, dividend_comparison, health_check, AppState};
use comparison_server::models::{ComparisonResponse, ErrorDetail};
use market_data::client::MarketDataClient;
use mockito::{mock, Matcher, Mock};
use serde_json::json;

fn today() -> NaiveDate {
    Utc::now().naive_utc().date()
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// Daily-history provider body; bars are (date, close, dividend amount).
fn daily_history_body(symbol: &str, bars: &[(NaiveDate, f64, f64)]) -> String {
    let mut series = serde_json::Map::new();
    for (date, close, dividend) in bars {
        series.insert(
            iso(*date),
            json!({
                "1. open": format!("{:.4}", close),
                "2. high": format!("{:.4}", close),
                "3. low": format!("{:.4}", close),
                "4. close": format!("{:.4}", close),
                "5. adjusted close": format!("{:.4}", close),
                "6. volume": "1000000",
                "7. dividend amount": format!("{:.4}", dividend),
            }),
        );
    }
    json!({
        "Meta Data": {
            "1. Information": "Daily Time Series with Splits and Dividend Events",
            "2. Symbol": symbol,
            "3. Last Refreshed": iso(today()),
            "4. Output Size": "Full size",
            "5. Time Zone": "US/Eastern"
        },
        "Time Series (Daily)": series
    })
    .to_string()
}

fn quote_body(symbol: &str, price: f64) -> String {
    json!({
        "Global Quote": {
            "01. symbol": symbol,
            "05. price": format!("{:.4}", price),
            "07. latest trading day": iso(today())
        }
    })
    .to_string()
}

fn mock_daily(symbol: &str, body: String) -> Mock {
    mock("GET", "/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("function".into(), "TIME_SERIES_DAILY_ADJUSTED".into()),
            Matcher::UrlEncoded("symbol".into(), symbol.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

fn mock_quote(symbol: &str, body: String) -> Mock {
    mock("GET", "/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("function".into(), "GLOBAL_QUOTE".into()),
            Matcher::UrlEncoded("symbol".into(), symbol.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create()
}

fn app_state() -> web::Data<AppState> {
    web::Data::new(AppState {
        market: MarketDataClient::new(mockito::server_url(), "demo".to_string()),
    })
}

// Values for one symbol in chronological date order, nulls skipped.
fn series_values(response: &ComparisonResponse, symbol: &str) -> Vec<f64> {
    response
        .data
        .values()
        .filter_map(|row| row.get(symbol).copied().flatten())
        .collect()
}

#[actix_rt::test]
async fn test_two_symbol_comparison() {
    let aapl_bars = vec![
        (today() - Duration::days(100), 100.0, 0.5),
        (today() - Duration::days(40), 100.0, 0.5),
        (today() - Duration::days(2), 100.0, 0.0),
    ];
    let msft_bars = vec![
        (today() - Duration::days(40), 200.0, 1.0),
        (today() - Duration::days(2), 200.0, 0.0),
    ];
    let _m1 = mock_daily("AAPL", daily_history_body("AAPL", &aapl_bars));
    let _m2 = mock_quote("AAPL", quote_body("AAPL", 100.0));
    let _m3 = mock_daily("MSFT", daily_history_body("MSFT", &msft_bars));
    let _m4 = mock_quote("MSFT", quote_body("MSFT", 200.0));

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/6?symbols=AAPL,MSFT")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let result: ComparisonResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(result.company_names.len(), 2);
    assert_eq!(result.company_names["AAPL"], "Apple Inc.");
    assert_eq!(result.company_names["MSFT"], "Microsoft Corporation");

    // every row carries a cell for both symbols
    for row in result.data.values() {
        assert!(row.contains_key("AAPL"));
        assert!(row.contains_key("MSFT"));
    }

    // a 6-month window resamples to 6 or 7 calendar months
    assert!((6..=7).contains(&result.data.len()));

    // $1000 at $100/share = 10 shares; two $0.50 payments accumulate to $10
    let aapl = series_values(&result, "AAPL");
    assert!((aapl.last().unwrap() - 10.0).abs() < 1e-9);
    for pair in aapl.windows(2) {
        assert!(pair[1] >= pair[0]);
    }

    // $1000 at $200/share = 5 shares; one $1.00 payment accumulates to $5
    let msft = series_values(&result, "MSFT");
    assert!((msft.last().unwrap() - 5.0).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_seven_symbols_rejected_before_any_fetch() {
    let symbols = ["R1", "R2", "R3", "R4", "R5", "R6", "R7"];
    let mocks: Vec<Mock> = symbols
        .iter()
        .map(|symbol| {
            mock("GET", "/query")
                .match_query(Matcher::AllOf(vec![Matcher::UrlEncoded(
                    "symbol".into(),
                    (*symbol).into(),
                )]))
                .expect(0)
                .create()
        })
        .collect();

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/6?symbols=R1,R2,R3,R4,R5,R6,R7")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    let error: ErrorDetail = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.detail, "Maximum 6 companies allowed");

    for m in mocks {
        m.assert();
    }
}

#[actix_rt::test]
async fn test_failing_symbol_aborts_batch() {
    let bars = vec![(today() - Duration::days(20), 50.0, 0.25)];
    let _m1 = mock_daily("GOODA", daily_history_body("GOODA", &bars));
    let _m2 = mock_quote("GOODA", quote_body("GOODA", 50.0));
    let _m3 = mock_daily(
        "BADX",
        r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#
            .to_string(),
    );
    let _m4 = mock_daily("GOODB", daily_history_body("GOODB", &bars));
    let _m5 = mock_quote("GOODB", quote_body("GOODB", 50.0));

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/3?symbols=GOODA,BADX,GOODB")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    let error: ErrorDetail = serde_json::from_slice(&body).unwrap();
    assert!(error.detail.starts_with("Error fetching data for BADX:"));
}

#[actix_rt::test]
async fn test_unknown_symbol_gets_sentinel_name() {
    let bars = vec![(today() - Duration::days(15), 80.0, 0.0)];
    let _m1 = mock_daily("ZZZT", daily_history_body("ZZZT", &bars));
    let _m2 = mock_quote("ZZZT", quote_body("ZZZT", 80.0));

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/3?symbols=ZZZT")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let result: ComparisonResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(result.company_names["ZZZT"], "Unknown Company");
}

#[actix_rt::test]
async fn test_zero_dividend_symbol_yields_flat_series() {
    let bars = vec![
        (today() - Duration::days(80), 60.0, 0.0),
        (today() - Duration::days(10), 60.0, 0.0),
    ];
    let _m1 = mock_daily("KO", daily_history_body("KO", &bars));
    let _m2 = mock_quote("KO", quote_body("KO", 60.0));

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/3?symbols=KO")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let result: ComparisonResponse = serde_json::from_slice(&body).unwrap();

    // flat zero, full window length, not an empty result
    assert!((3..=4).contains(&result.data.len()));
    for row in result.data.values() {
        assert_eq!(row["KO"], Some(0.0));
    }
}

#[actix_rt::test]
async fn test_quote_fallback_to_latest_close() {
    // No current price from the provider; position sized off the last close.
    let bars = vec![
        (today() - Duration::days(30), 40.0, 0.8),
        (today() - Duration::days(5), 50.0, 0.0),
    ];
    let _m1 = mock_daily("FBK", daily_history_body("FBK", &bars));
    let _m2 = mock_quote("FBK", r#"{"Global Quote": {}}"#.to_string());

    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/3?symbols=FBK")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let result: ComparisonResponse = serde_json::from_slice(&body).unwrap();

    // $1000 at the $50 close = 20 shares; one $0.80 payment = $16
    let values = series_values(&result, "FBK");
    assert!((values.last().unwrap() - 16.0).abs() < 1e-9);
}

#[actix_rt::test]
async fn test_zero_months_rejected() {
    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/0?symbols=AAPL")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_excessive_months_rejected() {
    // u32::MAX months would push the window start outside the representable
    // date range; the handler must answer 400, not fall over.
    let app = test::init_service(
        App::new().app_data(app_state()).service(dividend_comparison),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/dividend_comparison/4294967295?symbols=AAPL")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    let error: ErrorDetail = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.detail, "months must be between 1 and 120");
}

#[actix_rt::test]
async fn test_company_list() {
    let app = test::init_service(App::new().service(company_list)).await;

    let req = test::TestRequest::get().uri("/company_list").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    let directory: std::collections::HashMap<String, String> =
        serde_json::from_slice(&body).unwrap();
    assert_eq!(directory.len(), 12);
    assert_eq!(directory["AAPL"], "Apple Inc.");
}

#[actix_rt::test]
async fn test_health_check() {
    let app = test::init_service(App::new().service(health_check)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert_eq!(body, "OK");
}
