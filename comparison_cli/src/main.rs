// src/main.rs

mod cache;
mod client;
mod render;

use cache::{CacheKey, ResponseCache};
use chrono::{Duration, Utc};
use clap::Parser;
use client::ComparisonClient;
use comparison_server::models::MAX_SYMBOLS;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    name = "comparison_cli",
    about = "Interactive dividend return comparison"
)]
struct Args {
    /// Comparison server base URL
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    server: String,

    /// Cache time-to-live in seconds
    #[arg(long, default_value_t = 300)]
    cache_ttl: u64,

    /// Run one comparison and exit, e.g. --symbols AAPL,MSFT
    #[arg(long)]
    symbols: Option<String>,

    /// Window length in months
    #[arg(long, default_value_t = 6)]
    months: u32,
}

fn parse_symbols(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn run_comparison(
    client: &ComparisonClient,
    cache: &mut ResponseCache,
    symbols: &[String],
    months: u32,
) -> anyhow::Result<()> {
    let key = CacheKey::new(symbols, months);
    let now = Utc::now();

    if let Some(response) = cache.get(&key, now) {
        println!(
            "Cumulative dividend return, last {} months, $1000 notional per company (cached)\n",
            months
        );
        print!("{}", render::render_chart(response));
        print!("{}", render::render_ranking(&render::final_ranking(response)));
        return Ok(());
    }

    let response = client.dividend_comparison(symbols, months)?;
    println!(
        "Cumulative dividend return, last {} months, $1000 notional per company\n",
        months
    );
    print!("{}", render::render_chart(&response));
    print!("{}", render::render_ranking(&render::final_ranking(&response)));
    cache.insert(key, response, now);
    Ok(())
}

fn prompt(text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let client = ComparisonClient::new(args.server);
    let mut cache = ResponseCache::new(Duration::seconds(args.cache_ttl as i64));

    match client.company_list() {
        Ok(companies) => {
            println!("Available companies:");
            let mut listed: Vec<_> = companies.iter().collect();
            listed.sort();
            for (symbol, name) in listed {
                println!("  {:<6} {}", symbol, name);
            }
        }
        Err(e) => eprintln!("Could not fetch company list: {}", e),
    }

    // One-shot mode for scripted use
    if let Some(raw) = args.symbols {
        let symbols = parse_symbols(&raw);
        return run_comparison(&client, &mut cache, &symbols, args.months);
    }

    loop {
        let line = match prompt("\nSymbols (comma separated, max 6, blank to quit)> ")? {
            Some(line) if !line.is_empty() => line,
            _ => break,
        };

        let symbols = parse_symbols(&line);
        if symbols.len() > MAX_SYMBOLS {
            eprintln!("Maximum 6 companies allowed");
            continue;
        }

        let months = match prompt("Months [6]> ")? {
            Some(line) if !line.is_empty() => match line.parse::<u32>() {
                Ok(months) if months >= 1 => months,
                _ => {
                    eprintln!("Months must be a positive integer");
                    continue;
                }
            },
            Some(_) => 6,
            None => break,
        };

        cache.purge_expired(Utc::now());
        if let Err(e) = run_comparison(&client, &mut cache, &symbols, months) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}
