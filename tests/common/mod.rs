#![allow(dead_code)]

use chrono::NaiveDate;
use stocklab::domain::backtest::BacktestConfig;
use stocklab::domain::bar::Bar;
use stocklab::domain::strategy::{StrategyParams, StrategyType};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(symbol: &str, date: &str, close: f64) -> Bar {
    Bar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

pub fn generate_bars(symbol: &str, start_date: &str, closes: &[f64]) -> Vec<Bar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            symbol: symbol.to_string(),
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        })
        .collect()
}

/// Closes that stay flat through warmup, plunge hard enough to drive
/// RSI to oversold, then grind back up.
pub fn plunge_then_recover(flat: usize) -> Vec<f64> {
    let mut closes = vec![100.0; flat];
    let mut price = 100.0;
    for _ in 0..5 {
        price -= 4.0;
        closes.push(price);
    }
    for _ in 0..10 {
        price += 1.5;
        closes.push(price);
    }
    closes
}

pub fn sample_config(symbol: &str, strategy: StrategyType) -> BacktestConfig {
    BacktestConfig {
        symbol: symbol.to_string(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        strategy,
        params: StrategyParams::default(),
        commission_rate: 0.001,
        slippage_rate: 0.0005,
        initial_capital: 100_000.0,
    }
}

/// Writes a `{symbol}.csv` data file into `dir` with one row per close,
/// starting at `start_date`.
pub fn write_csv(dir: &std::path::Path, symbol: &str, start_date: &str, closes: &[f64]) {
    let mut content = String::from("date,open,high,low,close,volume\n");
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    for (i, close) in closes.iter().enumerate() {
        let date = start + chrono::Duration::days(i as i64);
        content.push_str(&format!(
            "{},{},{},{},{},1000\n",
            date,
            close,
            close + 1.0,
            close - 1.0,
            close,
        ));
    }
    std::fs::write(dir.join(format!("{}.csv", symbol)), content).unwrap();
}
