//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::domain::backtest::{
    Backtest, BacktestConfig, DEFAULT_COMMISSION_RATE, DEFAULT_INITIAL_CAPITAL,
    DEFAULT_SLIPPAGE_RATE,
};
use crate::domain::error::StocklabError;
use crate::domain::monte_carlo::MonteCarloConfig;
use crate::domain::strategy::{StrategyParams, StrategyType};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "stocklab", about = "Stock strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a backtest followed by a Monte Carlo forecast
    MonteCarlo {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        simulations: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
        } => run_backtest(&config, symbol.as_deref(), output.as_ref()),
        Command::MonteCarlo {
            config,
            simulations,
            seed,
            output,
        } => run_monte_carlo(&config, simulations, seed, output.as_ref()),
        Command::ListSymbols { config } => run_list_symbols(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn data_adapter(config: &dyn ConfigPort) -> Result<CsvAdapter, StocklabError> {
    let path = config
        .get_string("data", "path")
        .ok_or_else(|| StocklabError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })?;
    Ok(CsvAdapter::new(PathBuf::from(path)))
}

fn run_backtest(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Build BacktestConfig
    let bt_config = match build_backtest_config(&adapter, symbol_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 3: Fetch bars and run
    let backtest = match execute(&adapter, bt_config) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&backtest);
    write_backtest_report(&backtest, output_path)
}

fn run_monte_carlo(
    config_path: &PathBuf,
    simulations_override: Option<usize>,
    seed_override: Option<u64>,
    output_path: Option<&PathBuf>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let bt_config = match build_backtest_config(&adapter, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let mut mc_config = build_monte_carlo_config(&adapter);
    if let Some(n) = simulations_override {
        mc_config.num_simulations = n;
    }
    if let Some(s) = seed_override {
        mc_config.seed = s;
    }

    let backtest = match execute(&adapter, bt_config) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_summary(&backtest);

    eprintln!(
        "\nRunning Monte Carlo: {} simulations, seed {}",
        mc_config.num_simulations, mc_config.seed,
    );
    let mc_result = match backtest.monte_carlo(&mc_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\n=== Monte Carlo Forecast (1 year) ===");
    eprintln!("Expected Value:   ${:.0}", mc_result.expected_value);
    eprintln!("Median (p50):     ${:.0}", mc_result.confidence_levels.p50);
    eprintln!(
        "5th-95th Pctile:  ${:.0} - ${:.0}",
        mc_result.confidence_levels.p5, mc_result.confidence_levels.p95,
    );
    eprintln!("Worst Case:       ${:.0}", mc_result.worst_case);
    eprintln!("Best Case:        ${:.0}", mc_result.best_case);
    eprintln!("VaR 95%:          ${:.0}", mc_result.var95);
    eprintln!("VaR 99%:          ${:.0}", mc_result.var99);
    eprintln!("CVaR 95%:         ${:.0}", mc_result.cvar95);
    eprintln!("CVaR 99%:         ${:.0}", mc_result.cvar99);

    if let Some(output) = output_path {
        if let Err(e) =
            JsonReportAdapter.write_monte_carlo(&backtest.config.symbol, &mc_result, output)
        {
            eprintln!("error: failed to write report: {e}");
            return (&e).into();
        }
        eprintln!("\nReport written to: {}", output.display());
    }
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match data_adapter(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn execute(
    config: &dyn ConfigPort,
    bt_config: BacktestConfig,
) -> Result<Backtest, StocklabError> {
    let data_port = data_adapter(config)?;

    eprintln!(
        "Fetching bars for {}: {} to {}",
        bt_config.symbol, bt_config.start_date, bt_config.end_date,
    );
    let bars = data_port.fetch_bars(&bt_config.symbol, bt_config.start_date, bt_config.end_date)?;
    eprintln!("  {} bars loaded", bars.len());

    eprintln!(
        "Running backtest: {} strategy, ${:.0} initial capital",
        bt_config.strategy, bt_config.initial_capital,
    );
    let mut backtest = Backtest::new(bt_config);
    backtest.run(&bars)?;
    Ok(backtest)
}

fn print_summary(backtest: &Backtest) {
    let Some(result) = backtest.result.as_ref() else {
        return;
    };
    let metrics = &result.metrics;

    eprintln!("\n=== Backtest Results ===");
    eprintln!("Final Capital:    ${:.2}", result.final_capital);
    eprintln!("Total Return:     {:.2}%", metrics.total_return * 100.0);
    eprintln!("Annualized:       {:.2}%", metrics.annualized_return * 100.0);
    eprintln!("Sharpe Ratio:     {:.2}", metrics.sharpe_ratio);
    eprintln!("Sortino Ratio:    {:.2}", metrics.sortino_ratio);
    eprintln!("Max Drawdown:     -{:.1}%", metrics.max_drawdown * 100.0);
    eprintln!("Total Trades:     {}", metrics.total_trades);
    eprintln!("Win Rate:         {:.1}%", metrics.win_rate * 100.0);
    eprintln!("Profit Factor:    {:.2}", metrics.profit_factor);
}

fn write_backtest_report(backtest: &Backtest, output_path: Option<&PathBuf>) -> ExitCode {
    let Some(output) = output_path else {
        return ExitCode::SUCCESS;
    };
    match JsonReportAdapter.write_backtest(backtest, output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

pub fn build_backtest_config(
    adapter: &dyn ConfigPort,
    symbol_override: Option<&str>,
) -> Result<BacktestConfig, StocklabError> {
    let symbol = match symbol_override {
        Some(s) => s.to_uppercase(),
        None => adapter
            .get_string("backtest", "symbol")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| StocklabError::ConfigMissing {
                section: "backtest".into(),
                key: "symbol".into(),
            })?,
    };

    let start_date = require_date(adapter, "start_date")?;
    let end_date = require_date(adapter, "end_date")?;
    if end_date < start_date {
        return Err(StocklabError::ConfigInvalid {
            section: "backtest".into(),
            key: "end_date".into(),
            reason: "end_date is before start_date".into(),
        });
    }

    let strategy_name = adapter
        .get_string("strategy", "type")
        .unwrap_or_else(|| "moving_average".to_string());
    let strategy: StrategyType = strategy_name.parse()?;

    Ok(BacktestConfig {
        symbol,
        start_date,
        end_date,
        strategy,
        params: build_strategy_params(adapter),
        commission_rate: adapter.get_double("backtest", "commission_rate", DEFAULT_COMMISSION_RATE),
        slippage_rate: adapter.get_double("backtest", "slippage_rate", DEFAULT_SLIPPAGE_RATE),
        initial_capital: adapter.get_double("backtest", "initial_capital", DEFAULT_INITIAL_CAPITAL),
    })
}

fn require_date(adapter: &dyn ConfigPort, key: &str) -> Result<NaiveDate, StocklabError> {
    let value =
        adapter
            .get_string("backtest", key)
            .ok_or_else(|| StocklabError::ConfigMissing {
                section: "backtest".into(),
                key: key.into(),
            })?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| StocklabError::ConfigInvalid {
        section: "backtest".into(),
        key: key.into(),
        reason: "invalid date format (expected YYYY-MM-DD)".into(),
    })
}

pub fn build_strategy_params(adapter: &dyn ConfigPort) -> StrategyParams {
    let defaults = StrategyParams::default();
    StrategyParams {
        sma_period: adapter.get_int("strategy", "sma_period", defaults.sma_period as i64) as usize,
        rsi_period: adapter.get_int("strategy", "rsi_period", defaults.rsi_period as i64) as usize,
        macd_fast: adapter.get_int("strategy", "macd_fast", defaults.macd_fast as i64) as usize,
        macd_slow: adapter.get_int("strategy", "macd_slow", defaults.macd_slow as i64) as usize,
        macd_signal: adapter.get_int("strategy", "macd_signal", defaults.macd_signal as i64)
            as usize,
        bollinger_period: adapter.get_int(
            "strategy",
            "bollinger_period",
            defaults.bollinger_period as i64,
        ) as usize,
        bollinger_std_dev: adapter.get_double(
            "strategy",
            "bollinger_std_dev",
            defaults.bollinger_std_dev,
        ),
    }
}

pub fn build_monte_carlo_config(adapter: &dyn ConfigPort) -> MonteCarloConfig {
    let defaults = MonteCarloConfig::default();
    MonteCarloConfig {
        num_simulations: adapter.get_int(
            "monte_carlo",
            "simulations",
            defaults.num_simulations as i64,
        ) as usize,
        seed: adapter.get_int("monte_carlo", "seed", defaults.seed as i64) as u64,
    }
}
