//! Domain error types.
//!
//! Only input-absence and configuration problems surface as errors. Numerical
//! degeneracy (short lookback windows, zero variance, zero trades) is absorbed
//! by documented fallback values so a simulation always completes.

/// Top-level error type for stocklab.
#[derive(Debug, thiserror::Error)]
pub enum StocklabError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy type: {name}")]
    UnknownStrategy { name: String },

    #[error("no historical data for {symbol}")]
    NoData { symbol: String },

    #[error("backtest already {status}, cannot run again")]
    AlreadyRun { status: String },

    #[error("backtest has no equity curve; run it before Monte Carlo analysis")]
    NoEquityCurve,

    #[error("insufficient history: {returns} daily returns, need at least 2")]
    InsufficientReturns { returns: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StocklabError> for std::process::ExitCode {
    fn from(err: &StocklabError) -> Self {
        let code: u8 = match err {
            StocklabError::Io(_) => 1,
            StocklabError::ConfigParse { .. }
            | StocklabError::ConfigMissing { .. }
            | StocklabError::ConfigInvalid { .. }
            | StocklabError::UnknownStrategy { .. } => 2,
            StocklabError::Data { .. } => 3,
            StocklabError::NoData { .. }
            | StocklabError::NoEquityCurve
            | StocklabError::InsufficientReturns { .. } => 4,
            StocklabError::AlreadyRun { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
