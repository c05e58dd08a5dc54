//! Strategy type and parameter configuration.
//!
//! One strategy type is evaluated per backtest; there is no ensemble voting.
//! Parameter defaults match the research prototype: SMA 20, RSI 14,
//! MACD 12/26/9, Bollinger 20 with a 2.0 standard-deviation multiplier.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::StocklabError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum StrategyType {
    MovingAverage,
    Rsi,
    Macd,
    BollingerBands,
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyType::MovingAverage => write!(f, "moving_average"),
            StrategyType::Rsi => write!(f, "rsi"),
            StrategyType::Macd => write!(f, "macd"),
            StrategyType::BollingerBands => write!(f, "bollinger_bands"),
        }
    }
}

impl FromStr for StrategyType {
    type Err = StocklabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moving_average" => Ok(StrategyType::MovingAverage),
            "rsi" => Ok(StrategyType::Rsi),
            "macd" => Ok(StrategyType::Macd),
            "bollinger_bands" => Ok(StrategyType::BollingerBands),
            other => Err(StocklabError::UnknownStrategy { name: other.into() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StrategyParams {
    pub sma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        StrategyParams {
            sma_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_types() {
        assert_eq!(
            "moving_average".parse::<StrategyType>().unwrap(),
            StrategyType::MovingAverage
        );
        assert_eq!("rsi".parse::<StrategyType>().unwrap(), StrategyType::Rsi);
        assert_eq!("macd".parse::<StrategyType>().unwrap(), StrategyType::Macd);
        assert_eq!(
            "bollinger_bands".parse::<StrategyType>().unwrap(),
            StrategyType::BollingerBands
        );
    }

    #[test]
    fn parse_unknown_type() {
        let err = "momentum".parse::<StrategyType>().unwrap_err();
        assert!(matches!(err, StocklabError::UnknownStrategy { name } if name == "momentum"));
    }

    #[test]
    fn display_round_trips() {
        for strategy in [
            StrategyType::MovingAverage,
            StrategyType::Rsi,
            StrategyType::Macd,
            StrategyType::BollingerBands,
        ] {
            let parsed: StrategyType = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn default_params() {
        let params = StrategyParams::default();
        assert_eq!(params.sma_period, 20);
        assert_eq!(params.rsi_period, 14);
        assert_eq!(params.macd_fast, 12);
        assert_eq!(params.macd_slow, 26);
        assert_eq!(params.macd_signal, 9);
        assert_eq!(params.bollinger_period, 20);
        assert!((params.bollinger_std_dev - 2.0).abs() < f64::EPSILON);
    }
}
