//! Core domain types and logic.

pub mod backtest;
pub mod bar;
pub mod error;
pub mod indicator;
pub mod ledger;
pub mod metrics;
pub mod monte_carlo;
pub mod signal;
pub mod simulator;
pub mod strategy;
