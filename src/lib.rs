//! Stocklab: a stock strategy backtesting library.
//!
//! The crate follows a hexagonal layout: pure domain logic under
//! [`domain`], port traits under [`ports`], and concrete IO adapters
//! under [`adapters`]. The [`cli`] module wires them together for the
//! `stocklab` binary.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
