//! scoop: flavor recommendation with a Dirichlet-multinomial Thompson
//! sampling bandit.
//!
//! The numerical core lives in [`bandit`] and is pure: callers inject the
//! random source and own persistence. [`store`], [`recommend`] and [`cli`]
//! wrap it into a small recommendation service.

pub mod app;
pub mod bandit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod recommend;
pub mod store;
pub mod test_utils;

pub use error::{Result, ScoopError};
