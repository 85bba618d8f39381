//! Saiten Core Library
//!
//! Grading logic for saiten: allocation schemas, score aggregation, the
//! per-criterion grade ledger and the gradebook patcher.

pub mod allocation;
pub mod config;
pub mod error;
pub mod format;
pub mod gradebook;
pub mod ledger;
pub mod logging;
pub mod scoring;
pub mod session;
pub mod store;
