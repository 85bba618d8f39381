//! CLI commands for saiten

pub mod comment;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod format;
pub mod grade;
pub mod list;
pub mod schema;
pub mod show;
pub mod status;
