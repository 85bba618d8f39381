mod comment;
mod config;
mod errors;
mod export;
mod grade;
mod listing;
mod logging;
mod schema;
mod show;
pub mod support;
