pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod query;
pub mod report;
pub mod session;
pub mod store;
#[cfg(test)]
mod test;
mod utils;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
