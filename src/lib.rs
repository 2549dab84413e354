pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use crate::config::cli::{Cli, Command};

pub use crate::config::{ServerConfig, Settings, SheetsConfig};
pub use crate::core::{
    proxy::SubmissionProxy, resolver::BusinessResolver, sheets::SheetsClient, Business, Row,
};
pub use crate::utils::error::{FlagshipError, Result};
