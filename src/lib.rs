pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::cli::CliContext;
pub use config::UploadConfig;
pub use core::uploader::Uploader;
pub use domain::model::UploadOutcome;
pub use utils::error::{Result, UploadError};
