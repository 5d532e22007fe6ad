pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, settings::Settings};
pub use core::{api::ApiClient, router::Route, router::Shell, session::Session};
pub use domain::view::View;
pub use utils::error::{ClientError, Result};
