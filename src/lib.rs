pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::MarinaConfig};
pub use crate::core::{session::Session, store::Marina};
pub use domain::model::{BoatRecord, Location, LocationKind, RateTable};
pub use utils::error::{MarinaError, Result};
