pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "boat-marina")]
#[command(about = "Manage the boat inventory of a marina")]
pub struct CliConfig {
    /// Inventory data file, read at startup and written on exit
    pub data_file: String,

    #[arg(long, help = "Optional TOML file overriding capacity and monthly rates")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        crate::utils::validation::validate_path("data_file", &self.data_file)
            .map_err(|e| crate::utils::error::MarinaError::config(&e.field, e.reason))?;
        if let Some(config) = &self.config {
            crate::utils::validation::validate_path("config", config)
                .map_err(|e| crate::utils::error::MarinaError::config(&e.field, e.reason))?;
        }
        Ok(())
    }
}
