use anyhow::Context;
use boat_marina::utils::{logger, validation::Validate};
use boat_marina::{CliConfig, LocalStorage, MarinaConfig, Session};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Argument validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let settings = match &config.config {
        Some(path) => MarinaConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => MarinaConfig::default(),
    };

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_file.clone());
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let mut session = Session::new(&settings, storage, stdin, stdout);

    // Session I/O failures are reported but leave the exit status at 0.
    if let Err(e) = session.load().and_then(|()| session.run()) {
        tracing::error!("Session ended early: {}", e);
        eprintln!("Session ended early: {}", e);
    }

    Ok(())
}
