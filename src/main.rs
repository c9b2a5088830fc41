use anyhow::Result;
use clap::Parser;
use tracing::info;

use resume_screen::cli::{self, Cli, Command};
use resume_screen::core::{ConfigManager, ServiceClient};
use resume_screen::logging;
use resume_screen::wizard::Wizard;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigManager::load(cli.config.as_deref())?;
    config.apply_api_url(cli.api_url.clone());
    config.apply_log_file(cli.log_file.clone());

    logging::init(&config.client.log_file)?;

    info!("Environment: {}", config.environment);
    info!("Analysis backend: {}", config.client.api_base_url);

    let client = ServiceClient::new(config.client.api_base_url.clone())?;
    let mut wizard = Wizard::new(client).with_verbose_errors(config.client.verbose_errors);
    info!(session = %wizard.session_id(), "Wizard session started");

    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Wizard) {
        Command::Wizard => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            cli::run_interactive(&mut wizard, stdin, &mut stdout).await?;
        }
        Command::Analyze {
            title,
            description,
            resume,
            json,
        } => {
            cli::run_analyze(&mut wizard, title, description, &resume, json, &mut stdout).await?;
        }
    }

    Ok(())
}
