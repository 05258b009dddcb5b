use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use gastroassist::api::{AnswerService, QueryClient};
use gastroassist::cli::{Cli, Command};
use gastroassist::logging::init_tracing;
use gastroassist::{ask, ui};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = cli.load_config()?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let client = QueryClient::from_config(&config)?;
    tracing::info!(
        endpoint = %client.endpoint(),
        user_id = client.user_id(),
        supersede = ?config.query.supersede,
        "Starting"
    );
    let service: Arc<dyn AnswerService> = Arc::new(client);

    match &cli.command {
        Some(Command::Ask(args)) => {
            let code = ask::run(
                service,
                config.query.supersede,
                args,
                &mut io::stdout(),
                &mut io::stderr(),
            )
            .await?;
            Ok(code)
        }
        None => {
            ui::runtime::run(&config, service).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
