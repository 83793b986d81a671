use std::process::ExitCode;

use clap::Parser;
use daybook_app::cli::{self, Cli, Command};
use daybook_app::config::AppConfig;
use daybook_app::context::AppContext;
use daybook_app::error::AppResult;
use daybook_app::logging;
use daybook_app::prompt::{Prompter, StdioPrompter};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::from_env().and_then(|c| c.with_database_url(cli.database_url)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    logging::init(config.log_format);

    let prompter = StdioPrompter::new(cli.yes);
    match run(config, cli.command, &prompter).await {
        Ok(output) => {
            println!("{output:#}");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_rejection() => {
            prompter.warn(&err.to_string());
            ExitCode::from(1)
        }
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            prompter.warn(&err.to_string());
            ExitCode::from(2)
        }
    }
}

async fn run(config: AppConfig, command: Command, prompter: &dyn Prompter) -> AppResult<serde_json::Value> {
    let ctx = AppContext::connect(config).await?;
    tracing::debug!(database_url = %ctx.config().database_url, "Connected");
    cli::execute(&ctx, command, prompter).await
}
