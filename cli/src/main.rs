//! `qgen` binary entry point.

use clap::Parser;
use qgen_cli::{cli_host, commands, init_logging, Cli, CliResult, Commands, LogConfig};
use qgen_core::ServerReply;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
        eprintln!("⚠️  {}", e);
    }

    if let Err(e) = execute(cli).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> CliResult<()> {
    let host = cli_host(cli.client_config(), !cli.quiet);

    let reply = match &cli.command {
        Commands::Upload { files } => commands::upload(&host, files).await?,
        Commands::Generate { session, config } => commands::generate(&host, session, config).await?,
        Commands::Run { files, config } => commands::run(&host, files, config).await?,
        Commands::Check { config } => {
            commands::check(config)?;
            return Ok(());
        }
        Commands::ExampleDraft => {
            println!("{}", serde_json::to_string_pretty(&commands::example_draft())?);
            return Ok(());
        }
    };

    print_reply(&reply, cli.json)
}

fn print_reply(reply: &ServerReply, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else if let Some(paper_id) = reply.paper_id {
        println!("{}", paper_id);
    } else if let Some(session) = reply.session() {
        println!("{}", session);
    }
    Ok(())
}
