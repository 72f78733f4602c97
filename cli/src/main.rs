//! `qore`: export project schemas, generate TypeScript types and scaffold projects.

use clap::Parser;

mod args;
mod commands;
mod config;
mod error;
mod templates;

use args::{Cli, Command};
use commands::Context;
use config::{default_config_path, CliConfig};
use error::Result;

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let mut ctx = Context {
        saved: CliConfig::load(&config_path)?,
        config_path,
    };
    match cli.command {
        Command::ExportSchema(args) => commands::export_schema::run(args, &mut ctx).await,
        Command::Codegen(args) => commands::codegen::run(args, &mut ctx).await,
        Command::CreateProject(args) => commands::create_project::run(args, &mut ctx).await,
        Command::Config { reset: true } => {
            CliConfig::reset(&ctx.config_path)?;
            tracing::info!("removed {}", ctx.config_path.display());
            Ok(())
        }
        Command::Config { reset: false } => {
            let shown = CliConfig {
                token: ctx.saved.token.as_ref().map(|_| "<saved>".to_string()),
                ..ctx.saved.clone()
            };
            println!("# {}", ctx.config_path.display());
            print!("{}", toml::to_string_pretty(&shown)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("qore_sdk=info,qore=info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}
