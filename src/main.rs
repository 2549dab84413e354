use std::sync::Arc;

use clap::Parser;
use flagship_pages::config::FileConfig;
use flagship_pages::utils::logger;
use flagship_pages::utils::validation::Validate;
use flagship_pages::web::{self, AppState};
use flagship_pages::{BusinessResolver, Cli, Command, Settings, SheetsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let file = match &cli.config {
        Some(path) => Some(FileConfig::from_file(path)?),
        None => None,
    };

    let mut settings = match Settings::load(file.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(category = ?e.category(), "❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let command = cli.command.clone().unwrap_or(Command::Serve(Default::default()));
    let sheets = SheetsClient::new(settings.sheets.clone());

    match command {
        Command::Serve(args) => {
            args.apply(&mut settings.server);
            settings.server.validate()?;
            tracing::info!(
                port = settings.server.port,
                revalidate_secs = settings.server.revalidate_secs,
                "Starting flagship-pages server"
            );

            let state = AppState::new(Arc::new(sheets), &settings.server);
            web::serve(state, &settings.server).await?;
        }
        Command::Slugs => {
            let resolver = BusinessResolver::new(sheets);
            for slug in resolver.known_slugs().await {
                println!("{}", slug);
            }
        }
        Command::Lookup { slug } => {
            let resolver = BusinessResolver::new(sheets);
            match resolver.resolve_by_slug(&slug).await? {
                Some(row) => println!("{}", serde_json::to_string_pretty(&row)?),
                None => {
                    eprintln!("No flagship row for slug {:?}", slug);
                    std::process::exit(2);
                }
            }
        }
    }

    Ok(())
}
