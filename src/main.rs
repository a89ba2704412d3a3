use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use headwire::app::AppContext;
use headwire::cli::menu::Menu;
use headwire::cli::{commands, Cli, Commands};
use headwire::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let mut ctx = AppContext::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Read) {
        Commands::Read => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut menu = Menu::new(stdin, std::io::stdout());

            tokio::select! {
                result = menu.run(&mut ctx) => result?,
                _ = tokio::signal::ctrl_c() => {
                    println!("\nExiting...");
                    // stdin is read on a blocking thread the runtime would
                    // wait for on shutdown
                    std::process::exit(0);
                }
            }
        }
        Commands::Topics => {
            commands::list_topics(&ctx)?;
        }
        Commands::Headlines { topic, limit, json } => {
            let fetched = commands::show_headlines(
                &mut ctx,
                &topic,
                limit,
                json,
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
            .await?;
            if !fetched {
                std::process::exit(1);
            }
        }
        Commands::Open { url } => {
            commands::open_link(&ctx, &url)?;
        }
    }

    Ok(())
}
