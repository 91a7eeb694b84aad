use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Bookshelf service command line
#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve,
    /// Print the effective settings as JSON (password omitted)
    Config,
    /// Check that the database accepts connections
    Ping,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Command::Serve => {
            bookshelf_telemetry::init(&settings.telemetry)?;
            bookshelf_app::serve(settings).await
        }
        Command::Config => {
            let rendered = serde_json::to_string_pretty(&settings)
                .context("failed to render settings")?;
            println!("{}", rendered);
            Ok(())
        }
        Command::Ping => {
            bookshelf_telemetry::init(&settings.telemetry)?;
            let endpoint = settings.database.endpoint();
            let pool = bookshelf_db::connect_lazy(&settings.database);
            bookshelf_db::ping(&pool)
                .await
                .with_context(|| format!("database at {} is not reachable", endpoint))?;
            tracing::info!(%endpoint, "database reachable");
            println!("ok");
            Ok(())
        }
    }
}
