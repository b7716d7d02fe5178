mod profile;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "socialpulse-cli")]
#[command(about = "Profile scraping and sentiment command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score text against the sentiment lexicon and print the result as JSON
    Score {
        /// Text to score; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Scrape a profile, score its posts, and print the snapshot as JSON
    Profile {
        /// Profile handle, with or without a leading `@`
        handle: String,

        /// Keep the snapshot in memory instead of writing it to the database
        #[arg(long)]
        no_persist: bool,
    },
    /// List stored snapshots for a handle, newest first
    Snapshots {
        handle: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check the database connection
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = socialpulse_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries JSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Score { text }) => profile::run_score(&config, &text.join(" "))?,
        Some(Commands::Profile { handle, no_persist }) => {
            profile::run_profile(&config, &handle, no_persist).await?;
        }
        Some(Commands::Snapshots { handle, limit }) => {
            let pool = connect(&config).await?;
            profile::run_snapshots(&pool, &handle, limit).await?;
        }
        Some(Commands::Db { command }) => {
            let pool = connect(&config).await?;
            match command {
                DbCommands::Ping => {
                    socialpulse_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = socialpulse_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("socialpulse-cli: run with --help for commands"),
    }

    Ok(())
}

pub(crate) async fn connect(
    config: &socialpulse_core::AppConfig,
) -> anyhow::Result<sqlx::PgPool> {
    let database_url = config.require_database_url()?;
    let pool = socialpulse_db::connect_pool(
        database_url,
        socialpulse_db::PoolConfig::from_app_config(config),
    )
    .await?;
    Ok(pool)
}
