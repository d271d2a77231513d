mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "drydock", about = "Build changed services and roll them out to Kubernetes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, push, and deploy every service whose sources changed
    Release {
        /// Image registry prefix (overrides [project].registry)
        #[arg(long)]
        registry: Option<String>,
        /// Kubernetes namespace (overrides [project].namespace)
        #[arg(long)]
        namespace: Option<String>,
        /// Rebuild every service, ignoring stored fingerprints
        #[arg(long)]
        force: bool,
        /// Discard all stored fingerprints before running
        #[arg(long)]
        reset: bool,
    },
    /// Show which services changed since the last release
    Status,
    /// Check local tooling and project layout
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Release {
            registry,
            namespace,
            force,
            reset,
        } => {
            commands::release(commands::ReleaseOptions {
                registry,
                namespace,
                force,
                reset,
            })
            .await?
        }
        Commands::Status => commands::status()?,
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
