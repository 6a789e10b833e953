use clap::{Parser, Subcommand};
use rentverse::bootstrap::{self, RunMode};

#[derive(Parser)]
#[command(name = "rentverse")]
#[command(version, about = "RentVerse AI Service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the development server. Restart-on-change is delegated to an
    /// external watcher, e.g. `cargo watch -x 'run -- dev'`.
    Dev,
    /// Run the production server.
    Start,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mode = match cli.command {
        Command::Dev => RunMode::Dev,
        Command::Start => RunMode::Start,
    };
    bootstrap::run(mode).await
}
