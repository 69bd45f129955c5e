use clap::Parser;
use jwt_auth_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve(args)) => cli::serve::run(args).await,
        None => cli::serve::run(cli::serve::ServeArgs::default()).await,
    }
}
