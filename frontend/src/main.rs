use clap::Parser;
use leavedesk_frontend::{cli::Cli, logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = cli.run().await {
        tracing::debug!(error = ?err, "Command failed");
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
