use futures::StreamExt;
use tokio::io::{AsyncWriteExt, BufWriter, Stdout};
use tracing::info;

use wallet::prelude::*;

#[tokio::main]
async fn main() {
    let config = match WalletConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(wallet::app::EXIT_FAILURE);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level)
        .init();

    let code = CliApp::new("wallet")
        .run(|stdout| run_wallet(stdout, config))
        .await;
    std::process::exit(code);
}

/// Load the dump, total every payment with per-partition progress, print
/// the total and write the dump back
async fn run_wallet(mut stdout: BufWriter<Stdout>, config: WalletConfig) -> Result<(), AppError> {
    let service =
        WalletService::new().with_aggregator(Aggregator::with_workers(config.workers));

    let loaded = import_dir(&service, &config.dump_dir).await?;
    info!(
        dir = %config.dump_dir.display(),
        accounts = loaded.accounts,
        payments = loaded.payments,
        favorites = loaded.favorites,
        "Loaded dump"
    );

    let mut progress = service.progress_stream();
    while let Some(event) = progress.next().await {
        let event = event?;
        info!(part = event.part, result = %event.result, "Partition summed");
    }
    let total = progress.total().unwrap_or_default();
    info!(total = %total, workers = config.workers, "Payments aggregated");

    stdout.write_all(format!("{total}\n").as_bytes()).await?;
    stdout.flush().await?;

    export_dir(&service, &config.dump_dir).await?;
    Ok(())
}
