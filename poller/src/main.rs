//! Bond Poller Entry Point

use anyhow::Context;
use bond_poller::shutdown::{listen_for_signals, stop_signal_listener, ShutdownController};
use bond_poller::{config, logging, HealthPublisher, HttpBondsClient, PollRunner};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ガードはmainの終了までDropしない
    let _log_guard = logging::init()?;

    let config = config::load_from_env().context("invalid poller configuration")?;
    let client = HttpBondsClient::new(&config).context("failed to build Bonds API client")?;
    let publisher = HealthPublisher::from_config(&config);

    info!(
        started_at = %chrono::Local::now(),
        url = %client.url(),
        "Bond poller starting"
    );
    info!(file = %publisher.json_path().display(), "Health JSON file");
    info!(file = %publisher.text_path().display(), "Health text file");

    let shutdown = ShutdownController::default();
    let signals = tokio::spawn(listen_for_signals(shutdown.clone()));

    let mut runner =
        PollRunner::new(client, publisher, shutdown.clone()).with_interval(config.poll_interval());
    runner.run().await;

    // ランナーが自発的に終了した場合もリスナーを止める
    stop_signal_listener(&shutdown, signals).await;

    info!(stopped_at = %chrono::Local::now(), "Bond poller shutdown complete");
    Ok(())
}
