use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use action_primitives::{ActionPrimitives, ChromiumPrimitives};
use catalog_tagger::config::TaggerConfig;
use catalog_tagger::input::read_ids;
use catalog_tagger::ledger::CsvLedger;
use catalog_tagger::session::{RecordSession, RunSummary};

use super::env::CliArgs;
use super::runtime::{init_logging, load_config, resolve_config_path};

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();
    let _log_guard = init_logging(&cli.log_level, cli.debug, &cli.log_dir)?;

    let run_id = Uuid::new_v4();
    info!(
        %run_id,
        build_date = env!("BUILD_DATE"),
        git_hash = env!("GIT_HASH"),
        started_at = %chrono::Local::now().to_rfc3339(),
        "Starting catalog-tagger v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config_path = resolve_config_path(cli.config.as_ref())?;
    let mut config = load_config(&config_path)?;
    if cli.headless {
        config.browser.headless = true;
    }
    debug!(?config, "effective configuration");

    let ids = read_ids(&cli.input)
        .with_context(|| format!("Failed to read input {}", cli.input.display()))?;
    let ledger = CsvLedger::new(&cli.ledger);
    ledger.ensure().context("Failed to prepare ledger")?;

    let browser = ChromiumPrimitives::launch(&config.browser)
        .await
        .context("Failed to launch browser")?
        .with_poll_interval(config.timeouts.poll_interval());

    let outcome = drive(&browser, &ledger, &config, &ids)
        .instrument(info_span!("run", %run_id))
        .await;

    if let Err(err) = browser.close().await {
        warn!(error = %err, "browser did not shut down cleanly");
    }

    match outcome {
        Ok(summary) => {
            info!(
                attempted = summary.attempted(),
                total = ids.len(),
                "Run completed"
            );
            Ok(())
        }
        Err(err) => {
            error!("Run failed: {:#}", err);
            Err(err)
        }
    }
}

async fn drive(
    ui: &dyn ActionPrimitives,
    ledger: &CsvLedger,
    config: &TaggerConfig,
    ids: &[String],
) -> Result<RunSummary> {
    let session = RecordSession::new(ui, ledger, config);
    session
        .start()
        .await
        .context("Login or navigation to the product panel failed")?;
    let summary = session.run(ids).await.context("Ledger update failed")?;
    Ok(summary)
}
