use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tripledger::config::{Config, LogFormat};
use tripledger::core::AppError;
use tripledger::modules::bookings::JsonSnapshotRepository;
use tripledger::modules::reports::{ReportAggregator, ReportService};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {:#}", err);

        let client_error = err
            .downcast_ref::<AppError>()
            .is_some_and(AppError::is_client_error);
        std::process::exit(if client_error { 2 } else { 1 });
    }
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting tripledger report");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        "Snapshot: {}",
        config.report.snapshot_path.display()
    );

    let repo = JsonSnapshotRepository::new(config.report.snapshot_path.clone());
    let aggregator = ReportAggregator::new(config.report.decomposer(), config.report.options());
    let service = ReportService::new(repo, aggregator);

    let report = service
        .generate_financial_report(&config.report.selector)
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

// Logs go to stderr so stdout carries only the report
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tripledger={}", config.app.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);

    match config.app.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
