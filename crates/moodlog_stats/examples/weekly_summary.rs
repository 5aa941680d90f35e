use chrono::{Duration, Utc};
use moodlog_client::{DateRange, config::Config, http_client::ReqwestMoodlogClient};
use moodlog_stats::SummaryService;
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configure logging from env var `MOODLOG_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("MOODLOG_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let client = Arc::new(ReqwestMoodlogClient::from_config(cfg));
    let service = SummaryService::new(client);

    let today = Utc::now().date_naive();
    let range = DateRange::new(today - Duration::days(6), today);
    let (_cancel_tx, cancel_rx) = watch::channel(false);
    let state = service.refresh(range, cancel_rx).await?;

    if state.summary.is_empty {
        println!("No diary entries between {} and {}", range.start, range.end);
    } else {
        for (label, value) in state
            .summary
            .dataset
            .labels
            .iter()
            .zip(state.summary.dataset.values.iter())
        {
            println!("{:<12} {}", label, value);
        }
    }
    if let Some(err) = state.last_error {
        eprintln!("last refresh error: {}", err);
    }
    Ok(())
}
