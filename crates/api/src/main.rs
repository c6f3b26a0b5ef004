use std::sync::Arc;
use std::time::Duration;

use dutydesk_api::{build_router, state::AppState};
use dutydesk_config::Settings;
use dutydesk_db::{connect, indexes::ensure_indexes};
use dutydesk_services::ReminderDispatcher;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "dutydesk_api=debug,dutydesk_services=debug,dutydesk_db=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!(
        "Starting DutyDesk API on {}:{}",
        settings.app.host, settings.app.port
    );

    // Connect to MongoDB
    let db = connect(&settings).await?;

    // Ensure indexes
    ensure_indexes(&db).await?;

    // Build app state
    let app_state = AppState::new(db, settings.clone());

    // Reminder dispatch loop
    start_reminder_job(Arc::clone(&app_state.dispatcher), settings.reminders.tick_secs).await?;

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs the reminder dispatcher on a fixed interval. The /api/reminders/process
/// endpoint drives the same dispatcher, so an external cron can take over when
/// this process is not the scheduler of record.
async fn start_reminder_job(
    dispatcher: Arc<ReminderDispatcher>,
    tick_secs: u64,
) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    let job = Job::new_repeated_async(Duration::from_secs(tick_secs), move |_id, _lock| {
        let dispatcher = Arc::clone(&dispatcher);
        Box::pin(async move {
            match dispatcher.process_tick().await {
                Ok(outcome) if outcome.sent_count > 0 => {
                    info!(sent = outcome.sent_count, "Reminder tick dispatched");
                }
                Ok(_) => {}
                Err(err) => warn!(error = %err, "Reminder tick failed"),
            }
        })
    })
    .map_err(|e| anyhow::anyhow!("{e:?}"))?;

    scheduler
        .add(job)
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    scheduler
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("{e:?}"))?;
    info!(tick_secs, "Reminder scheduler started");

    Ok(())
}
