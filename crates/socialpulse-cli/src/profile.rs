//! Profile and scoring command handlers.

use std::sync::Arc;

use socialpulse_core::AppConfig;
use socialpulse_db::PgSnapshotStore;
use socialpulse_profiler::{
    MemorySnapshotStore, PipelineSettings, ProfilePipeline, SnapshotStore, StoredSnapshot,
};
use socialpulse_sentiment::analyze;

/// Where `profile` writes its snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreChoice {
    Database,
    Memory,
}

/// `--no-persist` wins; otherwise the database is used when one is configured.
pub(crate) fn choose_store(database_configured: bool, no_persist: bool) -> StoreChoice {
    if database_configured && !no_persist {
        StoreChoice::Database
    } else {
        StoreChoice::Memory
    }
}

/// Score `text` and print the full result as JSON.
///
/// # Errors
///
/// Returns an error if a configured lexicon file cannot be loaded.
pub(crate) fn run_score(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let lexicon = socialpulse_profiler::load_lexicon(config)?;
    let result = analyze(text, &lexicon);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Run the full pipeline for one handle and print the snapshot as JSON.
///
/// # Errors
///
/// Returns an error if the lexicon or database cannot be loaded, or if the
/// pipeline fails for the handle.
pub(crate) async fn run_profile(
    config: &AppConfig,
    handle: &str,
    no_persist: bool,
) -> anyhow::Result<()> {
    let store: Arc<dyn SnapshotStore> =
        match choose_store(config.database_url.is_some(), no_persist) {
            StoreChoice::Database => Arc::new(PgSnapshotStore::new(crate::connect(config).await?)),
            StoreChoice::Memory => {
                if !no_persist {
                    tracing::warn!("DATABASE_URL not set; snapshot will not be persisted");
                }
                Arc::new(MemorySnapshotStore::new())
            }
        };

    let lexicon = socialpulse_profiler::load_lexicon(config)?;
    let pipeline = ProfilePipeline::new(
        Arc::new(socialpulse_profiler::chromium_scraper(config)),
        store,
        Arc::new(lexicon),
        PipelineSettings::from_app_config(config),
    );

    let snapshot = pipeline.run(handle).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Print stored snapshots for a handle as a table.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_snapshots(
    pool: &sqlx::PgPool,
    handle: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let Some(handle) = socialpulse_profiler::normalize_handle(handle) else {
        anyhow::bail!("handle is required");
    };

    let store = PgSnapshotStore::new(pool.clone());
    let rows = store.list_snapshots(&handle, limit.max(1)).await?;

    if rows.is_empty() {
        println!("no snapshots found for '{handle}'; run `profile {handle}` first");
        return Ok(());
    }

    println!(
        "{:<8}{:<18}{:<12}{:<8}{:<10}OVERALL",
        "ID", "CAPTURED", "FOLLOWERS", "POSTS", "MEAN"
    );
    for row in &rows {
        println!("{}", format_row(row));
    }

    Ok(())
}

fn format_row(row: &StoredSnapshot) -> String {
    let snap = &row.snapshot;
    format!(
        "{:<8}{:<18}{:<12}{:<8}{:<10.2}{}",
        row.id,
        snap.captured_at.format("%Y-%m-%d %H:%M"),
        snap.follower_count,
        snap.posts.len(),
        snap.summary.mean_score,
        snap.summary.overall.as_str()
    )
}
