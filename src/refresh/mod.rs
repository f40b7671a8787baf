use std::sync::Arc;

use crate::{context::Context, usecases};

/// One-shot bulk refresh, meant to be run from a scheduler.
pub async fn serve(context: Context) -> anyhow::Result<()> {
    let summary = usecases::leaderboards::refresh_all(Arc::new(context)).await?;

    for result in summary.results.iter().filter(|result| !result.success) {
        log::warn!(
            name = result.username.as_str(),
            error = result.error.as_deref().unwrap_or("unknown");
            "Entry was not fully refreshed",
        );
    }

    log::info!(
        successful = summary.successful,
        failed = summary.failed;
        "{}",
        summary.message,
    );

    Ok(())
}
