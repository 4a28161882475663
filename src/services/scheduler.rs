use serde::Serialize;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime, UtcOffset};
use tracing::{debug, info, instrument};

use crate::error::AppResult;
use crate::utils::constant::RECORD_RETENTION;

/// Rows removed by one cleanup sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurgeSummary {
    pub notifications: u64,
    pub recommendations: u64,
}

pub struct CleanupService;

impl CleanupService {
    /// The first Sunday 00:00 UTC strictly after `now`.
    pub fn next_run_after(now: OffsetDateTime) -> OffsetDateTime {
        let now = now.to_offset(UtcOffset::UTC);
        let days_ahead = 7 - i64::from(now.weekday().number_days_from_sunday());
        (now.date() + Duration::days(days_ahead))
            .midnight()
            .assume_utc()
    }

    /// Deletes notifications and recommendations older than the retention
    /// window, measured back from `now`.
    #[instrument(skip(db_pool), err)]
    pub async fn purge_expired_records(
        db_pool: &PgPool,
        now: OffsetDateTime,
    ) -> AppResult<PurgeSummary> {
        let cutoff = now - RECORD_RETENTION;
        let mut tx = db_pool.begin().await?;

        let notifications = sqlx::query("DELETE FROM notifications WHERE created_at < $1")
            .bind(cutoff)
            .execute(tx.as_mut())
            .await?
            .rows_affected();

        let recommendations = sqlx::query("DELETE FROM recommendations WHERE created_at < $1")
            .bind(cutoff)
            .execute(tx.as_mut())
            .await?
            .rows_affected();

        tx.commit().await?;

        let summary = PurgeSummary {
            notifications,
            recommendations,
        };
        info!(%cutoff, ?summary, "Purged expired records");
        Ok(summary)
    }

    pub fn spawn_cleanup_task(db_pool: PgPool) {
        tokio::spawn(async move {
            loop {
                let now = OffsetDateTime::now_utc();
                let next_run = Self::next_run_after(now);
                debug!(%next_run, "Next cleanup sweep scheduled");

                let wait: std::time::Duration = (next_run - now).try_into().unwrap_or_default();
                tokio::time::sleep(wait).await;

                let _ = Self::purge_expired_records(&db_pool, OffsetDateTime::now_utc()).await;
            }
        });
    }
}
