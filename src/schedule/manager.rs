use std::sync::Arc;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tokio::time::{Duration, sleep};
use tracing::{error, info};

use super::birthday_tasks::run_birthday_cycle;
use crate::models::Data;

/// Start the background task driving the daily birthday cycle. Called from
/// the framework setup hook, so it never fires before the gateway is up.
pub fn start_schedule_manager(
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
    data: Arc<Data>,
    schedule: cron::Schedule,
) {
    tokio::spawn(async move {
        info!("Schedule manager started");

        loop {
            let now = Utc::now().with_timezone(&data.reference_tz);
            // after() only yields future fire times, so a restart later than
            // today's trigger waits for tomorrow instead of re-firing.
            let Some(next_fire) = schedule.after(&now).next() else {
                error!("Birthday schedule has no upcoming fire time, stopping");
                break;
            };

            let wait = (next_fire - now)
                .to_std()
                .unwrap_or(Duration::from_secs(60));
            info!(
                "Next birthday check at {} (in {} minute(s))",
                next_fire,
                wait.as_secs() / 60
            );

            sleep(wait).await;
            run_birthday_cycle(&http, &cache, &data).await;
        }
    });
}
