use crate::models::{Context, Error};
use crate::utils::message_formatter::{build_stats_message, most_common_birth_month};

/// Show birthday statistics
#[poise::command(slash_command, rename = "birthdaystats")]
pub async fn birthday_stats(ctx: Context<'_>) -> Result<(), Error> {
    let stored = ctx.data().store.snapshot().await;
    let most_common = most_common_birth_month(stored.values());

    ctx.say(build_stats_message(stored.len(), most_common))
        .await?;

    Ok(())
}
