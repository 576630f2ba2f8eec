use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::models::{Context, Error};
use crate::schedule::{ensure_birthday_role, grant_role, run_birthday_cycle, send_announcement};
use crate::utils::messages::format_error;
use crate::utils::validation::require_guild;

/// Manually trigger birthday checks
#[poise::command(
    slash_command,
    rename = "checkbirthdays",
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn check_birthdays(ctx: Context<'_>) -> Result<(), Error> {
    ctx.defer_ephemeral().await?;

    let serenity_ctx = ctx.serenity_context();
    run_birthday_cycle(&serenity_ctx.http, &serenity_ctx.cache, ctx.data()).await;

    ctx.say("Birthday check completed.").await?;

    Ok(())
}

/// Test the birthday message for a user
#[poise::command(
    slash_command,
    rename = "testbirthday",
    required_permissions = "ADMINISTRATOR",
    guild_only
)]
pub async fn test_birthday(
    ctx: Context<'_>,
    #[description = "The member to test the birthday message for"] member: serenity::Member,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    let http = &ctx.serenity_context().http;

    // Same compose+send+grant pipeline as the daily cycle, bypassing the
    // date matcher for the chosen member
    let mention = format!("<@{}>", member.user.id);
    if let Err(e) = send_announcement(http, guild_id, ctx.channel_id(), &mention).await {
        warn!("Test announcement failed in guild {}: {}", guild_id, e);
        ctx.send(
            poise::CreateReply::default()
                .content(format_error(
                    "I don't have permission to send messages in this channel.",
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let role_result = match ensure_birthday_role(http, guild_id).await {
        Ok(role_id) => grant_role(http, &member, role_id).await,
        Err(e) => Err(e),
    };

    let content = match role_result {
        Ok(()) => format!(
            "Birthday message sent for {} and role assigned.",
            member.display_name()
        ),
        Err(e) => {
            warn!("Test role grant failed in guild {}: {}", guild_id, e);
            "Birthday message sent, but I don't have permission to manage roles.".to_string()
        }
    };

    ctx.send(poise::CreateReply::default().content(content).ephemeral(true))
        .await?;

    Ok(())
}
