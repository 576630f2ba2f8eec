use poise::serenity_prelude::{GuildId, UserId};

use crate::constants::MESSAGE_SPLIT_LIMIT;
use crate::models::{Context, Error};
use crate::utils::message_formatter::{build_list_entry, build_list_message};
use crate::utils::string_utils::split_message;
use crate::utils::validation::require_guild;

/// List all registered birthdays
#[poise::command(slash_command, rename = "birthdaylist", guild_only)]
pub async fn birthday_list(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    let stored = ctx.data().store.snapshot().await;

    if stored.is_empty() {
        ctx.send(
            poise::CreateReply::default()
                .content("No birthdays have been registered yet.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let mut entries = Vec::with_capacity(stored.len());
    for (member_id, date) in &stored {
        let name = resolve_display_name(&ctx, guild_id, member_id).await;
        entries.push(build_list_entry(&name, date));
    }
    entries.sort();

    // Long lists are split at newline boundaries so no entry is truncated
    let message = build_list_message(&entries);
    let chunks = split_message(&message, MESSAGE_SPLIT_LIMIT);

    ctx.say(chunks[0].clone()).await?;
    for chunk in &chunks[1..] {
        ctx.channel_id().say(ctx.http(), chunk).await?;
    }

    Ok(())
}

/// Display name inside the invoking guild, with a fallback for members who
/// have left
async fn resolve_display_name(ctx: &Context<'_>, guild_id: GuildId, member_id: &str) -> String {
    let user_id = match member_id.parse::<u64>() {
        Ok(id) if id != 0 => UserId::new(id),
        _ => return format!("Unknown User (ID: {})", member_id),
    };

    match guild_id.member(ctx.http(), user_id).await {
        Ok(member) => member.display_name().to_string(),
        Err(_) => format!("Unknown User (ID: {})", member_id),
    }
}
