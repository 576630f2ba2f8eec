use std::sync::Arc;

use poise::serenity_prelude::{
    self as serenity, ChannelId, ChannelType, CreateMessage, GuildId, UserId,
};
use tracing::{info, warn};

use super::role_lifecycle::{ensure_birthday_role, grant_role, revoke_all};
use super::types::{PipelineError, classify_member_fetch, is_forbidden};
use crate::constants::BIRTHDAY_MESSAGES;
use crate::models::Data;
use crate::utils::datetime::{current_date_in, members_with_birthday_on};
use crate::utils::message_formatter::compose_birthday_message;

/// Run one full birthday cycle: for every guild the bot serves, revoke the
/// role from yesterday's holders, then announce and grant for every stored
/// birthday matching today in the reference timezone. Failures are isolated
/// per (guild, member); the cycle never aborts early.
pub async fn run_birthday_cycle(
    http: &Arc<serenity::Http>,
    cache: &Arc<serenity::Cache>,
    data: &Data,
) {
    let today = current_date_in(data.reference_tz);
    let entries = data.store.snapshot().await;
    let guilds = cache.guilds();

    info!(
        "Running birthday cycle for {} across {} guild(s), {} stored birthday(s)",
        today,
        guilds.len(),
        entries.len()
    );

    // Parsed once per cycle so a bad store key logs once, not once per guild
    let celebrant_ids = parse_member_ids(&members_with_birthday_on(&entries, today));

    for guild_id in guilds {
        // Revoke before granting: a member whose birthday matches on
        // consecutive reference dates keeps a fresh grant.
        match revoke_all(http, guild_id).await {
            Ok(0) => {}
            Ok(revoked) => info!(
                "Revoked birthday role from {} member(s) in guild {}",
                revoked, guild_id
            ),
            Err(e) => warn!("Revoke pass failed in guild {}: {}", guild_id, e),
        }

        for &user_id in &celebrant_ids {
            match celebrate_member(http, guild_id, user_id).await {
                Ok(()) => info!("Celebrated user {} in guild {}", user_id, guild_id),
                // Member left the guild; nothing to announce here
                Err(PipelineError::MemberNotFound { .. }) => {}
                Err(e) => warn!("Skipping user {} in guild {}: {}", user_id, guild_id, e),
            }
        }
    }
}

/// Announce and grant for one member in one guild. A failed send skips the
/// role grant for this member.
async fn celebrate_member(
    http: &Arc<serenity::Http>,
    guild_id: GuildId,
    user_id: UserId,
) -> Result<(), PipelineError> {
    let member = guild_id
        .member(http, user_id)
        .await
        .map_err(|e| classify_member_fetch(e, guild_id, user_id))?;

    let channel_id = announcement_channel(http, guild_id).await?;
    send_announcement(http, guild_id, channel_id, &format!("<@{}>", user_id)).await?;

    let role_id = ensure_birthday_role(http, guild_id).await?;
    grant_role(http, &member, role_id).await
}

/// Compose a randomly templated announcement and send it to the channel
pub async fn send_announcement(
    http: &Arc<serenity::Http>,
    guild_id: GuildId,
    channel_id: ChannelId,
    mention: &str,
) -> Result<(), PipelineError> {
    let text = compose_birthday_message(&mut rand::thread_rng(), BIRTHDAY_MESSAGES, mention);

    channel_id
        .send_message(http, CreateMessage::new().content(text))
        .await
        .map(|_| ())
        .map_err(|e| {
            if is_forbidden(&e) {
                PipelineError::SendForbidden {
                    guild_id,
                    channel_id,
                }
            } else {
                PipelineError::Platform(e)
            }
        })
}

/// Pure function: parse store keys into user ids, dropping any key that is
/// not numeric
fn parse_member_ids(member_ids: &[String]) -> Vec<UserId> {
    member_ids
        .iter()
        .filter_map(|member_id| match member_id.parse::<u64>() {
            // Id::new panics on zero, so a literal "0" key is invalid too
            Ok(id) if id != 0 => Some(UserId::new(id)),
            _ => {
                warn!("Skipping invalid store key '{}'", member_id);
                None
            }
        })
        .collect()
}

/// The guild's system channel, else its first text channel by position
async fn announcement_channel(
    http: &Arc<serenity::Http>,
    guild_id: GuildId,
) -> Result<ChannelId, PipelineError> {
    let guild = http
        .get_guild(guild_id)
        .await
        .map_err(PipelineError::Platform)?;
    if let Some(channel_id) = guild.system_channel_id {
        return Ok(channel_id);
    }

    let channels = guild_id
        .channels(http)
        .await
        .map_err(PipelineError::Platform)?;
    channels
        .values()
        .filter(|channel| channel.kind == ChannelType::Text)
        .min_by_key(|channel| (channel.position, channel.id))
        .map(|channel| channel.id)
        .ok_or(PipelineError::NoTargetChannel { guild_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_member_ids_keeps_numeric_keys_in_order() {
        let keys = vec!["3".to_string(), "1".to_string(), "2".to_string()];

        assert_eq!(
            parse_member_ids(&keys),
            vec![UserId::new(3), UserId::new(1), UserId::new(2)]
        );
    }

    #[test]
    fn test_parse_member_ids_drops_invalid_keys() {
        let keys = vec![
            "42".to_string(),
            "not-an-id".to_string(),
            "0".to_string(),
            "".to_string(),
        ];

        assert_eq!(parse_member_ids(&keys), vec![UserId::new(42)]);
    }
}
