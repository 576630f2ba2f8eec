use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, EditRole, GuildId, Member, RoleId};
use tracing::{info, warn};

use super::types::{PipelineError, is_forbidden};
use crate::constants::{BIRTHDAY_ROLE_COLOUR, BIRTHDAY_ROLE_NAME};

/// Look up the birthday role by name, creating it with the fixed colour when
/// the guild does not have one yet
pub async fn ensure_birthday_role(
    http: &Arc<serenity::Http>,
    guild_id: GuildId,
) -> Result<RoleId, PipelineError> {
    let roles = guild_id.roles(http).await.map_err(PipelineError::Platform)?;
    if let Some(role) = roles.values().find(|role| role.name == BIRTHDAY_ROLE_NAME) {
        return Ok(role.id);
    }

    let role = guild_id
        .create_role(
            http,
            EditRole::new()
                .name(BIRTHDAY_ROLE_NAME)
                .colour(serenity::Colour::new(BIRTHDAY_ROLE_COLOUR)),
        )
        .await
        .map_err(|e| {
            if is_forbidden(&e) {
                PipelineError::RoleCreateForbidden { guild_id }
            } else {
                PipelineError::Platform(e)
            }
        })?;

    info!("Created '{}' role in guild {}", BIRTHDAY_ROLE_NAME, guild_id);
    Ok(role.id)
}

/// Grant the birthday role to a member. A no-op when already held.
pub async fn grant_role(
    http: &Arc<serenity::Http>,
    member: &Member,
    role_id: RoleId,
) -> Result<(), PipelineError> {
    if member.roles.contains(&role_id) {
        return Ok(());
    }

    member.add_role(http, role_id).await.map_err(|e| {
        if is_forbidden(&e) {
            PipelineError::RoleGrantForbidden {
                guild_id: member.guild_id,
                user_id: member.user.id,
            }
        } else {
            PipelineError::Platform(e)
        }
    })?;

    info!(
        "Granted '{}' role to user {} in guild {}",
        BIRTHDAY_ROLE_NAME, member.user.id, member.guild_id
    );
    Ok(())
}

/// Strip the birthday role from every member currently holding it. The
/// current holder set is exactly yesterday's birthday members, so this is the
/// whole "who to revoke" bookkeeping. Per-member failures are logged and
/// skipped; a guild without the role has nobody to revoke.
pub async fn revoke_all(
    http: &Arc<serenity::Http>,
    guild_id: GuildId,
) -> Result<usize, PipelineError> {
    let roles = guild_id.roles(http).await.map_err(PipelineError::Platform)?;
    let Some(role_id) = roles
        .values()
        .find(|role| role.name == BIRTHDAY_ROLE_NAME)
        .map(|role| role.id)
    else {
        return Ok(0);
    };

    let members = guild_id
        .members(http, None, None)
        .await
        .map_err(PipelineError::Platform)?;

    let mut revoked = 0;
    for member in holders_of(&members, role_id, |m| m.roles.as_slice()) {
        match member.remove_role(http, role_id).await {
            Ok(()) => revoked += 1,
            Err(e) if is_forbidden(&e) => {
                let err = PipelineError::RoleRevokeForbidden {
                    guild_id,
                    user_id: member.user.id,
                };
                warn!("Revoke failed: {}", err);
            }
            Err(e) => warn!(
                "Failed to remove '{}' role from user {} in guild {}: {}",
                BIRTHDAY_ROLE_NAME, member.user.id, guild_id, e
            ),
        }
    }

    Ok(revoked)
}

/// Pure function: select the members whose role list contains `role_id`.
/// The role lists are read through `roles`, keeping the selection testable
/// without platform types.
fn holders_of<M>(members: &[M], role_id: RoleId, roles: impl Fn(&M) -> &[RoleId]) -> Vec<&M> {
    members
        .iter()
        .filter(|member| roles(member).contains(&role_id))
        .collect()
}
