use poise::serenity_prelude::{self as serenity, ChannelId, GuildId, UserId};

/// Failure modes of the announcement/role pipeline. All of them are recovered
/// per (guild, member) by the caller; none aborts a running cycle.
#[derive(Debug)]
pub enum PipelineError {
    SendForbidden {
        guild_id: GuildId,
        channel_id: ChannelId,
    },
    RoleCreateForbidden {
        guild_id: GuildId,
    },
    RoleGrantForbidden {
        guild_id: GuildId,
        user_id: UserId,
    },
    RoleRevokeForbidden {
        guild_id: GuildId,
        user_id: UserId,
    },
    /// The member is no longer in the guild; skipped silently
    MemberNotFound {
        guild_id: GuildId,
        user_id: UserId,
    },
    /// The guild has neither a system channel nor any text channel
    NoTargetChannel {
        guild_id: GuildId,
    },
    Platform(serenity::Error),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::SendForbidden {
                guild_id,
                channel_id,
            } => write!(
                f,
                "not allowed to send messages in channel {} of guild {}",
                channel_id, guild_id
            ),
            PipelineError::RoleCreateForbidden { guild_id } => {
                write!(f, "not allowed to create the birthday role in guild {}", guild_id)
            }
            PipelineError::RoleGrantForbidden { guild_id, user_id } => write!(
                f,
                "not allowed to grant the birthday role to user {} in guild {}",
                user_id, guild_id
            ),
            PipelineError::RoleRevokeForbidden { guild_id, user_id } => write!(
                f,
                "not allowed to revoke the birthday role from user {} in guild {}",
                user_id, guild_id
            ),
            PipelineError::MemberNotFound { guild_id, user_id } => {
                write!(f, "user {} is not a member of guild {}", user_id, guild_id)
            }
            PipelineError::NoTargetChannel { guild_id } => {
                write!(f, "guild {} has no channel to announce in", guild_id)
            }
            PipelineError::Platform(e) => write!(f, "platform error: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Platform(e) => Some(e),
            _ => None,
        }
    }
}

/// The HTTP status the platform answered with, if the error carries one
fn error_status(err: &serenity::Error) -> Option<serenity::StatusCode> {
    match err {
        serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code)
        }
        _ => None,
    }
}

/// True when the platform rejected the call for missing permissions
pub fn is_forbidden(err: &serenity::Error) -> bool {
    error_status(err) == Some(serenity::StatusCode::FORBIDDEN)
}

/// Classify a failed member fetch. Only a 404 means the member left the
/// guild; a rate limit or outage must stay a platform error so the caller
/// logs it instead of skipping the member silently.
pub fn classify_member_fetch(
    err: serenity::Error,
    guild_id: GuildId,
    user_id: UserId,
) -> PipelineError {
    if error_status(&err) == Some(serenity::StatusCode::NOT_FOUND) {
        PipelineError::MemberNotFound { guild_id, user_id }
    } else {
        PipelineError::Platform(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_http_errors_are_not_forbidden() {
        assert!(!is_forbidden(&serenity::Error::Other("gateway timeout")));
    }

    #[test]
    fn test_member_fetch_failure_without_a_404_stays_a_platform_error() {
        let err = classify_member_fetch(
            serenity::Error::Other("gateway timeout"),
            GuildId::new(1),
            UserId::new(2),
        );
        assert!(matches!(err, PipelineError::Platform(_)));
    }

    #[test]
    fn test_display_names_the_affected_member() {
        let err = PipelineError::RoleRevokeForbidden {
            guild_id: GuildId::new(10),
            user_id: UserId::new(20),
        };
        let text = err.to_string();
        assert!(text.contains("user 20"));
        assert!(text.contains("guild 10"));
    }
}
