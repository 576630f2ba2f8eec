use poise::serenity_prelude::{ButtonStyle, CreateActionRow, CreateButton};

use crate::models::{Context, Error};

/// Manage your birthday
#[poise::command(slash_command)]
pub async fn birthday(ctx: Context<'_>) -> Result<(), Error> {
    let set_button = CreateButton::new("birthday_set")
        .label("Set Birthday")
        .style(ButtonStyle::Primary);
    let remove_button = CreateButton::new("birthday_remove")
        .label("Remove Birthday")
        .style(ButtonStyle::Danger);

    let action_row = CreateActionRow::Buttons(vec![set_button, remove_button]);

    ctx.send(
        poise::CreateReply::default()
            .content("What would you like to do?")
            .components(vec![action_row])
            .ephemeral(true),
    )
    .await?;

    Ok(())
}
