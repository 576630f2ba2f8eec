use poise::serenity_prelude as serenity;
use tracing::error;

use crate::models::Data;

use super::birthday::{
    handle_birthday_modal, handle_remove_birthday_button, handle_set_birthday_button,
};

/// Handle component interactions (button clicks)
pub async fn handle_interaction(
    ctx: &serenity::Context,
    interaction: serenity::ComponentInteraction,
    data: &Data,
) {
    match interaction.data.custom_id.as_str() {
        "birthday_set" => {
            if let Err(e) = handle_set_birthday_button(ctx, &interaction, data).await {
                error!("Failed to handle set birthday button: {}", e);
            }
        }
        "birthday_remove" => {
            if let Err(e) = handle_remove_birthday_button(ctx, &interaction, data).await {
                error!("Failed to handle remove birthday button: {}", e);
            }
        }
        _ => {}
    }
}

/// Handle modal submissions
pub async fn handle_modal_submit(
    ctx: &serenity::Context,
    interaction: serenity::ModalInteraction,
    data: &Data,
) {
    if interaction.data.custom_id == "birthday_modal"
        && let Err(e) = handle_birthday_modal(ctx, &interaction, data).await
    {
        error!("Failed to handle birthday modal: {}", e);
    }
}
