use poise::serenity_prelude::{
    self as serenity, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use tracing::{error, info};

use crate::models::{Data, Error};
use crate::utils::datetime::Birthday;
use crate::utils::messages::{build_date_format_help, format_error, format_info, format_success};
use crate::utils::string_utils::is_empty_or_whitespace;

/// Pure function: Extract input text from a modal component
fn extract_input_value(components: &[serenity::ActionRow], index: usize) -> Option<String> {
    components
        .get(index)
        .and_then(|row| row.components.first())
        .and_then(|component| match component {
            serenity::ActionRowComponent::InputText(input) => input.value.clone(),
            _ => None,
        })
}

/// Handle the set birthday button click: show the date entry modal
pub async fn handle_set_birthday_button(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    _data: &Data,
) -> Result<(), Error> {
    let modal = serenity::CreateModal::new("birthday_modal", "Set Your Birthday").components(vec![
        serenity::CreateActionRow::InputText(
            serenity::CreateInputText::new(
                serenity::InputTextStyle::Short,
                "Enter your birthday (DD/MM or DD/MM/YY)",
                "birthday_input",
            )
            .placeholder("e.g., 15/03 or 15/03/90")
            .required(true)
            .min_length(3)
            .max_length(8),
        ),
    ]);

    let response = CreateInteractionResponse::Modal(modal);
    interaction.create_response(ctx, response).await?;

    Ok(())
}

/// Handle the remove birthday button click
pub async fn handle_remove_birthday_button(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let user_id = interaction.user.id;

    let content = match data.store.remove(user_id).await {
        Ok(true) => format_success("Your birthday has been removed."),
        Ok(false) => format_info("You don't have a birthday set."),
        Err(e) => {
            error!("Failed to remove birthday for user {}: {}", user_id, e);
            format_error("Failed to remove your birthday. Please try again later.")
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );
    interaction.create_response(ctx, response).await?;

    Ok(())
}

/// Handle the birthday modal submission: parse, validate, persist
pub async fn handle_birthday_modal(
    ctx: &serenity::Context,
    interaction: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), Error> {
    let user_id = interaction.user.id;
    let input = extract_input_value(&interaction.data.components, 0).unwrap_or_default();

    if is_empty_or_whitespace(&input) {
        let response = CreateInteractionResponse::Message(
            CreateInteractionResponseMessage::new()
                .content(format_error("Birthday cannot be empty!"))
                .ephemeral(true),
        );
        interaction.create_response(ctx, response).await?;
        return Ok(());
    }

    let birthday = match Birthday::parse(&input) {
        Ok(birthday) => birthday,
        Err(_) => {
            let response = CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(format_error(&build_date_format_help()))
                    .ephemeral(true),
            );
            interaction.create_response(ctx, response).await?;
            return Ok(());
        }
    };

    // Defer the response; persisting may take a moment
    interaction
        .create_response(
            ctx,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await?;

    let canonical = birthday.canonical();
    if let Err(e) = data.store.set(user_id, &canonical).await {
        error!("Failed to save birthday for user {}: {}", user_id, e);
        interaction
            .edit_response(
                ctx,
                EditInteractionResponse::new().content(format_error(
                    "Failed to save your birthday. Please try again later.",
                )),
            )
            .await?;
        return Ok(());
    }

    interaction
        .edit_response(
            ctx,
            EditInteractionResponse::new().content(format_success(&format!(
                "Your birthday has been set to {}",
                canonical
            ))),
        )
        .await?;

    info!("User {} set birthday to {}", user_id, canonical);

    Ok(())
}
