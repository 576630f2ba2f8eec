mod commands;
mod constants;
mod handlers;
mod models;
mod schedule;
mod store;
mod utils;

use std::str::FromStr;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::{
    commands::{birthday, birthday_list, birthday_stats, check_birthdays, test_birthday},
    constants::{
        BIRTHDAY_MESSAGES, DEFAULT_BIRTHDAY_CRON, DEFAULT_STORE_PATH, DEFAULT_TIMEZONE,
        LOG_DIRECTIVE,
    },
    handlers::{handle_interaction, handle_modal_submit},
    models::Data,
    schedule::start_schedule_manager,
    store::BirthdayStore,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match load_configuration() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // A corrupt store file is fatal: starting anyway would overwrite user
    // data on the next save
    let store = match BirthdayStore::load(&config.store_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load birthday store: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} registered birthday(s) from {}",
        store.len().await,
        config.store_path
    );

    // Initialize bot data
    let data = Data::new(store, config.reference_tz);

    // Create and start the bot
    if let Err(e) = start_bot(config, data).await {
        error!("Bot error: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
struct Config {
    discord_token: String,
    dev_guild_id: Option<u64>,
    store_path: String,
    reference_tz: chrono_tz::Tz,
    birthday_schedule: cron::Schedule,
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load configuration from environment variables
fn load_configuration() -> Result<Config, Box<dyn std::error::Error>> {
    let discord_token = std::env::var("DISCORD_TOKEN")
        .map_err(|_| "DISCORD_TOKEN environment variable not set. Set it with: export DISCORD_TOKEN=your_bot_token")?;

    // Optional: development guild ID for faster command registration
    let dev_guild_id = std::env::var("DEV_GUILD_ID")
        .ok()
        .and_then(|id| id.parse::<u64>().ok());

    if dev_guild_id.is_some() {
        info!("Development mode: Commands will be registered to guild only");
    }

    let store_path =
        std::env::var("BIRTHDAY_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());

    let tz_name = std::env::var("BIRTHDAY_TZ").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
    let reference_tz = chrono_tz::Tz::from_str(&tz_name)
        .map_err(|_| format!("BIRTHDAY_TZ '{}' is not a known timezone", tz_name))?;

    let cron_expr =
        std::env::var("BIRTHDAY_CRON").unwrap_or_else(|_| DEFAULT_BIRTHDAY_CRON.to_string());
    let birthday_schedule = cron::Schedule::from_str(&cron_expr).map_err(|e| {
        format!(
            "BIRTHDAY_CRON '{}' is not a valid cron expression: {}",
            cron_expr, e
        )
    })?;

    if BIRTHDAY_MESSAGES.is_empty() {
        return Err("No birthday message templates configured".into());
    }

    Ok(Config {
        discord_token,
        dev_guild_id,
        store_path,
        reference_tz,
        birthday_schedule,
    })
}

/// Create and start the Discord bot
async fn start_bot(
    config: Config,
    data: Data,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Wrap data in Arc for sharing with the scheduler
    let data_arc = Arc::new(data);
    let data_for_framework = Arc::clone(&data_arc);
    let dev_guild_id = config.dev_guild_id;
    let birthday_schedule = config.birthday_schedule.clone();

    // Create framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                birthday(),
                birthday_list(),
                birthday_stats(),
                check_birthdays(),
                test_birthday(),
            ],
            event_handler: |ctx, event, _framework, data| {
                Box::pin(async move {
                    if let poise::serenity_prelude::FullEvent::InteractionCreate { interaction } =
                        event
                    {
                        match interaction {
                            serenity::Interaction::Component(component) => {
                                handle_interaction(ctx, component.clone(), data).await;
                            }
                            serenity::Interaction::Modal(modal) => {
                                handle_modal_submit(ctx, modal.clone(), data).await;
                            }
                            _ => {}
                        }
                    }
                    Ok(())
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let http = ctx.http.clone();
            let cache = ctx.cache.clone();
            let data_clone = Arc::clone(&data_for_framework);

            // Start the daily scheduler only once the gateway is up
            start_schedule_manager(http, cache, data_clone, birthday_schedule);
            info!("Schedule manager task started");

            Box::pin(async move {
                // Register commands based on dev_guild_id
                if let Some(guild_id) = dev_guild_id {
                    let guild = serenity::GuildId::new(guild_id);
                    info!("Registering commands in development guild: {}", guild_id);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild)
                        .await?;
                    info!(
                        "Commands registered in guild {} (instant updates)",
                        guild_id
                    );
                } else {
                    info!("Registering commands globally (may take up to 1 hour)");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Commands registered globally");
                }

                info!("Bot is ready!");

                // Return a new clone of the data
                Ok((*data_for_framework).clone())
            })
        })
        .build();

    // Create client with required intents
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    // Start the bot
    info!("Starting bot...");
    client.start().await?;

    Ok(())
}
