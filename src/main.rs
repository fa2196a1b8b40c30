//! FlowerBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use tracing::{error, info, warn};

use FlowerBot::{
    config::Settings,
    utils::logging,
    services::ServiceFactory,
    state::{DialogStore, ReplyLinkStore},
    handlers::{
        commands::{self, Command},
        messages::{handle_message, handle_web_app_data},
    },
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the rolling-file writer alive
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting FlowerBot Telegram Bot...");

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);

    // Initialize state management
    let dialogs = DialogStore::new();
    let reply_links = ReplyLinkStore::new();

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(bot.clone(), settings.clone(), reply_links.clone())?;

    // Background availability refresh
    let refresh_handle = services.availability.clone().spawn_refresh();

    // Wrap shared state in Arc for dependency injection
    let services_arc = Arc::new(services);
    let settings_arc = Arc::new(settings);
    let dialogs_arc = Arc::new(dialogs);
    let reply_links_arc = Arc::new(reply_links);

    // Create the handler
    let handler = create_handler();

    // Create dispatcher with dependencies registered
    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![
            services_arc,
            settings_arc,
            dialogs_arc,
            reply_links_arc
        ])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("FlowerBot is ready!");

    // Start the bot with polling
    dispatcher.dispatch().await;

    refresh_handle.abort();
    info!("FlowerBot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(
        Update::filter_message()
            .branch(
                // Handle commands
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(handle_commands),
            )
            .branch(
                // Handle web-app order payloads
                dptree::filter(|msg: Message| msg.web_app_data().is_some())
                    .endpoint(handle_web_app),
            )
            .branch(
                // Handle regular messages
                dptree::endpoint(handle_messages),
            ),
    )
}

/// Handle bot commands
async fn handle_commands(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
    dialogs: Arc<DialogStore>,
) -> HandlerResult {
    if let Err(e) = commands::handle_command(bot, msg, cmd, &services, &settings, &dialogs).await {
        error!(error = %e, "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(
    bot: Bot,
    msg: Message,
    services: Arc<ServiceFactory>,
    settings: Arc<Settings>,
    dialogs: Arc<DialogStore>,
    reply_links: Arc<ReplyLinkStore>,
) -> HandlerResult {
    if let Err(e) =
        handle_message(bot, msg, &services, &settings, &dialogs, &reply_links).await
    {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}

/// Handle web-app order payloads
async fn handle_web_app(bot: Bot, msg: Message, services: Arc<ServiceFactory>) -> HandlerResult {
    if let Err(e) = handle_web_app_data(bot, msg, &services).await {
        error!(error = %e, "Error handling web app data");
        return Err(e.into());
    }

    Ok(())
}
