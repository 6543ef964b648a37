pub mod client;
pub mod confirmation;
pub mod controller;
pub mod feedback;

use std::sync::LazyLock;

pub use action_utils::{ActionItem, Category, ItemId, UpdateItemRequest};
pub use client::{ClientError, HttpItemsClient, ItemsClient};
pub use confirmation::{ConfirmationPrompt, Intent};
pub use controller::ActionItems;
pub use feedback::{Feedback, FeedbackKind, LogFeedback, NoFeedback};

// keeping this inside LOGGER means the logger is only ever initialized once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    let initialized =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    if initialized.is_ok() {
        log::info!("Logging initialized");
    }
});

pub fn init_logging() {
    LazyLock::force(&LOGGER);
}
