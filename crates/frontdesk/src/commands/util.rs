//! Shared helpers for command handlers.

use frontdesk_core::{AlwaysActive, FeedConfig, RequestFeed};

use crate::config::Ctx;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// A prompt that cannot be shown (no terminal) is a usage error rather than
/// a silent "no".
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|_| CliError::NonInteractiveRequiresYes {
            action: action.into(),
        })
}

/// A feed used for a single mutation: never started, so it neither fetches
/// the list nor polls. Mutations still go through the feed's error and
/// patch handling.
pub fn one_shot_feed(ctx: &Ctx) -> RequestFeed<frontdesk_api::ApiClient> {
    let config = FeedConfig {
        polling: frontdesk_core::PollingConfig {
            enabled: false,
            ..ctx.config.feed_config().polling
        },
        ..ctx.config.feed_config()
    };
    RequestFeed::new(ctx.client.clone(), &AlwaysActive::new(), config)
}
