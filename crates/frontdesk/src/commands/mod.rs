//! Command dispatch: routes parsed CLI commands to their handlers.

pub mod bookings;
pub mod config_cmd;
pub mod guests;
pub mod requests;
pub mod rooms;
pub mod util;

use crate::cli::Command;
use crate::config::Ctx;
use crate::error::CliError;

/// Dispatch a backend-facing command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx) -> Result<(), CliError> {
    match cmd {
        Command::Requests(args) => requests::handle(args, ctx).await,
        Command::Rooms(args) => rooms::handle(args, ctx).await,
        Command::Guests(args) => guests::handle(args, ctx).await,
        Command::Bookings(args) => bookings::handle(args, ctx).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not talk to the backend".into(),
        )),
    }
}
