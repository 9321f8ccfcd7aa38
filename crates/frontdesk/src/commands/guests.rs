//! Guest command handlers.

use chrono::Utc;
use tabled::Tabled;

use frontdesk_api::types::AssignRoom;
use frontdesk_core::Guest;
use frontdesk_core::convert::convert_list;

use crate::cli::{GuestsArgs, GuestsCommand};
use crate::config::Ctx;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct GuestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Check-out")]
    check_out: String,
    #[tabled(rename = "DND")]
    dnd: String,
    #[tabled(rename = "Points")]
    points: i64,
}

impl From<&Guest> for GuestRow {
    fn from(g: &Guest) -> Self {
        let date = |d: Option<chrono::DateTime<Utc>>| {
            d.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
        };
        Self {
            id: g.id.clone(),
            name: g.full_name(),
            room: output::or_dash(g.room_number.as_deref()),
            check_in: date(g.check_in),
            check_out: date(g.check_out),
            dnd: g
                .preferences
                .do_not_disturb
                .as_ref()
                .map_or_else(|| "-".into(), |q| format!("{}-{}", q.start, q.end)),
            points: g.loyalty_points,
        }
    }
}

pub async fn handle(args: GuestsArgs, ctx: &Ctx) -> Result<(), CliError> {
    match args.command {
        GuestsCommand::List { search, in_house } => {
            let spinner = output::spinner("Fetching guests...", ctx.quiet);
            let raw = ctx.client.list_guests().await;
            spinner.finish_and_clear();

            let now = Utc::now();
            let guests: Vec<Guest> = convert_list(raw?, "guest")
                .into_iter()
                .filter(|g: &Guest| search.as_deref().is_none_or(|q| g.matches_query(q)))
                .filter(|g| !in_house || g.is_in_house(now))
                .collect();
            let out = output::render_list(
                ctx.format,
                &guests,
                |g| GuestRow::from(g),
                |g| g.id.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        GuestsCommand::AssignRoom { guest, room } => {
            let body = AssignRoom {
                guest_id: guest.clone(),
                room_id: room.clone(),
            };
            let raw = ctx
                .client
                .assign_room(&body)
                .await
                .map_err(|e| CliError::from(e).or_not_found("guest", &guest, "guests list"))?;
            let updated = Guest::try_from(raw)?;
            output::notify(
                &format!(
                    "{} assigned to room {}",
                    updated.full_name(),
                    updated.room_number.as_deref().unwrap_or(&room)
                ),
                ctx.color,
                ctx.quiet,
            );
            Ok(())
        }
    }
}
