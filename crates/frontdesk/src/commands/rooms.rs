//! Room command handlers.

use tabled::Tabled;

use frontdesk_api::types::{CreateRoom, HousekeepingStatus, RoomFeatures, RoomUpdate};
use frontdesk_core::Room;
use frontdesk_core::convert::convert_list;

use crate::cli::{RoomsArgs, RoomsCommand};
use crate::config::Ctx;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Guest")]
    guest: String,
}

impl RoomRow {
    fn new(room: &Room, color: bool) -> Self {
        Self {
            id: room.id.clone(),
            number: output::or_dash(room.room_number.as_deref()),
            name: output::or_dash(room.room_name.as_deref()),
            floor: room.floor.map_or_else(|| "-".into(), |f| f.to_string()),
            room_type: output::or_dash(room.room_type.as_deref()),
            status: output::room_status_label(room.status, color),
            guest: output::or_dash(room.current_guest.as_deref()),
        }
    }
}

fn detail(room: &Room, color: bool) -> String {
    let features = &room.features;
    let mut lines = vec![
        format!("ID:         {}", room.id),
        format!("Room:       {}", room.display_name()),
        format!(
            "Floor:      {}",
            room.floor.map_or_else(|| "-".into(), |f| f.to_string())
        ),
        format!("Type:       {}", output::or_dash(room.room_type.as_deref())),
        format!(
            "Status:     {}",
            output::room_status_label(room.status, color)
        ),
        format!("Guest:      {}", output::or_dash(room.current_guest.as_deref())),
        format!("Device:     {}", output::or_dash(room.device_id.as_deref())),
        format!(
            "Beds:       {} (max {} guests)",
            features.beds, features.max_occupancy
        ),
    ];
    if !features.amenities.is_empty() {
        lines.push(format!("Amenities:  {}", features.amenities.join(", ")));
    }
    if let Some(cleaned) = room.housekeeping.last_cleaned {
        lines.push(format!("Cleaned:    {}", cleaned.to_rfc3339()));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: RoomsArgs, ctx: &Ctx) -> Result<(), CliError> {
    match args.command {
        RoomsCommand::List { status } => {
            let spinner = output::spinner("Fetching rooms...", ctx.quiet);
            let raw = ctx.client.list_rooms().await;
            spinner.finish_and_clear();

            let rooms: Vec<Room> = convert_list(raw?, "room")
                .into_iter()
                .filter(|r: &Room| status.is_none_or(|s| r.status == Some(s)))
                .collect();
            let out = output::render_list(
                ctx.format,
                &rooms,
                |r| RoomRow::new(r, ctx.color),
                |r| r.id.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        RoomsCommand::SetStatus { id, status } => {
            let update = RoomUpdate {
                status: Some(status.to_string()),
                ..RoomUpdate::default()
            };
            let raw = ctx
                .client
                .update_room(&id, &update)
                .await
                .map_err(|e| CliError::from(e).or_not_found("room", &id, "rooms list"))?;
            let room = Room::try_from(raw)?;
            output::notify(
                &format!("Room {} is now {status}", room.display_name()),
                ctx.color,
                ctx.quiet,
            );
            Ok(())
        }

        RoomsCommand::Create {
            number,
            name,
            floor,
            room_type,
            device_id,
            beds,
            max_occupancy,
            status,
        } => {
            let body = CreateRoom {
                room_name: name,
                room_number: number,
                alexa_device_id: device_id,
                floor,
                room_type,
                status: status.to_string(),
                features: RoomFeatures {
                    beds,
                    max_occupancy,
                    ..RoomFeatures::default()
                },
                housekeeping_status: HousekeepingStatus::default(),
            };
            let room = Room::try_from(ctx.client.create_room(&body).await?)?;
            output::notify(
                &format!("Room {} created", room.display_name()),
                ctx.color,
                ctx.quiet,
            );
            let out = output::render_single(
                ctx.format,
                &room,
                |r| detail(r, ctx.color),
                |r| r.id.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
