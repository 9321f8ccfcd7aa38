//! Booking command handlers.

use tabled::Tabled;

use frontdesk_core::Booking;
use frontdesk_core::convert::convert_list;

use crate::cli::{BookingsArgs, BookingsCommand};
use crate::config::Ctx;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BookingRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Check-in")]
    check_in: String,
    #[tabled(rename = "Nights")]
    nights: String,
    #[tabled(rename = "Guests")]
    guests: u32,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Type")]
    room_type: String,
    #[tabled(rename = "Stage")]
    stage: String,
}

impl From<&Booking> for BookingRow {
    fn from(b: &Booking) -> Self {
        let info = b.room_info();
        Self {
            id: b.id.clone(),
            customer: output::or_dash(b.customer_name.as_deref()),
            check_in: b
                .check_in
                .map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string()),
            nights: b.nights().map_or_else(|| "-".into(), |n| n.to_string()),
            guests: b.guests(),
            room: output::or_dash(info.room_number.as_deref()),
            room_type: output::or_dash(info.room_type.as_deref()),
            stage: output::or_dash(b.stage.as_deref()),
        }
    }
}

fn detail(b: &Booking) -> String {
    let info = b.room_info();
    let date = |d: Option<chrono::DateTime<chrono::Utc>>| {
        d.map_or_else(|| "-".into(), |d| d.format("%Y-%m-%d").to_string())
    };
    let mut lines = vec![
        format!("ID:         {}", b.id),
        format!("Customer:   {}", output::or_dash(b.customer_name.as_deref())),
        format!("Phone:      {}", output::or_dash(b.customer_phone.as_deref())),
        format!("Check-in:   {}", date(b.check_in)),
        format!("Check-out:  {}", date(b.check_out)),
        format!(
            "Guests:     {} ({} adults, {} aged 0-5, {} aged 6-12)",
            b.guests(),
            b.adults,
            b.children_0_5,
            b.children_6_12
        ),
        format!("Room:       {}", output::or_dash(info.room_number.as_deref())),
        format!("Room type:  {}", output::or_dash(info.room_type.as_deref())),
        format!("Stage:      {}", output::or_dash(b.stage.as_deref())),
        format!(
            "Payment:    {}{}",
            output::or_dash(b.payment_status.as_deref()),
            if b.payment_confirmed { " (confirmed)" } else { "" }
        ),
    ];
    if let Some(price) = b.room_price {
        lines.push(format!("Price:      {price:.2}"));
    }
    lines.join("\n")
}

pub async fn handle(args: BookingsArgs, ctx: &Ctx) -> Result<(), CliError> {
    match args.command {
        BookingsCommand::List => {
            let spinner = output::spinner("Fetching bookings...", ctx.quiet);
            let raw = ctx.client.list_bookings().await;
            spinner.finish_and_clear();

            let bookings: Vec<Booking> = convert_list(raw?, "booking");
            let out = output::render_list(
                ctx.format,
                &bookings,
                |b| BookingRow::from(b),
                |b| b.id.clone(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        BookingsCommand::Get { id } => {
            let raw = ctx
                .client
                .get_booking(&id)
                .await
                .map_err(|e| CliError::from(e).or_not_found("booking", &id, "bookings list"))?;
            let booking = Booking::try_from(raw)?;
            let out = output::render_single(ctx.format, &booking, detail, |b| b.id.clone())?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }
    }
}
