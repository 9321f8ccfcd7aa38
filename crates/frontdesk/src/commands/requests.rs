//! Service-request command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use chrono::Utc;
use tabled::Tabled;

use frontdesk_core::{
    AlwaysActive, RequestFeed, RequestFilter, RequestId, RequestSource, RequestStats,
    RequestStatus, ServiceRequest,
};

use crate::cli::{OutputFormat, RequestsArgs, RequestsCommand};
use crate::config::Ctx;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Urgency")]
    urgency: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Assignee")]
    assignee: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl RequestRow {
    fn new(req: &ServiceRequest, color: bool) -> Self {
        let details = req
            .details
            .message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| req.items_summary());
        Self {
            id: req.id.to_string(),
            room: req
                .room_number
                .map_or_else(|| "-".into(), |n| n.to_string()),
            kind: req.request_type.label().to_owned(),
            urgency: req
                .urgency()
                .map_or_else(|| "-".into(), |u| u.to_string()),
            status: output::request_status_label(req.status, color),
            assignee: output::or_dash(req.assignee()),
            age: req
                .age(Utc::now())
                .map_or_else(|| "-".into(), output::age_label),
            details: truncate(&details, 40),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_owned(),
    }
}

fn detail(req: &ServiceRequest, color: bool) -> String {
    let now = Utc::now();
    let mut lines = vec![
        format!("ID:          {}", req.id),
        format!("Reference:   {}", output::or_dash(req.request_id.as_deref())),
        format!(
            "Room:        {}",
            req.room_number
                .map_or_else(|| "-".into(), |n| n.to_string())
        ),
        format!("Type:        {}", req.request_type),
        format!(
            "Status:      {}",
            output::request_status_label(req.status, color)
        ),
        format!("Priority:    {}", req.priority),
        format!(
            "Urgency:     {}",
            req.urgency().map_or_else(|| "-".into(), |u| u.to_string())
        ),
        format!("Assignee:    {}", output::or_dash(req.assignee())),
        format!(
            "Created:     {}",
            req.created_at.zip(req.age(now)).map_or_else(
                || "-".into(),
                |(at, age)| format!("{} ({} ago)", at.to_rfc3339(), output::age_label(age)),
            )
        ),
    ];
    if let Some(eta) = req.estimated_completion_time {
        let overdue = if req.is_overdue(now) { " (overdue)" } else { "" };
        lines.push(format!("ETA:         {}{overdue}", eta.to_rfc3339()));
    }
    if let Some(ref message) = req.details.message {
        lines.push(format!("Message:     {message}"));
    }
    if !req.details.items.is_empty() {
        lines.push(format!("Items:       {}", req.items_summary()));
    }
    if let Some(ref pref) = req.details.time_preference {
        lines.push(format!("Preferred:   {pref}"));
    }
    if let Some(ref feedback) = req.feedback {
        let rating = feedback
            .rating
            .map_or_else(|| "-".into(), |r| format!("{r}/5"));
        lines.push(format!(
            "Feedback:    {rating} {}",
            feedback.comment.as_deref().unwrap_or("")
        ));
    }
    if !req.logs.is_empty() {
        lines.push("Activity:".into());
        for log in &req.logs {
            lines.push(format!(
                "  {}  {:<12} {}",
                log.timestamp.format("%Y-%m-%d %H:%M"),
                log.action,
                log.performed_by.as_deref().unwrap_or("")
            ));
        }
    }
    lines.join("\n")
}

fn stats_detail(stats: &RequestStats) -> String {
    [
        format!("Total:        {}", stats.total),
        format!("Open:         {}", stats.open()),
        format!("  pending:      {}", stats.pending),
        format!("  assigned:     {}", stats.assigned),
        format!("  in-progress:  {}", stats.in_progress),
        format!("Completed:    {}", stats.completed),
        format!("Cancelled:    {}", stats.cancelled),
        format!("Unknown:      {}", stats.unknown),
    ]
    .join("\n")
}

fn build_filter(status: Option<RequestStatus>, search: Option<String>) -> RequestFilter {
    let mut filter = RequestFilter::new();
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if let Some(query) = search {
        filter = filter.with_query(query);
    }
    filter
}

fn render_requests(ctx: &Ctx, requests: &[Arc<ServiceRequest>]) -> Result<String, CliError> {
    output::render_list(
        ctx.format,
        requests,
        |r| RequestRow::new(r, ctx.color),
        |r| r.id.to_string(),
    )
}

/// Fetch the list once, in the configured snapshot order.
async fn fetch(ctx: &Ctx) -> Result<Vec<Arc<ServiceRequest>>, CliError> {
    let spinner = output::spinner("Fetching requests...", ctx.quiet);
    let result = ctx.client.list().await;
    spinner.finish_and_clear();
    Ok(ctx
        .config
        .order
        .arrange(result?)
        .into_iter()
        .map(Arc::new)
        .collect())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: RequestsArgs, ctx: &Ctx) -> Result<(), CliError> {
    match args.command {
        RequestsCommand::List { status, search } => {
            let filter = build_filter(status, search);
            let requests = filter.apply(&fetch(ctx).await?);
            let out = render_requests(ctx, &requests)?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        RequestsCommand::Get { id } => {
            let raw = ctx
                .client
                .get_request(&id)
                .await
                .map_err(|e| CliError::from(e).or_not_found("request", &id, "requests list"))?;
            let req = ServiceRequest::try_from(raw)?;
            let out = output::render_single(
                ctx.format,
                &req,
                |r| detail(r, ctx.color),
                |r| r.id.to_string(),
            )?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        RequestsCommand::Approve { id } => {
            let feed = util::one_shot_feed(ctx);
            let req = feed
                .approve(&RequestId::from(id.as_str()))
                .await
                .map_err(|e| CliError::from(e).or_not_found("request", &id, "requests list"))?;
            report(ctx, &req, "Request approved")
        }

        RequestsCommand::Decline { id } => {
            if !util::confirm(
                &format!("Decline request {id}? The guest will see it cancelled."),
                "decline",
                ctx.yes,
            )? {
                return Ok(());
            }
            let feed = util::one_shot_feed(ctx);
            let req = feed
                .decline(&RequestId::from(id.as_str()))
                .await
                .map_err(|e| CliError::from(e).or_not_found("request", &id, "requests list"))?;
            report(ctx, &req, "Request declined")
        }

        RequestsCommand::Complete { id } => {
            set_status(ctx, &id, RequestStatus::Completed, false).await
        }

        RequestsCommand::Status { id, status } => set_status(ctx, &id, status, true).await,

        RequestsCommand::Stats => {
            let requests = fetch(ctx).await?;
            let stats = RequestStats::from_requests(requests.iter().map(Arc::as_ref));
            let out = output::render_single(ctx.format, &stats, stats_detail, |s| {
                format!(
                    "total {}\npending {}\nassigned {}\nin-progress {}\ncompleted {}\ncancelled {}\nunknown {}",
                    s.total, s.pending, s.assigned, s.in_progress, s.completed, s.cancelled, s.unknown
                )
            })?;
            output::print_output(&out, ctx.quiet);
            Ok(())
        }

        RequestsCommand::Watch { interval, status } => watch(ctx, interval, status).await,
    }
}

async fn set_status(
    ctx: &Ctx,
    id: &str,
    target: RequestStatus,
    check_transition: bool,
) -> Result<(), CliError> {
    if check_transition {
        // Advisory only: the backend owns the state machine.
        let current = ctx
            .client
            .get_request(id)
            .await
            .ok()
            .and_then(|raw| ServiceRequest::try_from(raw).ok());
        if let Some(current) = current.filter(|c| !c.status.can_transition_to(target)) {
            output::warn(
                &format!(
                    "{} -> {target} is not a normal transition; the backend may reject it",
                    current.status
                ),
                ctx.color,
            );
        }
    }

    let feed = util::one_shot_feed(ctx);
    let req = feed
        .update_status(&RequestId::from(id), target)
        .await
        .map_err(|e| CliError::from(e).or_not_found("request", id, "requests list"))?;
    report(ctx, &req, &format!("Request moved to {target}"))
}

/// Toast on stderr, the updated record on stdout for structured formats.
fn report(ctx: &Ctx, req: &ServiceRequest, message: &str) -> Result<(), CliError> {
    output::notify(message, ctx.color, ctx.quiet);
    if ctx.format != OutputFormat::Table {
        let out = output::render_single(
            ctx.format,
            req,
            |r| detail(r, ctx.color),
            |r| r.id.to_string(),
        )?;
        output::print_output(&out, ctx.quiet);
    }
    Ok(())
}

// ── Watch ───────────────────────────────────────────────────────────

async fn watch(
    ctx: &Ctx,
    interval: Option<std::time::Duration>,
    status: Option<RequestStatus>,
) -> Result<(), CliError> {
    let mut config = ctx.config.feed_config();
    config.polling.enabled = true;
    if let Some(interval) = interval {
        config.polling.interval = interval;
    }
    if config.polling.interval.is_zero() {
        return Err(CliError::Validation {
            field: "interval".into(),
            reason: "must be greater than zero".into(),
        });
    }

    let activity = AlwaysActive::new();
    let feed = RequestFeed::new(ctx.client.clone(), &activity, config);
    let mut stream = feed.subscribe();
    let filter = build_filter(status, None);
    let clear = ctx.format == OutputFormat::Table && std::io::stdout().is_terminal();

    feed.start().await;
    if let Some(err) = feed.error() {
        output::warn(&err, ctx.color);
    }
    draw(ctx, &filter, stream.current(), clear)?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = stream.changed() => match next {
                Some(snapshot) => draw(ctx, &filter, &snapshot, clear)?,
                None => break,
            },
        }
    }

    feed.stop();
    Ok(())
}

fn draw(
    ctx: &Ctx,
    filter: &RequestFilter,
    snapshot: &[Arc<ServiceRequest>],
    clear: bool,
) -> Result<(), CliError> {
    let visible = filter.apply(snapshot);
    let out = render_requests(ctx, &visible)?;
    if clear {
        print!("\x1b[2J\x1b[H");
    }
    if !ctx.quiet && ctx.format == OutputFormat::Table {
        let stats = RequestStats::from_requests(snapshot.iter().map(Arc::as_ref));
        println!(
            "{}  {} open / {} total",
            Utc::now().format("%H:%M:%S"),
            stats.open(),
            stats.total
        );
    }
    output::print_output(&out, ctx.quiet);
    Ok(())
}
