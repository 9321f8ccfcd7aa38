//! Clap derive structures for the `frontdesk` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use frontdesk_core::{RequestStatus, RoomStatus};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// frontdesk -- guest-service requests, rooms and bookings from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "frontdesk",
    version,
    about = "Run the hotel front desk from the command line",
    long_about = "Review and act on guest-service requests, manage rooms and guests,\n\
        and browse bookings against the hotel operations backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL, including the /api path (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "FRONTDESK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review and act on guest-service requests
    #[command(alias = "req", alias = "r")]
    Requests(RequestsArgs),

    /// Manage rooms
    Rooms(RoomsArgs),

    /// Manage guests
    Guests(GuestsArgs),

    /// Browse bookings
    #[command(alias = "bk")]
    Bookings(BookingsArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REQUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List requests, newest first
    #[command(alias = "ls")]
    List {
        /// Only show requests with this status
        #[arg(long, short = 's')]
        status: Option<RequestStatus>,

        /// Case-insensitive search over room, type, message, assignee and status
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a single request
    Get {
        /// Request ID
        id: String,
    },

    /// Assign a pending request to staff
    Approve {
        /// Request ID
        id: String,
    },

    /// Cancel a request
    Decline {
        /// Request ID
        id: String,
    },

    /// Mark a request completed
    Complete {
        /// Request ID
        id: String,
    },

    /// Move a request to any status
    Status {
        /// Request ID
        id: String,

        /// Target status (pending, assigned, in-progress, completed, cancelled)
        status: RequestStatus,
    },

    /// Per-status request counts
    Stats,

    /// Keep a live request list on screen until interrupted
    Watch {
        /// Refresh period, e.g. "30s" or "2m" (overrides config)
        #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
        interval: Option<Duration>,

        /// Only show requests with this status
        #[arg(long, short = 's')]
        status: Option<RequestStatus>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ROOMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RoomsArgs {
    #[command(subcommand)]
    pub command: RoomsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// List rooms
    #[command(alias = "ls")]
    List {
        /// Only show rooms with this status
        #[arg(long, short = 's')]
        status: Option<RoomStatus>,
    },

    /// Change a room's status
    SetStatus {
        /// Room ID
        id: String,

        /// New status (vacant, occupied, cleaning, maintenance)
        status: RoomStatus,
    },

    /// Register a new room
    Create {
        /// Room number, e.g. 101
        #[arg(long)]
        number: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Floor
        #[arg(long)]
        floor: i64,

        /// Room type, e.g. "deluxe"
        #[arg(long = "type", default_value = "standard")]
        room_type: String,

        /// In-room voice device ID
        #[arg(long, default_value = "")]
        device_id: String,

        /// Number of beds
        #[arg(long, default_value = "1")]
        beds: u32,

        /// Maximum occupancy
        #[arg(long, default_value = "2")]
        max_occupancy: u32,

        /// Initial status
        #[arg(long, default_value = "vacant")]
        status: RoomStatus,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  GUESTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GuestsArgs {
    #[command(subcommand)]
    pub command: GuestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GuestsCommand {
    /// List guests
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over name, email, phone and room
        #[arg(long)]
        search: Option<String>,

        /// Only guests currently inside their stay window
        #[arg(long)]
        in_house: bool,
    },

    /// Assign a guest to a room
    AssignRoom {
        /// Guest ID
        guest: String,

        /// Room ID
        room: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKINGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BookingsArgs {
    #[command(subcommand)]
    pub command: BookingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings
    #[command(alias = "ls")]
    List,

    /// Show a single booking
    Get {
        /// Booking ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file location
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
