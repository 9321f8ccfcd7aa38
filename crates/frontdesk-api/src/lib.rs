// frontdesk-api: Async Rust client for the hotel operations backend

pub mod bookings;
pub mod client;
pub mod error;
pub mod guests;
pub mod requests;
pub mod rooms;
pub mod transport;
pub mod types;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;

/// Backend base URL used when no configuration supplies one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3003/api";
