// Booking endpoints (read-only)

use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::error::Error;
use crate::types::Booking;

impl ApiClient {
    /// `GET /bookings`
    pub async fn list_bookings(&self) -> Result<Vec<Booking>, Error> {
        debug!("listing bookings");
        self.get("/bookings").await
    }

    /// `GET /bookings/:id`
    pub async fn get_booking(&self, id: &str) -> Result<Booking, Error> {
        self.get(&format!("/bookings/{}", segment(id))).await
    }
}
