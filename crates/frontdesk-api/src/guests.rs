// Guest endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{AssignRoom, CreateGuest, Guest};

impl ApiClient {
    /// `GET /guests`
    pub async fn list_guests(&self) -> Result<Vec<Guest>, Error> {
        debug!("listing guests");
        self.get("/guests").await
    }

    /// `POST /guests`
    pub async fn create_guest(&self, body: &CreateGuest) -> Result<Guest, Error> {
        debug!(email = %body.email, "creating guest");
        self.post("/guests", body).await
    }

    /// Put a guest into a room. Returns the updated guest.
    ///
    /// `POST /guests/assign-room` with `{"guestId": "...", "roomId": "..."}`
    pub async fn assign_room(&self, body: &AssignRoom) -> Result<Guest, Error> {
        debug!(guest = %body.guest_id, room = %body.room_id, "assigning room");
        self.post("/guests/assign-room", body).await
    }
}
