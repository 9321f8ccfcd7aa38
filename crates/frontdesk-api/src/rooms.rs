// Room endpoints

use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::error::Error;
use crate::types::{CreateRoom, Room, RoomUpdate};

impl ApiClient {
    /// `GET /rooms`
    pub async fn list_rooms(&self) -> Result<Vec<Room>, Error> {
        debug!("listing rooms");
        self.get("/rooms").await
    }

    /// `POST /rooms`
    pub async fn create_room(&self, body: &CreateRoom) -> Result<Room, Error> {
        debug!(room_number = %body.room_number, "creating room");
        self.post("/rooms", body).await
    }

    /// `PUT /rooms/:id` with only the populated fields of `update`.
    pub async fn update_room(&self, id: &str, update: &RoomUpdate) -> Result<Room, Error> {
        debug!(id, ?update, "updating room");
        self.put(&format!("/rooms/{}", segment(id)), Some(update))
            .await
    }
}
