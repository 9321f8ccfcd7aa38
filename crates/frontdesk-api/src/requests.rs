// Service request endpoints
//
// The three state transitions (assign, cancel, complete) are bodiless PUTs
// on sub-resources; every other status change goes through the generic
// partial update.

use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::error::Error;
use crate::types::{CreateRequest, HotelRequest, RequestUpdate};

impl ApiClient {
    /// List every service request.
    ///
    /// `GET /requests`
    pub async fn list_requests(&self) -> Result<Vec<HotelRequest>, Error> {
        debug!("listing requests");
        self.get("/requests").await
    }

    /// `GET /requests/:id`
    pub async fn get_request(&self, id: &str) -> Result<HotelRequest, Error> {
        self.get(&format!("/requests/{}", segment(id))).await
    }

    /// `POST /requests`
    pub async fn create_request(&self, body: &CreateRequest) -> Result<HotelRequest, Error> {
        debug!(request_type = %body.request_type, "creating request");
        self.post("/requests", body).await
    }

    /// Partial update of a request.
    ///
    /// `PUT /requests/:id` with only the populated fields of `update`.
    pub async fn update_request(
        &self,
        id: &str,
        update: &RequestUpdate,
    ) -> Result<HotelRequest, Error> {
        debug!(id, ?update, "updating request");
        self.put(&format!("/requests/{}", segment(id)), Some(update))
            .await
    }

    /// `DELETE /requests/:id`
    pub async fn delete_request(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting request");
        self.delete(&format!("/requests/{}", segment(id))).await
    }

    /// Approve a request: the server moves it to `assigned`.
    ///
    /// `PUT /requests/:id/assign`
    pub async fn assign_request(&self, id: &str) -> Result<HotelRequest, Error> {
        debug!(id, "assigning request");
        self.transition(id, "assign").await
    }

    /// Decline a request: the server moves it to `cancelled`.
    ///
    /// `PUT /requests/:id/cancel`
    pub async fn cancel_request(&self, id: &str) -> Result<HotelRequest, Error> {
        debug!(id, "cancelling request");
        self.transition(id, "cancel").await
    }

    /// `PUT /requests/:id/complete`
    pub async fn complete_request(&self, id: &str) -> Result<HotelRequest, Error> {
        debug!(id, "completing request");
        self.transition(id, "complete").await
    }

    async fn transition(&self, id: &str, action: &str) -> Result<HotelRequest, Error> {
        self.put::<_, ()>(&format!("/requests/{}/{action}", segment(id)), None)
            .await
    }
}
