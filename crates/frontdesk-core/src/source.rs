// ── Request source seam ──
//
// The feed talks to the backend only through `RequestSource`, so tests and
// embedders can substitute an in-memory implementation. `ApiClient`
// implements it by calling the request endpoints and converting the wire
// records into domain types.

use std::future::Future;

use frontdesk_api::ApiClient;
use frontdesk_api::types::{HotelRequest, RequestUpdate};

use crate::convert::convert_list;
use crate::error::CoreError;
use crate::model::{RequestChanges, RequestId, ServiceRequest};

/// Backend operations the request feed depends on.
///
/// Every method returns the server's authoritative copy; none of them
/// retries.
pub trait RequestSource: Send + Sync + 'static {
    /// Every request, in the order the backend returns them.
    fn list(&self) -> impl Future<Output = Result<Vec<ServiceRequest>, CoreError>> + Send;

    /// Server transition to `assigned`.
    fn approve(
        &self,
        id: &RequestId,
    ) -> impl Future<Output = Result<ServiceRequest, CoreError>> + Send;

    /// Server transition to `cancelled`.
    fn decline(
        &self,
        id: &RequestId,
    ) -> impl Future<Output = Result<ServiceRequest, CoreError>> + Send;

    /// Server transition to `completed`.
    fn complete(
        &self,
        id: &RequestId,
    ) -> impl Future<Output = Result<ServiceRequest, CoreError>> + Send;

    /// Generic partial update for changes no dedicated transition covers.
    fn update(
        &self,
        id: &RequestId,
        changes: &RequestChanges,
    ) -> impl Future<Output = Result<ServiceRequest, CoreError>> + Send;
}

impl RequestSource for ApiClient {
    async fn list(&self) -> Result<Vec<ServiceRequest>, CoreError> {
        let raw = self.list_requests().await?;
        Ok(convert_list(raw, "request"))
    }

    async fn approve(&self, id: &RequestId) -> Result<ServiceRequest, CoreError> {
        committed(id, self.assign_request(id.as_str()).await?)
    }

    async fn decline(&self, id: &RequestId) -> Result<ServiceRequest, CoreError> {
        committed(id, self.cancel_request(id.as_str()).await?)
    }

    async fn complete(&self, id: &RequestId) -> Result<ServiceRequest, CoreError> {
        committed(id, self.complete_request(id.as_str()).await?)
    }

    async fn update(
        &self,
        id: &RequestId,
        changes: &RequestChanges,
    ) -> Result<ServiceRequest, CoreError> {
        let body = RequestUpdate::from(changes);
        committed(id, self.update_request(id.as_str(), &body).await?)
    }
}

/// Convert the record a successful mutation returned.
///
/// The server has already applied the change, so a copy that omits `_id`
/// is attributed to the addressed request instead of failing.
fn committed(id: &RequestId, mut raw: HotelRequest) -> Result<ServiceRequest, CoreError> {
    if raw.id.trim().is_empty() {
        raw.id = id.as_str().to_owned();
    }
    ServiceRequest::try_from(raw)
}
