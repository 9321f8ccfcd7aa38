// ── Filter predicates for request snapshots ──
//
// Used by the CLI to narrow a snapshot without re-querying the API.

use std::sync::Arc;

use crate::model::{RequestStatus, ServiceRequest};

/// Status equality plus a case-insensitive free-text query.
///
/// The query matches against room number, request type, message,
/// assignee and status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub status: Option<RequestStatus>,
    pub query: Option<String>,
}

impl RequestFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Blank queries are ignored.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.trim().is_empty()).then(|| query.trim().to_lowercase());
        self
    }

    pub fn matches(&self, req: &ServiceRequest) -> bool {
        if self.status.is_some_and(|s| s != req.status) {
            return false;
        }
        let Some(query) = self.query.as_deref() else {
            return true;
        };
        let query = query.to_lowercase();

        let room = req.room_number.map(|n| n.to_string());
        let status = req.status.to_string();
        [
            room.as_deref(),
            Some(req.request_type.as_wire()),
            Some(req.request_type.label()),
            req.details.message.as_deref(),
            req.assigned_to.as_deref(),
            Some(status.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
    }

    /// Matching entries, sharing the snapshot's `Arc`s.
    pub fn apply(&self, requests: &[Arc<ServiceRequest>]) -> Vec<Arc<ServiceRequest>> {
        requests
            .iter()
            .filter(|req| self.matches(req))
            .cloned()
            .collect()
    }
}
