use std::sync::Arc;

use crate::api::{push_num, push_str, Query};
use crate::errors::ApiError;
use crate::models::ats::{AtsAnalysis, AtsAnalysisUpdate, AtsRequest, AtsResult};
use crate::transport::Transport;

/// Filter and pagination parameters of `GET /ats/history`.
///
/// History is parameterized by resume and job title rather than paginated as
/// a flat collection; the endpoint returns a bare array.
#[derive(Debug, Clone, Default)]
pub struct AtsHistoryParams {
    pub resume_id: Option<String>,
    pub job_title: Option<String>,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl AtsHistoryParams {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        push_str(&mut query, "resume_id", self.resume_id.as_deref());
        push_str(&mut query, "job_title", self.job_title.as_deref());
        push_num(&mut query, "skip", self.skip);
        push_num(&mut query, "limit", self.limit);
        query
    }
}

/// Typed client for the `/ats/` endpoints.
#[derive(Clone)]
pub struct AtsApi {
    transport: Arc<Transport>,
}

impl AtsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Runs the scoring pipeline for one resume against one job description.
    pub async fn analyze(&self, payload: &AtsRequest) -> Result<AtsResult, ApiError> {
        self.transport.post("/ats/analyze", payload).await
    }

    pub async fn history(&self, params: &AtsHistoryParams) -> Result<Vec<AtsAnalysis>, ApiError> {
        self.transport.get("/ats/history", &params.to_query()).await
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &AtsAnalysisUpdate,
    ) -> Result<AtsAnalysis, ApiError> {
        self.transport
            .put(&format!("/ats/history/{id}"), payload)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport.delete(&format!("/ats/history/{id}")).await
    }
}
