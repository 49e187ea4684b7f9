use std::sync::Arc;

use crate::api::ats::{AtsApi, AtsHistoryParams};
use crate::errors::QueryError;
use crate::models::ats::{AtsAnalysis, AtsAnalysisUpdate, AtsRequest, AtsResult};
use crate::sync::cache::QueryCache;
use crate::sync::key::QueryKey;

const HISTORY_FAMILY: &str = "ats-history";

/// Cache-aware ATS analysis operations.
///
/// History queries are keyed by resume and job title rather than as a flat
/// paginated collection, so mutations here invalidate the whole history
/// prefix instead of patching individual pages.
#[derive(Clone)]
pub struct AtsStore {
    cache: Arc<QueryCache>,
    api: AtsApi,
}

impl AtsStore {
    pub fn new(cache: Arc<QueryCache>, api: AtsApi) -> Self {
        Self { cache, api }
    }

    fn history_key(resume_id: &str, job_title: &str) -> QueryKey {
        QueryKey::new(HISTORY_FAMILY)
            .with(resume_id)
            .with(job_title)
    }

    /// Cached history read. Disabled until both identifying parameters are
    /// present: returns `None` without touching the network.
    pub async fn history(
        &self,
        params: &AtsHistoryParams,
    ) -> Result<Option<Vec<AtsAnalysis>>, QueryError> {
        let (resume_id, job_title) = match (params.resume_id.as_deref(), params.job_title.as_deref())
        {
            (Some(r), Some(j)) if !r.is_empty() && !j.is_empty() => (r, j),
            _ => return Ok(None),
        };
        let api = self.api.clone();
        let params = params.clone();
        self.cache
            .fetch(Self::history_key(resume_id, job_title), move || async move {
                api.history(&params).await
            })
            .await
            .map(Some)
    }

    /// Runs an analysis. The result lands in history server-side, so every
    /// cached history query goes stale.
    pub async fn analyze(&self, payload: &AtsRequest) -> Result<AtsResult, QueryError> {
        let result = self.api.analyze(payload).await?;
        self.cache.invalidate(&QueryKey::new(HISTORY_FAMILY));
        Ok(result)
    }

    pub async fn update(
        &self,
        id: &str,
        payload: &AtsAnalysisUpdate,
    ) -> Result<AtsAnalysis, QueryError> {
        let updated = self.api.update(id, payload).await?;
        self.cache.invalidate(&QueryKey::new(HISTORY_FAMILY));
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), QueryError> {
        self.api.delete(id).await?;
        self.cache.invalidate(&QueryKey::new(HISTORY_FAMILY));
        Ok(())
    }
}
