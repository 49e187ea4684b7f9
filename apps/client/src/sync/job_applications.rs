use std::sync::Arc;

use crate::api::job_applications::{JobApplicationApi, JobApplicationListParams};
use crate::errors::QueryError;
use crate::models::job_application::{
    JobApplication, JobApplicationCreate, JobApplicationListItem, JobApplicationUpdate,
};
use crate::models::Paginated;
use crate::sync::cache::QueryCache;
use crate::sync::key::QueryKey;

const LIST_FAMILY: &str = "job-applications";
const DETAIL_FAMILY: &str = "job-application";

/// Cache-aware job-application operations.
#[derive(Clone)]
pub struct JobApplicationStore {
    cache: Arc<QueryCache>,
    api: JobApplicationApi,
}

impl JobApplicationStore {
    pub fn new(cache: Arc<QueryCache>, api: JobApplicationApi) -> Self {
        Self { cache, api }
    }

    fn list_key(params: &JobApplicationListParams) -> QueryKey {
        QueryKey::new(LIST_FAMILY).with_query(&params.to_query())
    }

    fn detail_key(id: &str) -> QueryKey {
        QueryKey::new(DETAIL_FAMILY).with(id)
    }

    /// Cached paginated listing.
    pub async fn list(
        &self,
        params: &JobApplicationListParams,
    ) -> Result<Paginated<JobApplicationListItem>, QueryError> {
        let api = self.api.clone();
        let params = params.clone();
        self.cache
            .fetch(Self::list_key(&params), move || async move {
                api.list(&params).await
            })
            .await
    }

    /// Data to show while `list` is (re)loading; see `ResumeStore`.
    pub fn list_placeholder(
        &self,
        params: &JobApplicationListParams,
    ) -> Option<Paginated<JobApplicationListItem>> {
        self.cache
            .cached(&Self::list_key(params))
            .or_else(|| self.cache.latest_under(&QueryKey::new(LIST_FAMILY)))
    }

    /// Cached detail read; disabled for an empty id.
    pub async fn get(&self, id: &str) -> Result<Option<JobApplication>, QueryError> {
        if id.is_empty() {
            return Ok(None);
        }
        let api = self.api.clone();
        let id = id.to_string();
        self.cache
            .fetch(Self::detail_key(&id), move || async move {
                api.get(&id).await
            })
            .await
            .map(Some)
    }

    pub async fn create(&self, payload: &JobApplicationCreate) -> Result<JobApplication, QueryError> {
        let created = self.api.create(payload).await?;
        self.cache.invalidate(&QueryKey::new(LIST_FAMILY));
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &JobApplicationUpdate,
    ) -> Result<JobApplication, QueryError> {
        let updated = self.api.update(id, patch).await?;
        self.reconcile_updated(&updated);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), QueryError> {
        self.api.delete(id).await?;
        self.cache.invalidate(&QueryKey::new(LIST_FAMILY));
        self.cache.remove(&Self::detail_key(id));
        Ok(())
    }

    /// Reconciliation rule for updates: mark the collection and the record's
    /// detail key stale, then write the returned record into the detail slot
    /// and into the matching row of every cached list page.
    fn reconcile_updated(&self, updated: &JobApplication) {
        self.cache.invalidate(&QueryKey::new(LIST_FAMILY));
        self.cache.invalidate(&Self::detail_key(&updated.id));
        self.cache.set(Self::detail_key(&updated.id), updated);
        self.cache
            .patch_list_item(&QueryKey::new(LIST_FAMILY), &updated.id, updated);
    }
}
