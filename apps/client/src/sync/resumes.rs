use std::sync::Arc;

use crate::api::resumes::{ResumeApi, ResumeListParams};
use crate::errors::QueryError;
use crate::models::resume::{Resume, ResumeCreate, ResumeListItem, ResumeUpdate};
use crate::models::Paginated;
use crate::sync::cache::QueryCache;
use crate::sync::key::QueryKey;

const LIST_FAMILY: &str = "resumes";
const DETAIL_FAMILY: &str = "resume";

/// Cache-aware resume operations.
#[derive(Clone)]
pub struct ResumeStore {
    cache: Arc<QueryCache>,
    api: ResumeApi,
}

impl ResumeStore {
    pub fn new(cache: Arc<QueryCache>, api: ResumeApi) -> Self {
        Self { cache, api }
    }

    fn list_key(params: &ResumeListParams) -> QueryKey {
        QueryKey::new(LIST_FAMILY).with_query(&params.to_query())
    }

    fn detail_key(id: &str) -> QueryKey {
        QueryKey::new(DETAIL_FAMILY).with(id)
    }

    /// Cached paginated listing.
    pub async fn list(
        &self,
        params: &ResumeListParams,
    ) -> Result<Paginated<ResumeListItem>, QueryError> {
        let api = self.api.clone();
        let params = params.clone();
        self.cache
            .fetch(Self::list_key(&params), move || async move {
                api.list(&params).await
            })
            .await
    }

    /// Data to show while `list` is (re)loading: the page itself if cached,
    /// otherwise the most recently fetched page of the collection.
    pub fn list_placeholder(&self, params: &ResumeListParams) -> Option<Paginated<ResumeListItem>> {
        self.cache
            .cached(&Self::list_key(params))
            .or_else(|| self.cache.latest_under(&QueryKey::new(LIST_FAMILY)))
    }

    /// Cached detail read. Disabled for an empty id: returns `None` without
    /// touching the cache or the network.
    pub async fn get(&self, id: &str) -> Result<Option<Resume>, QueryError> {
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

    pub async fn create(&self, payload: &ResumeCreate) -> Result<Resume, QueryError> {
        let created = self.api.create(payload).await?;
        self.cache.invalidate(&QueryKey::new(LIST_FAMILY));
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &ResumeUpdate) -> Result<Resume, QueryError> {
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
    fn reconcile_updated(&self, updated: &Resume) {
        self.cache.invalidate(&QueryKey::new(LIST_FAMILY));
        self.cache.invalidate(&Self::detail_key(&updated.id));
        self.cache.set(Self::detail_key(&updated.id), updated);
        self.cache
            .patch_list_item(&QueryKey::new(LIST_FAMILY), &updated.id, updated);
    }
}
