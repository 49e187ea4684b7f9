use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::api::{push_bool, push_num, push_str, Query};
use crate::errors::ApiError;
use crate::models::resume::{Resume, ResumeCreate, ResumeListItem, ResumeUpdate};
use crate::models::{Paginated, SortOrder};
use crate::transport::Transport;

/// Sort fields accepted by `GET /resumes/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSortField {
    CreatedAt,
    UpdatedAt,
    Name,
}

impl ResumeSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            ResumeSortField::CreatedAt => "created_at",
            ResumeSortField::UpdatedAt => "updated_at",
            ResumeSortField::Name => "name",
        }
    }
}

/// Filter, sort, and pagination parameters of `GET /resumes/`.
#[derive(Debug, Clone, Default)]
pub struct ResumeListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Substring match on the resume name.
    pub search_name: Option<String>,
    pub starred: Option<bool>,
    pub min_created_at: Option<DateTime<Utc>>,
    pub max_created_at: Option<DateTime<Utc>>,
    pub sort_by: Option<ResumeSortField>,
    pub sort_order: Option<SortOrder>,
}

impl ResumeListParams {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        push_num(&mut query, "page", self.page);
        push_num(&mut query, "page_size", self.page_size);
        push_str(&mut query, "search_name", self.search_name.as_deref());
        push_bool(&mut query, "starred", self.starred);
        push_str(
            &mut query,
            "min_created_at",
            self.min_created_at.map(|t| t.to_rfc3339()).as_deref(),
        );
        push_str(
            &mut query,
            "max_created_at",
            self.max_created_at.map(|t| t.to_rfc3339()).as_deref(),
        );
        push_str(&mut query, "sort_by", self.sort_by.map(|s| s.as_str()));
        push_str(
            &mut query,
            "sort_order",
            self.sort_order.map(|s| s.as_str()),
        );
        query
    }
}

/// Typed client for the `/resumes/` endpoints.
#[derive(Clone)]
pub struct ResumeApi {
    transport: Arc<Transport>,
}

impl ResumeApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        params: &ResumeListParams,
    ) -> Result<Paginated<ResumeListItem>, ApiError> {
        self.transport.get("/resumes/", &params.to_query()).await
    }

    pub async fn get(&self, id: &str) -> Result<Resume, ApiError> {
        self.transport.get(&format!("/resumes/{id}"), &[]).await
    }

    pub async fn create(&self, payload: &ResumeCreate) -> Result<Resume, ApiError> {
        self.transport.post("/resumes/", payload).await
    }

    pub async fn update(&self, id: &str, patch: &ResumeUpdate) -> Result<Resume, ApiError> {
        self.transport.patch(&format!("/resumes/{id}"), patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport.delete(&format!("/resumes/{id}")).await
    }
}
