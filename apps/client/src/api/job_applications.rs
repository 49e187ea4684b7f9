use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::{push_bool, push_num, push_str, Query};
use crate::errors::ApiError;
use crate::models::job_application::{
    JobApplication, JobApplicationCreate, JobApplicationListItem, JobApplicationUpdate,
};
use crate::models::{Paginated, SortOrder};
use crate::transport::Transport;

/// Sort fields accepted by `GET /job-applications/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobApplicationSortField {
    ApplicationDate,
    LastUpdated,
    JobTitle,
}

impl JobApplicationSortField {
    pub fn as_str(self) -> &'static str {
        match self {
            JobApplicationSortField::ApplicationDate => "application_date",
            JobApplicationSortField::LastUpdated => "last_updated",
            JobApplicationSortField::JobTitle => "job_title",
        }
    }
}

/// Filter, sort, and pagination parameters of `GET /job-applications/`.
#[derive(Debug, Clone, Default)]
pub struct JobApplicationListParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Substring match on the job title.
    pub search_title: Option<String>,
    /// Substring match on the company name.
    pub search_company: Option<String>,
    pub status: Option<String>,
    pub min_application_date: Option<NaiveDate>,
    pub max_application_date: Option<NaiveDate>,
    pub has_notes: Option<bool>,
    pub has_interview_dates: Option<bool>,
    pub user_id: Option<String>,
    pub associated_resume_id: Option<String>,
    pub associated_analysis_id: Option<String>,
    pub sort_by: Option<JobApplicationSortField>,
    pub sort_order: Option<SortOrder>,
}

impl JobApplicationListParams {
    pub fn to_query(&self) -> Query {
        let mut query = Query::new();
        push_num(&mut query, "page", self.page);
        push_num(&mut query, "page_size", self.page_size);
        push_str(&mut query, "search_title", self.search_title.as_deref());
        push_str(&mut query, "search_company", self.search_company.as_deref());
        push_str(&mut query, "status", self.status.as_deref());
        push_str(
            &mut query,
            "min_application_date",
            self.min_application_date.map(|d| d.to_string()).as_deref(),
        );
        push_str(
            &mut query,
            "max_application_date",
            self.max_application_date.map(|d| d.to_string()).as_deref(),
        );
        push_bool(&mut query, "has_notes", self.has_notes);
        push_bool(&mut query, "has_interview_dates", self.has_interview_dates);
        push_str(&mut query, "user_id", self.user_id.as_deref());
        push_str(
            &mut query,
            "associated_resume_id",
            self.associated_resume_id.as_deref(),
        );
        push_str(
            &mut query,
            "associated_analysis_id",
            self.associated_analysis_id.as_deref(),
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

/// Typed client for the `/job-applications/` endpoints.
#[derive(Clone)]
pub struct JobApplicationApi {
    transport: Arc<Transport>,
}

impl JobApplicationApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(
        &self,
        params: &JobApplicationListParams,
    ) -> Result<Paginated<JobApplicationListItem>, ApiError> {
        self.transport
            .get("/job-applications/", &params.to_query())
            .await
    }

    pub async fn get(&self, id: &str) -> Result<JobApplication, ApiError> {
        self.transport
            .get(&format!("/job-applications/{id}"), &[])
            .await
    }

    pub async fn create(&self, payload: &JobApplicationCreate) -> Result<JobApplication, ApiError> {
        self.transport.post("/job-applications/", payload).await
    }

    pub async fn update(
        &self,
        id: &str,
        patch: &JobApplicationUpdate,
    ) -> Result<JobApplication, ApiError> {
        self.transport
            .patch(&format!("/job-applications/{id}"), patch)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.transport
            .delete(&format!("/job-applications/{id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defined_booleans_are_sent_even_when_false() {
        let params = JobApplicationListParams {
            has_notes: Some(false),
            has_interview_dates: Some(true),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("has_notes", "false".to_string()),
                ("has_interview_dates", "true".to_string()),
            ]
        );
    }

    #[test]
    fn date_filters_use_day_precision() {
        let params = JobApplicationListParams {
            min_application_date: NaiveDate::from_ymd_opt(2025, 1, 1),
            max_application_date: NaiveDate::from_ymd_opt(2025, 6, 30),
            ..Default::default()
        };
        let query = params.to_query();
        assert_eq!(
            query,
            vec![
                ("min_application_date", "2025-01-01".to_string()),
                ("max_application_date", "2025-06-30".to_string()),
            ]
        );
    }

    #[test]
    fn full_filter_set_maps_to_wire_names() {
        let params = JobApplicationListParams {
            page: Some(2),
            page_size: Some(10),
            search_title: Some("engineer".into()),
            search_company: Some("acme".into()),
            status: Some("Applied".into()),
            user_id: Some("u1".into()),
            associated_resume_id: Some("r1".into()),
            associated_analysis_id: Some("a1".into()),
            sort_by: Some(JobApplicationSortField::LastUpdated),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let names: Vec<&str> = params.to_query().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "page",
                "page_size",
                "search_title",
                "search_company",
                "status",
                "user_id",
                "associated_resume_id",
                "associated_analysis_id",
                "sort_by",
                "sort_order",
            ]
        );
    }
}
