use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Full job-application record as returned by `GET /job-applications/{id}`.
///
/// `status` is free-form text on the wire; the server seeds values like
/// "Applied" or "Interviewing" but the client does not constrain it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplication {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub job_title: String,
    pub company_name: String,
    pub company_website: Option<String>,
    pub job_url: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub application_date: NaiveDate,
    pub last_updated: DateTime<Utc>,
    pub interview_dates: Vec<NaiveDate>,
    pub notes: Option<String>,
    pub associated_resume_id: Option<String>,
    pub associated_analysis_id: Option<String>,
}

/// Reduced projection used in paginated job-application listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub job_title: String,
    pub company_name: String,
    pub status: String,
    pub application_date: NaiveDate,
    pub last_updated: DateTime<Utc>,
    pub associated_resume_id: Option<String>,
    pub associated_analysis_id: Option<String>,
}

/// Body of `POST /job-applications/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApplicationCreate {
    pub user_id: String,
    pub job_title: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    pub application_date: NaiveDate,
    pub interview_dates: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_resume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_analysis_id: Option<String>,
}

/// Body of `PATCH /job-applications/{id}` — partial-field semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_dates: Option<Vec<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_resume_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated_analysis_id: Option<String>,
}
