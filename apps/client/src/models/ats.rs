use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /ats/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsRequest {
    pub resume_id: String,
    pub job_title: String,
    pub job_description: String,
}

/// Analysis result produced by the server's scoring pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsResult {
    pub relevance_score: u32,
    pub skills: Vec<String>,
    pub total_years_of_experience: u32,
    pub project_categories: Vec<String>,
}

/// Stored analysis record, one per analyze run, as returned by
/// `GET /ats/history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsAnalysis {
    #[serde(rename = "_id")]
    pub id: String,
    pub llm_analysis: AtsResult,
    pub resume_id: String,
    pub job_title: String,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `PUT /ats/history/{id}` — re-titles an analysis record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtsAnalysisUpdate {
    pub job_title: String,
    pub job_description: String,
}
