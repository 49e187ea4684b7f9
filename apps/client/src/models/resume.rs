use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full resume record as returned by `GET /resumes/{id}`.
///
/// Identities are assigned by the server and serialized under `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub starred: bool,
    pub contact: Option<ContactInfo>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reduced projection used in paginated resume listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub starred: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub location: Option<String>,
    pub degree: String,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub technologies: Option<String>,
    pub date_range: Option<String>,
    pub link: Option<String>,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: String,
}

/// Body of `POST /resumes/`. The server assigns identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeCreate {
    pub user_id: String,
    pub name: String,
    pub starred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillCategory>,
}

/// Body of `PATCH /resumes/{id}` — partial-field semantics. Absent fields
/// are not serialized, so the server leaves them untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<ProjectEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillCategory>>,
}
