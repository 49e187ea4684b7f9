//! Resource clients — one per resource family.
//!
//! Each client only marshals domain parameters into one transport call; no
//! business rules and no caching live here. Wire parameter names are the
//! backend's snake_case names. Marshaling rules: `None` means the parameter
//! is omitted entirely, strings are never sent empty, and booleans and
//! numbers are sent whenever set, including `false` and `0`.

pub mod ats;
pub mod job_applications;
pub mod resumes;

pub use ats::{AtsApi, AtsHistoryParams};
pub use job_applications::{JobApplicationApi, JobApplicationListParams, JobApplicationSortField};
pub use resumes::{ResumeApi, ResumeListParams, ResumeSortField};

/// Ordered query-string pairs under construction.
pub type Query = Vec<(&'static str, String)>;

pub(crate) fn push_num<N: ToString>(query: &mut Query, name: &'static str, value: Option<N>) {
    if let Some(v) = value {
        query.push((name, v.to_string()));
    }
}

pub(crate) fn push_bool(query: &mut Query, name: &'static str, value: Option<bool>) {
    if let Some(v) = value {
        query.push((name, v.to_string()));
    }
}

pub(crate) fn push_str(query: &mut Query, name: &'static str, value: Option<&str>) {
    match value {
        Some(v) if !v.is_empty() => query.push((name, v.to_string())),
        _ => {}
    }
}
