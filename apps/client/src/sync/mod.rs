//! Synchronization layer — cache-aware read queries and mutation
//! reconciliation rules, one store per resource family.
//!
//! Reads go through `QueryCache::fetch` and are keyed by family plus
//! identifying parameters. Mutations call the resource client directly, then
//! apply the family's reconciliation rule: invalidate what went stale and
//! patch what is already known, so the UI reflects a mutation before any
//! refetch completes.

pub mod ats;
pub mod cache;
pub mod job_applications;
pub mod key;
pub mod resumes;

pub use ats::AtsStore;
pub use cache::QueryCache;
pub use job_applications::JobApplicationStore;
pub use key::QueryKey;
pub use resumes::ResumeStore;
