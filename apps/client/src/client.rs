use std::sync::Arc;

use crate::api::ats::AtsApi;
use crate::api::job_applications::JobApplicationApi;
use crate::api::resumes::ResumeApi;
use crate::auth::{FileTokenStore, TokenStore};
use crate::config::Config;
use crate::sync::{AtsStore, JobApplicationStore, QueryCache, ResumeStore};
use crate::transport::Transport;

/// Wired client: one transport, one cache, one store per resource family.
///
/// This is the injectable instance the shell (and tests) hold; all cache
/// mutation goes through the stores.
#[derive(Clone)]
pub struct Client {
    pub resumes: ResumeStore,
    pub job_applications: JobApplicationStore,
    pub ats: AtsStore,
    cache: Arc<QueryCache>,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self::with_token_store(
            &config.api_base_url,
            Arc::new(FileTokenStore::new(&config.auth_token_file)),
        )
    }

    pub fn with_token_store(base_url: &str, tokens: Arc<dyn TokenStore>) -> Self {
        let transport = Arc::new(Transport::new(base_url, tokens));
        let cache = Arc::new(QueryCache::new());
        Client {
            resumes: ResumeStore::new(cache.clone(), ResumeApi::new(transport.clone())),
            job_applications: JobApplicationStore::new(
                cache.clone(),
                JobApplicationApi::new(transport.clone()),
            ),
            ats: AtsStore::new(cache.clone(), AtsApi::new(transport)),
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }
}
