use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobtrack_client::api::job_applications::JobApplicationListParams;
use jobtrack_client::api::resumes::ResumeListParams;
use jobtrack_client::{Client, Config};

/// Thin composition shell: load config, wire the client, run a smoke flow
/// against the configured backend.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("jobtrack_client={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "jobtrack-client v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.api_base_url
    );

    let client = Client::new(&config);

    let resumes = client.resumes.list(&ResumeListParams::default()).await?;
    info!(
        total = resumes.total,
        page = resumes.page,
        "fetched resume listing"
    );

    let applications = client
        .job_applications
        .list(&JobApplicationListParams::default())
        .await?;
    info!(
        total = applications.total,
        page = applications.page,
        "fetched job-application listing"
    );

    // Second pass is served from the cache; no request goes out.
    let cached = client.resumes.list(&ResumeListParams::default()).await?;
    info!(total = cached.total, "resume listing replayed from cache");

    Ok(())
}
