use crate::CacheMaintenanceJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct JobRunner {
    cache_maintenance: Option<CacheMaintenanceJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_maintenance: None,
            shutdown: None,
        }
    }

    pub fn with_cache_maintenance(mut self, job: CacheMaintenanceJob) -> Self {
        self.cache_maintenance = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.cache_maintenance {
            let job = match self.shutdown {
                Some(token) => job.with_cancellation(token),
                None => job,
            };
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
