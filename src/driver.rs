use crate::{
    config::Config,
    connect::ConnectApi,
    report::RunSummary,
    util::{ensure_dir, now_rfc3339, sha256_hex},
};
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Submit → poll → download, one job at a time, synchronously.
pub struct Driver<C: ConnectApi> {
    cfg: Config,
    client: C,
}

impl<C: ConnectApi> Driver<C> {
    pub fn new(cfg: &Config, client: C) -> Self {
        Self {
            cfg: cfg.clone(),
            client,
        }
    }

    pub fn run(&self, gml_file: &str, dest: &str) -> Result<RunSummary> {
        let input = Path::new(&self.cfg.paths.gml_dir).join(gml_file);
        let bytes = std::fs::read(&input)
            .with_context(|| format!("reading input: {}", input.display()))?;
        let input_sha256 = sha256_hex(&bytes);

        let started = now_rfc3339();
        info!("submitting {} ({} bytes)", input.display(), bytes.len());
        let job_key = self.client.submit(gml_file, bytes)?;
        info!("job key: {job_key}");

        let mut polls: u32 = 0;
        let last_status = loop {
            let status = self.client.job_status(&job_key)?;
            polls += 1;
            info!("job {job_key} status: {status}");

            // The service's status vocabulary is undocumented; the only
            // status we act on is the literal COMPLETED. Anything else,
            // failure statuses included, keeps the loop going.
            if status == "COMPLETED" {
                break status;
            }

            std::thread::sleep(Duration::from_secs(self.cfg.polling.interval_seconds));
        };

        ensure_dir(Path::new(&self.cfg.paths.reports_dir))?;
        let artifact = Path::new(&self.cfg.paths.reports_dir).join(dest);
        info!("downloading results to {}", artifact.display());
        self.client.download_result(&job_key, &artifact)?;

        Ok(RunSummary {
            job_key,
            gml_file: gml_file.to_string(),
            input_sha256,
            polls,
            last_status,
            artifact: artifact.display().to_string(),
            started,
            finished: now_rfc3339(),
        })
    }
}
