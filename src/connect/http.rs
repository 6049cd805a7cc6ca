use super::{types::*, ConnectApi};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{multipart, Client};
use std::fs::File;
use std::path::Path;
use tracing::debug;

pub struct HttpConnect {
    cfg: Config,
    http: Client,
}

impl HttpConnect {
    pub fn new(cfg: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .with_context(|| "building HTTP client")?;
        Ok(Self {
            cfg: cfg.clone(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.cfg.connect.base_url.trim_end_matches('/'),
            path
        )
    }

    fn job(&self, job_key: &str) -> Result<JobView> {
        let url = self.url(&format!("jobs/{job_key}"));
        debug!("GET {url}");
        self.http
            .get(&url)
            .header("api-key", &self.cfg.connect.api_key)
            .send()
            .with_context(|| format!("fetching job {job_key}"))?
            .json()
            .with_context(|| format!("parsing job response for {job_key}"))
    }
}

impl ConnectApi for HttpConnect {
    fn request_api_key(&self, email: &str) -> Result<()> {
        let url = self.url("user/generateApiKey");
        debug!("POST {url}");
        self.http
            .post(&url)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .with_context(|| "requesting API key")?;
        Ok(())
    }

    fn submit(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let options = SubmitOptions::from_config(&self.cfg.calculation);
        let files = vec![SubmitFile::from_config(&self.cfg.calculation, file_name)];

        let form = multipart::Form::new()
            .text("options", serde_json::to_string(&options)?)
            .text("files", serde_json::to_string(&files)?)
            .part(
                "fileParts",
                multipart::Part::bytes(bytes).file_name(file_name.to_string()),
            );

        let url = self.url("wnb/calculate");
        debug!("POST {url} file={file_name}");
        let receipt: SubmitReceipt = self
            .http
            .post(&url)
            .header("api-key", &self.cfg.connect.api_key)
            .multipart(form)
            .send()
            .with_context(|| format!("submitting {file_name}"))?
            .json()
            .with_context(|| "parsing submit response")?;

        Ok(receipt.job_key)
    }

    fn job_status(&self, job_key: &str) -> Result<String> {
        Ok(self.job(job_key)?.status)
    }

    fn download_result(&self, job_key: &str, dest: &Path) -> Result<()> {
        let url = self
            .job(job_key)?
            .result_url
            .ok_or_else(|| anyhow!("job {job_key} has no resultUrl"))?;

        debug!("GET {url}");
        let mut resp = self
            .http
            .get(&url)
            .send()
            .with_context(|| "fetching result archive")?;

        let mut file =
            File::create(dest).with_context(|| format!("create {}", dest.display()))?;
        resp.copy_to(&mut file)
            .with_context(|| format!("writing {}", dest.display()))?;
        Ok(())
    }
}
