pub mod http;
pub mod types;

use anyhow::Result;
use std::path::Path;

pub use http::HttpConnect;
pub use types::{JobView, SubmitFile, SubmitOptions, SubmitReceipt};

/// The four operations the Connect service exposes to this tool.
pub trait ConnectApi {
    /// Ask the service to mail an API key to `email`. The key itself arrives
    /// out-of-band; there is nothing in the response worth inspecting.
    fn request_api_key(&self, email: &str) -> Result<()>;

    /// Upload a GML and start the calculation. Returns the job key.
    fn submit(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;

    /// Current status string for a job, exactly as the service reports it.
    fn job_status(&self, job_key: &str) -> Result<String>;

    /// Fetch the job's result URL and stream the archive to `dest`.
    fn download_result(&self, job_key: &str, dest: &Path) -> Result<()>;
}
