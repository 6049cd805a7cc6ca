use serde::{Deserialize, Serialize};

/// What one completed run looked like, written next to the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub job_key: String,
    pub gml_file: String,
    pub input_sha256: String,
    pub polls: u32,
    pub last_status: String,
    pub artifact: String,
    pub started: String,
    pub finished: String,
}
