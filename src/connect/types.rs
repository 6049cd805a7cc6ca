use crate::config::Calculation;
use serde::{Deserialize, Serialize};

/// The `options` multipart field of `POST /wnb/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOptions {
    pub name: String,
    pub calculation_year: u32,
    pub send_email: bool,
    pub output_type: String,
    pub calculation_points_type: String,
    pub receptor_set_name: String,
    pub appendices: Vec<String>,
}

impl SubmitOptions {
    pub fn from_config(calc: &Calculation) -> Self {
        Self {
            name: calc.name.clone(),
            calculation_year: calc.calculation_year,
            send_email: calc.send_email,
            output_type: calc.output_type.clone(),
            calculation_points_type: calc.points_type.clone(),
            receptor_set_name: calc.receptor_set_name.clone(),
            appendices: calc.appendices.clone(),
        }
    }
}

/// One entry of the `files` multipart field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFile {
    pub file_name: String,
    pub situation: String,
    pub group_id: u32,
    pub substance: String,
    pub calculation_year: u32,
}

impl SubmitFile {
    pub fn from_config(calc: &Calculation, file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            situation: calc.situation.clone(),
            group_id: calc.group_id,
            substance: calc.substance.clone(),
            calculation_year: calc.calculation_year,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub job_key: String,
}

/// Job state as reported by `GET /jobs/{jobKey}`. `resultUrl` only shows up
/// once the service has an archive ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub status: String,
    #[serde(default)]
    pub result_url: Option<String>,
}
