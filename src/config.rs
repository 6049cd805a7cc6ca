use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connect: Connect,
    #[serde(default)]
    pub calculation: Calculation,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub polling: Polling,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect: Default::default(),
            calculation: Default::default(),
            paths: Default::default(),
            polling: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Connect {
    pub base_url: String,
    /// Keep the key out of version control; request one with `request-key`.
    pub api_key: String,
}
impl Default for Connect {
    fn default() -> Self {
        Self {
            base_url: "https://connect.aerius.nl/api/v7".into(),
            api_key: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Calculation {
    pub name: String,
    pub calculation_year: u32,
    pub send_email: bool,
    pub output_type: String,
    pub points_type: String,
    pub receptor_set_name: String,
    pub appendices: Vec<String>,
    pub situation: String,
    pub substance: String,
    pub group_id: u32,
}
impl Default for Calculation {
    fn default() -> Self {
        Self {
            name: "string".into(),
            calculation_year: 2023,
            send_email: false,
            output_type: "GML".into(),
            points_type: "WNB_RECEPTORS".into(),
            receptor_set_name: "string".into(),
            appendices: vec!["EDGE_EFFECT_REPORT".into()],
            situation: "REFERENCE".into(),
            substance: "NH3".into(),
            group_id: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub gml_dir: String,
    pub reports_dir: String,
    pub logs_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            gml_dir: "GML".into(),
            reports_dir: "Reports".into(),
            logs_dir: "Logs".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Polling {
    pub interval_seconds: u64,
}
impl Default for Polling {
    fn default() -> Self {
        Self {
            interval_seconds: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub write_summary_json: bool,
    pub summary_filename: String,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            write_summary_json: true,
            summary_filename: "summary.json".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}
