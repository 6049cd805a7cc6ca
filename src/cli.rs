use crate::{
    config::Config,
    connect::{ConnectApi, HttpConnect},
    driver::Driver,
    util::ensure_dir,
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "aerius-report")]
#[command(about = "Submit a GML to AERIUS Connect, poll the job, download the report archive")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./aerius-report.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask the service to mail an API key to the given address.
    RequestKey {
        #[arg(long)]
        email: String,
    },
    /// Upload a GML from the configured GML directory and print the job key.
    Submit {
        #[arg(long)]
        file: String,
    },
    /// Print the current status of a job.
    Status {
        #[arg(long)]
        job_key: String,
    },
    /// Download a finished job's archive into the configured reports directory.
    Download {
        #[arg(long)]
        job_key: String,
        #[arg(long)]
        dest: String,
    },
    /// Submit, poll until COMPLETED, then download.
    Run {
        #[arg(long)]
        file: String,
        #[arg(long)]
        dest: String,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = Config::load(&cfg_path)?;

    let log_path = resolve_log_path(&cfg);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    let client = HttpConnect::new(&cfg)?;

    match &args.cmd {
        Command::RequestKey { email } => {
            client.request_api_key(email)?;
            info!("API key requested for {email}; check your inbox");
            Ok(())
        }
        Command::Submit { file } => submit(&cfg, &client, file),
        Command::Status { job_key } => {
            let status = client.job_status(job_key)?;
            println!("{status}");
            Ok(())
        }
        Command::Download { job_key, dest } => download(&cfg, &client, job_key, dest),
        Command::Run { file, dest } => run(&cfg, client, file, dest),
    }
}

fn submit(cfg: &Config, client: &dyn ConnectApi, file: &str) -> Result<()> {
    validate_file_name(file)?;
    let path = Path::new(&cfg.paths.gml_dir).join(file);
    let bytes =
        std::fs::read(&path).with_context(|| format!("reading input: {}", path.display()))?;
    let job_key = client.submit(file, bytes)?;
    println!("{job_key}");
    Ok(())
}

fn download(cfg: &Config, client: &dyn ConnectApi, job_key: &str, dest: &str) -> Result<()> {
    validate_file_name(dest)?;
    ensure_dir(Path::new(&cfg.paths.reports_dir))?;
    let path = Path::new(&cfg.paths.reports_dir).join(dest);
    client.download_result(job_key, &path)?;
    info!("wrote {}", path.display());
    Ok(())
}

fn run(cfg: &Config, client: HttpConnect, file: &str, dest: &str) -> Result<()> {
    validate_file_name(file)?;
    validate_file_name(dest)?;

    if let Some(ext) = Path::new(file).extension().and_then(|s| s.to_str()) {
        if ext.to_ascii_lowercase() != "gml" {
            warn!("input does not look like a GML: {file}");
        }
    }

    let summary = Driver::new(cfg, client).run(file, dest)?;

    if cfg.output.write_summary_json {
        let path = Path::new(&cfg.paths.reports_dir).join(&cfg.output.summary_filename);
        std::fs::write(&path, serde_json::to_string_pretty(&summary)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if cfg.output.print_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("empty file name"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(anyhow!(
            "expected a bare file name, not a path: {name}"
        ));
    }
    Ok(())
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("aerius-report.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("aerius-report.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        // Append, so repeated runs share one log file.
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(PathBuf::from(&cfg.paths.logs_dir).join("aerius-report.log"))
}
