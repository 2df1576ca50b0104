//! Skill Judge command-line client
//!
//! Uploads a resume or requests a role analysis against the configured
//! backend and prints the JSON result.

use clap::{Parser, Subcommand};
use serde_json::Value;
use skill_judge_client::core::constants::env;
use skill_judge_client::core::logging::init_logging;
use skill_judge_client::models::response::{ResumeEvaluation, RoleReadiness};
use skill_judge_client::{ApiClient, ClientConfig, TracingObserver, UploadRequest};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "skill-judge", version, about = "Skill Judge API client")]
struct Cli {
    /// Backend base URL; overrides the config file and environment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to the TOML configuration file
    #[arg(long, global = true, env = env::CONFIG_PATH)]
    config: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print a short summary instead of the raw JSON
    #[arg(long, global = true)]
    summary: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a resume (PDF or DOCX) and print its evaluation
    Upload {
        /// Resume file
        file: PathBuf,
    },
    /// Analyze readiness of an uploaded resume for a role
    Analyze {
        #[arg(long)]
        resume_id: String,
        #[arg(long)]
        role: String,
    },
    /// Print the resolved backend base URL
    BaseUrl,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match ClientConfig::from_env(cli.base_url.clone(), cli.config.clone()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
    debug!(
        base_url = %config.base_url,
        timeout_secs = ?config.timeout_secs,
        "configuration loaded"
    );

    if let Err(message) = run(cli, config).await {
        error!("{}", message);
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), String> {
    if let Command::BaseUrl = cli.command {
        if config.is_same_origin() {
            println!("(same origin)");
        } else {
            println!("{}", config.base_url);
        }
        return Ok(());
    }

    let client = ApiClient::new(&config)
        .map_err(|e| format!("{:#}", e))?
        .with_observer(Arc::new(TracingObserver));

    match cli.command {
        Command::Upload { file } => {
            let upload = UploadRequest::from_path(&file)
                .await
                .map_err(|e| format!("{:#}", e))?;
            let value = client.upload_resume(upload).await.map_err(|e| e.to_string())?;
            print_result(&value, cli.summary, |v| {
                ResumeEvaluation::from_value(v).map(|r| r.summary())
            });
        }
        Command::Analyze { resume_id, role } => {
            let value = client
                .analyze_role(&resume_id, &role)
                .await
                .map_err(|e| e.to_string())?;
            print_result(&value, cli.summary, |v| {
                RoleReadiness::from_value(v).map(|r| r.summary())
            });
        }
        Command::BaseUrl => {}
    }

    Ok(())
}

/// Print the summary when requested and the payload fits, else pretty JSON
fn print_result<F>(value: &Value, summary: bool, render: F)
where
    F: FnOnce(&Value) -> Result<String, serde_json::Error>,
{
    if summary {
        match render(value) {
            Ok(text) => {
                print!("{}", text);
                return;
            }
            Err(e) => debug!("summary unavailable, printing raw JSON: {}", e),
        }
    }

    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}
