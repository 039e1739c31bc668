/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Admin job runs and management pages, timed quiz attempts, student listings
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or shutdown handling
*/

mod cli;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use quizmaster_app::AppConfig;
use quizmaster_client::{ReportPeriod, TaskType};

#[derive(Parser, Debug)]
#[command(name = "quizmaster", version, about = "Quiz platform client: admin jobs and timed quizzes")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Override the configured backend URL
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a configuration file interactively
    Init {
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Start a background job and follow it to completion
    Trigger {
        /// report, backup or analytics
        #[arg(value_name = "TASK")]
        task: TaskType,
    },
    /// Take a timed quiz
    Take {
        #[arg(value_name = "QUIZ_ID")]
        quiz_id: u64,
    },
    /// List available quizzes
    Quizzes {
        #[arg(long)]
        subject: Option<u64>,
        #[arg(long)]
        chapter: Option<u64>,
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show past attempts and statistics
    Results {
        #[arg(long, default_value = "")]
        search: String,
        /// Show the response sheet of one attempt
        #[arg(long, value_name = "ATTEMPT_ID")]
        attempt: Option<u64>,
    },
    /// Dashboard figures for the signed-in student
    Stats,
    /// List user accounts, optionally deleting or (de)activating one
    Users {
        #[arg(long, value_name = "USER_ID", conflicts_with = "toggle")]
        delete: Option<u64>,
        /// Flip the active flag of a user
        #[arg(long, value_name = "USER_ID")]
        toggle: Option<u64>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Attempt reports for a period, subject or chapter
    Reports {
        /// all, 7days, 30days or 90days
        #[arg(long, default_value = "all")]
        period: ReportPeriod,
        #[arg(long)]
        subject: Option<u64>,
        #[arg(long)]
        chapter: Option<u64>,
    },
    /// Browse and prune subjects, chapters, quizzes and questions
    Content {
        #[command(subcommand)]
        action: cli::admin::ContentCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    if let Command::Init { output } = &args.command {
        let output = match output.clone().or_else(|| args.config_path.clone()) {
            Some(path) => path,
            None => AppConfig::default_path().context("no config directory on this platform")?,
        };
        return cli::init::run_init(output);
    }

    let mut config = load_config(args.config_path.as_ref())?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    info!(base_url = %config.base_url, "configuration loaded");

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    match args.command {
        Command::Init { .. } => Ok(()),
        Command::Trigger { task } => cli::trigger::run_trigger(&config, task, shutdown).await,
        Command::Take { quiz_id } => cli::take::run_take(&config, quiz_id, shutdown).await,
        Command::Quizzes {
            subject,
            chapter,
            search,
        } => cli::listing::run_quizzes(&config, subject, chapter, search).await,
        Command::Results { search, attempt } => {
            cli::listing::run_results(&config, &search, attempt).await
        }
        Command::Stats => cli::listing::run_stats(&config).await,
        Command::Users {
            delete,
            toggle,
            yes,
        } => cli::admin::run_users(&config, delete, toggle, yes).await,
        Command::Reports {
            period,
            subject,
            chapter,
        } => cli::admin::run_reports(&config, period, subject, chapter).await,
        Command::Content { action } => cli::admin::run_content(&config, action).await,
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path.clone(),
        None => match AppConfig::default_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("no config file found; using defaults");
                return Ok(AppConfig::default());
            }
        },
    };
    AppConfig::from_file(&path).context("load config")
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
