use clap::{Parser, Subcommand};
use pipeline_service::Pipeline;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use trendcast_core::{AppConfig, CoreError, ErrorReporter};

const DEFAULT_LOG_FILTER: &str =
    "trendcast=info,pipeline_service=info,idea_engine=info,trend_fetcher=info,llm_interface=info,seo_optimizer=info";

#[derive(Debug, Parser)]
#[command(name = "trendcast", version, about = "Trend-driven video idea, script and metadata generator")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for ideas/, scripts/ and metadata/
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Seed for idea sampling and title hooks
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Ignore any configured API key and use templates only
    #[arg(long, global = true)]
    no_ai: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the pipeline once and persist the results
    Run {
        #[arg(long)]
        count: Option<usize>,
    },
    /// Run the pipeline every N hours until Ctrl-C
    Schedule {
        #[arg(long)]
        hours: Option<u64>,
    },
    /// Fetch and optimize ideas, print them as JSON
    Ideas {
        #[arg(long, default_value_t = 3)]
        count: usize,
    },
}

impl Cli {
    fn load_config(&self) -> Result<AppConfig, CoreError> {
        let mut config = AppConfig::load(self.config.as_deref())?;
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.no_ai {
            config.groq_api_key = None;
        }
        match &self.command {
            Command::Run { count: Some(count) } => config.idea_count = *count,
            Command::Schedule { hours: Some(hours) } => config.schedule_hours = *hours,
            _ => {}
        }
        config.validate()?;
        Ok(config)
    }
}

fn schedule_interval(hours: u64) -> Result<Duration, CoreError> {
    hours
        .checked_mul(3600)
        .map(Duration::from_secs)
        .ok_or_else(|| CoreError::InvalidInput {
            message: format!("schedule of {} hours is too long", hours),
        })
}

/// Converts a failed run into the single line printed on exit.
fn fatal(error: CoreError) -> anyhow::Error {
    anyhow::anyhow!(ErrorReporter::new().report_error(&error))
}

async fn execute(cli: Cli) -> Result<(), CoreError> {
    let config = cli.load_config()?;
    let mut pipeline = Pipeline::from_config(&config)?;

    match cli.command {
        Command::Run { .. } => {
            let run = pipeline.run_once().await?;
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
        Command::Schedule { .. } => {
            let every = schedule_interval(config.schedule_hours)?;
            pipeline.run_scheduled(every).await?;
        }
        Command::Ideas { count } => {
            let ideas: Vec<_> = pipeline
                .generate_ideas(count)
                .await
                .into_iter()
                .map(|idea| idea.into_value())
                .collect();
            println!("{}", serde_json::to_string_pretty(&ideas)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Ignoring unreadable .env file: {}", e);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting trendcast");

    execute(cli).await.map_err(fatal)
}
