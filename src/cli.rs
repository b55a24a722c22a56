use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use crate::auth::Token;
use crate::dora::TimeWindow;
use crate::error::DoraLensError;
use crate::insights::DoraReport;
use crate::output;
use crate::providers::github::{GitHubProvider, DEFAULT_API_URL};
use crate::providers::Provider;

#[derive(Parser)]
#[command(name = "doralens")]
#[command(author, version, about = "DORA Metrics Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,

    /// Disable coloured output (also honours NO_COLOR)
    #[arg(long, global = true, default_value_t = false)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Dashboard,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute DORA metrics from GitHub Actions and pull requests
    Github {
        /// Repository owner (user or organisation)
        #[arg(long, env = "DORALENS_OWNER")]
        owner: String,

        /// Repository name
        #[arg(long, env = "DORALENS_REPO")]
        repo: String,

        /// GitHub API token
        #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// GitHub API URL
        #[arg(short, long, default_value = DEFAULT_API_URL)]
        url: String,

        /// Base branch that pull requests are merged into
        #[arg(short, long, default_value = "main")]
        base: String,

        /// Time window in days
        #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=90))]
        days: u32,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Dashboard)]
        format: OutputFormat,

        /// Also write the filtered runs as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Keep re-rendering until interrupted
        #[arg(short, long, default_value_t = false)]
        watch: bool,

        /// Seconds between renders in watch mode; fetches are still cached for 60s
        #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
        refresh: u64,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        if self.no_color || self.output.is_some() {
            colored::control::set_override(false);
        }

        match &self.command {
            Commands::Github {
                owner,
                repo,
                token,
                url,
                base,
                days,
                format,
                csv,
                watch,
                refresh,
            } => {
                let token = token
                    .as_deref()
                    .map(Token::from)
                    .filter(|token| !token.is_empty())
                    .ok_or(DoraLensError::MissingToken)?;

                let window = TimeWindow::new(*days)?;
                let mut provider = GitHubProvider::new(
                    url,
                    owner.clone(),
                    repo.clone(),
                    base.clone(),
                    Some(token),
                )?;

                if !*watch {
                    return self.render_pass(&mut provider, window, *format, csv.as_ref()).await;
                }

                info!("Watching {owner}/{repo}, re-rendering every {refresh}s");
                loop {
                    match self.render_pass(&mut provider, window, *format, csv.as_ref()).await {
                        Ok(()) => {}
                        Err(e) if matches!(e.downcast_ref::<DoraLensError>(), Some(DoraLensError::NoData)) => {
                            eprintln!("{e}");
                        }
                        Err(e) => return Err(e),
                    }
                    tokio::time::sleep(Duration::from_secs(*refresh)).await;
                }
            }
        }
    }

    async fn render_pass(
        &self,
        provider: &mut impl Provider,
        window: TimeWindow,
        format: OutputFormat,
        csv: Option<&PathBuf>,
    ) -> Result<()> {
        let report = provider.collect_report(window, Utc::now()).await?;

        let rendered = self.render(&report, format)?;
        if let Some(output_path) = &self.output {
            std::fs::write(output_path, rendered)?;
            info!("Report written to: {}", output_path.display());
        } else {
            println!("{rendered}");
        }

        if let Some(csv_path) = csv {
            std::fs::write(csv_path, output::csv::export_runs(&report.runs))?;
            info!("Runs exported to: {}", csv_path.display());
        }

        if report.runs.is_empty() {
            warn!("No runs fall inside the last {} days", window.days());
        }

        Ok(())
    }

    fn render(&self, report: &DoraReport, format: OutputFormat) -> Result<String> {
        let rendered = match format {
            OutputFormat::Dashboard => output::dashboard::render(report),
            OutputFormat::Json => output::to_json(report, self.pretty)?,
        };
        Ok(rendered)
    }
}
