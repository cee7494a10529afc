use analytics::AnalyticsEngine;
use anyhow::Context;
use api_client::TwitterClient;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{init_tracing, load_config_from, Config, DEFAULT_CONFIG_FILE};
use core_types::requests::DEFAULT_MAX_RESULTS;
use core_types::{Granularity, TopicCountRequest, TweetPerformanceRequest, UserAnalyticsRequest};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use web_server::{Tool, ToolResult};

/// The main entry point for the socials analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the config file and real environment still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    // Dropping the guard would lose buffered file logs.
    let _log_guard = init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve { stdio: true } => web_server::run_stdio(&config).await,
        Commands::Serve { stdio: false } => web_server::run_server(&config).await,
        Commands::Tools => {
            print_tools();
            Ok(())
        }
        Commands::UserAnalytics { username } => {
            let request = UserAnalyticsRequest { username };
            run_tool(&config, Tool::UserAnalytics, serde_json::to_value(request)?).await
        }
        Commands::TweetPerformance {
            username,
            max_results,
        } => {
            let request = TweetPerformanceRequest {
                username,
                max_results,
            };
            run_tool(&config, Tool::TweetPerformance, serde_json::to_value(request)?).await
        }
        Commands::TopicCount {
            query,
            start_time,
            end_time,
            granularity,
        } => {
            let request = TopicCountRequest {
                query,
                start_time,
                end_time,
                granularity,
            };
            run_tool(&config, Tool::TopicTweetCount, serde_json::to_value(request)?).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Engagement and topic-volume analytics over the X/Twitter API.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path of the TOML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the analytics tools over HTTP.
    Serve {
        /// Speak line-delimited JSON-RPC on stdin/stdout instead of HTTP.
        #[arg(long)]
        stdio: bool,
    },
    /// List the available tools.
    Tools,
    /// Report follower, following and tweet counts for an account.
    UserAnalytics {
        /// Username without the @ symbol.
        username: String,
    },
    /// Report engagement across an account's recent tweets.
    TweetPerformance {
        /// Username without the @ symbol.
        username: String,
        /// Number of recent tweets to analyze (5 to 100).
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },
    /// Report time-bucketed tweet volume and its trend for a query.
    TopicCount {
        /// Search query, hashtag or keyword.
        query: String,
        /// ISO 8601 start of the window.
        #[arg(long)]
        start_time: Option<String>,
        /// ISO 8601 end of the window.
        #[arg(long)]
        end_time: Option<String>,
        #[arg(long, value_enum, default_value_t = Granularity::Hour)]
        granularity: Granularity,
    },
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn print_tools() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Title", "Required arguments"]);

    for tool in Tool::ALL {
        let schema = tool.input_schema();
        let required = schema["required"]
            .as_array()
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        table.add_row(vec![tool.name(), tool.title(), required.as_str()]);
    }

    println!("{table}");
}

/// Runs one tool against the live API and prints its result envelope.
async fn run_tool(config: &Config, tool: Tool, arguments: Value) -> anyhow::Result<()> {
    let client = TwitterClient::new(&config.api)?;
    let engine = AnalyticsEngine::new();
    tracing::debug!(tool = tool.name(), "Running tool from the command line.");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Running {}...", tool.name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = web_server::tools::invoke(&client, &engine, tool, arguments).await;
    spinner.finish_and_clear();

    let result: ToolResult = result?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
