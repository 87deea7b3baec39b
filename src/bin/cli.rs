//! Search Analytics CLI
//!
//! Command-line client for a running search analytics server:
//! - Record search events
//! - Show popular and recent searches
//! - Check status
//! - Generate a default config file

use clap::{Parser, Subcommand};
use search_analytics::analytics::AnalyticsSummary;
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-analytics-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record and inspect search analytics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a search event
    Record {
        /// Search text
        query: String,
        /// Number of results shown
        #[arg(short, long, default_value = "0")]
        results: u64,
        /// Filters in key=value format (value parsed as JSON when possible)
        #[arg(short = 'F', long)]
        filter: Vec<String>,
        /// Session identifier
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Show total, popular and recent searches
    Summary,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let analytics_url = format!("{}/api/search/analytics", cli.api_url);

    match cli.command {
        Commands::Record {
            query,
            results,
            filter,
            session,
        } => {
            let mut body = serde_json::json!({
                "query": query,
                "resultCount": results,
                "userAgent": format!("search-analytics-cli/{}", env!("CARGO_PKG_VERSION")),
            });

            let filters = parse_filters(&filter)?;
            if !filters.is_empty() {
                body["filters"] = Value::Object(filters);
            }
            if let Some(session) = session {
                body["sessionId"] = Value::String(session);
            }

            let response = client.post(&analytics_url).json(&body).send().await?;

            if response.status().is_success() {
                println!("Recorded search {:?} ({} results)", query, results);
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::Summary => {
            let response = client.get(&analytics_url).send().await?;

            if !response.status().is_success() {
                eprintln!("Failed to fetch analytics: {}", response.status());
                std::process::exit(1);
            }

            let summary: AnalyticsSummary = response.json().await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => print_summary(&summary),
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: Value = resp.json().await?;

                    println!("Search Analytics v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("API Status: {}", health["status"].as_str().unwrap_or("unknown"));
                    println!("Storage:    {}", health["storage"].as_str().unwrap_or("unknown"));
                    println!("Event log:  {}", health["store"].as_str().unwrap_or("-"));
                    println!(
                        "Events:     {} / {}",
                        health["events"].as_u64().unwrap_or(0),
                        health["max_events"].as_u64().unwrap_or(0)
                    );

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to search analytics API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin search-analytics");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = search_analytics::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn parse_filters(pairs: &[String]) -> Result<Map<String, Value>, Box<dyn std::error::Error>> {
    let mut filters = Map::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Invalid filter {:?}. Use key=value", pair))?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        filters.insert(key.to_string(), value);
    }
    Ok(filters)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_summary(summary: &AnalyticsSummary) {
    println!("Total searches: {}", summary.total_searches);
    println!();

    println!("Popular searches");
    println!("{}", "-".repeat(50));
    if summary.popular_searches.is_empty() {
        println!("No search data available yet.");
    }
    for entry in &summary.popular_searches {
        println!("{:<40} {:>8}", entry.query, entry.count);
    }
    println!();

    println!("Recent searches");
    println!("{}", "-".repeat(50));
    if summary.recent_searches.is_empty() {
        println!("No recent searches.");
    }
    for event in &summary.recent_searches {
        println!(
            "{:<30} {}",
            event.query,
            event.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
}
