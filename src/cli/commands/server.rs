use clap::Subcommand;
use serde_json::Value;
use std::time::Duration;

use crate::cli::utils::{base_url, output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Check server health status from the /health endpoint")]
    Health {
        #[arg(long, env = "CIVIC_SERVER", default_value = "http://localhost:3000", help = "Server base URL")]
        server: String,
    },

    #[command(about = "Show server information from the API root endpoint")]
    Info {
        #[arg(long, env = "CIVIC_SERVER", default_value = "http://localhost:3000", help = "Server base URL")]
        server: String,
    },
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Health { server } => {
            let url = format!("{}/health", base_url(&server));
            let response = client()?.get(&url).send().await?;
            let status = response.status();
            let body: Value = response.json().await.unwrap_or(Value::Null);

            if status.is_success() {
                output_success(output_format, &format!("{} is healthy", server), Some(body))
            } else {
                output_error(
                    output_format,
                    &format!("{} is unhealthy (HTTP {})", server, status.as_u16()),
                    Some("SERVER_UNHEALTHY"),
                )?;
                anyhow::bail!("health check failed")
            }
        }
        ServerCommands::Info { server } => {
            let body: Value = client()?.get(base_url(&server)).send().await?.error_for_status()?.json().await?;
            let name = body["data"]["name"].as_str().unwrap_or("unknown");
            let version = body["data"]["version"].as_str().unwrap_or("unknown");
            output_success(output_format, &format!("{} {}", name, version), Some(body))
        }
    }
}

fn client() -> anyhow::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(Duration::from_secs(5)).build()?)
}
