use anyhow::Context;
use serde_json::Value;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::middleware::Envelope;

pub async fn handle(base_url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", base_url.trim_end_matches('/'));
    tracing::debug!("GET {}", url);

    let response = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to reach {}", url))?;
    let status = response.status();
    let envelope: Envelope<Value> = response
        .json()
        .await
        .with_context(|| format!("unexpected response from {}", url))?;

    if status.is_success() && envelope.success {
        output_success(output_format, &format!("{} is healthy", base_url), envelope.data)
    } else {
        output_error(output_format, &format!("{} reported {}: {}", base_url, status, envelope.message))?;
        anyhow::bail!("server unhealthy")
    }
}
