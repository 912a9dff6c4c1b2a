//! Shipping Rates CLI
//!
//! Reads a shipment from a JSON file, asks every configured carrier for
//! quotes (or buys UPS labels), and prints the results as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use futures::future::join_all;
use serde_json::{json, Value};
use tracing::{info, warn};

use shipping_rates::carriers::{CarrierFactory, HttpTransport, ShippingCarrier};
use shipping_rates::{Provider, Settings, Shipment};

#[derive(Debug, Parser)]
#[command(name = "shipping-rates")]
#[command(about = "Multi-carrier shipping rates and labels", version)]
struct Cli {
    /// Only use this carrier (ups, usps, fedex)
    #[arg(long, global = true)]
    carrier: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Quote every service of every carrier
    Shop { shipment: PathBuf },
    /// Quote the selected service
    Rate { shipment: PathBuf },
    /// Buy labels (UPS only)
    Purchase {
        shipment: PathBuf,
        /// Directory the decoded label images are written to
        #[arg(long, default_value = ".")]
        labels: PathBuf,
    },
}

impl Command {
    fn shipment_path(&self) -> &Path {
        match self {
            Command::Shop { shipment } | Command::Rate { shipment } => shipment.as_path(),
            Command::Purchase { shipment, .. } => shipment.as_path(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Structured logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("shipping_rates=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load configuration")?;

    let path = cli.command.shipment_path();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let shipment: Shipment = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid shipment", path.display()))?;

    let transport =
        Arc::new(HttpTransport::new(&settings.http).context("failed to build HTTP client")?);
    let mut carriers = CarrierFactory::from_settings(&settings, transport);

    if let Some(code) = cli.carrier.as_deref() {
        let provider = Provider::from_code(code)
            .with_context(|| format!("unknown carrier {:?}", code))?;
        carriers.retain(|c| c.provider() == provider);
    }
    if carriers.is_empty() {
        bail!("no carriers configured; set credentials in config/local.toml or the environment");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        carriers = carriers.len(),
        "Starting shipping-rates"
    );

    let output = match &cli.command {
        Command::Shop { .. } => shop(&carriers, &shipment).await,
        Command::Rate { .. } => rate(&carriers, &shipment).await,
        Command::Purchase { labels, .. } => purchase(&carriers, &shipment, labels).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn shop(carriers: &[Box<dyn ShippingCarrier>], shipment: &Shipment) -> Value {
    let results = join_all(carriers.iter().map(|c| c.shop(shipment))).await;

    let mut output = serde_json::Map::new();
    for (carrier, result) in carriers.iter().zip(results) {
        let value = match result {
            Ok(estimates) => json!(estimates),
            Err(e) => {
                warn!(provider = %carrier.provider(), error = %e, "Shop failed");
                json!({ "error": e.to_string() })
            }
        };
        output.insert(carrier.name().to_string(), value);
    }
    Value::Object(output)
}

async fn rate(carriers: &[Box<dyn ShippingCarrier>], shipment: &Shipment) -> Value {
    let results = join_all(carriers.iter().map(|c| c.rate(shipment))).await;

    let mut output = serde_json::Map::new();
    for (carrier, result) in carriers.iter().zip(results) {
        let value = match result {
            Ok(estimate) => json!(estimate),
            Err(e) => {
                warn!(provider = %carrier.provider(), error = %e, "Rate failed");
                json!({ "error": e.to_string() })
            }
        };
        output.insert(carrier.name().to_string(), value);
    }
    Value::Object(output)
}

async fn purchase(
    carriers: &[Box<dyn ShippingCarrier>],
    shipment: &Shipment,
    label_dir: &Path,
) -> anyhow::Result<Value> {
    let carrier = carriers
        .iter()
        .find(|c| c.provider() == Provider::Ups)
        .or_else(|| carriers.first())
        .context("no carrier available for purchase")?;

    let purchased = carrier.purchase(shipment).await?;

    std::fs::create_dir_all(label_dir)
        .with_context(|| format!("failed to create {}", label_dir.display()))?;
    let mut files = Vec::new();
    for label in &purchased.labels {
        let file = label_dir.join(label_file_name(&label.tracking_number, &label.format));
        std::fs::write(&file, &label.image)
            .with_context(|| format!("failed to write {}", file.display()))?;
        files.push(file.display().to_string());
    }

    Ok(json!({ "shipment": purchased, "label_files": files }))
}

/// File name for a label image, safe to join onto the label directory
///
/// Tracking numbers come from the carrier, so anything outside
/// `[A-Za-z0-9_-]` is dropped.
fn label_file_name(tracking_number: &str, format: &str) -> String {
    let clean = |text: &str| -> String {
        text.chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    };

    let stem = match clean(tracking_number) {
        stem if stem.is_empty() => "label".to_string(),
        stem => stem,
    };
    let extension = match clean(format) {
        ext if ext.is_empty() => "img".to_string(),
        ext => ext.to_lowercase(),
    };
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_file_name_keeps_tracking_number() {
        assert_eq!(label_file_name("1Z999AA10123456784", "GIF"), "1Z999AA10123456784.gif");
    }

    #[test]
    fn test_label_file_name_strips_path_components() {
        assert_eq!(label_file_name("../../etc/passwd", "GIF"), "etcpasswd.gif");
        assert_eq!(label_file_name("1Z/../x", "../png"), "1Zx.png");
        assert_eq!(label_file_name("..", "GIF"), "label.gif");
        assert_eq!(label_file_name("C:\\labels\\1Z", ""), "Clabels1Z.img");

        let joined = Path::new("labels").join(label_file_name("../../etc/passwd", "GIF"));
        assert_eq!(joined.parent(), Some(Path::new("labels")));
    }
}
