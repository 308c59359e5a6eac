use std::fs::File;
use std::io::{
    self,
    BufWriter,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use metrics_list_core::config::{
    ConfigLoader,
    MetricsListConfig,
};
use metrics_list_core::{
    generate,
    WalkerSettings,
};
use metrics_list_monitoring::MonitoringCatalog;

#[derive(Debug, Parser)]
#[command(name = "metrics-list")]
#[command(about = "Generate metric aggregation configs from a Cloud Monitoring metric catalog")]
#[command(version)]
struct Cli {
    /// Project id to list metric descriptors from
    #[arg(short = 'p', default_value = "")]
    project: String,

    /// Metric type prefix, e.g. custom.googleapis.com/
    #[arg(short = 'f', default_value = "")]
    filter: String,

    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Descriptors requested per page (catalog default when unset)
    #[arg(long)]
    page_size: Option<u32>,

    /// Write the document to this file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut MetricsListConfig) {
        if self.page_size.is_some() {
            config.catalog.page_size = self.page_size;
        }
    }

    fn walker_settings(&self, config: &MetricsListConfig) -> WalkerSettings {
        WalkerSettings {
            project_id: self.project.clone(),
            prefix: self.filter.clone(),
            page_size: config.catalog.page_size,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        metrics_list_core::logging::init_verbose();
    } else {
        metrics_list_core::logging::init();
    }

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let mut config =
        ConfigLoader::load_or_default(cli.config.as_deref()).context("Failed to load config")?;
    cli.apply_overrides(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        anyhow::bail!("Invalid configuration: {}", errors.join(", "));
    }

    let settings = config
        .monitoring_settings()
        .context("Failed to resolve catalog settings")?;
    if settings.access_token.is_none() {
        tracing::warn!("No access token configured; requests will be sent unauthenticated");
    }

    let catalog =
        MonitoringCatalog::new(&settings).context("Failed to create metric catalog client")?;

    let document = generate(
        &catalog,
        &cli.walker_settings(&config),
        config.output_document(&cli.project),
    )
    .await
    .context("Failed to generate metric configuration")?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            document
                .write_json(BufWriter::new(file), config.output.indent)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                metrics = document.len(),
                "Wrote metric configuration"
            );
        }
        None => {
            document
                .write_json(io::stdout().lock(), config.output.indent)
                .context("Failed to write metric configuration")?;
        }
    }

    Ok(())
}
