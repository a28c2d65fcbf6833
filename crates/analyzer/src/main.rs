use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, error, info};

use chart_api::{ApiConfig, ChartApiClient};
use common::logger;
use common::models::SelectedFile;
use workflow::WorkflowController;

use crate::services::render_service::RenderService;

mod services;

#[derive(Parser, Debug)]
#[command(name = "chart-analyzer", about = "Upload a trading chart and print the AI trading signal")]
struct Args {
    /// Chart image to upload
    image: PathBuf,

    /// Stop after the upload, skip the analysis request
    #[arg(long)]
    upload_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::setup_logger();
    let args = Args::parse();

    let config = ApiConfig::from_env()?;
    debug!("Backend at {} (timeout {:?})", config.base_url, config.request_timeout);

    let client = ChartApiClient::new(&config)?;
    let controller = WorkflowController::with_config(client, &config);
    let render_handle = tokio::spawn(RenderService::new(controller.subscribe()).start());

    let outcome = async {
        let file = SelectedFile::from_path(&args.image)
            .await
            .with_context(|| format!("Failed to read {}", args.image.display()))?;
        controller.select_file(file);

        controller.upload_selected().await?;
        if !args.upload_only {
            controller.analyze_uploaded().await?;
        }
        anyhow::Ok(())
    }
    .await;

    // closes the snapshot channel so the renderer drains and exits
    drop(controller);
    render_handle.await?;

    match &outcome {
        Ok(()) => info!("Session finished."),
        Err(e) => error!("Session failed: {:#}", e),
    }
    outcome
}
