use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cin_ocr::api::{create_router, AppState};
use cin_ocr::config::Config;
use cin_ocr::ocr::{LanguageSelector, ModelAvailability, OcrEngine, TesseractEngine};

#[derive(Parser)]
#[command(name = "cin-ocr")]
#[command(about = "OCR service for identity card photographs")]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Probe every language model, print availability and exit
    #[arg(long)]
    check_models: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    let json_layer = args
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!args.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cin_ocr=info,tower_http=debug".into()),
        )
        .with(json_layer)
        .with(text_layer)
        .init();

    let config = Config::from_env();

    tracing::info!(
        "Initializing Tesseract (latin={}, arabic={}, psm={})...",
        config.ocr.latin_model,
        config.ocr.arabic_model,
        config.ocr.page_seg_mode
    );
    let engine = TesseractEngine::new(&config.ocr)?;

    if args.check_models {
        return check_models(&engine);
    }

    if !engine.is_available() {
        tracing::warn!("No Tesseract model could be loaded - every extraction will fail with 503");
    }

    std::fs::create_dir_all(&config.upload.dir)?;
    tracing::info!("Uploads are staged in {}", config.upload.dir);

    let state = AppState::new(config.clone(), Arc::new(engine));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("cin-ocr starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn check_models(engine: &TesseractEngine) -> anyhow::Result<()> {
    let mut missing = 0;

    for selector in LanguageSelector::ALL {
        match engine.availability(selector) {
            ModelAvailability::Ready { languages } => {
                println!("{:<10} ready        {languages}", selector.as_str());
            }
            ModelAvailability::Unavailable { reason } => {
                missing += 1;
                println!("{:<10} unavailable  {reason}", selector.as_str());
            }
        }
    }

    if missing > 0 {
        anyhow::bail!("{missing} language model(s) unavailable");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
