//! Knowledge-base server binary
//!
//! Run with: cargo run -p kb-rag --bin kb-rag-server

use kb_rag::{config::AppConfig, server::KbServer, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    telemetry::init(&config.telemetry);

    tracing::info!("Configuration loaded");
    tracing::info!("  - Upload dir: {}", config.storage.upload_dir.display());
    tracing::info!("  - Qdrant collection: {}", config.qdrant.collection);
    tracing::info!("  - Embedding model: {}", config.gemini.embed_model);
    tracing::info!("  - Generation model: {}", config.gemini.generate_model);

    if config.gemini.api_key.is_empty() {
        tracing::warn!("GOOGLE_API_KEY not set; ingestion and chat will fail");
    }

    let server = KbServer::new(config).await?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("\nEndpoints:");
    println!("  POST /upload - Upload documents");
    println!("  GET  /files  - List uploaded files");
    println!("  POST /chat   - Ask questions");
    println!("  GET  /health - Health check");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
