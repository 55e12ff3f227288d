use std::sync::Arc;

use mail_insight::api::{AppState, ai_routes};
use mail_insight::config::{EnhancerConfig, ServerConfig};
use mail_insight::enhance::{AiEnhancer, HttpEnhancer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let server_config = ServerConfig::from_env();

    eprintln!("📧 Mail Insight v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api/ai", server_config.bind_addr);
    eprintln!("   Health: http://{}/api/health", server_config.bind_addr);

    // Conditionally enable AI enhancement if an API key is set
    let (enhancer, enhance_timeout): (Option<Arc<dyn AiEnhancer>>, _) =
        match EnhancerConfig::from_env() {
            Some(config) => {
                eprintln!("   Enhancer: enabled (model: {})", config.model);
                let timeout = config.timeout;
                (Some(Arc::new(HttpEnhancer::new(config))), Some(timeout))
            }
            None => {
                eprintln!("   Enhancer: disabled (heuristics only)");
                (None, None)
            }
        };

    let bind_addr = server_config.bind_addr.clone();
    let state = AppState::new(server_config, enhancer, enhance_timeout);
    let app = ai_routes(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Analysis server started");
    axum::serve(listener, app).await?;

    Ok(())
}
