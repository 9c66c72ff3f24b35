use std::sync::Arc;

use mc_rs_gateway::auth::mojang_public_key;
use mc_rs_gateway::config::GatewayConfig;
use mc_rs_gateway::context::GatewayContext;
use mc_rs_gateway::translator::Translators;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match GatewayConfig::load("gateway.toml") {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load gateway.toml: {e}");
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let translators = match Translators::new() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to build translator tables: {e}");
            std::process::exit(1);
        }
    };
    let trusted_root = match mojang_public_key() {
        Ok(key) => key,
        Err(e) => {
            error!("Failed to parse the authentication root key: {e}");
            std::process::exit(1);
        }
    };
    let ctx = Arc::new(GatewayContext::new(config.auth.clone(), trusted_root));

    info!(
        "MC-RS Gateway v{} configured for Bedrock clients on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.bedrock.address,
        config.bedrock.port
    );
    info!("MOTD: {}", config.bedrock.motd);
    info!(
        "Backend: {}:{} (auth: {})",
        config.remote.address, config.remote.port, config.remote.auth_type
    );
    info!(
        "Translators: {} java, {} bedrock",
        translators.java.len(),
        translators.bedrock.len()
    );
    if config.auth.require_signed_identity {
        info!("Unsigned Bedrock identities will be rejected");
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }

    info!("Shutting down, closing {} session(s)", ctx.sessions.len());
    for handle in ctx.sessions.handles() {
        handle.execute(|session| session.disconnect("disconnect.closed"));
    }
}
