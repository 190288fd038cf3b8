//! Math agent - HTTP service entry point.
//!
//! Serves the general math agent, which delegates floating point work to the
//! float agent service.

use agent_mesh::config::{Config, RemoteEndpoint};
use agent_mesh::{api, presets};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_mesh=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.model);

    // The float agent must be addressable before this service starts.
    RemoteEndpoint::from_env(
        presets::FLOAT_AGENT_HOSTNAME_VAR,
        presets::FLOAT_AGENT_PORT_VAR,
    )?;

    let mut agent = presets::math_agent(&config);
    agent.start_session();

    info!("Starting math agent on {}:{}", config.host, config.port);
    api::serve(agent, &config.host, config.port).await?;

    Ok(())
}
