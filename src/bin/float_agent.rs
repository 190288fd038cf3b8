//! Float agent - HTTP service entry point.
//!
//! Serves the high precision floating point agent on the address named by
//! `FLOAT_AGENT_HOSTNAME` / `FLOAT_AGENT_PORT`, the same variables other
//! agents use to reach it.

use agent_mesh::config::{Config, ConfigError, RemoteEndpoint};
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

    let bind = RemoteEndpoint::from_env(
        presets::FLOAT_AGENT_HOSTNAME_VAR,
        presets::FLOAT_AGENT_PORT_VAR,
    )?;
    let port: u16 = bind.port.parse().map_err(|e| {
        ConfigError::InvalidValue(
            presets::FLOAT_AGENT_PORT_VAR.to_string(),
            format!("{}", e),
        )
    })?;

    let mut agent = presets::float_agent(&config);
    agent.start_session();

    info!("Starting float agent on {}:{}", bind.hostname, port);
    api::serve(agent, &bind.hostname, port).await?;

    Ok(())
}
