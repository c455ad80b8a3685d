use stockbook_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, work dir, logging)
    setup_environment().map_err(|e| anyhow::anyhow!("{e}"))?;

    tracing::info!("Stockbook server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize state (database, reorder engine)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
