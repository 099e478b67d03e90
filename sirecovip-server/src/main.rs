use sirecovip_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first (.env), then logging
    dotenv::dotenv().ok();
    init_logger();

    print_banner();
    tracing::info!("SIRECOVIP API starting...");

    let config = Config::from_env()?;
    let state = ServerState::initialize(&config)?;

    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {e}");
        return Err(e);
    }

    Ok(())
}
