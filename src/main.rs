use anyhow::Result;
use game_bridge::Application;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting game bridge");

    let app = Application::new()?;
    app.run().await?;

    Ok(())
}
