use anyhow::{anyhow, Result};

use tally::App;
use tally_auth::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let log_path = tally::logging::init_logging()?;

    let settings = Settings::new()?;
    settings.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    tracing::info!(
        "tally starting against {} (logging to {})",
        settings.api_base(),
        log_path.display()
    );

    let session = tally_auth::authenticate(&settings).await?;

    if let Some(message) = App::new(settings, session).run().await? {
        println!("{}", message);
    }

    Ok(())
}
