//! Session token lifecycle demo
//!
//! Loads configuration the way a service would at startup, starts the
//! revocation sweeper and walks one session through issue, refresh and logout.
//!
//! ```sh
//! JWT_SECRET=change-me LOG_FORMAT=pretty cargo run -p tg_core --example session_lifecycle
//! ```

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tg_core::{RevocationSweeper, SystemClock, TokenError, TokenManagerConfig, TokenManagerHandle};
use tg_shared::{AppConfig, Environment, LogFormat};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(config_path()).context("failed to load configuration")?;
    init_tracing(&config);

    println!("=== Session Lifecycle Demo ({}) ===\n", config.environment);

    if config.jwt.is_using_default_secret() {
        tracing::warn!("Using the built-in development secret; set JWT_SECRET");
    }

    // The handle exists before the secret is applied so the sweeper can share its cache
    let handle = Arc::new(TokenManagerHandle::new(SystemClock::shared()));
    let sweeper = Arc::new(RevocationSweeper::new(
        handle.revocation_cache(),
        config.sweeper.clone(),
    ));
    let sweeper_task = sweeper.clone().start_background_task();

    match handle.issue("demo-user") {
        Err(TokenError::NotInitialized) => println!("✓ Issue before init rejected"),
        other => anyhow::bail!("unexpected result before init: {:?}", other),
    }

    handle
        .init_with(TokenManagerConfig::from(&config.jwt))
        .context("token manager rejected configuration")?;

    let token = handle.issue("demo-user")?;
    println!("✓ Issued token ({} bytes)", token.len());

    let context = handle.authenticate(&format!("Bearer {}", token))?;
    println!("✓ Authenticated subject {}", context.subject);

    match handle.refresh(&token) {
        Ok(refreshed) => {
            let claims = handle.validate(&refreshed)?;
            println!("✓ Refreshed, new token id {}", claims.jti);
        }
        Err(TokenError::RefreshNotAllowed { seconds_remaining }) => {
            println!("• Refresh deferred, {}s of validity remain", seconds_remaining);
        }
        Err(e) => return Err(e.into()),
    }

    let claims = handle.logout(&token)?;
    println!("✓ Logged out token {}", claims.jti);

    match handle.validate(&token) {
        Err(TokenError::Revoked) => println!("✓ Revoked token rejected"),
        other => anyhow::bail!("revoked token was not rejected: {:?}", other),
    }

    let result = sweeper.run_sweep();
    println!(
        "✓ Manual sweep: {} retained, {} removed",
        result.after, result.removed
    );

    if let Some(task) = sweeper_task {
        task.abort();
    }

    println!("\n=== Demo complete ===");
    Ok(())
}

fn config_path() -> String {
    std::env::var("CONFIG_FILE")
        .unwrap_or_else(|_| Environment::from_env().config_file().to_string())
}
