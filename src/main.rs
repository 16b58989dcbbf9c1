use sushigo_engine::config::SimulationConfig;
use sushigo_engine::simulate;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sushigo_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SimulationConfig::from_env()?;
    tracing::info!(?config, "loaded simulation config");

    let stats = simulate::run_batch(&config)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
