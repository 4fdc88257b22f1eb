//! Vehicle info service

use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_info::{
    api, config::AppConfig, errors::VehicleInfoError, lookup::VehicleLookup,
    upstream::UpstreamClient,
};

#[tokio::main]
async fn main() -> Result<(), VehicleInfoError> {
    #[cfg(feature = "dotenvy")]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Defaults, then config/default, then VEHICLEINFO__* variables
    let config = AppConfig::load()?;
    config.validate()?;

    info!(
        "Using upstream {} with timeout {:?}",
        config.upstream.base_url, config.upstream.timeout
    );

    let upstream = UpstreamClient::new(&config.upstream)?;
    let app = api::router(VehicleLookup::new(upstream));

    api::serve(&config.server, app).await
}
