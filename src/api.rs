//! HTTP API

use axum::extract::{rejection::QueryRejection, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    config::ServerConfig,
    errors::VehicleInfoError,
    lookup::VehicleLookup,
    models::{RegistrationNumber, VehicleRecord},
};

/// Query string of `GET /vehicle`
#[derive(Debug, Deserialize)]
pub struct VehicleQuery {
    pub rc: String,
    #[serde(default, deserialize_with = "serde_helpers::deserialize_flag")]
    pub debug: bool,
}

/// Build the router with all endpoints
pub fn router(lookup: VehicleLookup) -> Router {
    Router::new()
        .route("/vehicle", get(get_vehicle))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(lookup)
}

/// Serve `app` until Ctrl-C
pub async fn serve(config: &ServerConfig, app: Router) -> Result<(), VehicleInfoError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!("Could not listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// Malformed queries and invalid RC numbers are answered with 422 without
/// contacting the registry.
async fn get_vehicle(
    State(lookup): State<VehicleLookup>,
    query: Result<Query<VehicleQuery>, QueryRejection>,
) -> (StatusCode, Json<VehicleRecord>) {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let e = VehicleInfoError::InvalidQuery(rejection.body_text());
            warn!("Rejected query: {}", e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(VehicleRecord::failure("", &e)),
            );
        }
    };

    let rc = match RegistrationNumber::try_from(query.rc.as_str()) {
        Ok(rc) => rc,
        Err(e) => {
            warn!("Rejected RC number {:?}: {}", query.rc, e);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(VehicleRecord::failure(&query.rc, &e)),
            );
        }
    };

    (StatusCode::OK, Json(lookup.lookup(&rc, query.debug).await))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Custom deserializers
mod serde_helpers {
    use serde::{de, Deserialize, Deserializer};

    /// Boolean query flag: `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`,
    /// `t`/`f`, `y`/`n`, case-insensitive
    pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse_flag(&value).ok_or_else(|| {
            de::Error::custom(format!("expected a boolean flag, got {:?}", value))
        })
    }

    pub(super) fn parse_flag(value: &str) -> Option<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
            "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::serde_helpers::parse_flag;
    use super::*;

    fn parse_query(query: &str) -> Result<VehicleQuery, serde::de::value::Error> {
        serde::Deserialize::deserialize(serde::de::value::MapDeserializer::new(
            url_pairs(query).into_iter(),
        ))
    }

    fn url_pairs(query: &str) -> Vec<(String, String)> {
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for value in ["true", "TRUE", "1", "yes", "On", "t", "y"] {
            assert_eq!(parse_flag(value), Some(true), "{}", value);
        }
        for value in ["false", "0", "no", "OFF", "f", "n"] {
            assert_eq!(parse_flag(value), Some(false), "{}", value);
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn test_query_debug_defaults_to_false() {
        let query = parse_query("rc=MH12AB1234").unwrap();
        assert_eq!(query.rc, "MH12AB1234");
        assert!(!query.debug);
    }

    #[test]
    fn test_query_debug_is_lenient() {
        assert!(parse_query("rc=MH12AB1234&debug=1").unwrap().debug);
        assert!(parse_query("rc=MH12AB1234&debug=yes").unwrap().debug);
        assert!(!parse_query("rc=MH12AB1234&debug=off").unwrap().debug);
        assert!(parse_query("rc=MH12AB1234&debug=maybe").is_err());
    }
}
