//! Errors for the vehicle info service
use std::error::Error as StdError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VehicleInfoError {
    #[error("Network error: {}", describe_network(.0))]
    Network(#[from] reqwest::Error),

    #[error("No records found for this RC number")]
    NoRecordsFound,

    #[error("Invalid RC number: {0}")]
    InvalidRegistration(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error")]
    ConfigError(#[from] config::ConfigError),

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Could not build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("IO error")]
    IoError(#[from] std::io::Error),
}

/// reqwest only prints its outermost layer; the cause sits in the source chain
fn describe_network(error: &reqwest::Error) -> String {
    let mut message = error_chain(error);
    if error.is_timeout() && !message.contains("timed out") {
        message.push_str(": operation timed out");
    }
    message
}

/// `error` followed by each distinct message of its sources, `: `-separated
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Error, Debug)]
    #[error("error sending request")]
    struct SendError(#[source] ConnectError);

    #[derive(Error, Debug)]
    #[error("tcp connect error")]
    struct ConnectError(#[source] io::Error);

    #[test]
    fn test_error_chain_includes_causes() {
        let error = SendError(ConnectError(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "Connection refused",
        )));
        assert_eq!(
            error_chain(&error),
            "error sending request: tcp connect error: Connection refused"
        );
    }

    #[test]
    fn test_error_chain_skips_repeated_messages() {
        let error = ConnectError(io::Error::new(io::ErrorKind::Other, "tcp connect error"));
        assert_eq!(error_chain(&error), "tcp connect error");
    }
}
