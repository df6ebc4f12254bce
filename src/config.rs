//! Endpoint configuration for phatik
//!
//! The CLI takes the endpoint from `--endpoint` or `PHATIK_ENDPOINT`; library
//! callers can resolve it the same way through [`endpoint_from_env`].

/// Default server address, matching where the Phatik server listens out of the box
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3030";

/// Environment variable name for overriding the endpoint
pub const ENDPOINT_ENV_VAR: &str = "PHATIK_ENDPOINT";

/// Get the endpoint, checking the environment variable first, then falling back to default
pub fn endpoint_from_env() -> String {
    std::env::var_os(ENDPOINT_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}
