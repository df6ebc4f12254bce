// Error taxonomy for the client library.
//
// A non-success HTTP status is not an error here: `post` reports it as
// `false` and `get` as `None`. Only failures that prevent an answer from the
// server (or make its answer unreadable) end up in `PhatikError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhatikError {
    #[error("invalid endpoint: {0:?}")]
    InvalidEndpoint(String),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed status list from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, PhatikError>;
