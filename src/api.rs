// API client module: a small blocking HTTP client for the Phatik status
// service. Two calls, `POST` and `GET` on `/api/status`, with no retries and
// no request timeout.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::config;
use crate::error::{PhatikError, Result};
use crate::model::{ListQuery, Status, StatusList};

const STATUS_PATH: &str = "/api/status";

/// What the server answered to a request that did reach it.
///
/// `Negative` carries the status code of any response that is not the one the
/// operation counts as success. Transport and decode failures are not an
/// outcome; they come back as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Negative(StatusCode),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The success value, dropping the status code of a negative answer.
    pub fn success(self) -> Option<T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Negative(_) => None,
        }
    }
}

/// Client bound to one Phatik endpoint. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `endpoint`, e.g. `http://127.0.0.1:3030`.
    pub fn new(endpoint: &str) -> Result<Self> {
        let base_url = endpoint.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PhatikError::InvalidEndpoint(endpoint.to_string()));
        }
        // The blocking client defaults to a 30s timeout; calls here wait for
        // the HTTP stack to resolve instead.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|source| PhatikError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(ApiClient { client, base_url })
    }

    /// Create a client from `PHATIK_ENDPOINT`, or the default endpoint when unset.
    pub fn from_env() -> Result<Self> {
        Self::new(&config::endpoint_from_env())
    }

    pub fn endpoint(&self) -> &str {
        &self.base_url
    }

    fn status_url(&self) -> String {
        format!("{}{}", self.base_url, STATUS_PATH)
    }

    /// Post one status. Succeeds only on `201 Created`.
    pub fn send_status(&self, status: &Status) -> Result<Outcome<()>> {
        let url = self.status_url();
        debug!(%url, app = %status.app, tags = status.tags.len(), "posting status");

        let res = self
            .client
            .post(&url)
            .json(status)
            .send()
            .map_err(|source| PhatikError::Transport {
                url: url.clone(),
                source,
            })?;

        let code = res.status();
        debug!(%url, status = code.as_u16(), "post answered");
        if code == StatusCode::CREATED {
            Ok(Outcome::Success(()))
        } else {
            warn!(%url, status = code.as_u16(), "server did not accept status");
            Ok(Outcome::Negative(code))
        }
    }

    /// Fetch one page of statuses. Succeeds only on `200 OK`; the body must
    /// then be a well-formed status list.
    pub fn fetch_statuses(&self, query: &ListQuery) -> Result<Outcome<StatusList>> {
        let url = self.status_url();
        debug!(%url, last_id = ?query.last_id, limit = ?query.limit, "listing statuses");

        let mut req = self.client.get(&url);
        // An empty query struct would still leave a trailing `?` on the URL.
        if query.last_id.is_some() || query.limit.is_some() {
            req = req.query(query);
        }
        let res = req.send().map_err(|source| PhatikError::Transport {
            url: url.clone(),
            source,
        })?;

        let code = res.status();
        debug!(%url, status = code.as_u16(), "list answered");
        if code != StatusCode::OK {
            warn!(%url, status = code.as_u16(), "no status list returned");
            return Ok(Outcome::Negative(code));
        }

        let body = res.text().map_err(|source| PhatikError::Transport {
            url: url.clone(),
            source,
        })?;
        let list: StatusList =
            serde_json::from_str(&body).map_err(|source| PhatikError::Decode { url, source })?;
        Ok(Outcome::Success(list))
    }

    /// Post a status stamped with the current time. Returns `true` iff the
    /// server answered `201 Created`.
    pub fn post(&self, message: &str, app: &str, tags: &[String]) -> Result<bool> {
        let status = Status::now(app, message, tags);
        Ok(self.send_status(&status)?.is_success())
    }

    /// List statuses after `min_id`, at most `count` of them. Either may be
    /// left unset to use the server's default. Returns `None` unless the
    /// server answered `200 OK`.
    pub fn get(&self, count: Option<i64>, min_id: Option<i64>) -> Result<Option<StatusList>> {
        let query = ListQuery {
            last_id: min_id,
            limit: count,
        };
        Ok(self.fetch_statuses(&query)?.success())
    }
}

/// One-shot form of [`ApiClient::post`].
pub fn post(endpoint: &str, message: &str, app: &str, tags: &[String]) -> Result<bool> {
    ApiClient::new(endpoint)?.post(message, app, tags)
}

/// One-shot form of [`ApiClient::get`].
pub fn get(endpoint: &str, count: Option<i64>, min_id: Option<i64>) -> Result<Option<StatusList>> {
    ApiClient::new(endpoint)?.get(count, min_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3030/").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3030");
        assert_eq!(client.status_url(), "http://localhost:3030/api/status");
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let err = ApiClient::new("  ").unwrap_err();
        assert!(matches!(err, PhatikError::InvalidEndpoint(_)));
    }

    #[test]
    fn outcome_success_drops_negative() {
        assert_eq!(Outcome::Success(3).success(), Some(3));
        assert_eq!(Outcome::<i32>::Negative(StatusCode::NOT_FOUND).success(), None);
        assert!(!Outcome::<()>::Negative(StatusCode::OK).is_success());
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = get(&endpoint, None, None).unwrap_err();
        assert!(matches!(err, PhatikError::Transport { .. }));
    }
}
