// Library root
// -----------
// Client library for a Phatik status server, plus the pieces the `phatik`
// binary is built from.
//
// Module responsibilities:
// - `model`: the `Status` / `StatusList` records exchanged over HTTP.
// - `api`: the blocking HTTP client (`post` and `get` on `/api/status`).
// - `cli`: argument parsing and output formatting for the binary.
// - `config`: endpoint resolution from the environment.
// - `error`: the library error type.
// - `logging`: tracing subscriber setup for the binary.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use api::{get, post, ApiClient, Outcome};
pub use error::PhatikError;
pub use model::{ListQuery, Status, StatusList};
