use reqwest::Client;
use tracing::error;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

/// Builds the shared HTTP client. Timeouts are applied per request.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed.
pub fn build_client() -> AppResult<Client> {
    match Client::builder().user_agent(DEFAULT_USER_AGENT).build() {
        Ok(client) => Ok(client),
        Err(err) => {
            error!("Failed to build HTTP client: {}", err);
            Err(AppError::http(HttpError::BuildClientFailed { source: err }))
        }
    }
}
