use std::time::Duration;

use crate::error::SourceError;

/// Default timeout for every remote call made while building a manifest.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client shared by all remote sources.
///
/// A hung spreadsheet or CSV endpoint would otherwise stall the whole build,
/// since adapters run one after another.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, SourceError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("chara-reel/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Turn a non-2xx response into [`SourceError::Status`], keeping a short
/// excerpt of the body for the log.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    Err(SourceError::Status {
        status: status.as_u16(),
        message: text.chars().take(200).collect(),
    })
}
