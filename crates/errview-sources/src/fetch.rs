use crate::{Error, Result, SourceLocation};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upper bound on a single network fetch. A hung server otherwise blocks the
/// requesting call forever.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads documents from local files or over HTTP.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("errview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::unavailable("http client", e))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn fetch(&self, location: &SourceLocation) -> Result<Vec<u8>> {
        self.fetch_optional(location)?
            .ok_or_else(|| Error::unavailable(location, "not found"))
    }

    /// Like `fetch`, but a missing file or an HTTP 404 is `Ok(None)`.
    pub fn fetch_optional(&self, location: &SourceLocation) -> Result<Option<Vec<u8>>> {
        tracing::debug!(%location, "fetching source");

        match location {
            SourceLocation::File(path) => match std::fs::read(path) {
                Ok(bytes) => Ok(Some(bytes)),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(err) => Err(Error::unavailable(location, err)),
            },
            SourceLocation::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .map_err(|e| Error::unavailable(location, e))?;

                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Ok(None);
                }

                let response = response
                    .error_for_status()
                    .map_err(|e| Error::unavailable(location, e))?;
                let bytes = response
                    .bytes()
                    .map_err(|e| Error::unavailable(location, e))?;

                Ok(Some(bytes.to_vec()))
            }
        }
    }

    pub fn fetch_json<T: DeserializeOwned>(&self, location: &SourceLocation) -> Result<T> {
        let bytes = self.fetch(location)?;
        serde_json::from_slice(&bytes).map_err(|e| Error::malformed(location, e))
    }
}
