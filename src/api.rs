//! HTTP client for the playlist service.
//!
//! One method per endpoint. Any 2xx status counts as success; the bodies
//! of the two mutation endpoints are never read. Nothing is retried.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::track::{Track, TracksResponse};

/// Fallback when `PLAYLIST_API_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const BASE_URL_VAR: &str = "PLAYLIST_API_URL";

/// Errors from talking to the playlist service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not decode
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Base URL rejected at construction
    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Client handle for the playlist service.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Api {
    http: Client,
    base_url: String,
}

impl Api {
    /// Create a client for the given base URL.
    ///
    /// The URL must carry an http or https scheme; trailing slashes are
    /// stripped. The underlying client sets no request or connect timeout,
    /// so a stalled request stays pending until the server answers.
    pub fn new(base_url: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    /// Build a client from `PLAYLIST_API_URL`, falling back to the local
    /// development server.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the full track catalog.
    pub async fn update_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}/update_tracks", self.base_url);
        debug!(url = %url, "fetching track catalog");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let catalog: TracksResponse = response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("bad catalog response: {e}")))?;

            debug!(tracks = catalog.tracks.len(), "fetched track catalog");
            Ok(catalog.tracks)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Fetch the user's liked tracks.
    pub async fn liked_tracks(&self) -> Result<Vec<Track>> {
        let url = format!("{}/liked_tracks", self.base_url);
        debug!(url = %url, "fetching liked tracks");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            let tracks: Vec<Track> = response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("bad liked-tracks response: {e}")))?;

            debug!(tracks = tracks.len(), "fetched liked tracks");
            Ok(tracks)
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Remove liked tracks by id. The ids go over the wire as one
    /// comma-joined `track_ids` form field.
    pub async fn remove_liked_tracks(&self, track_ids: &[String]) -> Result<()> {
        let url = format!("{}/remove_liked_tracks", self.base_url);
        debug!(url = %url, count = track_ids.len(), "removing liked tracks");

        let response = self
            .http
            .post(&url)
            .form(&[("track_ids", track_ids.join(","))])
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            debug!(count = track_ids.len(), "liked tracks removed");
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    /// Create a playlist from a name and a comma-joined artist list.
    pub async fn create_playlist(&self, playlist_name: &str, artist_names: &str) -> Result<()> {
        let url = format!("{}/create_playlist", self.base_url);
        debug!(url = %url, playlist = %playlist_name, "creating playlist");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("playlist_name", playlist_name),
                ("artist_names", artist_names),
            ])
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            debug!(playlist = %playlist_name, "playlist created");
            Ok(())
        } else {
            Err(Self::server_error(response).await)
        }
    }

    async fn server_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_urls_accepted() {
        assert!(Api::new("https://example.com").is_ok());
        assert!(Api::new("http://localhost:5000").is_ok());
    }

    #[test]
    fn empty_url_rejected() {
        match Api::new("") {
            Err(ApiError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }

    #[test]
    fn schemeless_url_rejected() {
        assert!(matches!(
            Api::new("example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn trailing_slashes_stripped() {
        let api = Api::new("http://localhost:5000///").expect("valid url");
        assert_eq!(api.base_url(), "http://localhost:5000");
    }
}
