//! REST client for the PostgREST endpoints (`boards` and `pixels`).
//!
//! Wraps the Supabase data API using [`reqwest`]. Every request carries
//! the project's anon key both as `apikey` and as a bearer token, the
//! way hosted Supabase expects.

use crowdcolor_core::board::{Board, CreateBoard};
use crowdcolor_core::pixel::{PixelOverride, PlacePixel};
use crowdcolor_core::types::BoardId;

use crate::config::SupabaseConfig;

/// HTTP client for one Supabase project's data API.
pub struct SupabaseApi {
    client: reqwest::Client,
    rest_url: String,
    anon_key: String,
}

/// Errors from the Supabase REST layer.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Supabase returned a non-2xx status code.
    #[error("Supabase API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl SupabaseApi {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (shares its connection pool with the storage client).
    pub fn with_client(client: reqwest::Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            rest_url: config.rest_url(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// List every board, newest first.
    pub async fn list_boards(&self) -> Result<Vec<Board>, SupabaseApiError> {
        let response = self
            .authed(self.client.get(format!(
                "{}/boards?select=*&order=created_at.desc",
                self.rest_url
            )))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch a single board row by id.
    ///
    /// PostgREST answers a miss with a non-2xx status once we ask for
    /// exactly one object, so "not found" surfaces as
    /// [`SupabaseApiError::ApiError`].
    pub async fn fetch_board(&self, board_id: BoardId) -> Result<Board, SupabaseApiError> {
        let response = self
            .authed(self.client.get(format!(
                "{}/boards?id=eq.{board_id}&select=*",
                self.rest_url
            )))
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Insert a new board row and return it as stored.
    pub async fn insert_board(&self, payload: &CreateBoard) -> Result<Board, SupabaseApiError> {
        let response = self
            .authed(self.client.post(format!("{}/boards", self.rest_url)))
            .header("Accept", "application/vnd.pgrst.object+json")
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch all pixel overrides for a board.
    pub async fn fetch_pixels(
        &self,
        board_id: BoardId,
    ) -> Result<Vec<PixelOverride>, SupabaseApiError> {
        let response = self
            .authed(self.client.get(format!(
                "{}/pixels?board_id=eq.{board_id}&select=*",
                self.rest_url
            )))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Upsert one pixel placement.
    ///
    /// `on_conflict` targets the board/index uniqueness constraint and
    /// `merge-duplicates` makes the write last-writer-wins, replacing
    /// any existing row for the same cell.
    pub async fn upsert_pixel(&self, payload: &PlacePixel) -> Result<(), SupabaseApiError> {
        let response = self
            .authed(self.client.post(format!(
                "{}/pixels?on_conflict=board_id,pixel_index",
                self.rest_url
            )))
            .header("Prefer", "resolution=merge-duplicates")
            .json(payload)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Fetch raw bytes from a public URL (board base image or thumbnail).
    pub async fn fetch_object(&self, url: &str) -> Result<Vec<u8>, SupabaseApiError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- private helpers ----

    /// Attach the project's auth headers to a request.
    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a
    /// [`SupabaseApiError::ApiError`] containing the status and body
    /// text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SupabaseApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SupabaseApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SupabaseApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), SupabaseApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
