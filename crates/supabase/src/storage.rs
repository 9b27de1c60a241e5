//! Storage client for the public `board-images` bucket.
//!
//! Two objects exist per board, both named after its id: the processed
//! grayscale base (`<id>.png`) and the gallery thumbnail
//! (`<id>_thumb.jpg`). The bucket is public, so reads need no auth.

use crowdcolor_core::types::BoardId;

use crate::api::SupabaseApiError;
use crate::config::SupabaseConfig;

/// Name of the bucket holding board images.
pub const BUCKET: &str = "board-images";

/// Storage client for one Supabase project.
pub struct SupabaseStorage {
    client: reqwest::Client,
    storage_url: String,
    anon_key: String,
}

impl SupabaseStorage {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            storage_url: config.storage_url(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Object name of a board's base image.
    pub fn base_object_name(board_id: BoardId) -> String {
        format!("{board_id}.png")
    }

    /// Object name of a board's thumbnail.
    pub fn thumbnail_object_name(board_id: BoardId) -> String {
        format!("{board_id}_thumb.jpg")
    }

    /// Public download URL for an object in the bucket.
    pub fn public_url(&self, object_name: &str) -> String {
        format!("{}/object/public/{BUCKET}/{object_name}", self.storage_url)
    }

    /// Upload an object, replacing any existing one with the same name.
    ///
    /// Returns the public URL of the uploaded object.
    pub async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, SupabaseApiError> {
        let response = self
            .client
            .post(format!("{}/object/{BUCKET}/{object_name}", self.storage_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Content-Type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

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

        Ok(self.public_url(object_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_follow_the_board_id() {
        let id: BoardId = "f47ac10b-58cc-4372-a567-0e02b2c3d479".parse().unwrap();
        assert_eq!(
            SupabaseStorage::base_object_name(id),
            "f47ac10b-58cc-4372-a567-0e02b2c3d479.png"
        );
        assert_eq!(
            SupabaseStorage::thumbnail_object_name(id),
            "f47ac10b-58cc-4372-a567-0e02b2c3d479_thumb.jpg"
        );
    }

    #[test]
    fn public_url_points_into_the_bucket() {
        let storage = SupabaseStorage::new(&SupabaseConfig {
            url: "https://proj.supabase.co".into(),
            anon_key: "k".into(),
        });
        assert_eq!(
            storage.public_url("abc.png"),
            "https://proj.supabase.co/storage/v1/object/public/board-images/abc.png"
        );
    }
}
