/// Errors from the ingestion pipeline. Both variants are terminal for
/// the upload attempt.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input bytes could not be decoded as an image.
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// A processed surface could not be encoded for storage.
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}
