/// Crate-wide result type for media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from scratch-file and image handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),
}
