/// Crate-wide result type for webhook operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from building or sending a webhook request. These never escape
/// [`crate::WebhookClient::deliver`]; they exist so the internal send path
/// can use `?` before the log-and-drop boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("failed to read media file: {0}")]
    Io(#[from] std::io::Error),
}
