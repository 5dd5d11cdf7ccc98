use std::error::Error as StdError;

/// Crate-wide result type for source-platform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors reported by the source platform and its resolver.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The referenced group could not be found, resolved, or joined.
    #[error("group not found: {reference}")]
    NotFound { reference: String },

    /// The peer exists but carries no forum topics.
    #[error("channel has no forum")]
    ForumMissing,

    /// The referenced peer is not a valid channel.
    #[error("invalid channel peer")]
    ChannelInvalid,

    /// The update stream disconnected.
    #[error("source connection lost")]
    ConnectionLost,

    /// Wrapped source error from the platform client.
    #[error("source operation failed: {context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn not_found(reference: impl std::fmt::Display) -> Self {
        Self::NotFound {
            reference: reference.to_string(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
