/// Crate-wide result type for the mirroring pipeline.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a mirroring session. Per-message problems never surface
/// here; they are logged and the loop continues.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Setup failed: the group reference did not resolve or the
    /// subscription could not be established.
    #[error("group resolution failed: {0}")]
    Resolution(#[from] tgcord_source::Error),

    /// The inbound event stream closed. There is no auto-reconnect;
    /// restarting the session is the operator's call.
    #[error("source event stream closed")]
    ConnectionLost,

    /// The scratch directory could not be prepared.
    #[error("scratch directory unavailable: {0}")]
    Scratch(#[from] std::io::Error),
}
