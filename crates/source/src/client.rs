use std::path::Path;

use {async_trait::async_trait, tokio::sync::mpsc};

use crate::{
    error::Result,
    types::{Dialog, InboundMessage, ResolvedGroup, Sender, Topic},
};

/// Opaque capability over the source messaging platform.
///
/// This is the seam between the mirroring pipeline and a concrete
/// user-account client: connection and sign-in, entity lookup, the live
/// message stream, and byte transfer for media and avatars. Implementations
/// live with the embedding application; the pipeline only holds
/// `Arc<dyn SourceClient>`.
#[async_trait]
pub trait SourceClient: Send + Sync {
    async fn connect(&self) -> Result<()>;

    async fn is_authorized(&self) -> Result<bool>;

    async fn request_login_code(&self, phone: &str) -> Result<()>;

    async fn sign_in(&self, phone: &str, code: &str) -> Result<()>;

    /// Full dialog list in one pass, no pagination cap.
    async fn dialogs(&self) -> Result<Vec<Dialog>>;

    async fn entity_by_username(&self, username: &str) -> Result<ResolvedGroup>;

    async fn entity_by_id(&self, id: i64) -> Result<ResolvedGroup>;

    /// Join via an invite link and return the resulting chat.
    async fn join_via_invite(&self, link: &str) -> Result<ResolvedGroup>;

    /// Forum topics of a group. Reports `ForumMissing` or `ChannelInvalid`
    /// for peers without topics; the resolver maps those to expected absence.
    async fn forum_topics(&self, group: &ResolvedGroup) -> Result<Vec<Topic>>;

    /// New-message stream for one group. The sender half closing signals
    /// that the connection is gone.
    async fn subscribe(&self, group: &ResolvedGroup) -> Result<mpsc::Receiver<InboundMessage>>;

    /// Download a message's media bytes to `dest`.
    async fn download_media(&self, message: &InboundMessage, dest: &Path) -> Result<()>;

    /// Download a sender's profile photo to `dest`. Returns `false` (writing
    /// nothing) when the sender has no photo.
    async fn download_profile_photo(&self, sender: &Sender, dest: &Path) -> Result<bool>;

    /// Resolve the message's sender, falling back to the containing chat for
    /// channel posts. `None` when neither is resolvable (deleted accounts).
    async fn sender_of(&self, message: &InboundMessage) -> Result<Option<Sender>>;

    /// Fetch the message this one replies to, if it still exists.
    async fn reply_target(&self, message: &InboundMessage) -> Result<Option<InboundMessage>>;
}
