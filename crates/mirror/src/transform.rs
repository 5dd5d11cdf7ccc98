//! Inbound message → outbound content model.

use std::sync::Arc;

use tracing::warn;

use {
    tgcord_media::{ScratchDir, TempFile, image_ops},
    tgcord_source::{
        SourceClient,
        types::{self, InboundMessage, MediaKind, Sender},
    },
    tgcord_webhook::{Embed, OutboundMessage},
};

use crate::config::MirrorConfig;

/// One transformed message, ready for the delivery engine.
///
/// The avatar thumbnail travels separately from the message: whether it is
/// actually attached is the speaker tracker's decision, not the
/// transformer's.
pub struct TransformedMessage {
    pub message: OutboundMessage,
    pub avatar: Option<String>,
    pub media: Option<TempFile>,
}

/// Builds the outbound content model for one inbound message.
///
/// Side effects are limited to scratch-file creation, and every file created
/// here is guarded: the avatar source is deleted as soon as it is encoded,
/// and the media file travels as a [`TempFile`] that the delivery engine
/// consumes.
pub struct MessageTransformer {
    client: Arc<dyn SourceClient>,
    scratch: ScratchDir,
    avatar_bound: u32,
    reply_footer: String,
}

impl MessageTransformer {
    #[must_use]
    pub fn new(client: Arc<dyn SourceClient>, scratch: ScratchDir, config: &MirrorConfig) -> Self {
        Self {
            client,
            scratch,
            avatar_bound: config.avatar_bound,
            reply_footer: config.reply_footer.clone(),
        }
    }

    /// Produce the content model for one inbound message.
    ///
    /// Collaborator failures degrade the affected part (no avatar, no media,
    /// no reply embed) and are logged with the message id; the message is
    /// still delivered in whatever shape remains.
    pub async fn transform(&self, inbound: &InboundMessage) -> TransformedMessage {
        let sender = match self.client.sender_of(inbound).await {
            Ok(sender) => sender,
            Err(e) => {
                warn!(message_id = inbound.id, error = %e, "sender lookup failed");
                None
            },
        };

        let display_name = sender
            .as_ref()
            .map(Sender::display_name)
            .unwrap_or_else(|| types::UNKNOWN_USER.to_string());

        let avatar = match &sender {
            Some(sender) => self.fetch_avatar(sender, inbound.id).await,
            None => None,
        };

        let mut message = OutboundMessage::new(&display_name);

        let media = match &inbound.media {
            Some(kind) => self.fetch_media(inbound, kind).await,
            None => None,
        };

        if !inbound.text.is_empty() {
            message.set_content(&inbound.text);
        }

        if inbound.reply_to_msg_id.is_some() {
            if let Some(embed) = self.render_reply(inbound).await {
                message.add_embed(embed);
            }
        }

        TransformedMessage {
            message,
            avatar,
            media,
        }
    }

    /// Download and thumbnail the sender's profile photo. The downloaded
    /// source file is deleted when the guard drops, encoded or not.
    async fn fetch_avatar(&self, sender: &Sender, message_id: i64) -> Option<String> {
        let guard = TempFile::new(self.scratch.path_for("img", "image/jpeg"), "image/jpeg");
        match self.client.download_profile_photo(sender, guard.path()).await {
            Ok(true) => match image_ops::thumbnail_data_uri(guard.path(), self.avatar_bound) {
                Ok(data_uri) => Some(data_uri),
                Err(e) => {
                    warn!(message_id, error = %e, "avatar encode failed");
                    None
                },
            },
            Ok(false) => None,
            Err(e) => {
                warn!(message_id, error = %e, "avatar download failed");
                None
            },
        }
    }

    /// Download the message's media into a guarded scratch file. A failed
    /// download drops the guard immediately, removing any partial file.
    async fn fetch_media(&self, inbound: &InboundMessage, kind: &MediaKind) -> Option<TempFile> {
        let prefix = match kind {
            MediaKind::Photo => "doc_img",
            MediaKind::Document { .. } => "doc_file",
        };
        let mime = kind.mime();
        let guard = TempFile::new(self.scratch.path_for(prefix, mime), mime);
        match self.client.download_media(inbound, guard.path()).await {
            Ok(()) => Some(guard),
            Err(e) => {
                warn!(message_id = inbound.id, mime, error = %e, "media download failed");
                None
            },
        }
    }

    /// Render the replied-to message as a single quoted embed. Unresolvable
    /// targets or senders silently yield no embed; reply threads are never
    /// expanded further than one level.
    async fn render_reply(&self, inbound: &InboundMessage) -> Option<Embed> {
        let target = match self.client.reply_target(inbound).await {
            Ok(Some(target)) => target,
            Ok(None) => return None,
            Err(e) => {
                warn!(message_id = inbound.id, error = %e, "reply lookup failed");
                return None;
            },
        };

        let replied_sender = match self.client.sender_of(&target).await {
            Ok(Some(sender)) => sender,
            Ok(None) => return None,
            Err(e) => {
                warn!(message_id = inbound.id, error = %e, "reply sender lookup failed");
                return None;
            },
        };

        let mut value = target.text.clone();
        if let Some(media) = &target.media {
            value.push_str(&format!("\n*{}*", media.mime()));
        }
        if value.is_empty() {
            return None;
        }

        let mut embed = Embed::new("*reply*:");
        embed.add_field(replied_sender.display_name(), value, false);
        embed.set_footer(self.reply_footer.clone(), None);
        Some(embed)
    }
}
