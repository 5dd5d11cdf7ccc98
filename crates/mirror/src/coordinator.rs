//! The per-group mirroring loop.

use std::sync::Arc;

use {
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
};

use {
    tgcord_media::ScratchDir,
    tgcord_source::{
        SourceClient,
        types::{InboundMessage, ResolvedGroup},
    },
    tgcord_webhook::{SpeakerTracker, WebhookClient},
};

use crate::{
    config::MirrorConfig,
    error::{Error, Result},
    transform::{MessageTransformer, TransformedMessage},
};

/// Which forum topic to mirror. `None` mirrors every message.
pub type TopicFilter = Option<i64>;

/// A message belongs to the mirrored topic when its thread root or its
/// direct reply target carries the topic id.
#[must_use]
pub fn topic_matches(message: &InboundMessage, topic: TopicFilter) -> bool {
    match topic {
        None => true,
        Some(id) => message.reply_to_top_id == Some(id) || message.reply_to_msg_id == Some(id),
    }
}

/// Drives the mirroring pipeline for one source group.
///
/// Idle until [`MirrorService::run`] subscribes to the group's event stream;
/// from then on every event is handled strictly in arrival order, which is
/// what keeps the speaker tracker's read-then-write correct without a lock.
/// One service (and so one tracker) exists per mirrored group.
pub struct MirrorService {
    client: Arc<dyn SourceClient>,
    transformer: MessageTransformer,
    webhook: WebhookClient,
    speaker: SpeakerTracker,
    default_avatar_url: String,
}

impl MirrorService {
    /// Prepare a session: open the scratch directory and wire the pipeline.
    pub fn new(client: Arc<dyn SourceClient>, config: &MirrorConfig) -> Result<Self> {
        let scratch = ScratchDir::new(&config.scratch_dir)?;
        Ok(Self {
            transformer: MessageTransformer::new(Arc::clone(&client), scratch, config),
            webhook: WebhookClient::new(&config.webhook_url),
            speaker: SpeakerTracker::new(),
            default_avatar_url: config.default_avatar_url.clone(),
            client,
        })
    }

    /// Mirror `group` until cancelled.
    ///
    /// Returns [`Error::ConnectionLost`] when the source event stream
    /// closes; there is no auto-reconnect, restarting is the operator's
    /// responsibility.
    pub async fn run(
        &mut self,
        group: &ResolvedGroup,
        topic: TopicFilter,
        cancel: CancellationToken,
    ) -> Result<()> {
        let mut events = self.client.subscribe(group).await?;
        info!(group_id = group.id, title = %group.title, ?topic, "mirroring started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!(group_id = group.id, "mirroring stopped");
                    return Ok(());
                }
                next = events.recv() => match next {
                    Some(message) => self.handle_message(message, topic).await,
                    None => {
                        error!(group_id = group.id, "source event stream closed");
                        return Err(Error::ConnectionLost);
                    },
                }
            }
        }
    }

    async fn handle_message(&mut self, inbound: InboundMessage, topic: TopicFilter) {
        if !topic_matches(&inbound, topic) {
            debug!(message_id = inbound.id, "message outside mirrored topic");
            return;
        }

        let TransformedMessage {
            mut message,
            avatar,
            media,
        } = self.transformer.transform(&inbound).await;

        message.avatar = self
            .speaker
            .decide(&message.username, avatar, &self.default_avatar_url);

        if !self.webhook.deliver(&message, media).await {
            warn!(message_id = inbound.id, "message dropped");
        }
    }
}
