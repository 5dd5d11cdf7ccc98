//! Group and topic resolution on top of a [`SourceClient`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    client::SourceClient,
    error::{Error, Result},
    identifier::Identifier,
    types::{ResolvedGroup, Topic},
};

/// Turns parsed identifiers (or listed dialogs) into concrete group handles,
/// joining via invitation when required.
pub struct GroupResolver {
    client: Arc<dyn SourceClient>,
}

impl GroupResolver {
    #[must_use]
    pub fn new(client: Arc<dyn SourceClient>) -> Self {
        Self { client }
    }

    /// Every group- or channel-type dialog visible to the account, in dialog
    /// order.
    pub async fn list_groups(&self) -> Result<Vec<ResolvedGroup>> {
        let dialogs = self.client.dialogs().await?;
        Ok(dialogs
            .into_iter()
            .filter(|d| d.is_group || d.is_channel)
            .map(|d| ResolvedGroup {
                id: d.id,
                title: d.title,
                username: d.username,
                forum: d.forum,
            })
            .collect())
    }

    /// Resolve an identifier to a group handle. Invite links join; everything
    /// else is an entity lookup. Collaborator failures are reported as
    /// `NotFound`, never propagated as a crash.
    pub async fn resolve(&self, identifier: &Identifier) -> Result<ResolvedGroup> {
        let looked_up = match identifier {
            Identifier::InviteLink(link) => self.client.join_via_invite(link).await,
            Identifier::RawId(id) => self.client.entity_by_id(*id).await,
            Identifier::Username(username)
            | Identifier::GroupLink { username }
            | Identifier::GroupLinkWithTopic { username, .. } => {
                self.client.entity_by_username(username).await
            },
        };

        looked_up.map_err(|e| {
            warn!(reference = %identifier, error = %e, "group resolution failed");
            Error::not_found(identifier)
        })
    }

    /// Topics of a forum-enabled group. `Ok(None)` for plain groups and for
    /// peers the collaborator reports as having no forum; that is expected
    /// absence, not a failure.
    pub async fn topics(&self, group: &ResolvedGroup) -> Result<Option<Vec<Topic>>> {
        if !group.forum {
            return Ok(None);
        }
        match self.client.forum_topics(group).await {
            Ok(topics) => Ok(Some(topics)),
            Err(Error::ForumMissing | Error::ChannelInvalid) => {
                debug!(group_id = group.id, "group reports no forum topics");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }

    /// Title of a single topic, used when the operator supplied the topic id
    /// directly in the link form.
    pub async fn topic_title(&self, group: &ResolvedGroup, topic_id: i64) -> Result<Option<String>> {
        Ok(self.topics(group).await?.and_then(|topics| {
            topics
                .into_iter()
                .find(|t| t.id == topic_id)
                .map(|t| t.title)
        }))
    }
}
