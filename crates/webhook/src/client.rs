//! HTTP delivery to the destination webhook.

use {
    reqwest::multipart::{Form, Part},
    tracing::{debug, error, warn},
};

use tgcord_media::TempFile;

use crate::{error::Result, payload::OutboundMessage};

/// Client for one destination webhook URL.
///
/// Delivery is fire-and-forget per message: a rejected payload or transport
/// failure is logged with enough context to diagnose and then dropped, so
/// the mirroring loop keeps going.
pub struct WebhookClient {
    url: String,
    http: reqwest::Client,
}

fn is_success(status: u16) -> bool {
    matches!(status, 200 | 204)
}

impl WebhookClient {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ship one message, with its media file when present.
    ///
    /// Consumes the media guard: the scratch file is removed once the
    /// attempt finishes, whether it succeeded, failed, or errored. An inline
    /// avatar is PATCHed before the message posts.
    pub async fn deliver(&self, message: &OutboundMessage, media: Option<TempFile>) -> bool {
        if let Some(patch) = message.avatar_patch() {
            self.patch_avatar(&patch).await;
        }

        let delivered = match self.post_message(message, media.as_ref()).await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(username = %message.username, error = %e, "webhook delivery failed");
                false
            },
        };
        // The media guard drops here, deleting the scratch file on every path.
        drop(media);
        delivered
    }

    async fn post_message(&self, message: &OutboundMessage, media: Option<&TempFile>) -> Result<bool> {
        let mut form = Form::new().text("payload_json", message.payload_json().to_string());
        if let Some(file) = media {
            let bytes = tokio::fs::read(file.path()).await?;
            let part = Part::bytes(bytes)
                .file_name(file.file_name())
                .mime_str(file.mime())?;
            form = form.part("files", part);
        }

        let response = self.http.post(&self.url).multipart(form).send().await?;
        let status = response.status().as_u16();
        if is_success(status) {
            debug!(status, "message delivered");
            Ok(true)
        } else {
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "webhook rejected message");
            Ok(false)
        }
    }

    async fn patch_avatar(&self, patch: &serde_json::Value) -> bool {
        match self.http.patch(&self.url).json(patch).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                if is_success(status) {
                    debug!(status, "webhook avatar updated");
                    true
                } else {
                    let body = response.text().await.unwrap_or_default();
                    warn!(status, body = %body, "avatar update rejected");
                    false
                }
            },
            Err(e) => {
                warn!(error = %e, "avatar update failed");
                false
            },
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use {
        super::*,
        crate::payload::AvatarRef,
    };

    fn scratch_file(dir: &tempfile::TempDir, name: &str) -> (PathBuf, TempFile) {
        let path = dir.path().join(name);
        std::fs::write(&path, b"media bytes").unwrap();
        (path.clone(), TempFile::new(path, "text/plain"))
    }

    #[tokio::test]
    async fn delivers_multipart_and_cleans_up() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/")
            .match_header(
                "content-type",
                mockito::Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .with_status(204)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (path, media) = scratch_file(&dir, "doc.txt");

        let client = WebhookClient::new(server.url());
        let mut message = OutboundMessage::new("Ana Lima");
        message.set_content("hello");

        assert!(client.deliver(&message, Some(media)).await);
        assert!(!path.exists());
        post.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_post_is_dropped_and_cleaned_up() {
        let mut server = mockito::Server::new_async().await;
        let post = server
            .mock("POST", "/")
            .with_status(400)
            .with_body("bad payload")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let (path, media) = scratch_file(&dir, "doc.txt");

        let client = WebhookClient::new(server.url());
        let message = OutboundMessage::new("Ana Lima");

        assert!(!client.deliver(&message, Some(media)).await);
        assert!(!path.exists());
        post.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_is_dropped_and_cleaned_up() {
        let dir = tempfile::tempdir().unwrap();
        let (path, media) = scratch_file(&dir, "doc.txt");

        // Nothing listens on this port.
        let client = WebhookClient::new("http://127.0.0.1:9/");
        let message = OutboundMessage::new("Ana Lima");

        assert!(!client.deliver(&message, Some(media)).await);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn inline_avatar_patches_before_posting() {
        let mut server = mockito::Server::new_async().await;
        let patch = server
            .mock("PATCH", "/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"avatar": "data:image/png;base64,AAAA"}"#.to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;
        let post = server.mock("POST", "/").with_status(204).create_async().await;

        let client = WebhookClient::new(server.url());
        let mut message = OutboundMessage::new("Ana Lima");
        message.avatar = AvatarRef::Inline("data:image/png;base64,AAAA".to_string());

        assert!(client.deliver(&message, None).await);
        patch.assert_async().await;
        post.assert_async().await;
    }

    #[tokio::test]
    async fn keep_avatar_sends_no_patch() {
        let mut server = mockito::Server::new_async().await;
        let patch = server
            .mock("PATCH", "/")
            .expect(0)
            .create_async()
            .await;
        let post = server.mock("POST", "/").with_status(204).create_async().await;

        let client = WebhookClient::new(server.url());
        let message = OutboundMessage::new("Ana Lima");

        assert!(client.deliver(&message, None).await);
        patch.assert_async().await;
        post.assert_async().await;
    }
}
