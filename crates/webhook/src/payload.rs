//! Outbound content model and its wire form.
//!
//! One [`OutboundMessage`] is the intermediate representation of a single
//! mirrored message: display name, avatar decision, body text, and at most
//! one reply embed. `payload_json()` produces the serialized form the
//! destination expects inside the multipart `payload_json` field.

use serde::Serialize;

/// A `{name, value}` pair inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedMedia {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A structured, visually distinct block attached to a delivered message.
/// The mirroring pipeline uses one per message at most, to render the quoted
/// reply. Unset parts are omitted from the wire form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

impl Embed {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_author(
        &mut self,
        name: impl Into<String>,
        url: Option<String>,
        icon_url: Option<String>,
    ) {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            url,
            icon_url,
        });
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }

    pub fn set_thumbnail(&mut self, url: impl Into<String>) {
        self.thumbnail = Some(EmbedMedia { url: url.into() });
    }

    pub fn set_image(&mut self, url: impl Into<String>) {
        self.image = Some(EmbedMedia { url: url.into() });
    }

    pub fn set_footer(&mut self, text: impl Into<String>, icon_url: Option<String>) {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url,
        });
    }

    pub fn set_color(&mut self, color: u32) {
        self.color = Some(color);
    }
}

/// How the delivered message presents the speaker's avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AvatarRef {
    /// Freshly thumbnailed avatar, shipped via the avatar PATCH call before
    /// the message posts.
    Inline(String),
    /// Remote fallback image, set through `avatar_url` in the payload.
    Remote(String),
    /// Speaker unchanged; the destination keeps its current avatar.
    #[default]
    Keep,
}

/// The intermediate representation of one outbound message.
#[derive(Debug, Clone, Default)]
pub struct OutboundMessage {
    pub username: String,
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub avatar: AvatarRef,
}

impl OutboundMessage {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn set_content(&mut self, text: impl Into<String>) {
        self.content = Some(text.into());
    }

    pub fn add_embed(&mut self, embed: Embed) {
        self.embeds.push(embed);
    }

    /// The serialized `payload_json` multipart field:
    /// `{username, content?, embeds, avatar_url?}`.
    #[must_use]
    pub fn payload_json(&self) -> serde_json::Value {
        let mut payload = serde_json::json!({
            "username": self.username,
            "embeds": self.embeds,
        });
        if let Some(content) = &self.content {
            payload["content"] = serde_json::Value::String(content.clone());
        }
        if let AvatarRef::Remote(url) = &self.avatar {
            payload["avatar_url"] = serde_json::Value::String(url.clone());
        }
        payload
    }

    /// JSON body for the avatar PATCH call, when the avatar is inline.
    #[must_use]
    pub fn avatar_patch(&self) -> Option<serde_json::Value> {
        match &self.avatar {
            AvatarRef::Inline(data_uri) => Some(serde_json::json!({ "avatar": data_uri })),
            AvatarRef::Remote(_) | AvatarRef::Keep => None,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_skips_unset_parts() {
        let message = OutboundMessage::new("Ana Lima");
        let payload = message.payload_json();
        assert_eq!(payload["username"], "Ana Lima");
        assert!(payload["embeds"].as_array().unwrap().is_empty());
        assert!(payload.get("content").is_none());
        assert!(payload.get("avatar_url").is_none());
    }

    #[test]
    fn payload_carries_content_and_remote_avatar() {
        let mut message = OutboundMessage::new("Ana Lima");
        message.set_content("hello");
        message.avatar = AvatarRef::Remote("https://cdn.example/logo.png".to_string());

        let payload = message.payload_json();
        assert_eq!(payload["content"], "hello");
        assert_eq!(payload["avatar_url"], "https://cdn.example/logo.png");
    }

    #[test]
    fn inline_avatar_goes_to_the_patch_body_not_the_payload() {
        let mut message = OutboundMessage::new("Ana Lima");
        message.avatar = AvatarRef::Inline("data:image/png;base64,AAAA".to_string());

        assert!(message.payload_json().get("avatar_url").is_none());
        let patch = message.avatar_patch().unwrap();
        assert_eq!(patch["avatar"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn embed_wire_form_omits_unset_parts() {
        let mut embed = Embed::new("*reply*:");
        embed.add_field("Ana Lima", "original text", false);
        embed.set_footer("mirrored", None);

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["description"], "*reply*:");
        assert_eq!(json["fields"][0]["name"], "Ana Lima");
        assert_eq!(json["fields"][0]["inline"], false);
        assert_eq!(json["footer"]["text"], "mirrored");
        assert!(json.get("title").is_none());
        assert!(json.get("color").is_none());
        assert!(json["footer"].get("icon_url").is_none());
    }

    #[test]
    fn full_embed_surface_serializes() {
        let mut embed = Embed::new("desc");
        embed.set_title("title");
        embed.set_author("author", None, Some("https://cdn.example/a.png".to_string()));
        embed.set_thumbnail("https://cdn.example/t.png");
        embed.set_image("https://cdn.example/i.png");
        embed.set_color(0x00FF_7F50);

        let json = serde_json::to_value(&embed).unwrap();
        assert_eq!(json["title"], "title");
        assert_eq!(json["author"]["icon_url"], "https://cdn.example/a.png");
        assert_eq!(json["thumbnail"]["url"], "https://cdn.example/t.png");
        assert_eq!(json["image"]["url"], "https://cdn.example/i.png");
        assert_eq!(json["color"], 0x00FF_7F50);
    }
}
