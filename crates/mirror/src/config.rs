use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use tgcord_media::image_ops::AVATAR_BOUND;

/// Fallback avatar shown when a speaker has no usable profile photo.
pub const DEFAULT_AVATAR_URL: &str =
    "https://raw.githubusercontent.com/tgcord/tgcord/main/assets/logo.png";

/// Configuration for one mirroring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Destination webhook URL.
    pub webhook_url: String,

    /// Directory for in-flight media and avatar downloads.
    pub scratch_dir: PathBuf,

    /// Avatar used on a speaker change when no thumbnail could be produced.
    pub default_avatar_url: String,

    /// Square bound for avatar thumbnails, in pixels.
    pub avatar_bound: u32,

    /// Footer text stamped on reply embeds.
    pub reply_footer: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            scratch_dir: PathBuf::from("scratch"),
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
            avatar_bound: AVATAR_BOUND,
            reply_footer: "Mirrored from Telegram".to_string(),
        }
    }
}

impl MirrorConfig {
    /// Read configuration from `TGCORD_*` environment variables, keeping
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("TGCORD_WEBHOOK_URL") {
            config.webhook_url = url;
        }
        if let Ok(dir) = std::env::var("TGCORD_SCRATCH_DIR") {
            config.scratch_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("TGCORD_DEFAULT_AVATAR_URL") {
            config.default_avatar_url = url;
        }
        if let Ok(bound) = std::env::var("TGCORD_AVATAR_BOUND") {
            if let Ok(parsed) = bound.parse() {
                config.avatar_bound = parsed;
            }
        }
        if let Ok(footer) = std::env::var("TGCORD_REPLY_FOOTER") {
            config.reply_footer = footer;
        }
        config
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MirrorConfig::default();
        assert_eq!(config.avatar_bound, 75);
        assert_eq!(config.scratch_dir, PathBuf::from("scratch"));
        assert_eq!(config.default_avatar_url, DEFAULT_AVATAR_URL);
    }

    #[test]
    fn deserialize_fills_unspecified_fields() {
        let json = r#"{
            "webhook_url": "https://hooks.example/abc",
            "avatar_bound": 64
        }"#;
        let config: MirrorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.webhook_url, "https://hooks.example/abc");
        assert_eq!(config.avatar_bound, 64);
        // defaults for unspecified fields
        assert_eq!(config.reply_footer, "Mirrored from Telegram");
    }

    #[test]
    fn serialize_roundtrip() {
        let config = MirrorConfig {
            webhook_url: "https://hooks.example/abc".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: MirrorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.webhook_url, config.webhook_url);
        assert_eq!(back.avatar_bound, config.avatar_bound);
    }
}
