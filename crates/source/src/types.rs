//! Typed model of the source platform, produced once at the client boundary.
//!
//! The platform's user-vs-chat shape probing stays inside concrete clients;
//! the pipeline only ever sees these tagged variants.

/// Display name used when nothing about the sender is resolvable.
pub const UNKNOWN_USER: &str = "Unknown User";

/// One conversation entry visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub id: i64,
    pub title: String,
    pub username: Option<String>,
    pub is_group: bool,
    pub is_channel: bool,
    /// Whether the dialog's channel has forum topics enabled.
    pub forum: bool,
}

/// Handle to a resolved source channel. Lives for one mirroring session and
/// is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub id: i64,
    pub title: String,
    pub username: Option<String>,
    pub forum: bool,
}

/// One forum topic ("sub-thread") of a forum-enabled group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: i64,
    pub title: String,
}

/// Who produced a message: a user account, or the chat itself for channel
/// posts without a distinct sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    User {
        id: i64,
        first_name: Option<String>,
        last_name: Option<String>,
        username: Option<String>,
    },
    Chat {
        id: i64,
        title: String,
        username: Option<String>,
    },
}

impl Sender {
    /// Display-name precedence: trimmed `first last` join, then chat title,
    /// then raw username, then [`UNKNOWN_USER`]. The order is fixed.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::User {
                first_name,
                last_name,
                username,
                ..
            } => {
                let joined = format!(
                    "{} {}",
                    first_name.as_deref().unwrap_or(""),
                    last_name.as_deref().unwrap_or("")
                );
                let joined = joined.trim();
                if !joined.is_empty() {
                    return joined.to_string();
                }
                username.clone().unwrap_or_else(|| UNKNOWN_USER.to_string())
            },
            Self::Chat {
                title, username, ..
            } => {
                if !title.is_empty() {
                    return title.clone();
                }
                username.clone().unwrap_or_else(|| UNKNOWN_USER.to_string())
            },
        }
    }
}

/// Media attached to an inbound message, classified by declared MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    /// Platform photos are always JPEG on the wire.
    Photo,
    Document { mime: String },
}

impl MediaKind {
    #[must_use]
    pub fn mime(&self) -> &str {
        match self {
            Self::Photo => "image/jpeg",
            Self::Document { mime } => mime,
        }
    }
}

/// One inbound message event from the subscribed group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: i64,
    pub chat_id: i64,
    pub sender_id: Option<i64>,
    /// Body text; empty when the message carries only media.
    pub text: String,
    pub media: Option<MediaKind>,
    /// Direct reply target, when the message is a reply.
    pub reply_to_msg_id: Option<i64>,
    /// Root of the forum topic the message belongs to, when threaded.
    pub reply_to_top_id: Option<i64>,
}
