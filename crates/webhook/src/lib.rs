//! Webhook delivery for mirrored messages.
//!
//! Holds the outbound content model (message plus reply embeds), the
//! per-session speaker tracker that throttles avatar re-uploads, and the
//! HTTP client that ships multipart payloads to the destination webhook.
//! Delivery failures are logged and dropped; the mirroring loop never stops
//! because the destination rejected one message.

pub mod client;
pub mod error;
pub mod payload;
pub mod speaker;

pub use {
    client::WebhookClient,
    error::{Error, Result},
    payload::{AvatarRef, Embed, OutboundMessage},
    speaker::SpeakerTracker,
};
