//! The mirroring pipeline: source group in, webhook messages out.
//!
//! Wires the source collaborator, the scratch-file layer, and the webhook
//! client into one sequential per-group loop. Each inbound message is
//! transformed into the outbound content model (sender identity, avatar
//! thumbnail, media, quoted reply), run through the avatar-change throttle,
//! and delivered; per-message failures degrade or drop that message only.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod transform;

pub use {
    config::MirrorConfig,
    coordinator::{MirrorService, TopicFilter, topic_matches},
    error::{Error, Result},
    transform::{MessageTransformer, TransformedMessage},
};
