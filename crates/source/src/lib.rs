//! Source-platform collaborator seam for tgcord.
//!
//! Defines the identifier grammar for free-form group references, the typed
//! sender/message model produced once at the platform boundary, and the
//! [`SourceClient`] trait the mirroring pipeline consumes. Concrete clients
//! (an MTProto user-account client, usually) live with the embedding
//! application.

pub mod client;
pub mod error;
pub mod identifier;
pub mod resolver;
pub mod types;

pub use {
    client::SourceClient,
    error::{Error, Result},
    identifier::Identifier,
    resolver::GroupResolver,
    types::{Dialog, InboundMessage, MediaKind, ResolvedGroup, Sender, Topic},
};
