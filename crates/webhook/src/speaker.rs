//! Avatar-change throttling.
//!
//! The destination keeps one display avatar per webhook, so re-uploading it
//! for every message is wasteful. One tracker exists per mirrored session
//! and the event loop is sequential, which makes the read-then-write on the
//! last-speaker slot safe without a lock: exactly one comparison happens per
//! delivered message, in event-arrival order.

use crate::payload::AvatarRef;

/// Per-session record of who spoke last.
#[derive(Debug, Default)]
pub struct SpeakerTracker {
    last_speaker: Option<String>,
}

impl SpeakerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the avatar for the next delivery and record the speaker.
    ///
    /// A changed speaker (including the session's first message) gets the
    /// fresh thumbnail when one exists, else the fallback URL. An unchanged
    /// speaker keeps the destination's current avatar. The slot updates
    /// unconditionally, whether or not an avatar was set.
    pub fn decide(
        &mut self,
        display_name: &str,
        avatar_data_uri: Option<String>,
        fallback_url: &str,
    ) -> AvatarRef {
        let changed = self.last_speaker.as_deref() != Some(display_name);
        self.last_speaker = Some(display_name.to_string());
        if !changed {
            return AvatarRef::Keep;
        }
        match avatar_data_uri {
            Some(data_uri) => AvatarRef::Inline(data_uri),
            None => AvatarRef::Remote(fallback_url.to_string()),
        }
    }

    #[must_use]
    pub fn last_speaker(&self) -> Option<&str> {
        self.last_speaker.as_deref()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "https://cdn.example/logo.png";

    fn uri(n: u8) -> Option<String> {
        Some(format!("data:image/png;base64,AVATAR{n}"))
    }

    #[test]
    fn same_speaker_sets_the_avatar_exactly_once() {
        let mut tracker = SpeakerTracker::new();

        let first = tracker.decide("Ana Lima", uri(1), FALLBACK);
        assert!(matches!(first, AvatarRef::Inline(_)));

        let second = tracker.decide("Ana Lima", uri(1), FALLBACK);
        assert_eq!(second, AvatarRef::Keep);

        let third = tracker.decide("Bruno", uri(2), FALLBACK);
        assert!(matches!(third, AvatarRef::Inline(_)));
    }

    #[test]
    fn first_message_always_decides_an_avatar() {
        let mut tracker = SpeakerTracker::new();
        assert!(tracker.last_speaker().is_none());
        let decision = tracker.decide("Ana Lima", None, FALLBACK);
        assert_eq!(decision, AvatarRef::Remote(FALLBACK.to_string()));
        assert_eq!(tracker.last_speaker(), Some("Ana Lima"));
    }

    #[test]
    fn slot_updates_even_when_no_avatar_is_set() {
        let mut tracker = SpeakerTracker::new();
        tracker.decide("Ana Lima", None, FALLBACK);
        tracker.decide("Bruno", None, FALLBACK);
        assert_eq!(tracker.last_speaker(), Some("Bruno"));

        // Returning speaker after someone else spoke: avatar set again.
        let back = tracker.decide("Ana Lima", None, FALLBACK);
        assert_eq!(back, AvatarRef::Remote(FALLBACK.to_string()));
    }
}
