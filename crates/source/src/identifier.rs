//! Parsing of free-form group references.
//!
//! Accepts whatever an operator pastes: a raw numeric id, a bare username,
//! a `t.me/...` link (with or without an `https://` prefix, optionally with a
//! trailing topic id), or an invite link. Parsing is total: malformed input
//! degrades to a [`Identifier::Username`] that fails resolution later instead
//! of erroring here.

/// One parsed group reference, tagged by how it must be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Numeric channel id, already normalized to the `-100...` supergroup
    /// convention.
    RawId(i64),
    /// Bare public username, no `@`.
    Username(String),
    /// Public link of the form `t.me/<username>`.
    GroupLink { username: String },
    /// Public link with a trailing topic id: `t.me/<username>/<topic>`.
    GroupLinkWithTopic { username: String, topic_id: i64 },
    /// Private invite link (`t.me/+<hash>`), kept verbatim for the join call.
    InviteLink(String),
}

impl Identifier {
    /// Parse a free-form reference. Rules apply in priority order; the last
    /// resort is a bare-username reference.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let stripped = input.strip_prefix("https://").unwrap_or(input);

        if stripped.contains('/') {
            let parts: Vec<&str> = stripped.split('/').collect();

            if parts.len() >= 3 {
                if let Ok(topic_id) = parts[2].parse::<i64>() {
                    return Self::GroupLinkWithTopic {
                        username: parts[1].to_string(),
                        topic_id,
                    };
                }
                return Self::GroupLink {
                    username: parts[1].to_string(),
                };
            }

            if parts.len() >= 2 {
                if parts[1].starts_with('+') {
                    return Self::InviteLink(stripped.to_string());
                }
                return Self::GroupLink {
                    username: parts[1].to_string(),
                };
            }
        }

        if is_numeric_reference(stripped) {
            if let Some(id) = normalize_group_id(stripped) {
                return Self::RawId(id);
            }
        }

        Self::Username(stripped.to_string())
    }

    /// Topic id carried directly in the link form, if any.
    #[must_use]
    pub fn topic_id(&self) -> Option<i64> {
        match self {
            Self::GroupLinkWithTopic { topic_id, .. } => Some(*topic_id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawId(id) => write!(f, "{id}"),
            Self::Username(username) => write!(f, "@{username}"),
            Self::GroupLink { username } => write!(f, "t.me/{username}"),
            Self::GroupLinkWithTopic { username, topic_id } => {
                write!(f, "t.me/{username}/{topic_id}")
            },
            Self::InviteLink(link) => write!(f, "{link}"),
        }
    }
}

fn is_numeric_reference(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Apply the platform's supergroup-id convention: ids whose digits already
/// start with `100` are negated as-is; anything else gets a `-100` prefix
/// spliced in front of its digits (`12345` becomes `-10012345`).
fn normalize_group_id(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if let Some(rest) = digits.strip_prefix("100") {
        // Guard against a bare "100" with no channel digits behind it.
        if !rest.is_empty() {
            return digits.parse::<i64>().ok().map(|id| -id);
        }
    }
    format!("-100{digits}").parse::<i64>().ok()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("12345", -10_012_345)]
    #[case("-12345", -10_012_345)]
    #[case("10012345", -10_012_345)]
    #[case("-10012345", -10_012_345)]
    #[case("987654321", -100_987_654_321)]
    fn numeric_ids_get_supergroup_prefix(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(Identifier::parse(input), Identifier::RawId(expected));
    }

    #[rstest]
    #[case("t.me/rustlang/42", "rustlang", 42)]
    #[case("https://t.me/rustlang/42", "rustlang", 42)]
    fn links_with_topic_id(#[case] input: &str, #[case] username: &str, #[case] topic_id: i64) {
        let parsed = Identifier::parse(input);
        assert_eq!(parsed, Identifier::GroupLinkWithTopic {
            username: username.to_string(),
            topic_id,
        });
        assert_eq!(parsed.topic_id(), Some(topic_id));
    }

    #[rstest]
    #[case("t.me/rustlang", "rustlang")]
    #[case("https://t.me/rustlang", "rustlang")]
    #[case("t.me/rustlang/pinned", "rustlang")]
    fn plain_group_links(#[case] input: &str, #[case] username: &str) {
        assert_eq!(Identifier::parse(input), Identifier::GroupLink {
            username: username.to_string(),
        });
    }

    #[test]
    fn invite_links_keep_the_stripped_string() {
        assert_eq!(
            Identifier::parse("https://t.me/+AbCdEf123"),
            Identifier::InviteLink("t.me/+AbCdEf123".to_string())
        );
        assert_eq!(
            Identifier::parse("t.me/+AbCdEf123"),
            Identifier::InviteLink("t.me/+AbCdEf123".to_string())
        );
    }

    #[test]
    fn bare_username_is_the_fallback() {
        assert_eq!(
            Identifier::parse("rustlang"),
            Identifier::Username("rustlang".to_string())
        );
        // Overflowing digit strings degrade to a username instead of erroring.
        assert_eq!(
            Identifier::parse("99999999999999999999999999"),
            Identifier::Username("99999999999999999999999999".to_string())
        );
    }

    #[test]
    fn display_is_operator_friendly() {
        assert_eq!(Identifier::parse("12345").to_string(), "-10012345");
        assert_eq!(Identifier::parse("rustlang").to_string(), "@rustlang");
        assert_eq!(
            Identifier::parse("https://t.me/rustlang/7").to_string(),
            "t.me/rustlang/7"
        );
    }
}
