//! Extraction result types.
//!
//! ## Observed shape of the profile page
//!
//! Every field is read as raw text. Counts arrive pre-formatted (`"1,204"`,
//! `"1.2K"`, `"3.4M"`) and are passed through untouched. A missing element or
//! empty text falls back to a sentinel: `"0"` for counts and the joined label,
//! `""` for the avatar URL and bio. Sentinels are applied per field, so one
//! absent element never blanks the others.
//!
//! Post timestamps come from the `datetime` attribute of the post's `<time>`
//! element (ISO-8601 in practice), but nothing relies on that.

use serde::Deserialize;

const COUNT_SENTINEL: &str = "0";

/// Profile-level fields with sentinels applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFields {
    pub post_count: String,
    pub avatar_url: String,
    pub following_count: String,
    pub follower_count: String,
    pub joined_label: String,
    pub bio: String,
}

/// One post as read from the page, before sentiment is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPost {
    pub text: String,
    pub published_at: String,
    pub like_label: String,
}

/// Outcome of the post-extraction step.
///
/// Post extraction degrading never invalidates the profile fetch, so it is a
/// value rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostsOutcome {
    Posts(Vec<ScrapedPost>),
    Unavailable { reason: String },
}

impl PostsOutcome {
    #[must_use]
    pub fn posts(&self) -> &[ScrapedPost] {
        match self {
            PostsOutcome::Posts(posts) => posts,
            PostsOutcome::Unavailable { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, PostsOutcome::Posts(_))
    }
}

/// Everything one scrape produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedProfile {
    pub fields: ProfileFields,
    pub posts: PostsOutcome,
}

/// Raw profile fields as returned by the extraction script. Any key may be
/// absent or `null`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawProfileFields {
    post_count: Option<String>,
    avatar_url: Option<String>,
    following_count: Option<String>,
    follower_count: Option<String>,
    joined_label: Option<String>,
    bio: Option<String>,
}

/// Raw post as returned by the posts script.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPost {
    text: Option<String>,
    published_at: Option<String>,
    like_label: Option<String>,
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => sentinel.to_string(),
    }
}

impl From<RawProfileFields> for ProfileFields {
    fn from(raw: RawProfileFields) -> Self {
        Self {
            post_count: or_sentinel(raw.post_count, COUNT_SENTINEL),
            avatar_url: or_sentinel(raw.avatar_url, ""),
            following_count: or_sentinel(raw.following_count, COUNT_SENTINEL),
            follower_count: or_sentinel(raw.follower_count, COUNT_SENTINEL),
            joined_label: or_sentinel(raw.joined_label, COUNT_SENTINEL),
            bio: or_sentinel(raw.bio, ""),
        }
    }
}

impl From<RawPost> for ScrapedPost {
    fn from(raw: RawPost) -> Self {
        Self {
            text: or_sentinel(raw.text, ""),
            published_at: or_sentinel(raw.published_at, ""),
            like_label: or_sentinel(raw.like_label, COUNT_SENTINEL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_fall_back_independently() {
        let raw: RawProfileFields = serde_json::from_value(json!({
            "post_count": "12.3K",
            "bio": null,
            "following_count": ""
        }))
        .expect("decode");
        let fields = ProfileFields::from(raw);
        assert_eq!(fields.post_count, "12.3K");
        assert_eq!(fields.avatar_url, "");
        assert_eq!(fields.following_count, "0");
        assert_eq!(fields.follower_count, "0");
        assert_eq!(fields.joined_label, "0");
        assert_eq!(fields.bio, "");
    }

    #[test]
    fn whitespace_text_is_kept_as_scraped() {
        let raw: RawProfileFields = serde_json::from_value(json!({
            "follower_count": "  ",
            "bio": " "
        }))
        .expect("decode");
        let fields = ProfileFields::from(raw);
        assert_eq!(fields.follower_count, "  ");
        assert_eq!(fields.bio, " ");

        let raw: RawPost = serde_json::from_value(json!({ "like_label": " " })).expect("decode");
        assert_eq!(ScrapedPost::from(raw).like_label, " ");
    }

    #[test]
    fn post_like_label_defaults_to_zero() {
        let raw: RawPost = serde_json::from_value(json!({ "text": "hello" })).expect("decode");
        let post = ScrapedPost::from(raw);
        assert_eq!(post.text, "hello");
        assert_eq!(post.published_at, "");
        assert_eq!(post.like_label, "0");
    }

    #[test]
    fn unavailable_outcome_has_no_posts() {
        let outcome = PostsOutcome::Unavailable {
            reason: "timed out".to_string(),
        };
        assert!(outcome.posts().is_empty());
        assert!(!outcome.is_available());
    }
}
