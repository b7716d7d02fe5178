//! Selector knowledge for the target profile page.
//!
//! The page markup is owned by a third party and changes without notice.
//! Everything that names a selector lives behind [`ExtractionAdapter`] so the
//! rest of the scraper only depends on the shape of the extracted JSON.

/// Describes how to reach a profile page and what to read from it.
///
/// Scripts are evaluated in the page and must return plain JSON:
/// - the profile script returns an object with optional string keys
///   `post_count`, `avatar_url`, `following_count`, `follower_count`,
///   `joined_label`, `bio`;
/// - the posts script returns an array of objects with optional string keys
///   `text`, `published_at`, `like_label`, in page order.
pub trait ExtractionAdapter: Send + Sync {
    /// Absolute URL of the profile page for `handle`.
    fn profile_url(&self, handle: &str) -> String;

    /// Selectors that must all be present before the profile is considered
    /// loaded.
    fn ready_selectors(&self) -> &[&str];

    /// Script returning the profile-level fields.
    fn profile_script(&self, handle: &str) -> String;

    /// Selector matching one post container.
    fn post_container_selector(&self) -> &str;

    /// Script returning at most `limit` posts.
    fn posts_script(&self, limit: usize) -> String;
}

const POST_COUNT_SELECTOR: &str = ".r-n6v787";
const AVATAR_SELECTOR: &str = r#"img[src*="profile_images"]"#;
const POST_CONTAINER_SELECTOR: &str = "article";

/// Adapter for x.com profile pages.
#[derive(Debug, Clone)]
pub struct XProfileAdapter {
    base_url: String,
}

impl XProfileAdapter {
    /// `base_url` is the site origin, e.g. `https://x.com`.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for XProfileAdapter {
    fn default() -> Self {
        Self::new("https://x.com")
    }
}

impl ExtractionAdapter for XProfileAdapter {
    fn profile_url(&self, handle: &str) -> String {
        format!("{}/{handle}", self.base_url)
    }

    fn ready_selectors(&self) -> &[&str] {
        &[POST_COUNT_SELECTOR, AVATAR_SELECTOR]
    }

    fn profile_script(&self, handle: &str) -> String {
        let handle_literal = serde_json::Value::String(handle.to_owned()).to_string();
        format!(
            r#"(() => {{
  const handle = CSS.escape({handle_literal});
  const text = (sel) => {{
    const el = document.querySelector(sel);
    return el ? el.textContent : null;
  }};
  const avatar = document.querySelector('{AVATAR_SELECTOR}');
  const joined = Array.from(document.querySelectorAll('span'))
    .find((span) => (span.textContent || '').includes('Joined'));
  const bio = document.querySelector('div[data-testid="UserDescription"]');
  return {{
    post_count: text('{POST_COUNT_SELECTOR}'),
    avatar_url: avatar ? avatar.src : null,
    following_count: text('a[href="/' + handle + '/following"] span'),
    follower_count: text('a[href="/' + handle + '/verified_followers"] span'),
    joined_label: joined ? joined.textContent : null,
    bio: bio ? bio.innerText : null,
  }};
}})()"#
        )
    }

    fn post_container_selector(&self) -> &str {
        POST_CONTAINER_SELECTOR
    }

    fn posts_script(&self, limit: usize) -> String {
        format!(
            r#"(() => Array.from(document.querySelectorAll('{POST_CONTAINER_SELECTOR}'))
  .slice(0, {limit})
  .map((post) => {{
    const text = post.querySelector('div[lang]');
    const time = post.querySelector('time');
    const like = post.querySelector('div[data-testid="like"] span');
    return {{
      text: text ? text.innerText : null,
      published_at: time ? time.getAttribute('datetime') : null,
      like_label: like ? like.innerText : null,
    }};
  }}))()"#
        )
    }
}
