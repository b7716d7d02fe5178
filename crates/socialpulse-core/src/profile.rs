//! Profile snapshot data model.
//!
//! Count-like fields stay raw strings exactly as the page rendered them
//! (`"1.2K"`, `"Joined March 2009"`); nothing here parses or normalizes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on posts carried by one snapshot.
pub const MAX_POSTS: usize = 10;

/// One scraped post with its sentiment attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub text: String,
    /// Raw timestamp label from the page; not guaranteed to parse.
    pub published_at: String,
    pub like_label: String,
    pub sentiment_score: i32,
    pub sentiment_comparative: f64,
}

/// Whether post extraction produced a usable list.
///
/// `Unavailable` means the post containers never appeared or could not be
/// read; the profile fields are still valid in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostsStatus {
    Available,
    Unavailable,
}

impl PostsStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PostsStatus::Available => "available",
            PostsStatus::Unavailable => "unavailable",
        }
    }

    /// Parses the stored representation; unknown values read as `Unavailable`.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        if value == "available" {
            PostsStatus::Available
        } else {
            PostsStatus::Unavailable
        }
    }
}

/// Sign of a sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    #[must_use]
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s > 0 => Polarity::Positive,
            s if s < 0 => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Polarity::Positive => "positive",
            Polarity::Negative => "negative",
            Polarity::Neutral => "neutral",
        }
    }

    /// Parses the stored representation; unknown values read as `Neutral`.
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        match value {
            "positive" => Polarity::Positive,
            "negative" => Polarity::Negative,
            _ => Polarity::Neutral,
        }
    }
}

/// Aggregate sentiment across a snapshot's posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub post_count: usize,
    /// Mean integer score across posts. `0.0` with no posts.
    pub mean_score: f64,
    /// Mean comparative score across posts. `0.0` with no posts.
    pub mean_comparative: f64,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    /// Majority polarity; ties and empty sets are `Neutral`.
    pub overall: Polarity,
}

impl SentimentSummary {
    /// Builds the summary for a list of scored posts.
    #[must_use]
    pub fn from_posts(posts: &[PostRecord]) -> Self {
        let mut positive = 0;
        let mut negative = 0;
        let mut neutral = 0;
        for post in posts {
            match Polarity::from_score(post.sentiment_score) {
                Polarity::Positive => positive += 1,
                Polarity::Negative => negative += 1,
                Polarity::Neutral => neutral += 1,
            }
        }

        let (mean_score, mean_comparative) = if posts.is_empty() {
            (0.0, 0.0)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let denom = posts.len() as f64;
            let score_sum: f64 = posts.iter().map(|p| f64::from(p.sentiment_score)).sum();
            let comparative_sum: f64 = posts.iter().map(|p| p.sentiment_comparative).sum();
            (score_sum / denom, comparative_sum / denom)
        };

        let overall = if positive > negative && positive > neutral {
            Polarity::Positive
        } else if negative > positive && negative > neutral {
            Polarity::Negative
        } else {
            Polarity::Neutral
        };

        Self {
            post_count: posts.len(),
            mean_score,
            mean_comparative,
            positive,
            negative,
            neutral,
            overall,
        }
    }
}

/// One profile as observed by a single scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub handle: String,
    pub post_count: String,
    pub avatar_url: String,
    pub following_count: String,
    pub follower_count: String,
    pub joined_label: String,
    pub bio: String,
    pub posts: Vec<PostRecord>,
    pub posts_status: PostsStatus,
    pub summary: SentimentSummary,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(score: i32, comparative: f64) -> PostRecord {
        PostRecord {
            text: String::new(),
            published_at: String::new(),
            like_label: "0".to_string(),
            sentiment_score: score,
            sentiment_comparative: comparative,
        }
    }

    #[test]
    fn polarity_follows_score_sign() {
        assert_eq!(Polarity::from_score(3), Polarity::Positive);
        assert_eq!(Polarity::from_score(-1), Polarity::Negative);
        assert_eq!(Polarity::from_score(0), Polarity::Neutral);
    }

    #[test]
    fn summary_of_no_posts_is_neutral_with_zero_means() {
        let summary = SentimentSummary::from_posts(&[]);
        assert_eq!(summary.post_count, 0);
        assert_eq!(summary.mean_score, 0.0);
        assert_eq!(summary.mean_comparative, 0.0);
        assert_eq!(summary.overall, Polarity::Neutral);
    }

    #[test]
    fn summary_majority_positive() {
        let posts = [post(3, 1.0), post(2, 0.5), post(-1, -0.2)];
        let summary = SentimentSummary::from_posts(&posts);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 0);
        assert_eq!(summary.overall, Polarity::Positive);
        assert!((summary.mean_score - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn summary_tie_is_neutral() {
        let posts = [post(3, 1.0), post(-3, -1.0)];
        let summary = SentimentSummary::from_posts(&posts);
        assert_eq!(summary.overall, Polarity::Neutral);
        assert_eq!(summary.mean_score, 0.0);
    }

    #[test]
    fn summary_neutral_plurality_wins() {
        let posts = [post(0, 0.0), post(0, 0.0), post(-2, -0.5)];
        let summary = SentimentSummary::from_posts(&posts);
        assert_eq!(summary.overall, Polarity::Neutral);
        assert_eq!(summary.neutral, 2);
    }

    #[test]
    fn snapshot_serializes_snake_case_fields() {
        let snapshot = ProfileSnapshot {
            handle: "rustlang".to_string(),
            post_count: "1.2K".to_string(),
            avatar_url: String::new(),
            following_count: "0".to_string(),
            follower_count: "0".to_string(),
            joined_label: "Joined March 2009".to_string(),
            bio: String::new(),
            posts: vec![],
            posts_status: PostsStatus::Unavailable,
            summary: SentimentSummary::from_posts(&[]),
            captured_at: Utc::now(),
        };
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(json["post_count"], "1.2K");
        assert_eq!(json["posts_status"], "unavailable");
        assert_eq!(json["summary"]["overall"], "neutral");
    }
}
