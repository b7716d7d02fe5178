//! Database operations for the `profile_snapshots` and `profile_posts` tables.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use socialpulse_core::{Polarity, PostRecord, PostsStatus, ProfileSnapshot, SentimentSummary};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `profile_snapshots` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileSnapshotRow {
    pub id: i64,
    pub handle: String,
    pub post_count: String,
    pub avatar_url: String,
    pub following_count: String,
    pub follower_count: String,
    pub joined_label: String,
    pub bio: String,
    pub posts_status: String,
    pub mean_score: f64,
    pub mean_comparative: f64,
    pub positive_posts: i32,
    pub negative_posts: i32,
    pub neutral_posts: i32,
    pub overall: String,
    pub captured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A row from the `profile_posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfilePostRow {
    pub snapshot_id: i64,
    pub position: i32,
    pub text: String,
    pub published_at: String,
    pub like_label: String,
    pub sentiment_score: i32,
    pub sentiment_comparative: f64,
}

/// A snapshot read back from the database with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProfileSnapshot {
    pub id: i64,
    pub snapshot: ProfileSnapshot,
}

impl ProfileSnapshotRow {
    /// Rebuilds the domain snapshot. `posts` must already be in position order.
    fn into_snapshot(self, posts: Vec<ProfilePostRow>) -> Result<StoredProfileSnapshot, DbError> {
        let posts: Vec<PostRecord> = posts
            .into_iter()
            .map(|p| PostRecord {
                text: p.text,
                published_at: p.published_at,
                like_label: p.like_label,
                sentiment_score: p.sentiment_score,
                sentiment_comparative: p.sentiment_comparative,
            })
            .collect();

        let summary = SentimentSummary {
            post_count: posts.len(),
            mean_score: self.mean_score,
            mean_comparative: self.mean_comparative,
            positive: to_count("positive_posts", self.positive_posts)?,
            negative: to_count("negative_posts", self.negative_posts)?,
            neutral: to_count("neutral_posts", self.neutral_posts)?,
            overall: Polarity::from_db(&self.overall),
        };

        Ok(StoredProfileSnapshot {
            id: self.id,
            snapshot: ProfileSnapshot {
                handle: self.handle,
                post_count: self.post_count,
                avatar_url: self.avatar_url,
                following_count: self.following_count,
                follower_count: self.follower_count,
                joined_label: self.joined_label,
                bio: self.bio,
                posts,
                posts_status: PostsStatus::from_db(&self.posts_status),
                summary,
                captured_at: self.captured_at,
            },
        })
    }
}

fn to_count(column: &str, value: i32) -> Result<usize, DbError> {
    usize::try_from(value)
        .map_err(|_| DbError::InvalidRow(format!("{column} is negative: {value}")))
}

fn to_column(column: &str, value: usize) -> Result<i32, DbError> {
    i32::try_from(value).map_err(|_| DbError::InvalidRow(format!("{column} out of range: {value}")))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a snapshot and its posts in one transaction and return the new
/// snapshot id.
///
/// Posts are written with their index in `snapshot.posts` as `position`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; nothing is written in that
/// case. Returns [`DbError::InvalidRow`] if a summary count does not fit the
/// column type.
pub async fn insert_profile_snapshot(
    pool: &PgPool,
    snapshot: &ProfileSnapshot,
) -> Result<i64, DbError> {
    let summary = &snapshot.summary;
    let positive = to_column("positive_posts", summary.positive)?;
    let negative = to_column("negative_posts", summary.negative)?;
    let neutral = to_column("neutral_posts", summary.neutral)?;

    let mut tx = pool.begin().await?;

    let snapshot_id: i64 = sqlx::query_scalar(
        "INSERT INTO profile_snapshots \
             (handle, post_count, avatar_url, following_count, follower_count, joined_label, \
              bio, posts_status, mean_score, mean_comparative, positive_posts, negative_posts, \
              neutral_posts, overall, captured_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
         RETURNING id",
    )
    .bind(&snapshot.handle)
    .bind(&snapshot.post_count)
    .bind(&snapshot.avatar_url)
    .bind(&snapshot.following_count)
    .bind(&snapshot.follower_count)
    .bind(&snapshot.joined_label)
    .bind(&snapshot.bio)
    .bind(snapshot.posts_status.as_str())
    .bind(summary.mean_score)
    .bind(summary.mean_comparative)
    .bind(positive)
    .bind(negative)
    .bind(neutral)
    .bind(summary.overall.as_str())
    .bind(snapshot.captured_at)
    .fetch_one(&mut *tx)
    .await?;

    for (position, post) in snapshot.posts.iter().enumerate() {
        sqlx::query(
            "INSERT INTO profile_posts \
                 (snapshot_id, position, text, published_at, like_label, sentiment_score, \
                  sentiment_comparative) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(snapshot_id)
        .bind(to_column("position", position)?)
        .bind(&post.text)
        .bind(&post.published_at)
        .bind(&post.like_label)
        .bind(post.sentiment_score)
        .bind(post.sentiment_comparative)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(snapshot_id)
}

/// List snapshots for a handle, newest first, each with its posts in
/// position order.
///
/// Ordered by `captured_at DESC` then `id DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if a query fails, or [`DbError::InvalidRow`] if a
/// stored summary count is negative.
pub async fn list_profile_snapshots(
    pool: &PgPool,
    handle: &str,
    limit: i64,
) -> Result<Vec<StoredProfileSnapshot>, DbError> {
    let rows = sqlx::query_as::<_, ProfileSnapshotRow>(
        "SELECT id, handle, post_count, avatar_url, following_count, follower_count, \
                joined_label, bio, posts_status, mean_score, mean_comparative, \
                positive_posts, negative_posts, neutral_posts, overall, captured_at, created_at \
         FROM profile_snapshots \
         WHERE handle = $1 \
         ORDER BY captured_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(handle)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let post_rows = sqlx::query_as::<_, ProfilePostRow>(
        "SELECT snapshot_id, position, text, published_at, like_label, sentiment_score, \
                sentiment_comparative \
         FROM profile_posts \
         WHERE snapshot_id = ANY($1) \
         ORDER BY snapshot_id, position",
    )
    .bind(&ids)
    .fetch_all(pool)
    .await?;

    let mut posts_by_snapshot: HashMap<i64, Vec<ProfilePostRow>> = HashMap::new();
    for post in post_rows {
        posts_by_snapshot
            .entry(post.snapshot_id)
            .or_default()
            .push(post);
    }

    rows.into_iter()
        .map(|row| {
            let posts = posts_by_snapshot.remove(&row.id).unwrap_or_default();
            row.into_snapshot(posts)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProfileSnapshotRow {
        ProfileSnapshotRow {
            id: 3,
            handle: "rustlang".to_string(),
            post_count: "1,204".to_string(),
            avatar_url: String::new(),
            following_count: "180".to_string(),
            follower_count: "35.1K".to_string(),
            joined_label: "Joined March 2009".to_string(),
            bio: String::new(),
            posts_status: "available".to_string(),
            mean_score: 1.5,
            mean_comparative: 0.25,
            positive_posts: 1,
            negative_posts: 0,
            neutral_posts: 1,
            overall: "neutral".to_string(),
            captured_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn post_row(position: i32, text: &str, score: i32) -> ProfilePostRow {
        ProfilePostRow {
            snapshot_id: 3,
            position,
            text: text.to_string(),
            published_at: String::new(),
            like_label: "0".to_string(),
            sentiment_score: score,
            sentiment_comparative: 0.0,
        }
    }

    #[test]
    fn row_rebuilds_snapshot_with_posts_and_summary() {
        let stored = row()
            .into_snapshot(vec![post_row(0, "great", 3), post_row(1, "meh", 0)])
            .expect("valid row");

        assert_eq!(stored.id, 3);
        let snapshot = stored.snapshot;
        assert_eq!(snapshot.posts_status, PostsStatus::Available);
        assert_eq!(snapshot.posts[0].text, "great");
        assert_eq!(snapshot.posts[1].text, "meh");
        assert_eq!(snapshot.summary.post_count, 2);
        assert_eq!(snapshot.summary.positive, 1);
        assert_eq!(snapshot.summary.overall, Polarity::Neutral);
    }

    #[test]
    fn negative_count_is_an_invalid_row() {
        let mut bad = row();
        bad.negative_posts = -1;

        let err = bad.into_snapshot(vec![]).expect_err("negative count");
        assert!(matches!(err, DbError::InvalidRow(_)), "got {err:?}");
    }
}
