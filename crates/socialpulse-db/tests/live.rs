//! Live integration tests for socialpulse-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness from `DATABASE_URL`. They are ignored by default; run
//! them with `cargo test -p socialpulse-db -- --ignored`.

use chrono::{TimeZone, Utc};
use socialpulse_core::{Polarity, PostRecord, PostsStatus, ProfileSnapshot, SentimentSummary};
use socialpulse_db::{insert_profile_snapshot, list_profile_snapshots};

fn post(text: &str, score: i32) -> PostRecord {
    PostRecord {
        text: text.to_string(),
        published_at: "2024-01-01T00:00:00.000Z".to_string(),
        like_label: "3".to_string(),
        sentiment_score: score,
        sentiment_comparative: f64::from(score) / 2.0,
    }
}

fn snapshot(handle: &str, minute: u32, posts: Vec<PostRecord>) -> ProfileSnapshot {
    let summary = SentimentSummary::from_posts(&posts);
    ProfileSnapshot {
        handle: handle.to_string(),
        post_count: "1,204".to_string(),
        avatar_url: "https://img.test/a.jpg".to_string(),
        following_count: "180".to_string(),
        follower_count: "35.1K".to_string(),
        joined_label: "Joined March 2009".to_string(),
        bio: "Systems programming".to_string(),
        posts_status: PostsStatus::Available,
        posts,
        summary,
        captured_at: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, minute, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres DATABASE_URL"]
async fn insert_then_list_round_trips_posts_in_order(pool: sqlx::PgPool) {
    let original = snapshot(
        "rustlang",
        0,
        vec![post("great", 3), post("bad", -3), post("ok", 0)],
    );

    let id = insert_profile_snapshot(&pool, &original)
        .await
        .expect("insert");

    let listed = list_profile_snapshots(&pool, "rustlang", 10)
        .await
        .expect("list");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].snapshot, original);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres DATABASE_URL"]
async fn list_is_newest_first_and_limited(pool: sqlx::PgPool) {
    for minute in [5, 15, 10] {
        insert_profile_snapshot(&pool, &snapshot("rustlang", minute, vec![]))
            .await
            .expect("insert");
    }
    insert_profile_snapshot(&pool, &snapshot("other", 30, vec![]))
        .await
        .expect("insert other");

    let listed = list_profile_snapshots(&pool, "rustlang", 2)
        .await
        .expect("list");

    let minutes: Vec<u32> = listed
        .iter()
        .map(|s| chrono::Timelike::minute(&s.snapshot.captured_at))
        .collect();
    assert_eq!(minutes, [15, 10]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres DATABASE_URL"]
async fn unavailable_snapshot_without_posts_is_stored(pool: sqlx::PgPool) {
    let mut original = snapshot("quiet", 0, vec![]);
    original.posts_status = PostsStatus::Unavailable;

    insert_profile_snapshot(&pool, &original)
        .await
        .expect("insert");
    let listed = list_profile_snapshots(&pool, "quiet", 20)
        .await
        .expect("list");

    assert_eq!(listed[0].snapshot.posts_status, PostsStatus::Unavailable);
    assert!(listed[0].snapshot.posts.is_empty());
    assert_eq!(listed[0].snapshot.summary.overall, Polarity::Neutral);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a live Postgres DATABASE_URL"]
async fn migrations_and_ping_work(pool: sqlx::PgPool) {
    socialpulse_db::health_check(&pool).await.expect("health");
}
