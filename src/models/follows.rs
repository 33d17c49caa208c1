use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

// A directed edge in the follow graph: user_following_id follows
// user_being_followed_id. Composite primary key, no other attributes.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Follows {
    pub user_being_followed_id: i64,
    pub user_following_id: i64,
}

// Nothing here rejects self-edges or duplicates; a duplicate insert fails
// with the table's primary-key constraint, same as any integrity error.
pub async fn insert(
    pool: &SqlitePool,
    followed_id: i64,
    follower_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO follows (user_being_followed_id, user_following_id) VALUES (?, ?)",
    )
    .bind(followed_id)
    .bind(follower_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(
    pool: &SqlitePool,
    followed_id: i64,
    follower_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "DELETE FROM follows WHERE user_being_followed_id = ? AND user_following_id = ?",
    )
    .bind(followed_id)
    .bind(follower_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn exists(
    pool: &SqlitePool,
    followed_id: i64,
    follower_id: i64,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follows WHERE user_being_followed_id = ? AND user_following_id = ?",
    )
    .bind(followed_id)
    .bind(follower_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}
