use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i64,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
}

// A message that has not been persisted yet.
#[derive(Debug)]
pub struct NewMessage {
    pub text: String,
    pub user_id: i64,
}

impl NewMessage {
    pub fn new(text: &str, user_id: i64) -> Self {
        NewMessage {
            text: text.to_string(),
            user_id,
        }
    }

    pub async fn save(&self, pool: &SqlitePool) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (text, timestamp, user_id) VALUES (?, ?, ?)
             RETURNING id, text, timestamp, user_id",
        )
        .bind(&self.text)
        .bind(Utc::now())
        .bind(self.user_id)
        .fetch_one(pool)
        .await
    }
}
