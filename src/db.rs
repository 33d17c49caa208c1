use std::str::FromStr;

use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

// Schema for the three tables the model layer owns. Uniqueness and not-null
// constraints live here and nowhere else; the model structs do no validation.
const CREATE_USERS: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        image_url TEXT
    )";

const CREATE_MESSAGES: &str = "
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE
    )";

const CREATE_FOLLOWS: &str = "
    CREATE TABLE IF NOT EXISTS follows (
        user_being_followed_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        user_following_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        PRIMARY KEY (user_being_followed_id, user_following_id)
    )";

pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

pub async fn create_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_MESSAGES).execute(pool).await?;
    sqlx::query(CREATE_FOLLOWS).execute(pool).await?;
    info!("Tables users, messages, follows are ready");
    Ok(())
}

pub async fn drop_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Reverse dependency order so foreign keys never dangle mid-drop.
    sqlx::query("DROP TABLE IF EXISTS follows").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS messages").execute(pool).await?;
    sqlx::query("DROP TABLE IF EXISTS users").execute(pool).await?;
    Ok(())
}
