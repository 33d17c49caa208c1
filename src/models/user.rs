use std::fmt;

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use log::info;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::follows;
use super::message::Message;

pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub image_url: Option<String>,
}

/// A user that has been constructed but not yet persisted. The password is
/// already hashed; username and email stay optional so that a missing value
/// reaches the database as NULL and fails there, not here.
#[derive(Debug)]
pub struct NewUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub image_url: String,
}

impl User {
    /// Hash the password and build an unsaved user. Does not touch the
    /// database; call `NewUser::save` to persist.
    pub fn signup(
        username: Option<&str>,
        email: Option<&str>,
        password: &str,
        image_url: Option<&str>,
    ) -> Result<NewUser, BcryptError> {
        let hashed_password = hash(password, DEFAULT_COST)?;

        Ok(NewUser {
            id: None,
            username: username.map(str::to_string),
            email: email.map(str::to_string),
            password: hashed_password,
            image_url: image_url.unwrap_or(DEFAULT_IMAGE_URL).to_string(),
        })
    }

    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, image_url FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Look up a user by username and check the password against the stored
    /// hash. An unknown username or wrong password yields `Ok(None)`; only a
    /// database failure is an error.
    pub async fn authenticate(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password, image_url FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        let user = match user {
            Some(user) => user,
            None => {
                info!("Invalid username: {}", username);
                return Ok(None);
            }
        };

        if verify(password, &user.password).unwrap_or(false) {
            Ok(Some(user))
        } else {
            info!("Invalid password for user: {}", username);
            Ok(None)
        }
    }

    pub async fn follow(&self, pool: &SqlitePool, other: &User) -> Result<(), sqlx::Error> {
        follows::insert(pool, other.id, self.id).await
    }

    pub async fn unfollow(&self, pool: &SqlitePool, other: &User) -> Result<(), sqlx::Error> {
        follows::delete(pool, other.id, self.id).await
    }

    // Is this user following `other`?
    pub async fn is_following(&self, pool: &SqlitePool, other: &User) -> Result<bool, sqlx::Error> {
        follows::exists(pool, other.id, self.id).await
    }

    // Is this user followed by `other`?
    pub async fn is_followed_by(
        &self,
        pool: &SqlitePool,
        other: &User,
    ) -> Result<bool, sqlx::Error> {
        follows::exists(pool, self.id, other.id).await
    }

    pub async fn followers(&self, pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password, u.image_url
             FROM users u
             JOIN follows f ON f.user_following_id = u.id
             WHERE f.user_being_followed_id = ?",
        )
        .bind(self.id)
        .fetch_all(pool)
        .await
    }

    pub async fn following(&self, pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.email, u.password, u.image_url
             FROM users u
             JOIN follows f ON f.user_being_followed_id = u.id
             WHERE f.user_following_id = ?",
        )
        .bind(self.id)
        .fetch_all(pool)
        .await
    }

    pub async fn messages(&self, pool: &SqlitePool) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(
            "SELECT id, text, timestamp, user_id FROM messages WHERE user_id = ?",
        )
        .bind(self.id)
        .fetch_all(pool)
        .await
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

impl NewUser {
    /// Insert the row, letting the database assign the id unless one was
    /// pinned. Unique and not-null violations surface here as
    /// `sqlx::Error::Database`.
    pub async fn save(&self, pool: &SqlitePool) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password, image_url) VALUES (?, ?, ?, ?, ?)
             RETURNING id, username, email, password, image_url",
        )
        .bind(self.id)
        .bind(&self.username)
        .bind(&self.email)
        .bind(&self.password)
        .bind(&self.image_url)
        .fetch_one(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_hashes_the_password() {
        let new_user = User::signup(Some("testuser"), Some("test@test.com"), "password", None)
            .expect("hashing failed");

        assert_ne!(new_user.password, "password");
        assert!(verify("password", &new_user.password).unwrap());
    }

    #[test]
    fn signup_defaults_the_image_url() {
        let with_default =
            User::signup(Some("a"), Some("a@a.com"), "password", None).unwrap();
        assert_eq!(with_default.image_url, DEFAULT_IMAGE_URL);

        let with_url =
            User::signup(Some("b"), Some("b@b.com"), "password", Some("/pics/b.png")).unwrap();
        assert_eq!(with_url.image_url, "/pics/b.png");
    }

    #[test]
    fn signup_accepts_missing_fields_without_failing() {
        // No validation at construction time; the database decides later.
        let new_user = User::signup(None, Some("test@test.com"), "password", None).unwrap();
        assert!(new_user.username.is_none());
    }
}
