// src/models/mod.rs

pub mod follows;
pub mod message;
pub mod user;

pub use follows::Follows;
pub use message::{Message, NewMessage};
pub use user::{NewUser, User, DEFAULT_IMAGE_URL};
